pub mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vocabox_core::{
    parse_word_list, resolve_access_code, CardDelimiter, Delimiters, Library, TermDelimiter,
};

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "vocabox")]
#[command(about = "Inspect and validate VocaBox categories and content packs")]
pub struct Cli {
    /// Content directory; overrides VOCABOX_CONTENT_DIR.
    #[arg(long, global = true)]
    pub content_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List categories in declaration order.
    Categories,
    /// Show one category's configuration.
    Category { key: String },
    /// List the packs of a category.
    Packs { category: String },
    /// Render a pack's cards.
    Cards { category: String, pack_id: String },
    /// Show what importing a pack would create.
    ImportPlan {
        category: String,
        pack_id: String,
        /// Populate a placeholder pack from a plain-text word list.
        #[arg(long)]
        word_list: Option<PathBuf>,
        /// space, comma, dash, or any custom separator.
        #[arg(long, default_value = "space", value_parser = parse_term_delimiter)]
        term_delimiter: TermDelimiter,
        /// newline, semicolon, or any custom separator.
        #[arg(long, default_value = "newline", value_parser = parse_card_delimiter)]
        card_delimiter: CardDelimiter,
    },
    /// Load all content and report diagnostics and card counts.
    Validate,
    /// Resolve an access code to its tier.
    AccessCode { code: String },
}

fn parse_term_delimiter(raw: &str) -> std::result::Result<TermDelimiter, String> {
    Ok(match raw {
        "space" => TermDelimiter::Space,
        "comma" => TermDelimiter::Comma,
        "dash" => TermDelimiter::Dash,
        other => TermDelimiter::Custom(other.to_string()),
    })
}

fn parse_card_delimiter(raw: &str) -> std::result::Result<CardDelimiter, String> {
    Ok(match raw {
        "newline" => CardDelimiter::Newline,
        "semicolon" => CardDelimiter::Semicolon,
        other => CardDelimiter::Custom(other.to_string()),
    })
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_content_dir(cli.content_dir.clone());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let library = load_library(&config)?;
    let output = execute(&library, &cli.command)?;
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Load content from the configured directory, or the built-in documents.
pub fn load_library(config: &Config) -> Result<Library> {
    match &config.content_dir {
        Some(dir) => {
            tracing::info!("Loading content from {}", dir.display());
            Library::from_dir(dir).with_context(|| format!("loading content from {}", dir.display()))
        }
        None => {
            tracing::info!("Loading built-in content");
            Library::builtin().context("loading built-in content")
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackSummary<'a> {
    id: &'a str,
    folder_id: Option<&'a str>,
    folder_name: Option<&'a str>,
    description: &'a str,
    requires_user_cards: bool,
    card_count: usize,
}

/// Run one command against a loaded library and return its JSON output.
pub fn execute(library: &Library, command: &Command) -> Result<Value> {
    let value = match command {
        Command::Categories => {
            let categories: Vec<_> = library.registry().categories().collect();
            serde_json::to_value(categories)?
        }
        Command::Category { key } => serde_json::to_value(library.registry().get(key)?)?,
        Command::Packs { category } => {
            let catalog = library.catalog_for(category)?;
            let packs: Vec<PackSummary> = catalog
                .list()
                .iter()
                .map(|pack| PackSummary {
                    id: &pack.id,
                    folder_id: pack.folder_id.as_deref(),
                    folder_name: pack.folder_name.as_deref(),
                    description: &pack.description,
                    requires_user_cards: pack.requires_user_cards,
                    card_count: pack.card_count(),
                })
                .collect();
            serde_json::to_value(packs)?
        }
        Command::Cards { category, pack_id } => {
            serde_json::to_value(library.instantiate_cards(category, pack_id)?)?
        }
        Command::ImportPlan {
            category,
            pack_id,
            word_list,
            term_delimiter,
            card_delimiter,
        } => {
            let plan = match word_list {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .with_context(|| format!("reading word list {}", path.display()))?;
                    let delimiters = Delimiters {
                        term: term_delimiter.clone(),
                        card: card_delimiter.clone(),
                    };
                    let entries = parse_word_list(&text, &delimiters);
                    tracing::info!("Parsed {} entries from {}", entries.len(), path.display());
                    library.import_user_cards(category, pack_id, entries)?
                }
                None => library.import_plan(category, pack_id)?,
            };
            serde_json::to_value(plan)?
        }
        Command::Validate => {
            let diagnostics = library.diagnostics();
            json!({
                "loadedAt": library.loaded_at(),
                "categories": library.registry().list_categories(),
                "packCounts": library.card_counts(),
                "diagnostics": diagnostics,
            })
        }
        Command::AccessCode { code } => {
            let entry = resolve_access_code(code)
                .with_context(|| format!("unknown access code: {}", code))?;
            json!({
                "code": entry.code,
                "tier": entry.tier,
                "tierLabel": entry.tier.label(),
                "label": entry.label,
                "limits": entry.tier.limits(),
            })
        }
    };

    Ok(value)
}
