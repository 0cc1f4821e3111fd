//! Runtime configuration from the environment.

use std::path::PathBuf;

/// Directory with `categories.json` and one catalog per category.
pub const CONTENT_DIR_ENV: &str = "VOCABOX_CONTENT_DIR";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Load content from here instead of the built-in documents.
    pub content_dir: Option<PathBuf>,
    pub log_filter: String,
}

impl Config {
    /// Read configuration, loading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var(CONTENT_DIR_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        )
    }

    fn from_vars(content_dir: Option<String>, log_filter: Option<String>) -> Self {
        Self {
            content_dir: content_dir
                .filter(|dir| !dir.trim().is_empty())
                .map(PathBuf::from),
            log_filter: log_filter.unwrap_or_else(|| "info".into()),
        }
    }

    /// Command-line flag wins over the environment.
    pub fn with_content_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.content_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_builtin_content_and_info() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.content_dir, None);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn blank_content_dir_is_ignored() {
        let config = Config::from_vars(Some("  ".to_string()), Some("debug".to_string()));
        assert_eq!(config.content_dir, None);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn flag_overrides_env() {
        let config = Config::from_vars(Some("/env".to_string()), None)
            .with_content_dir(Some(PathBuf::from("/flag")));
        assert_eq!(config.content_dir, Some(PathBuf::from("/flag")));

        let config = Config::from_vars(Some("/env".to_string()), None).with_content_dir(None);
        assert_eq!(config.content_dir, Some(PathBuf::from("/env")));
    }
}
