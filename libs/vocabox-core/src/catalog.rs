//! Pack catalogs.
//!
//! One catalog per category, mapping pack ids to metadata and an ordered list
//! of cards. Cards are decoded against the shape the owning category's card
//! type implies, so a mismatched card fails at load with the pack id and card
//! index rather than deep inside rendering.

use crate::error::{CatalogError, Result};
use crate::render::renderer_for;
use crate::types::{CardContent, CardType, CategoryKey, Pack, StudyCard, TextCard};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogDocument {
    packs: Vec<RawPack>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawPack {
    id: String,
    #[serde(default)]
    folder_id: Option<String>,
    #[serde(default)]
    folder_name: Option<String>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    requires_user_cards: bool,
    cards: Vec<Value>,
}

impl RawPack {
    fn decode(self, card_type: CardType) -> Result<Pack> {
        let cards = self
            .cards
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                decode_card(card_type, value).map_err(|reason| CatalogError::MalformedCardShape {
                    pack_id: self.id.clone(),
                    index,
                    card_type,
                    reason,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Pack {
            id: self.id,
            folder_id: self.folder_id,
            folder_name: self.folder_name,
            description: self.description,
            requires_user_cards: self.requires_user_cards,
            cards,
        })
    }
}

fn decode_card(card_type: CardType, value: Value) -> std::result::Result<CardContent, String> {
    let content = match card_type {
        CardType::WordCard => CardContent::Word(from_value(value)?),
        CardType::SentenceCard => CardContent::Sentence(from_value(value)?),
        CardType::ConceptCard => CardContent::Concept(from_value(value)?),
        CardType::AudioCard => CardContent::Audio(from_value(value)?),
        CardType::ParagraphCard => CardContent::Paragraph(from_value(value)?),
    };
    check_required_text(&content)?;
    Ok(content)
}

fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> std::result::Result<T, String> {
    serde_json::from_value(value).map_err(|e| e.to_string())
}

/// Reject blank required fields; serde only checks presence.
fn check_required_text(content: &CardContent) -> std::result::Result<(), String> {
    let required: Vec<(&str, &str)> = match content {
        CardContent::Word(card) | CardContent::Sentence(card) => {
            vec![("front", card.front.as_str()), ("back", card.back.as_str())]
        }
        CardContent::Concept(entry) => {
            vec![
                ("title", entry.title.as_str()),
                ("explanation", entry.explanation.as_str()),
            ]
        }
        CardContent::Audio(entry) => {
            vec![
                ("audioUrl", entry.audio_url.as_str()),
                ("transcript", entry.transcript.as_str()),
            ]
        }
        CardContent::Paragraph(passage) => vec![
            ("id", passage.id.as_str()),
            ("title", passage.title.as_str()),
            ("text", passage.text.as_str()),
        ],
    };

    match required.iter().find(|(_, text)| text.trim().is_empty()) {
        Some((field, _)) => Err(format!("field `{}` must not be empty", field)),
        None => Ok(()),
    }
}

/// Non-fatal finding about catalog content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Pack has no cards and is not flagged as a placeholder.
    EmptyPack {
        category: CategoryKey,
        pack_id: String,
    },
    /// Pack is flagged as a placeholder but ships cards anyway.
    PlaceholderWithCards {
        category: CategoryKey,
        pack_id: String,
        card_count: usize,
    },
    /// Same pack id appears in more than one catalog.
    SharedPackId {
        pack_id: String,
        categories: Vec<CategoryKey>,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPack { category, pack_id } => {
                write!(f, "{}/{} has no cards and is not a placeholder", category, pack_id)
            }
            Self::PlaceholderWithCards {
                category,
                pack_id,
                card_count,
            } => write!(
                f,
                "{}/{} requires user cards but ships {} cards",
                category, pack_id, card_count
            ),
            Self::SharedPackId {
                pack_id,
                categories,
            } => {
                let names: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
                write!(f, "pack id {} is used by {}", pack_id, names.join(", "))
            }
        }
    }
}

/// Immutable pack catalog for one category.
#[derive(Debug, Clone)]
pub struct PackCatalog {
    category: CategoryKey,
    card_type: CardType,
    packs: Vec<Pack>,
    by_id: HashMap<String, usize>,
}

impl PackCatalog {
    /// Parse a catalog document, decoding cards as `card_type`.
    pub fn from_json(category: CategoryKey, card_type: CardType, json: &str) -> Result<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|source| CatalogError::Json {
                document: category.as_str().to_string(),
                source,
            })?;

        let packs = document
            .packs
            .into_iter()
            .map(|raw| raw.decode(card_type))
            .collect::<Result<Vec<_>>>()?;

        Self::new(category, card_type, packs)
    }

    /// Build a catalog from typed packs.
    ///
    /// Rejects duplicate pack ids and cards whose shape doesn't match `card_type`.
    pub fn new(category: CategoryKey, card_type: CardType, packs: Vec<Pack>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(packs.len());

        for (idx, pack) in packs.iter().enumerate() {
            if by_id.insert(pack.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicatePackId {
                    category,
                    pack_id: pack.id.clone(),
                });
            }
            check_card_types(pack, card_type)?;
        }

        tracing::debug!(%category, packs = packs.len(), "pack catalog loaded");
        Ok(Self {
            category,
            card_type,
            packs,
            by_id,
        })
    }

    pub fn category(&self) -> CategoryKey {
        self.category
    }

    pub fn card_type(&self) -> CardType {
        self.card_type
    }

    /// Look up a pack by id.
    pub fn get(&self, pack_id: &str) -> Result<&Pack> {
        self.by_id
            .get(pack_id)
            .map(|&idx| &self.packs[idx])
            .ok_or_else(|| CatalogError::PackNotFound {
                category: self.category,
                pack_id: pack_id.to_string(),
            })
    }

    /// Packs in declaration order.
    pub fn list(&self) -> &[Pack] {
        &self.packs
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    /// Render a pack's cards in display order.
    ///
    /// The result is an owned copy; callers may keep or mutate it freely.
    pub fn instantiate_cards(&self, pack_id: &str) -> Result<Vec<StudyCard>> {
        let pack = self.get(pack_id)?;
        self.render_pack(pack)
    }

    /// Derive a populated copy of a placeholder pack from user-authored entries.
    ///
    /// The catalog itself is untouched. Only word and sentence catalogs take
    /// plain front/back entries.
    pub fn populate(&self, pack_id: &str, entries: Vec<TextCard>) -> Result<Pack> {
        let pack = self.get(pack_id)?;
        if !pack.requires_user_cards {
            return Err(CatalogError::NotPlaceholder(pack_id.to_string()));
        }

        let wrap: fn(TextCard) -> CardContent = match self.card_type {
            CardType::WordCard => CardContent::Word,
            CardType::SentenceCard => CardContent::Sentence,
            other => {
                return Err(CatalogError::MalformedCardShape {
                    pack_id: pack_id.to_string(),
                    index: 0,
                    card_type: other,
                    reason: "user entries are plain front/back pairs".to_string(),
                })
            }
        };

        let mut populated = pack.clone();
        populated.cards.extend(entries.into_iter().map(wrap));
        Ok(populated)
    }

    pub(crate) fn render_pack(&self, pack: &Pack) -> Result<Vec<StudyCard>> {
        let renderer = renderer_for(self.card_type);
        pack.cards
            .iter()
            .enumerate()
            .map(|(index, content)| {
                renderer
                    .render(content)
                    .ok_or_else(|| CatalogError::MalformedCardShape {
                        pack_id: pack.id.clone(),
                        index,
                        card_type: self.card_type,
                        reason: format!("found {} content", content.card_type()),
                    })
            })
            .collect()
    }

    /// Non-fatal findings for this catalog.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.packs
            .iter()
            .filter_map(|pack| match (pack.requires_user_cards, pack.cards.is_empty()) {
                (false, true) => Some(Diagnostic::EmptyPack {
                    category: self.category,
                    pack_id: pack.id.clone(),
                }),
                (true, false) => Some(Diagnostic::PlaceholderWithCards {
                    category: self.category,
                    pack_id: pack.id.clone(),
                    card_count: pack.cards.len(),
                }),
                _ => None,
            })
            .collect()
    }
}

fn check_card_types(pack: &Pack, card_type: CardType) -> Result<()> {
    match pack
        .cards
        .iter()
        .position(|card| card.card_type() != card_type)
    {
        Some(index) => Err(CatalogError::MalformedCardShape {
            pack_id: pack.id.clone(),
            index,
            card_type,
            reason: format!("found {} content", pack.cards[index].card_type()),
        }),
        None => Ok(()),
    }
}
