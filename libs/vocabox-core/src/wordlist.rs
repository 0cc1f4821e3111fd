//! Plain-text word list import.
//!
//! # Format
//! ```text
//! abandon to give up completely
//! benefit an advantage
//! ```
//!
//! Cards are separated by the card delimiter (newline by default) and each
//! card splits on the first term delimiter (space by default): the left side
//! is the front, everything after it is the back.

use crate::types::TextCard;
use serde::{Deserialize, Serialize};

/// Separator between a term and its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermDelimiter {
    Space,
    Comma,
    Dash,
    /// Empty custom delimiters fall back to a space.
    Custom(String),
}

impl Default for TermDelimiter {
    fn default() -> Self {
        Self::Space
    }
}

impl TermDelimiter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Space => " ",
            Self::Comma => ",",
            Self::Dash => "-",
            Self::Custom(s) if !s.is_empty() => s.as_str(),
            Self::Custom(_) => " ",
        }
    }
}

/// Separator between cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardDelimiter {
    Newline,
    Semicolon,
    /// Empty custom delimiters fall back to a newline.
    Custom(String),
}

impl Default for CardDelimiter {
    fn default() -> Self {
        Self::Newline
    }
}

impl CardDelimiter {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Newline => "\n",
            Self::Semicolon => ";",
            Self::Custom(s) if !s.is_empty() => s.as_str(),
            Self::Custom(_) => "\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Delimiters {
    pub term: TermDelimiter,
    pub card: CardDelimiter,
}

/// Parse a word list into front/back entries.
///
/// Chunks without a term delimiter, or with an empty front or back, are skipped.
pub fn parse_word_list(text: &str, delimiters: &Delimiters) -> Vec<TextCard> {
    let term = delimiters.term.as_str();

    text.split(delimiters.card.as_str())
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| {
            let (front, back) = chunk.split_once(term)?;
            let (front, back) = (front.trim(), back.trim());
            if front.is_empty() || back.is_empty() {
                None
            } else {
                Some(TextCard::new(front, back))
            }
        })
        .collect()
}
