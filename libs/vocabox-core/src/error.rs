//! Error types for vocabox-core.

use crate::types::{CardType, CategoryKey};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors raised while loading or querying the registry and pack catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Registry data breaks an invariant. Fatal at load time.
    #[error("invalid configuration for category '{category}': {reason}")]
    ConfigurationInvariantViolation { category: String, reason: String },

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("pack not found in {category}: {pack_id}")]
    PackNotFound { category: CategoryKey, pack_id: String },

    #[error("duplicate pack id {pack_id} in {category}")]
    DuplicatePackId { category: CategoryKey, pack_id: String },

    #[error("malformed {card_type} card #{index} in pack {pack_id}: {reason}")]
    MalformedCardShape {
        pack_id: String,
        index: usize,
        card_type: CardType,
        reason: String,
    },

    #[error("pack {0} does not accept user cards")]
    NotPlaceholder(String),

    #[error("invalid {document} document: {source}")]
    Json {
        document: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CatalogError {
    pub(crate) fn invariant(category: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigurationInvariantViolation {
            category: category.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is a lookup miss the caller can recover from.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownCategory(_) | Self::PackNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_are_recoverable() {
        assert!(CatalogError::UnknownCategory("x".to_string()).is_not_found());
        assert!(CatalogError::PackNotFound {
            category: CategoryKey::Words,
            pack_id: "x".to_string(),
        }
        .is_not_found());
        assert!(!CatalogError::invariant("words", "bad").is_not_found());
    }

    #[test]
    fn error_display_pack_not_found() {
        let error = CatalogError::PackNotFound {
            category: CategoryKey::Grammar,
            pack_id: "grammar-missing".to_string(),
        };
        assert_eq!(error.to_string(), "pack not found in grammar: grammar-missing");
    }

    #[test]
    fn error_display_malformed_shape() {
        let error = CatalogError::MalformedCardShape {
            pack_id: "words-cet4".to_string(),
            index: 2,
            card_type: CardType::WordCard,
            reason: "missing field `back`".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "malformed WordCard card #2 in pack words-cet4: missing field `back`"
        );
    }
}
