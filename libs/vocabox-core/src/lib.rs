//! Category registry and content pack catalogs for the VocaBox study app.
//!
//! Provides:
//! - Category registry (card type, study modes, default mode, behavior tag)
//! - Pack catalogs for words, sentences, grammar, listening and reading
//! - Card renderers producing front/back markup or passage records
//! - Immutable library snapshots with atomic reload
//! - Plain-text word list import and access code lookup

pub mod access;
pub mod catalog;
pub mod error;
pub mod library;
pub mod registry;
pub mod render;
pub mod types;
pub mod wordlist;

pub use access::{premium_codes, resolve_access_code, AccessCode, Tier, TierLimits, ACCESS_CODES};
pub use catalog::{Diagnostic, PackCatalog};
pub use error::{CatalogError, Result};
pub use library::{ContentSources, Library, SharedLibrary};
pub use registry::Registry;
pub use render::{renderer_for, CardRenderer};
pub use types::{
    AudioEntry, Behavior, CardContent, CardType, CategoryConfig, CategoryKey, ConceptEntry,
    FolderBinding, ImportPlan, Pack, PackCount, PassageCard, StudyCard, StudyMode, TextCard,
};
pub use wordlist::{parse_word_list, CardDelimiter, Delimiters, TermDelimiter};
