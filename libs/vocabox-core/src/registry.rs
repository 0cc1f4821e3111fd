//! Category registry.
//!
//! Maps each study category to its card type, supported study modes, default
//! mode and behavior tag. The registry is validated once at construction and
//! never mutated afterwards; a reload builds a fresh registry instead.

use crate::error::{CatalogError, Result};
use crate::types::{Behavior, CardType, CategoryConfig, CategoryKey, StudyMode};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

const BUILTIN_CATEGORIES: &str = include_str!("../data/categories.json");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDocument {
    categories: Vec<RawCategory>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCategory {
    key: String,
    label: String,
    card_type: String,
    study_modes: Vec<String>,
    default_study_mode: String,
    behavior: String,
}

impl RawCategory {
    fn resolve(self) -> Result<CategoryConfig> {
        let key = CategoryKey::parse(&self.key)
            .ok_or_else(|| CatalogError::invariant(&self.key, "unknown category key"))?;

        let card_type = CardType::parse(&self.card_type).ok_or_else(|| {
            CatalogError::invariant(&self.key, format!("unknown card type '{}'", self.card_type))
        })?;

        let study_modes = self
            .study_modes
            .iter()
            .map(|mode| {
                StudyMode::parse(mode).ok_or_else(|| {
                    CatalogError::invariant(&self.key, format!("unknown study mode '{}'", mode))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let default_study_mode = StudyMode::parse(&self.default_study_mode).ok_or_else(|| {
            CatalogError::invariant(
                &self.key,
                format!("unknown default study mode '{}'", self.default_study_mode),
            )
        })?;

        let behavior = Behavior::parse(&self.behavior).ok_or_else(|| {
            CatalogError::invariant(&self.key, format!("unknown behavior '{}'", self.behavior))
        })?;

        Ok(CategoryConfig {
            key,
            label: self.label,
            card_type,
            study_modes,
            default_study_mode,
            behavior,
        })
    }
}

/// Immutable, validated category table.
#[derive(Debug, Clone)]
pub struct Registry {
    categories: Vec<CategoryConfig>,
    by_key: HashMap<CategoryKey, usize>,
}

impl Registry {
    /// The registry shipped with the library.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATEGORIES)
    }

    /// Parse and validate a registry document.
    pub fn from_json(json: &str) -> Result<Self> {
        let document: RegistryDocument =
            serde_json::from_str(json).map_err(|source| CatalogError::Json {
                document: "categories".to_string(),
                source,
            })?;

        let configs = document
            .categories
            .into_iter()
            .map(RawCategory::resolve)
            .collect::<Result<Vec<_>>>()?;

        Self::from_configs(configs)
    }

    /// Validate already-typed configs.
    ///
    /// Checks default-mode membership, non-empty and duplicate-free mode lists,
    /// unique category keys, a distinct card type per category, and that every
    /// category is present.
    pub fn from_configs(categories: Vec<CategoryConfig>) -> Result<Self> {
        let mut by_key = HashMap::new();
        let mut card_types = HashMap::new();

        for (idx, config) in categories.iter().enumerate() {
            validate_study_modes(config)?;

            if by_key.insert(config.key, idx).is_some() {
                return Err(CatalogError::invariant(
                    config.key.as_str(),
                    "duplicate category key",
                ));
            }

            if let Some(other) = card_types.insert(config.card_type, config.key) {
                return Err(CatalogError::invariant(
                    config.key.as_str(),
                    format!("card type {} is already used by {}", config.card_type, other),
                ));
            }
        }

        if let Some(missing) = CategoryKey::ALL.iter().find(|k| !by_key.contains_key(*k)) {
            return Err(CatalogError::invariant(
                missing.as_str(),
                "category is not configured",
            ));
        }

        tracing::debug!(count = categories.len(), "category registry validated");
        Ok(Self { categories, by_key })
    }

    /// Look up a category by its stable key.
    pub fn get(&self, key: &str) -> Result<&CategoryConfig> {
        CategoryKey::parse(key)
            .and_then(|k| self.config(k))
            .ok_or_else(|| CatalogError::UnknownCategory(key.to_string()))
    }

    /// Look up a category by typed key.
    pub fn config(&self, key: CategoryKey) -> Option<&CategoryConfig> {
        self.by_key.get(&key).map(|&idx| &self.categories[idx])
    }

    /// Category keys in declaration order.
    pub fn list_categories(&self) -> Vec<CategoryKey> {
        self.categories.iter().map(|c| c.key).collect()
    }

    pub fn categories(&self) -> impl Iterator<Item = &CategoryConfig> {
        self.categories.iter()
    }

    /// Whether `mode` is legal for the category. Unknown categories support nothing.
    pub fn is_study_mode_supported(&self, key: &str, mode: StudyMode) -> bool {
        self.get(key).map(|c| c.supports(mode)).unwrap_or(false)
    }
}

fn validate_study_modes(config: &CategoryConfig) -> Result<()> {
    let category = config.key.as_str();

    if config.study_modes.is_empty() {
        return Err(CatalogError::invariant(category, "study modes must not be empty"));
    }

    let mut seen = HashSet::new();
    for mode in &config.study_modes {
        if !seen.insert(*mode) {
            return Err(CatalogError::invariant(
                category,
                format!("study mode {} is listed twice", mode),
            ));
        }
    }

    if !config.supports(config.default_study_mode) {
        return Err(CatalogError::invariant(
            category,
            format!(
                "default study mode {} is not among its study modes",
                config.default_study_mode
            ),
        ));
    }

    Ok(())
}
