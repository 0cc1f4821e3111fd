//! Content library: the registry plus its five pack catalogs.
//!
//! A `Library` is built once from a set of JSON documents and never mutated.
//! Reloading means building a new `Library` and publishing it through
//! `SharedLibrary`, so readers always see a complete snapshot.

use crate::catalog::{Diagnostic, PackCatalog};
use crate::error::{CatalogError, Result};
use crate::registry::Registry;
use crate::types::{CategoryKey, ImportPlan, Pack, PackCount, StudyCard, TextCard};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// File name of the registry document inside a content directory.
pub const CATEGORIES_FILE: &str = "categories.json";

/// Raw JSON documents a library is built from.
#[derive(Debug, Clone)]
pub struct ContentSources {
    pub categories: String,
    pub catalogs: BTreeMap<CategoryKey, String>,
}

impl ContentSources {
    /// Documents embedded in the crate.
    pub fn builtin() -> Self {
        let catalogs = [
            (CategoryKey::Words, include_str!("../data/words.json")),
            (CategoryKey::Sentences, include_str!("../data/sentences.json")),
            (CategoryKey::Grammar, include_str!("../data/grammar.json")),
            (CategoryKey::Listening, include_str!("../data/listening.json")),
            (CategoryKey::Reading, include_str!("../data/reading.json")),
        ]
        .into_iter()
        .map(|(key, json)| (key, json.to_string()))
        .collect();

        Self {
            categories: include_str!("../data/categories.json").to_string(),
            catalogs,
        }
    }

    /// Read `categories.json` and one `<category>.json` per category from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |name: String| {
            let path = dir.join(name);
            std::fs::read_to_string(&path).map_err(|source| CatalogError::Io { path, source })
        };

        let categories = read(CATEGORIES_FILE.to_string())?;
        let mut catalogs = BTreeMap::new();
        for key in CategoryKey::ALL {
            catalogs.insert(key, read(catalog_file(key))?);
        }

        Ok(Self {
            categories,
            catalogs,
        })
    }
}

/// File name of a category's catalog document.
pub fn catalog_file(key: CategoryKey) -> String {
    format!("{}.json", key.as_str())
}

/// Immutable registry and pack catalogs, validated together.
#[derive(Debug, Clone)]
pub struct Library {
    registry: Registry,
    catalogs: BTreeMap<CategoryKey, PackCatalog>,
    loaded_at: DateTime<Utc>,
}

impl Library {
    /// Build from the embedded content.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(&ContentSources::builtin())
    }

    /// Build from a content directory.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        tracing::debug!(dir = %dir.display(), "loading content directory");
        Self::from_sources(&ContentSources::from_dir(dir)?)
    }

    /// Validate the registry, then decode each catalog with its category's card type.
    ///
    /// Any error aborts the whole load; there is no partial library.
    pub fn from_sources(sources: &ContentSources) -> Result<Self> {
        let registry = Registry::from_json(&sources.categories)?;

        let mut catalogs = BTreeMap::new();
        for config in registry.categories() {
            let json = sources
                .catalogs
                .get(&config.key)
                .ok_or_else(|| CatalogError::invariant(config.key.as_str(), "no pack catalog"))?;
            let catalog = PackCatalog::from_json(config.key, config.card_type, json)?;
            catalogs.insert(config.key, catalog);
        }

        let library = Self {
            registry,
            catalogs,
            loaded_at: Utc::now(),
        };

        for diagnostic in library.diagnostics() {
            tracing::warn!(%diagnostic, "content diagnostic");
        }
        tracing::debug!(
            packs = library.catalogs.values().map(PackCatalog::len).sum::<usize>(),
            "content library loaded"
        );

        Ok(library)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Catalog for a typed category.
    pub fn catalog(&self, key: CategoryKey) -> Result<&PackCatalog> {
        self.catalogs
            .get(&key)
            .ok_or_else(|| CatalogError::UnknownCategory(key.as_str().to_string()))
    }

    /// Catalog for a category key string.
    pub fn catalog_for(&self, key: &str) -> Result<&PackCatalog> {
        let config = self.registry.get(key)?;
        self.catalog(config.key)
    }

    /// Catalogs in registry order.
    pub fn catalogs(&self) -> impl Iterator<Item = &PackCatalog> {
        self.registry
            .categories()
            .filter_map(move |config| self.catalogs.get(&config.key))
    }

    pub fn get_pack(&self, category: &str, pack_id: &str) -> Result<&Pack> {
        self.catalog_for(category)?.get(pack_id)
    }

    pub fn instantiate_cards(&self, category: &str, pack_id: &str) -> Result<Vec<StudyCard>> {
        self.catalog_for(category)?.instantiate_cards(pack_id)
    }

    /// Every catalog holding `pack_id`.
    ///
    /// Pack ids are unique per catalog only, so this can return more than one hit.
    pub fn find_pack(&self, pack_id: &str) -> Vec<(CategoryKey, &Pack)> {
        self.catalogs()
            .filter_map(|catalog| {
                catalog
                    .get(pack_id)
                    .ok()
                    .map(|pack| (catalog.category(), pack))
            })
            .collect()
    }

    /// Card count of every pack, in registry then declaration order.
    pub fn card_counts(&self) -> Vec<PackCount> {
        self.catalogs()
            .flat_map(|catalog| {
                catalog.list().iter().map(move |pack| PackCount {
                    category: catalog.category(),
                    pack_id: pack.id.clone(),
                    card_count: pack.card_count(),
                    requires_user_cards: pack.requires_user_cards,
                })
            })
            .collect()
    }

    /// Non-fatal findings across all catalogs.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut diagnostics: Vec<Diagnostic> = self
            .catalogs()
            .flat_map(PackCatalog::diagnostics)
            .collect();

        let mut owners: BTreeMap<&str, Vec<CategoryKey>> = BTreeMap::new();
        for catalog in self.catalogs() {
            for pack in catalog.list() {
                owners.entry(&pack.id).or_default().push(catalog.category());
            }
        }
        diagnostics.extend(
            owners
                .into_iter()
                .filter(|(_, categories)| categories.len() > 1)
                .map(|(pack_id, categories)| Diagnostic::SharedPackId {
                    pack_id: pack_id.to_string(),
                    categories,
                }),
        );

        diagnostics
    }

    /// Owned snapshot of a pack for the card-import routine.
    pub fn import_plan(&self, category: &str, pack_id: &str) -> Result<ImportPlan> {
        let catalog = self.catalog_for(category)?;
        let pack = catalog.get(pack_id)?;
        plan_for(catalog, pack)
    }

    /// Import plan for a placeholder pack populated with user entries.
    pub fn import_user_cards(
        &self,
        category: &str,
        pack_id: &str,
        entries: Vec<TextCard>,
    ) -> Result<ImportPlan> {
        let catalog = self.catalog_for(category)?;
        let pack = catalog.populate(pack_id, entries)?;
        plan_for(catalog, &pack)
    }
}

fn plan_for(catalog: &PackCatalog, pack: &Pack) -> Result<ImportPlan> {
    Ok(ImportPlan {
        category: catalog.category(),
        pack_id: pack.id.clone(),
        folder: pack.folder(),
        cards: catalog.render_pack(pack)?,
    })
}

/// Process-wide handle publishing immutable library snapshots.
///
/// Readers take an `Arc` and keep using it for as long as they like; a reload
/// swaps the whole library in one step.
#[derive(Debug)]
pub struct SharedLibrary {
    current: RwLock<Arc<Library>>,
}

impl SharedLibrary {
    pub fn new(library: Library) -> Self {
        Self {
            current: RwLock::new(Arc::new(library)),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Library> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the current snapshot, returning the previous one.
    pub fn publish(&self, library: Library) -> Arc<Library> {
        self.swap(Arc::new(library))
    }

    /// Rebuild from `sources` and publish. On error the current snapshot stays.
    ///
    /// Returns the snapshot this call published, even if another publish
    /// has replaced it since.
    pub fn reload(&self, sources: &ContentSources) -> Result<Arc<Library>> {
        let next = Arc::new(Library::from_sources(sources)?);
        self.swap(Arc::clone(&next));
        Ok(next)
    }

    fn swap(&self, next: Arc<Library>) -> Arc<Library> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        tracing::info!(loaded_at = %next.loaded_at(), "publishing content snapshot");
        std::mem::replace(&mut *current, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CardType;
    use pretty_assertions::assert_eq;

    fn sources_with(key: CategoryKey, json: &str) -> ContentSources {
        let mut sources = ContentSources::builtin();
        sources.catalogs.insert(key, json.to_string());
        sources
    }

    #[test]
    fn builtin_library_loads_every_category() {
        let library = Library::builtin().unwrap();
        let order: Vec<CategoryKey> = library.catalogs().map(|c| c.category()).collect();
        assert_eq!(order, CategoryKey::ALL.to_vec());
        assert_eq!(
            library.catalog(CategoryKey::Grammar).unwrap().card_type(),
            CardType::ConceptCard
        );
    }

    #[test]
    fn builtin_library_has_no_diagnostics() {
        assert_eq!(Library::builtin().unwrap().diagnostics(), vec![]);
    }

    #[test]
    fn unknown_category_lookup() {
        let library = Library::builtin().unwrap();
        assert!(matches!(
            library.instantiate_cards("nonexistent-category", "words-cet4"),
            Err(CatalogError::UnknownCategory(_))
        ));
    }

    #[test]
    fn pack_in_wrong_category_is_not_found() {
        let library = Library::builtin().unwrap();
        let err = library.get_pack("sentences", "words-cet4").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn shared_pack_id_is_reported() {
        let sources = sources_with(
            CategoryKey::Sentences,
            r#"{"packs": [{"id": "words-cet4", "cards": [{"front": "你好", "back": "Hello"}]}]}"#,
        );
        let library = Library::from_sources(&sources).unwrap();
        assert_eq!(
            library.diagnostics(),
            vec![Diagnostic::SharedPackId {
                pack_id: "words-cet4".to_string(),
                categories: vec![CategoryKey::Words, CategoryKey::Sentences],
            }]
        );
        assert_eq!(library.find_pack("words-cet4").len(), 2);
    }

    #[test]
    fn malformed_catalog_aborts_load() {
        let sources = sources_with(
            CategoryKey::Grammar,
            r#"{"packs": [{"id": "grammar-x", "cards": [{"front": "a", "back": "b"}]}]}"#,
        );
        assert!(matches!(
            Library::from_sources(&sources),
            Err(CatalogError::MalformedCardShape { .. })
        ));
    }

    #[test]
    fn missing_catalog_document_aborts_load() {
        let mut sources = ContentSources::builtin();
        sources.catalogs.remove(&CategoryKey::Reading);
        assert!(matches!(
            Library::from_sources(&sources),
            Err(CatalogError::ConfigurationInvariantViolation { .. })
        ));
    }

    #[test]
    fn card_counts_cover_every_pack() {
        let library = Library::builtin().unwrap();
        let counts = library.card_counts();
        let custom = counts.iter().find(|c| c.pack_id == "words-custom").unwrap();
        assert_eq!(custom.card_count, 0);
        assert!(custom.requires_user_cards);
        let total_packs: usize = library.catalogs().map(PackCatalog::len).sum();
        assert_eq!(counts.len(), total_packs);
    }

    #[test]
    fn import_plan_copies_cards_and_folder() {
        let library = Library::builtin().unwrap();
        let plan = library.import_plan("words", "words-cet6").unwrap();
        assert_eq!(plan.folder.id, "pack-words-cet6");
        assert_eq!(plan.folder.name, "CET-6 Word Book");
        assert_eq!(plan.card_count(), 5);

        let plan = library.import_plan("reading", "reading-ielts").unwrap();
        assert_eq!(plan.folder.id, "pack-reading-ielts");
        assert_eq!(plan.folder.name, "IELTS Reading");
    }

    #[test]
    fn import_user_cards_into_placeholder() {
        let library = Library::builtin().unwrap();
        let plan = library
            .import_user_cards("words", "words-custom", vec![TextCard::new("lucid", "adj. clear")])
            .unwrap();
        assert_eq!(plan.folder.id, "default");
        assert_eq!(plan.cards, vec![StudyCard::flip("lucid", "adj. clear")]);
        assert!(library
            .get_pack("words", "words-custom")
            .unwrap()
            .cards
            .is_empty());
    }

    #[test]
    fn publish_swaps_snapshot_without_touching_readers() {
        let shared = SharedLibrary::new(Library::builtin().unwrap());
        let before = shared.snapshot();

        let sources = sources_with(CategoryKey::Words, r#"{"packs": []}"#);
        let after = shared.reload(&sources).unwrap();

        assert_eq!(before.catalog(CategoryKey::Words).unwrap().len(), 5);
        assert!(after.catalog(CategoryKey::Words).unwrap().is_empty());
        assert!(shared.snapshot().catalog(CategoryKey::Words).unwrap().is_empty());
    }

    #[test]
    fn reload_returns_its_own_snapshot() {
        let shared = SharedLibrary::new(Library::builtin().unwrap());
        let sources = sources_with(CategoryKey::Words, r#"{"packs": []}"#);
        let reloaded = shared.reload(&sources).unwrap();
        assert!(Arc::ptr_eq(&reloaded, &shared.snapshot()));

        let previous = shared.publish(Library::builtin().unwrap());
        assert!(Arc::ptr_eq(&previous, &reloaded));
        assert!(reloaded.catalog(CategoryKey::Words).unwrap().is_empty());
        assert_eq!(shared.snapshot().catalog(CategoryKey::Words).unwrap().len(), 5);
    }

    #[test]
    fn failed_reload_keeps_current_snapshot() {
        let shared = SharedLibrary::new(Library::builtin().unwrap());
        let sources = sources_with(CategoryKey::Words, "not json");
        assert!(shared.reload(&sources).is_err());
        assert_eq!(shared.snapshot().catalog(CategoryKey::Words).unwrap().len(), 5);
    }

    #[test]
    fn snapshots_are_shareable_across_threads() {
        let shared = Arc::new(SharedLibrary::new(Library::builtin().unwrap()));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                std::thread::spawn(move || {
                    shared
                        .snapshot()
                        .instantiate_cards("grammar", "grammar-tenses")
                        .unwrap()
                })
            })
            .collect();
        let results: Vec<Vec<StudyCard>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.windows(2).all(|w| w[0] == w[1]));
    }
}
