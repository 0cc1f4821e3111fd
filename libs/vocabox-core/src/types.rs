//! Core types for the category registry and pack catalogs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level study category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKey {
    Words,
    Sentences,
    Grammar,
    Listening,
    Reading,
}

impl CategoryKey {
    /// Every category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Words,
        Self::Sentences,
        Self::Grammar,
        Self::Listening,
        Self::Reading,
    ];

    /// Get the stable key as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Words => "words",
            Self::Sentences => "sentences",
            Self::Grammar => "grammar",
            Self::Listening => "listening",
            Self::Reading => "reading",
        }
    }

    /// Parse from the stable key.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == s)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural shape a category's content takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    WordCard,
    SentenceCard,
    ConceptCard,
    AudioCard,
    ParagraphCard,
}

impl CardType {
    pub const ALL: [Self; 5] = [
        Self::WordCard,
        Self::SentenceCard,
        Self::ConceptCard,
        Self::AudioCard,
        Self::ParagraphCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WordCard => "WordCard",
            Self::SentenceCard => "SentenceCard",
            Self::ConceptCard => "ConceptCard",
            Self::AudioCard => "AudioCard",
            Self::ParagraphCard => "ParagraphCard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Review interaction style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudyMode {
    Flash,
    Typing,
    Audio,
    MultipleChoice,
    Quiz,
    Highlight,
}

impl StudyMode {
    pub const ALL: [Self; 6] = [
        Self::Flash,
        Self::Typing,
        Self::Audio,
        Self::MultipleChoice,
        Self::Quiz,
        Self::Highlight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flash => "Flash",
            Self::Typing => "Typing",
            Self::Audio => "Audio",
            Self::MultipleChoice => "MultipleChoice",
            Self::Quiz => "Quiz",
            Self::Highlight => "Highlight",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }
}

impl fmt::Display for StudyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category-level tag the study engine uses to pick reveal/scoring logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Behavior {
    #[serde(rename = "Auto-spaced repetition")]
    AutoSpacedRepetition,
    #[serde(rename = "Reveals English")]
    RevealsEnglish,
    #[serde(rename = "Structured presentation")]
    Structured,
    #[serde(rename = "Transcript on back")]
    TranscriptOnBack,
    #[serde(rename = "Vocab extraction")]
    VocabExtraction,
}

impl Behavior {
    pub const ALL: [Self; 5] = [
        Self::AutoSpacedRepetition,
        Self::RevealsEnglish,
        Self::Structured,
        Self::TranscriptOnBack,
        Self::VocabExtraction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AutoSpacedRepetition => "Auto-spaced repetition",
            Self::RevealsEnglish => "Reveals English",
            Self::Structured => "Structured presentation",
            Self::TranscriptOnBack => "Transcript on back",
            Self::VocabExtraction => "Vocab extraction",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated configuration for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub key: CategoryKey,
    pub label: String,
    pub card_type: CardType,
    /// Presentation priority order, first is most prominent.
    pub study_modes: Vec<StudyMode>,
    pub default_study_mode: StudyMode,
    pub behavior: Behavior,
}

impl CategoryConfig {
    pub fn supports(&self, mode: StudyMode) -> bool {
        self.study_modes.contains(&mode)
    }
}

/// Plain front/back card used by the words and sentences categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TextCard {
    pub front: String,
    pub back: String,
}

impl TextCard {
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
        }
    }
}

/// Grammar concept record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConceptEntry {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
}

/// Listening clip record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AudioEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Opaque resource locator handed to the audio subsystem.
    pub audio_url: String,
    pub transcript: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

/// Reading passage, consumed as a whole document rather than a flip card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PassageCard {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub text: String,
}

/// Stored card content, one variant per card type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CardContent {
    Word(TextCard),
    Sentence(TextCard),
    Concept(ConceptEntry),
    Audio(AudioEntry),
    Paragraph(PassageCard),
}

impl CardContent {
    /// The card type this content satisfies.
    pub fn card_type(&self) -> CardType {
        match self {
            Self::Word(_) => CardType::WordCard,
            Self::Sentence(_) => CardType::SentenceCard,
            Self::Concept(_) => CardType::ConceptCard,
            Self::Audio(_) => CardType::AudioCard,
            Self::Paragraph(_) => CardType::ParagraphCard,
        }
    }
}

/// Renderable card handed to study UIs and the import routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StudyCard {
    Flip { front: String, back: String },
    Passage(PassageCard),
}

impl StudyCard {
    pub fn flip(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self::Flip {
            front: front.into(),
            back: back.into(),
        }
    }

    /// Front/back pair, if this is a flip card.
    pub fn as_flip(&self) -> Option<(&str, &str)> {
        match self {
            Self::Flip { front, back } => Some((front, back)),
            Self::Passage(_) => None,
        }
    }
}

/// Named bundle of pre-authored cards for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_name: Option<String>,
    pub description: String,
    /// Placeholder packs are populated from user-authored content.
    pub requires_user_cards: bool,
    pub cards: Vec<CardContent>,
}

impl Pack {
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Destination folder for importing this pack.
    ///
    /// Packs without a `folderId` get `pack-<id>`, the convention every other
    /// pack follows; a missing `folderName` falls back to the pack id.
    pub fn folder(&self) -> FolderBinding {
        FolderBinding {
            id: self
                .folder_id
                .clone()
                .unwrap_or_else(|| format!("pack-{}", self.id)),
            name: self.folder_name.clone().unwrap_or_else(|| self.id.clone()),
        }
    }
}

/// Folder a pack's cards are merged into on import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderBinding {
    pub id: String,
    pub name: String,
}

/// Owned snapshot of a pack ready for the card-import routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub category: CategoryKey,
    pub pack_id: String,
    pub folder: FolderBinding,
    pub cards: Vec<StudyCard>,
}

impl ImportPlan {
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }
}

/// Per-pack card count, for tier checks done outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackCount {
    pub category: CategoryKey,
    pub pack_id: String,
    pub card_count: usize,
    pub requires_user_cards: bool,
}
