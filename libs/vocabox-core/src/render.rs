//! Card renderers, one per card type.
//!
//! Rendering is a pure function of the stored record: no I/O, no randomness,
//! and the same input always produces the same markup. Optional fields that
//! are absent produce no fragment at all.

use crate::types::{AudioEntry, CardContent, CardType, ConceptEntry, StudyCard};

const DEFAULT_LISTENING_TITLE: &str = "Listening Clip";

/// Turns stored card content into a renderable study card.
pub trait CardRenderer: Send + Sync {
    /// Card type this renderer accepts.
    fn card_type(&self) -> CardType;

    /// Render one card. Returns `None` when the content is not of this
    /// renderer's card type.
    fn render(&self, content: &CardContent) -> Option<StudyCard>;
}

/// Get the renderer for a card type.
pub fn renderer_for(card_type: CardType) -> &'static dyn CardRenderer {
    match card_type {
        CardType::WordCard => &WordRenderer,
        CardType::SentenceCard => &SentenceRenderer,
        CardType::ConceptCard => &ConceptRenderer,
        CardType::AudioCard => &AudioRenderer,
        CardType::ParagraphCard => &PassageRenderer,
    }
}

/// Word cards are already front/back pairs.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordRenderer;

impl CardRenderer for WordRenderer {
    fn card_type(&self) -> CardType {
        CardType::WordCard
    }

    fn render(&self, content: &CardContent) -> Option<StudyCard> {
        match content {
            CardContent::Word(card) => Some(StudyCard::flip(&card.front, &card.back)),
            _ => None,
        }
    }
}

/// Sentence cards pair a prompt sentence with its translation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceRenderer;

impl CardRenderer for SentenceRenderer {
    fn card_type(&self) -> CardType {
        CardType::SentenceCard
    }

    fn render(&self, content: &CardContent) -> Option<StudyCard> {
        match content {
            CardContent::Sentence(card) => Some(StudyCard::flip(&card.front, &card.back)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConceptRenderer;

impl CardRenderer for ConceptRenderer {
    fn card_type(&self) -> CardType {
        CardType::ConceptCard
    }

    fn render(&self, content: &CardContent) -> Option<StudyCard> {
        match content {
            CardContent::Concept(entry) => Some(render_concept(entry)),
            _ => None,
        }
    }
}

fn render_concept(entry: &ConceptEntry) -> StudyCard {
    let mut front = String::from(r#"<div class="grammar-card-front">"#);
    front.push_str(&format!("<h2>{}</h2>", escape_html(&entry.title)));
    if let Some(summary) = non_blank(&entry.summary) {
        front.push_str(&format!(
            r#"<p class="grammar-summary">{}</p>"#,
            escape_html(summary)
        ));
    }
    front.push_str("</div>");

    let mut back = String::from(r#"<div class="grammar-card-back">"#);
    back.push_str(&format!(
        r#"<p class="grammar-explanation">{}</p>"#,
        escape_html(&entry.explanation)
    ));
    if !entry.examples.is_empty() {
        back.push_str(r#"<ul class="grammar-examples">"#);
        for example in &entry.examples {
            back.push_str(&format!("<li>{}</li>", escape_html(example)));
        }
        back.push_str("</ul>");
    }
    back.push_str("</div>");

    StudyCard::Flip { front, back }
}

/// Listening cards embed a player on the front and reveal the transcript on the back.
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioRenderer;

impl CardRenderer for AudioRenderer {
    fn card_type(&self) -> CardType {
        CardType::AudioCard
    }

    fn render(&self, content: &CardContent) -> Option<StudyCard> {
        match content {
            CardContent::Audio(entry) => Some(render_audio(entry)),
            _ => None,
        }
    }
}

fn render_audio(entry: &AudioEntry) -> StudyCard {
    let title = non_blank(&entry.title).unwrap_or(DEFAULT_LISTENING_TITLE);

    let mut front = String::from(r#"<div class="listening-card-front">"#);
    front.push_str(&format!(
        r#"<p class="listening-title">{}</p>"#,
        escape_html(title)
    ));
    front.push_str(r#"<audio controls preload="none" class="listening-audio">"#);
    front.push_str(&format!(
        r#"<source src="{}" type="audio/mpeg">"#,
        escape_html(&entry.audio_url)
    ));
    front.push_str("Your browser does not support the audio element.</audio>");
    front.push_str(r#"<p class="listening-hint">Tap to reveal transcript</p>"#);
    front.push_str("</div>");

    let mut back = String::from(r#"<div class="listening-card-back">"#);
    back.push_str(&format!(
        r#"<p class="listening-transcript">{}</p>"#,
        escape_html(&entry.transcript)
    ));
    if let Some(translation) = non_blank(&entry.translation) {
        back.push_str(&format!(
            r#"<p class="listening-translation">{}</p>"#,
            escape_html(translation)
        ));
    }
    back.push_str("</div>");

    StudyCard::Flip { front, back }
}

/// Reading passages pass through unchanged; they have no front/back form.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassageRenderer;

impl CardRenderer for PassageRenderer {
    fn card_type(&self) -> CardType {
        CardType::ParagraphCard
    }

    fn render(&self, content: &CardContent) -> Option<StudyCard> {
        match content {
            CardContent::Paragraph(passage) => Some(StudyCard::Passage(passage.clone())),
            _ => None,
        }
    }
}

/// Blank optional text counts as absent.
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|text| !text.trim().is_empty())
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PassageCard, TextCard};
    use pretty_assertions::assert_eq;

    fn present_simple() -> ConceptEntry {
        ConceptEntry {
            title: "Present Simple".to_string(),
            summary: Some("Subject + base form".to_string()),
            explanation: "Use for routines, facts, and general truths.".to_string(),
            examples: vec![
                "She works at a bank.".to_string(),
                "Water boils at 100°C.".to_string(),
            ],
        }
    }

    #[test]
    fn renderer_matches_card_type() {
        for card_type in CardType::ALL {
            assert_eq!(renderer_for(card_type).card_type(), card_type);
        }
    }

    #[test]
    fn concept_card_renders_examples_list() {
        let card = ConceptRenderer
            .render(&CardContent::Concept(present_simple()))
            .unwrap();
        let (front, back) = card.as_flip().unwrap();
        assert_eq!(
            front,
            r#"<div class="grammar-card-front"><h2>Present Simple</h2><p class="grammar-summary">Subject + base form</p></div>"#
        );
        assert_eq!(
            back,
            concat!(
                r#"<div class="grammar-card-back">"#,
                r#"<p class="grammar-explanation">Use for routines, facts, and general truths.</p>"#,
                r#"<ul class="grammar-examples"><li>She works at a bank.</li><li>Water boils at 100°C.</li></ul>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn concept_card_without_optional_fields() {
        let entry = ConceptEntry {
            summary: None,
            examples: vec![],
            ..present_simple()
        };
        let card = ConceptRenderer.render(&CardContent::Concept(entry)).unwrap();
        let (front, back) = card.as_flip().unwrap();
        assert!(!front.contains("grammar-summary"));
        assert!(!back.contains("<ul"));
        assert!(!back.contains("<li"));
    }

    #[test]
    fn audio_card_defaults_title_and_omits_translation() {
        let entry = AudioEntry {
            title: None,
            audio_url: "https://example.com/clip.mp3?a=1&b=2".to_string(),
            transcript: "Hello there.".to_string(),
            translation: None,
        };
        let card = AudioRenderer.render(&CardContent::Audio(entry)).unwrap();
        let (front, back) = card.as_flip().unwrap();
        assert!(front.contains(r#"<p class="listening-title">Listening Clip</p>"#));
        assert!(front.contains(r#"src="https://example.com/clip.mp3?a=1&amp;b=2""#));
        assert_eq!(
            back,
            r#"<div class="listening-card-back"><p class="listening-transcript">Hello there.</p></div>"#
        );
    }

    #[test]
    fn blank_optional_fields_are_omitted() {
        let entry = ConceptEntry {
            summary: Some(String::new()),
            ..present_simple()
        };
        let card = ConceptRenderer.render(&CardContent::Concept(entry)).unwrap();
        let (front, _) = card.as_flip().unwrap();
        assert_eq!(
            front,
            r#"<div class="grammar-card-front"><h2>Present Simple</h2></div>"#
        );

        let entry = AudioEntry {
            title: Some(String::new()),
            audio_url: "https://example.com/clip.mp3".to_string(),
            transcript: "Hello there.".to_string(),
            translation: Some("  ".to_string()),
        };
        let card = AudioRenderer.render(&CardContent::Audio(entry)).unwrap();
        let (front, back) = card.as_flip().unwrap();
        assert!(front.contains(r#"<p class="listening-title">Listening Clip</p>"#));
        assert!(!back.contains("listening-translation"));
    }

    #[test]
    fn audio_card_with_translation() {
        let entry = AudioEntry {
            title: Some("Weather Update".to_string()),
            audio_url: "https://example.com/w.mp3".to_string(),
            transcript: "Showers later.".to_string(),
            translation: Some("稍后有阵雨。".to_string()),
        };
        let card = AudioRenderer.render(&CardContent::Audio(entry)).unwrap();
        let (_, back) = card.as_flip().unwrap();
        assert!(back.ends_with(r#"<p class="listening-translation">稍后有阵雨。</p></div>"#));
    }

    #[test]
    fn text_cards_pass_through() {
        let word = CardContent::Word(TextCard::new("abandon", "v. to give up"));
        assert_eq!(
            WordRenderer.render(&word),
            Some(StudyCard::flip("abandon", "v. to give up"))
        );
        assert_eq!(SentenceRenderer.render(&word), None);
    }

    #[test]
    fn passage_keeps_its_shape() {
        let passage = PassageCard {
            id: "daily-1".to_string(),
            title: "Mindful Breaks".to_string(),
            summary: None,
            text: "A mindful break.".to_string(),
        };
        let card = PassageRenderer
            .render(&CardContent::Paragraph(passage.clone()))
            .unwrap();
        assert_eq!(card, StudyCard::Passage(passage));
        assert!(card.as_flip().is_none());
    }

    #[test]
    fn rendering_is_deterministic() {
        let content = CardContent::Concept(present_simple());
        assert_eq!(
            ConceptRenderer.render(&content),
            ConceptRenderer.render(&content)
        );
    }

    #[test]
    fn escape_markup_characters() {
        assert_eq!(escape_html(r#"<b>"A" & 'B'</b>"#), "&lt;b&gt;&quot;A&quot; &amp; &#39;B&#39;&lt;/b&gt;");
    }
}
