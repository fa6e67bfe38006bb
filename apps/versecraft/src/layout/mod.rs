//! Layout Composer: places verses, captions and backgrounds onto sheets.
//!
//! A composed sheet is never partially filled: the entry count must equal the
//! content type's slot count or composition fails.

pub mod geometry;
pub mod titles;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::background::{BackgroundStyle, RenderIntent, ResolvedBackground};
use crate::corpus::{Topic, Verse};
use crate::phrases::ContextualPhrase;

pub use geometry::{Guide, Rect, SlotGeometry, Unit};

// ────────────────────────────────────────────────────────────────────────────
// Content types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Stickers,
    Cards,
    Wallpapers,
}

impl ContentType {
    /// Fixed slots per sheet.
    pub fn slot_count(&self) -> usize {
        match self {
            ContentType::Stickers => geometry::STICKER_COLUMNS * geometry::STICKER_ROWS,
            ContentType::Cards => geometry::CARD_COLUMNS * geometry::CARD_ROWS,
            ContentType::Wallpapers => 1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ContentType::Stickers => "stickers",
            ContentType::Cards => "cards",
            ContentType::Wallpapers => "wallpapers",
        }
    }

    pub fn background_style(&self) -> BackgroundStyle {
        match self {
            ContentType::Stickers => BackgroundStyle::Sticker,
            ContentType::Cards => BackgroundStyle::Card,
            ContentType::Wallpapers => BackgroundStyle::Wallpaper,
        }
    }

    pub fn render_intent(&self) -> RenderIntent {
        RenderIntent::for_style(self.background_style())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Sheet model
// ────────────────────────────────────────────────────────────────────────────

/// One filled slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetItem {
    pub verse: Verse,
    /// Verse text in the caption's language, English when untranslated.
    pub text: String,
    pub background: ResolvedBackground,
    pub phrase: ContextualPhrase,
    pub slot: SlotGeometry,
    /// Card title; stickers and wallpapers have none.
    pub title: Option<String>,
}

/// A finished sheet. Immutable once built; regeneration builds a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedSheet {
    pub content_type: ContentType,
    pub page_width: f64,
    pub page_height: f64,
    pub unit: Unit,
    pub bleed_mm: f64,
    pub items: Vec<SheetItem>,
    pub guides: Vec<Guide>,
}

impl ComposedSheet {
    /// Physical page size in millimetres, `None` for screen-only sheets.
    pub fn physical_size_mm(&self) -> Option<(f64, f64)> {
        match self.unit {
            Unit::Millimeters => Some((self.page_width, self.page_height)),
            Unit::Pixels => None,
        }
    }

    /// Checks the slot count and the page frame against the content type's
    /// fixed geometry, and caps every typeset string at [`MAX_TEXT_CHARS`].
    /// Sheets arriving from outside (the export endpoint) are validated with
    /// this before rendering.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let expected = self.content_type.slot_count();
        if self.items.len() != expected {
            return Err(LayoutError::SlotCountMismatch {
                content_type: self.content_type,
                expected,
                actual: self.items.len(),
            });
        }
        let frame = geometry::geometry_for(self.content_type, false);
        let close = |a: f64, b: f64| (a - b).abs() < FRAME_TOLERANCE;
        if self.unit != frame.unit
            || !close(self.page_width, frame.width)
            || !close(self.page_height, frame.height)
            || !close(self.bleed_mm, frame.bleed_mm)
        {
            return Err(LayoutError::FrameMismatch {
                content_type: self.content_type,
            });
        }
        for (slot, item) in self.items.iter().enumerate() {
            let fields = [
                ("text", Some(item.text.as_str())),
                ("phrase", Some(item.phrase.text.as_str())),
                ("reference", Some(item.verse.reference.as_str())),
                ("title", item.title.as_deref()),
            ];
            for (field, value) in fields {
                if value.is_some_and(|v| v.chars().count() > MAX_TEXT_CHARS) {
                    return Err(LayoutError::TextTooLong {
                        slot,
                        field,
                        limit: MAX_TEXT_CHARS,
                    });
                }
            }
        }
        Ok(())
    }

    /// Copy with slot rects and guides rebuilt from the content type. Sticker
    /// cut guides are kept when the sheet carried any.
    pub fn with_canonical_geometry(&self) -> ComposedSheet {
        let cut_guides = !self.guides.is_empty();
        let geometry = geometry::geometry_for(self.content_type, cut_guides);
        let items = self
            .items
            .iter()
            .zip(geometry.slots.iter().copied())
            .map(|(item, slot)| SheetItem {
                slot,
                ..item.clone()
            })
            .collect();
        ComposedSheet {
            content_type: self.content_type,
            page_width: geometry.width,
            page_height: geometry.height,
            unit: geometry.unit,
            bleed_mm: geometry.bleed_mm,
            items,
            guides: geometry.guides,
        }
    }
}

/// Slack for page dimensions that went through a JSON round trip.
const FRAME_TOLERANCE: f64 = 1e-6;

/// Longest string any typeset field may carry. Corpus verses stay well
/// below it; shaping cost grows with length.
pub const MAX_TEXT_CHARS: usize = 600;

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("{content_type:?} sheet needs exactly {expected} items, got {actual}")]
    SlotCountMismatch {
        content_type: ContentType,
        expected: usize,
        actual: usize,
    },

    #[error("{content_type:?} sheet does not match its fixed page size")]
    FrameMismatch { content_type: ContentType },

    #[error("Slot {slot} {field} exceeds {limit} characters")]
    TextTooLong {
        slot: usize,
        field: &'static str,
        limit: usize,
    },

    #[error("Mismatched inputs: {verses} verses, {backgrounds} backgrounds, {phrases} phrases")]
    InputLengthMismatch {
        verses: usize,
        backgrounds: usize,
        phrases: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Alternating dashed cut guides on sticker sheets.
    pub sticker_cut_guides: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            sticker_cut_guides: true,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Composition
// ────────────────────────────────────────────────────────────────────────────

/// Orders entries so slot `i` holds a verse carrying `topics[i]` where one is
/// available; everything else keeps its incoming order.
fn match_topics_to_slots<T>(entries: Vec<T>, topics: &[Topic], verse_of: impl Fn(&T) -> &Verse) -> Vec<T> {
    let mut remaining: Vec<Option<T>> = entries.into_iter().map(Some).collect();
    let mut slots: Vec<Option<T>> = (0..remaining.len()).map(|_| None).collect();

    for (slot, topic) in topics.iter().enumerate().take(slots.len()) {
        let found = remaining
            .iter()
            .position(|e| e.as_ref().is_some_and(|e| verse_of(e).has_topic(*topic)));
        if let Some(i) = found {
            slots[slot] = remaining[i].take();
        }
    }

    let mut leftovers = remaining.into_iter().flatten();
    slots
        .into_iter()
        .map(|s| s.or_else(|| leftovers.next()))
        .collect::<Option<Vec<T>>>()
        .unwrap_or_default()
}

/// Composes one sheet.
///
/// `verses`, `backgrounds` and `phrases` are parallel sequences whose length
/// must equal the content type's slot count. For cards, each requested topic
/// is matched to a verse carrying it before falling back to incoming order,
/// and titles are assigned per [`titles::assign_titles`].
pub fn compose<R: Rng + ?Sized>(
    verses: Vec<Verse>,
    backgrounds: Vec<ResolvedBackground>,
    phrases: Vec<ContextualPhrase>,
    content_type: ContentType,
    topics: &[Topic],
    options: LayoutOptions,
    rng: &mut R,
) -> Result<ComposedSheet, LayoutError> {
    if verses.len() != backgrounds.len() || verses.len() != phrases.len() {
        return Err(LayoutError::InputLengthMismatch {
            verses: verses.len(),
            backgrounds: backgrounds.len(),
            phrases: phrases.len(),
        });
    }
    let expected = content_type.slot_count();
    if verses.len() != expected {
        return Err(LayoutError::SlotCountMismatch {
            content_type,
            expected,
            actual: verses.len(),
        });
    }

    let mut entries: Vec<(Verse, ResolvedBackground, ContextualPhrase)> = verses
        .into_iter()
        .zip(backgrounds)
        .zip(phrases)
        .map(|((v, b), p)| (v, b, p))
        .collect();

    let titles: Vec<Option<String>> = if content_type == ContentType::Cards {
        entries = match_topics_to_slots(entries, topics, |e| &e.0);
        let verse_refs: Vec<&Verse> = entries.iter().map(|e| &e.0).collect();
        titles::assign_titles(&verse_refs, topics, rng)
            .into_iter()
            .map(Some)
            .collect()
    } else {
        vec![None; expected]
    };

    let geometry = geometry::geometry_for(content_type, options.sticker_cut_guides);
    let items: Vec<SheetItem> = entries
        .into_iter()
        .zip(geometry.slots.iter().copied())
        .zip(titles)
        .map(|(((verse, background, phrase), slot), title)| SheetItem {
            text: verse.text_for(phrase.language).to_string(),
            verse,
            background,
            phrase,
            slot,
            title,
        })
        .collect();

    let sheet = ComposedSheet {
        content_type,
        page_width: geometry.width,
        page_height: geometry.height,
        unit: geometry.unit,
        bleed_mm: geometry.bleed_mm,
        items,
        guides: geometry.guides,
    };
    sheet.validate()?;
    Ok(sheet)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::background::theme::Theme;
    use crate::background::ProviderKind;
    use crate::corpus::Corpus;
    use crate::phrases::ContextualPhraseGenerator;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    pub(crate) fn curated_background() -> ResolvedBackground {
        ResolvedBackground {
            source_uri: "asset://curated/still-lake.png".to_string(),
            provider: ProviderKind::CuratedFallback,
            resolved_at: Utc::now(),
            theme: Theme::Peaceful,
        }
    }

    /// Builds a sheet from the first verses of the corpus carrying `topics`.
    pub(crate) fn sample_sheet(content_type: ContentType, topics: &[Topic]) -> ComposedSheet {
        let corpus = Corpus::builtin().unwrap();
        let n = content_type.slot_count();
        let verses: Vec<Verse> = corpus.verses().iter().take(n).cloned().collect();
        let gen = ContextualPhraseGenerator::new();
        let phrases = verses
            .iter()
            .map(|v| gen.generate(v, crate::corpus::Language::English))
            .collect();
        let backgrounds = (0..n).map(|_| curated_background()).collect();
        compose(
            verses,
            backgrounds,
            phrases,
            content_type,
            topics,
            LayoutOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap()
    }

    #[test]
    fn test_slot_counts_per_content_type() {
        assert_eq!(ContentType::Stickers.slot_count(), 16);
        assert_eq!(ContentType::Cards.slot_count(), 4);
        assert_eq!(ContentType::Wallpapers.slot_count(), 1);
    }

    #[test]
    fn test_sticker_sheet_is_full_a4() {
        let sheet = sample_sheet(ContentType::Stickers, &[Topic::Hope]);
        assert_eq!(sheet.items.len(), 16);
        assert_eq!(sheet.physical_size_mm(), Some((210.0, 297.0)));
        assert!(sheet.items.iter().all(|i| i.title.is_none()));
    }

    #[test]
    fn test_short_input_is_rejected_not_partially_filled() {
        let corpus = Corpus::builtin().unwrap();
        let verses: Vec<Verse> = corpus.verses()[..3].to_vec();
        let gen = ContextualPhraseGenerator::new();
        let phrases = verses
            .iter()
            .map(|v| gen.generate(v, crate::corpus::Language::English))
            .collect();
        let backgrounds = vec![curated_background(); 3];
        let err = compose(
            verses,
            backgrounds,
            phrases,
            ContentType::Cards,
            &[],
            LayoutOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::SlotCountMismatch {
                content_type: ContentType::Cards,
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_parallel_inputs_must_match() {
        let corpus = Corpus::builtin().unwrap();
        let verses: Vec<Verse> = corpus.verses()[..4].to_vec();
        let err = compose(
            verses,
            vec![curated_background(); 4],
            vec![],
            ContentType::Cards,
            &[],
            LayoutOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InputLengthMismatch { phrases: 0, .. }));
    }

    #[test]
    fn test_four_topic_cards_titled_in_input_order() {
        let topics = [Topic::Love, Topic::Faith, Topic::Hope, Topic::Peace];
        let sheet = sample_sheet(ContentType::Cards, &topics);
        let titles: Vec<_> = sheet.items.iter().map(|i| i.title.clone().unwrap()).collect();
        assert_eq!(titles, vec!["Love", "Faith", "Hope", "Peace"]);
    }

    #[test]
    fn test_card_slots_matched_to_topics() {
        // Incoming order deliberately puts the Peace verse first.
        let corpus = Corpus::builtin().unwrap();
        let picks = ["John 14:27", "Hebrews 11:1", "Jeremiah 29:11", "1 John 4:19"];
        let verses: Vec<Verse> = picks.iter().map(|r| corpus.find(r).unwrap().clone()).collect();
        let gen = ContextualPhraseGenerator::new();
        let phrases = verses
            .iter()
            .map(|v| gen.generate(v, crate::corpus::Language::English))
            .collect();
        let topics = [Topic::Love, Topic::Faith, Topic::Hope, Topic::Peace];
        let sheet = compose(
            verses,
            vec![curated_background(); 4],
            phrases,
            ContentType::Cards,
            &topics,
            LayoutOptions::default(),
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        for (item, topic) in sheet.items.iter().zip(topics) {
            assert!(item.verse.has_topic(topic), "{} lacks {topic}", item.verse.reference);
        }
        assert_eq!(sheet.items[0].verse.reference, "1 John 4:19");
    }

    #[test]
    fn test_match_keeps_order_when_nothing_matches() {
        let ordered = match_topics_to_slots(vec![1, 2, 3], &[], |_| unreachable!());
        assert_eq!(ordered, vec![1, 2, 3]);
    }

    #[test]
    fn test_wallpaper_sheet_has_pixel_frame() {
        let sheet = sample_sheet(ContentType::Wallpapers, &[]);
        assert_eq!(sheet.items.len(), 1);
        assert_eq!(sheet.physical_size_mm(), None);
        assert!(sheet.guides.is_empty());
    }

    #[test]
    fn test_sheet_round_trips_through_json() {
        let sheet = sample_sheet(ContentType::Cards, &[Topic::Hope]);
        let json = serde_json::to_string(&sheet).unwrap();
        let back: ComposedSheet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sheet);
    }

    #[test]
    fn test_tampered_page_frame_is_rejected() {
        let mut sheet = sample_sheet(ContentType::Wallpapers, &[]);
        sheet.page_width = 4000.0;
        sheet.page_height = 4000.0;
        assert_eq!(
            sheet.validate(),
            Err(LayoutError::FrameMismatch {
                content_type: ContentType::Wallpapers
            })
        );

        let mut sheet = sample_sheet(ContentType::Cards, &[]);
        sheet.unit = Unit::Pixels;
        assert!(sheet.validate().is_err());
    }

    #[test]
    fn test_oversized_text_fields_are_rejected() {
        let sheet = sample_sheet(ContentType::Stickers, &[]);
        assert!(sheet.validate().is_ok());

        let mut long_text = sheet.clone();
        long_text.items[5].text = "grace ".repeat(20_000);
        assert_eq!(
            long_text.validate(),
            Err(LayoutError::TextTooLong {
                slot: 5,
                field: "text",
                limit: MAX_TEXT_CHARS
            })
        );

        let mut long_phrase = sheet.clone();
        long_phrase.items[0].phrase.text = "x".repeat(MAX_TEXT_CHARS + 1);
        assert!(matches!(
            long_phrase.validate(),
            Err(LayoutError::TextTooLong { field: "phrase", .. })
        ));

        let mut long_title = sample_sheet(ContentType::Cards, &[]);
        long_title.items[3].title = Some("Amen ".repeat(200));
        assert!(matches!(
            long_title.validate(),
            Err(LayoutError::TextTooLong { slot: 3, field: "title", .. })
        ));
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let mut sheet = sample_sheet(ContentType::Wallpapers, &[]);
        sheet.items[0].text = "é".repeat(MAX_TEXT_CHARS);
        assert!(sheet.validate().is_ok());
    }

    #[test]
    fn test_canonical_geometry_restores_slots_and_guides() {
        let original = sample_sheet(ContentType::Stickers, &[]);
        let mut tampered = original.clone();
        tampered.items[3].slot.cell.width = 9999.0;
        tampered.guides.truncate(1);
        assert_eq!(tampered.with_canonical_geometry(), original);

        let mut bare = original.clone();
        bare.guides.clear();
        assert!(bare.with_canonical_geometry().guides.is_empty());
    }
}
