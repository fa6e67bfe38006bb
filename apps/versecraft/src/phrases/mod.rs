//! Contextual Phrase Generator: derives a short devotional caption per verse.
//!
//! The caption is a pure function of the verse and the language: category
//! comes from keyword classification, the variant comes from a rolling hash
//! of the verse reference. Nothing is random and nothing is persisted, so the
//! same verse yields the same caption across calls and across restarts.

mod tables;

use serde::{Deserialize, Serialize};

use crate::corpus::{Language, Topic, Verse};

pub use tables::PhraseKey;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseCategory {
    Comfort,
    Encouragement,
    Empowerment,
    Wisdom,
}

/// The caption attached to a verse on a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextualPhrase {
    pub category: PhraseCategory,
    pub text: String,
    /// Language the text is actually written in (English when the requested
    /// language has no table entry).
    pub language: Language,
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword sets
// ────────────────────────────────────────────────────────────────────────────

const COMFORT_KEYWORDS: &[&str] = &[
    "comfort", "fear not", "afraid", "troubled", "refuge", "rest", "brokenhearted",
    "anxious", "anxiety", "valley", "shadow", "care", "peace",
];
const EMPOWERMENT_KEYWORDS: &[&str] = &[
    "strength", "strong", "strengthen", "power", "mighty", "courage", "courageous",
    "all things", "shield", "soar",
];
const ENCOURAGEMENT_KEYWORDS: &[&str] = &[
    "hope", "future", "plans", "renew", "joy", "rejoice", "new every morning", "glad",
];
const WISDOM_KEYWORDS: &[&str] = &[
    "wisdom", "understanding", "instruct", "teach", "lamp", "path", "ways", "counsel",
    "knowledge",
];
const LOVE_KEYWORDS: &[&str] = &["love", "loved", "beloved"];

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

fn has_any_topic(verse: &Verse, topics: &[Topic]) -> bool {
    topics.iter().any(|t| verse.has_topic(*t))
}

// ────────────────────────────────────────────────────────────────────────────
// Classification
// ────────────────────────────────────────────────────────────────────────────

/// Classifies a verse into a phrase variant family.
///
/// Priority: comfort → empowerment → encouragement → wisdom → love → generic
/// wisdom. The first family whose keywords or topics match wins.
pub fn classify(verse: &Verse) -> PhraseKey {
    let text = verse.english().to_lowercase();

    if contains_any(&text, COMFORT_KEYWORDS) || has_any_topic(verse, &[Topic::Comfort]) {
        return if text.contains("valley") || text.contains("shadow") {
            PhraseKey::ComfortValley
        } else if text.contains("cast") || text.contains("care") {
            PhraseKey::ComfortCastCare
        } else {
            PhraseKey::ComfortGeneral
        };
    }

    if contains_any(&text, EMPOWERMENT_KEYWORDS)
        || has_any_topic(verse, &[Topic::Strength, Topic::Courage])
    {
        return if text.contains("all things") {
            PhraseKey::EmpowermentAllThings
        } else {
            PhraseKey::EmpowermentGeneral
        };
    }

    if contains_any(&text, ENCOURAGEMENT_KEYWORDS) || has_any_topic(verse, &[Topic::Hope, Topic::Joy])
    {
        return if text.contains("plans") || text.contains("future") {
            PhraseKey::EncouragementFuture
        } else {
            PhraseKey::EncouragementGeneral
        };
    }

    if contains_any(&text, WISDOM_KEYWORDS) || has_any_topic(verse, &[Topic::Wisdom, Topic::Guidance])
    {
        return if text.contains("lamp") || text.contains("path") {
            PhraseKey::WisdomPath
        } else {
            PhraseKey::WisdomGeneral
        };
    }

    if contains_any(&text, LOVE_KEYWORDS) || has_any_topic(verse, &[Topic::Love]) {
        return PhraseKey::Love;
    }

    PhraseKey::Fallback
}

/// Polynomial rolling hash (base 31) with 32-bit signed wraparound.
///
/// Stable across platforms and process restarts; do not change it without
/// accepting that every verse's caption flavour changes with it.
pub fn reference_hash(reference: &str) -> i32 {
    reference
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Maps a reference to a variant index in `0..variant_count`.
pub fn variant_index(reference: &str, variant_count: usize) -> usize {
    if variant_count == 0 {
        return 0;
    }
    reference_hash(reference).unsigned_abs() as usize % variant_count
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

/// Stateless phrase generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualPhraseGenerator;

impl ContextualPhraseGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Derives the caption for `verse` in `language`. A language without a
    /// table entry silently uses English.
    pub fn generate(&self, verse: &Verse, language: Language) -> ContextualPhrase {
        let key = classify(verse);
        let (variants, used_language) = match tables::variants(key, language) {
            Some(v) => (v, language),
            None => (tables::english(key), Language::English),
        };
        let index = variant_index(&verse.reference, variants.len());
        let text = variants
            .get(index)
            .copied()
            .unwrap_or(tables::english(key)[0]);

        ContextualPhrase {
            category: key.category(),
            text: text.to_string(),
            language: used_language,
        }
    }
}
