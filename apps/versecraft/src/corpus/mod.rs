//! Corpus: the static, immutable verse collection every sheet draws from.
//!
//! Records are compiled into the binary (`data.rs`) and expanded once into
//! owned [`Verse`] values when the [`Corpus`] is built at startup.

mod data;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Topic
// ────────────────────────────────────────────────────────────────────────────

/// Thematic label attached to verses. Used only for filtering and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Topic {
    Love,
    Faith,
    Hope,
    Peace,
    Strength,
    Joy,
    Wisdom,
    Comfort,
    Courage,
    Grace,
    Gratitude,
    Guidance,
    Forgiveness,
    Patience,
}

impl Topic {
    pub const ALL: [Topic; 14] = [
        Topic::Love,
        Topic::Faith,
        Topic::Hope,
        Topic::Peace,
        Topic::Strength,
        Topic::Joy,
        Topic::Wisdom,
        Topic::Comfort,
        Topic::Courage,
        Topic::Grace,
        Topic::Gratitude,
        Topic::Guidance,
        Topic::Forgiveness,
        Topic::Patience,
    ];

    /// Capitalized display label, e.g. `"Hope"`.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Love => "Love",
            Topic::Faith => "Faith",
            Topic::Hope => "Hope",
            Topic::Peace => "Peace",
            Topic::Strength => "Strength",
            Topic::Joy => "Joy",
            Topic::Wisdom => "Wisdom",
            Topic::Comfort => "Comfort",
            Topic::Courage => "Courage",
            Topic::Grace => "Grace",
            Topic::Gratitude => "Gratitude",
            Topic::Guidance => "Guidance",
            Topic::Forgiveness => "Forgiveness",
            Topic::Patience => "Patience",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown topic: {0}")]
pub struct UnknownTopic(pub String);

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Topic::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownTopic(s.to_string()))
    }
}

impl TryFrom<String> for Topic {
    type Error = UnknownTopic;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Topic> for String {
    fn from(topic: Topic) -> Self {
        topic.label().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Language
// ────────────────────────────────────────────────────────────────────────────

/// Languages with static text tables. English is the base language and is
/// always present for every verse and every phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    Portuguese,
}

impl Language {
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Spanish => "spanish",
            Language::French => "french",
            Language::Portuguese => "portuguese",
        }
    }

    /// Parses a language name or ISO code. Unrecognised input falls back to
    /// English; a malformed language request is never an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "english" | "en" => Language::English,
            "spanish" | "es" | "español" | "espanol" => Language::Spanish,
            "french" | "fr" | "français" | "francais" => Language::French,
            "portuguese" | "pt" | "português" | "portugues" => Language::Portuguese,
            other => {
                warn!("Unrecognised language '{other}', falling back to english");
                Language::English
            }
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::from_label(&value)
    }
}

impl From<Language> for String {
    fn from(language: Language) -> Self {
        language.name().to_string()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Verse
// ────────────────────────────────────────────────────────────────────────────

/// A single scripture excerpt. Owned by the corpus and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub reference: String,
    pub text: BTreeMap<Language, String>,
    pub topics: BTreeSet<Topic>,
}

impl Verse {
    /// English text. Every corpus verse carries it.
    pub fn english(&self) -> &str {
        self.text
            .get(&Language::English)
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Text in the requested language, falling back to English.
    pub fn text_for(&self, language: Language) -> &str {
        self.text
            .get(&language)
            .map(String::as_str)
            .unwrap_or_else(|| self.english())
    }

    /// Number of topics this verse shares with `topics`.
    pub fn overlap(&self, topics: &BTreeSet<Topic>) -> usize {
        self.topics.intersection(topics).count()
    }

    pub fn has_topic(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Corpus
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Corpus is empty")]
    Empty,

    #[error("Verse {0} has no english text")]
    MissingEnglish(String),
}

/// Static compiled-in verse record.
pub(crate) struct VerseRecord {
    pub reference: &'static str,
    pub english: &'static str,
    pub spanish: &'static str,
    pub topics: &'static [Topic],
}

/// The immutable verse collection. Construct once at startup and share.
#[derive(Debug, Clone)]
pub struct Corpus {
    verses: Vec<Verse>,
}

impl Corpus {
    /// Builds a corpus from owned verses.
    ///
    /// An empty corpus is a configuration error and is rejected here, so the
    /// selector never has to handle it at request time.
    pub fn new(verses: Vec<Verse>) -> Result<Self, CorpusError> {
        if verses.is_empty() {
            return Err(CorpusError::Empty);
        }
        if let Some(v) = verses.iter().find(|v| !v.text.contains_key(&Language::English)) {
            return Err(CorpusError::MissingEnglish(v.reference.clone()));
        }
        Ok(Self { verses })
    }

    /// The compiled-in verse collection.
    pub fn builtin() -> Result<Self, CorpusError> {
        let verses = data::RECORDS
            .iter()
            .map(|r| Verse {
                reference: r.reference.to_string(),
                text: BTreeMap::from([
                    (Language::English, r.english.to_string()),
                    (Language::Spanish, r.spanish.to_string()),
                ]),
                topics: r.topics.iter().copied().collect(),
            })
            .collect();
        Self::new(verses)
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    #[cfg(test)]
    pub fn find(&self, reference: &str) -> Option<&Verse> {
        self.verses.iter().find(|v| v.reference == reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_corpus_covers_every_topic() {
        let corpus = Corpus::builtin().unwrap();
        for topic in Topic::ALL {
            assert!(
                corpus.verses().iter().any(|v| v.has_topic(topic)),
                "No verse tagged {topic}"
            );
        }
    }

    #[test]
    fn test_builtin_corpus_can_fill_a_sticker_sheet() {
        let corpus = Corpus::builtin().unwrap();
        assert!(corpus.len() >= 16, "corpus must hold at least one full sticker sheet");
    }

    #[test]
    fn test_references_are_unique() {
        let corpus = Corpus::builtin().unwrap();
        let refs: BTreeSet<_> = corpus.verses().iter().map(|v| &v.reference).collect();
        assert_eq!(refs.len(), corpus.len());
    }

    #[test]
    fn test_empty_corpus_rejected() {
        assert!(matches!(Corpus::new(vec![]), Err(CorpusError::Empty)));
    }

    #[test]
    fn test_topic_parse_is_case_insensitive() {
        assert_eq!("hope".parse::<Topic>().unwrap(), Topic::Hope);
        assert_eq!(" PEACE ".parse::<Topic>().unwrap(), Topic::Peace);
        assert!("Sadness".parse::<Topic>().is_err());
    }

    #[test]
    fn test_unknown_language_falls_back_to_english() {
        assert_eq!(Language::from_label("klingon"), Language::English);
        assert_eq!(Language::from_label("ES"), Language::Spanish);
    }

    #[test]
    fn test_text_for_missing_language_uses_english() {
        let corpus = Corpus::builtin().unwrap();
        let verse = corpus.find("John 3:16").unwrap();
        assert_eq!(verse.text_for(Language::French), verse.english());
        assert_ne!(verse.text_for(Language::Spanish), verse.english());
    }

    #[test]
    fn test_verse_serializes_topics_as_labels() {
        let corpus = Corpus::builtin().unwrap();
        let verse = corpus.find("John 3:16").unwrap();
        let json = serde_json::to_value(verse).unwrap();
        assert!(json["topics"].as_array().unwrap().contains(&"Love".into()));
        assert!(json["text"].get("english").is_some());
        let back: Verse = serde_json::from_value(json).unwrap();
        assert_eq!(&back, verse);
    }
}
