//! Card title assignment.
//!
//! Exactly four requested topics → the topics themselves, capitalized, in
//! request order. Otherwise titles come from per-topic pools, random but
//! unique within a sheet, topped up from generic fillers.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::corpus::{Topic, Verse};

/// Used when a verse's topic pool is exhausted or it has no topic at all.
pub const FILLER_TITLES: &[&str] = &[
    "Blessed",
    "Be Still",
    "Walk in Light",
    "Rejoice",
    "Faithful",
    "Beloved",
    "Amazing Grace",
    "Take Heart",
];

pub fn title_pool(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Love => &["God's Love", "Loved Beyond Measure", "Love Never Fails"],
        Topic::Faith => &["Walk by Faith", "Trust Him", "Faith Over Fear"],
        Topic::Hope => &["Hope Anchors", "A Future and a Hope", "Hope Rises"],
        Topic::Peace => &["Perfect Peace", "Peace Be Still", "Rest in Him"],
        Topic::Strength => &["Strength for Today", "Renewed Strength", "Stand Strong"],
        Topic::Joy => &["Choose Joy", "Joy Comes in the Morning", "Glad Heart"],
        Topic::Wisdom => &["Seek Wisdom", "Wise Heart", "Ask and Receive"],
        Topic::Comfort => &["You Are Held", "Never Alone", "Comfort Come"],
        Topic::Courage => &["Be Courageous", "Fear Not", "Be Strong"],
        Topic::Grace => &["Saved by Grace", "Grace Upon Grace", "Sufficient Grace"],
        Topic::Gratitude => &["Give Thanks", "Grateful Heart", "Count Your Blessings"],
        Topic::Guidance => &["Light My Path", "He Leads Me", "One Step at a Time"],
        Topic::Forgiveness => &["Forgiven", "Mercy New", "Set Free"],
        Topic::Patience => &["Wait on Him", "In His Time", "Patient Heart"],
    }
}

/// Uppercases the first character of each whitespace-separated word.
pub fn capitalize(label: &str) -> String {
    label
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The requested topic a verse carries first, else its own first topic.
pub fn best_topic(verse: &Verse, requested: &[Topic]) -> Option<Topic> {
    requested
        .iter()
        .copied()
        .find(|t| verse.has_topic(*t))
        .or_else(|| verse.topics.iter().next().copied())
}

/// One title per verse, in slot order.
pub fn assign_titles<R: Rng + ?Sized>(verses: &[&Verse], requested: &[Topic], rng: &mut R) -> Vec<String> {
    if requested.len() == 4 {
        return requested.iter().map(|t| capitalize(t.label())).collect();
    }

    let mut used: HashSet<&'static str> = HashSet::new();
    let mut titles = Vec::with_capacity(verses.len());
    for verse in verses {
        let from_pool = best_topic(verse, requested).and_then(|topic| {
            let fresh: Vec<&'static str> = title_pool(topic)
                .iter()
                .copied()
                .filter(|t| !used.contains(t))
                .collect();
            fresh.choose(rng).copied()
        });
        let title = from_pool.or_else(|| {
            let fresh: Vec<&'static str> = FILLER_TITLES
                .iter()
                .copied()
                .filter(|t| !used.contains(t))
                .collect();
            fresh.choose(rng).copied()
        });
        // Pools plus fillers outnumber any sheet's slots, so a title is always found.
        let title = title.unwrap_or(FILLER_TITLES[0]);
        used.insert(title);
        titles.push(title.to_string());
    }
    titles
}
