//! Verse Selector: picks the verses that fill a sheet.
//!
//! Availability wins over strict relevance: when the topic filter cannot fill
//! the request, the whole corpus becomes the candidate pool.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::corpus::{Corpus, Topic, Verse};

/// Selects verses from a shared corpus. Pure apart from the supplied PRNG.
#[derive(Debug, Clone)]
pub struct VerseSelector {
    corpus: Arc<Corpus>,
}

impl VerseSelector {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self { corpus }
    }

    #[cfg(test)]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Returns exactly `count` verses, most topic-relevant first.
    ///
    /// Algorithm:
    /// 1. Keep verses sharing at least one requested topic
    /// 2. If that leaves fewer than `count`, use the full corpus instead
    /// 3. Shuffle, then stable-sort descending by shared-topic count
    /// 4. Truncate to `count` (cycling the order if the corpus itself is smaller)
    pub fn select<R: Rng + ?Sized>(
        &self,
        count: usize,
        topics: &BTreeSet<Topic>,
        rng: &mut R,
    ) -> Vec<Verse> {
        self.select_excluding(count, topics, &BTreeSet::new(), rng)
    }

    /// Picks one distinct verse carrying each topic in `topics_in_order`, then
    /// fills any remaining slots through [`select`](Self::select).
    ///
    /// Slot `i` holds a verse tagged with `topics_in_order[i]` whenever the
    /// corpus has an unused one.
    pub fn select_for_topics<R: Rng + ?Sized>(
        &self,
        topics_in_order: &[Topic],
        count: usize,
        rng: &mut R,
    ) -> Vec<Verse> {
        let requested: BTreeSet<Topic> = topics_in_order.iter().copied().collect();
        let mut chosen: Vec<Verse> = Vec::with_capacity(count);
        let mut used: BTreeSet<&str> = BTreeSet::new();

        for topic in topics_in_order.iter().take(count) {
            let candidates: Vec<&Verse> = self
                .corpus
                .verses()
                .iter()
                .filter(|v| v.has_topic(*topic) && !used.contains(v.reference.as_str()))
                .collect();
            if let Some(&verse) = candidates.choose(rng) {
                used.insert(verse.reference.as_str());
                chosen.push(verse.clone());
            } else {
                debug!("No unused verse tagged {topic}; slot filled from the wider pool");
            }
        }

        if chosen.len() < count {
            let exclude: BTreeSet<String> = used.iter().map(|r| r.to_string()).collect();
            let rest = self.select_excluding(count - chosen.len(), &requested, &exclude, rng);
            chosen.extend(rest);
        }
        chosen
    }

    fn select_excluding<R: Rng + ?Sized>(
        &self,
        count: usize,
        topics: &BTreeSet<Topic>,
        exclude: &BTreeSet<String>,
        rng: &mut R,
    ) -> Vec<Verse> {
        if count == 0 {
            return Vec::new();
        }

        let available: Vec<&Verse> = self
            .corpus
            .verses()
            .iter()
            .filter(|v| !exclude.contains(&v.reference))
            .collect();
        // Exclusions only narrow the pool when the corpus can afford them.
        let available = if available.len() >= count {
            available
        } else {
            self.corpus.verses().iter().collect()
        };

        let matching: Vec<&Verse> = available
            .iter()
            .copied()
            .filter(|v| v.overlap(topics) > 0)
            .collect();

        let mut pool = if matching.len() >= count {
            matching
        } else {
            debug!(
                "Topic filter matched {} verses, need {}; relaxing to full pool",
                matching.len(),
                count
            );
            available
        };

        pool.shuffle(rng);
        // sort_by_key is stable, so equally relevant verses keep their shuffled order
        pool.sort_by_key(|v| Reverse(v.overlap(topics)));

        pool.iter().cycle().take(count).map(|v| (*v).clone()).collect()
    }
}
