//! Sheet generation: selector → resolver + phrases → composer, per sheet.
//!
//! Flow for each requested sheet:
//!   select verses → resolve backgrounds (concurrently across the sheet) →
//!   derive captions → compose. Export is a separate, on-demand step.

pub mod handlers;

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::background::BackgroundResolver;
use crate::corpus::{Language, Topic};
use crate::layout::{self, ComposedSheet, ContentType, LayoutError, LayoutOptions};
use crate::phrases::ContextualPhraseGenerator;
use crate::selection::VerseSelector;

/// Upper bound on sheets per request.
pub const MAX_SHEETS_PER_REQUEST: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub content_type: ContentType,
    pub sheet_count: usize,
    /// Requested topics in caller order, duplicates removed.
    pub topics: Vec<Topic>,
    pub language: Language,
    /// Optional caller-supplied value; must equal the content type's slot count.
    pub items_per_sheet: Option<usize>,
    pub cut_guides: bool,
}

impl GenerationRequest {
    pub fn new(content_type: ContentType, sheet_count: usize, topics: Vec<Topic>) -> Self {
        let mut seen = BTreeSet::new();
        let topics = topics.into_iter().filter(|t| seen.insert(*t)).collect();
        Self {
            content_type,
            sheet_count,
            topics,
            language: Language::English,
            items_per_sheet: None,
            cut_guides: true,
        }
    }

    /// Checks the request and returns the effective items per sheet.
    pub fn validate(&self) -> Result<usize, GenerationError> {
        if self.sheet_count == 0 {
            return Err(GenerationError::NoSheets);
        }
        if self.sheet_count > MAX_SHEETS_PER_REQUEST {
            return Err(GenerationError::TooManySheets {
                requested: self.sheet_count,
                max: MAX_SHEETS_PER_REQUEST,
            });
        }
        let expected = self.content_type.slot_count();
        match self.items_per_sheet {
            Some(actual) if actual != expected => Err(GenerationError::ItemsPerSheetMismatch {
                content_type: self.content_type,
                expected,
                actual,
            }),
            _ => Ok(expected),
        }
    }
}

/// One batch of generated sheets, as handed to the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedBatch {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub content_type: ContentType,
    pub language: Language,
    pub sheets: Vec<ComposedSheet>,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("sheet_count must be at least 1")]
    NoSheets,

    #[error("sheet_count {requested} exceeds the maximum of {max}")]
    TooManySheets { requested: usize, max: usize },

    #[error("{content_type:?} sheets hold exactly {expected} items, not {actual}")]
    ItemsPerSheetMismatch {
        content_type: ContentType,
        expected: usize,
        actual: usize,
    },

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),
}

// ────────────────────────────────────────────────────────────────────────────
// Generator
// ────────────────────────────────────────────────────────────────────────────

pub struct SheetGenerator {
    selector: VerseSelector,
    resolver: Arc<BackgroundResolver>,
    phrases: ContextualPhraseGenerator,
}

impl SheetGenerator {
    pub fn new(selector: VerseSelector, resolver: Arc<BackgroundResolver>) -> Self {
        Self {
            selector,
            resolver,
            phrases: ContextualPhraseGenerator::new(),
        }
    }

    pub fn resolver(&self) -> &BackgroundResolver {
        &self.resolver
    }

    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedBatch, GenerationError> {
        let mut rng = StdRng::from_entropy();
        self.generate_with_rng(request, &mut rng).await
    }

    /// [`generate`](Self::generate) with an injected PRNG.
    pub async fn generate_with_rng<R: Rng + Send>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> Result<GeneratedBatch, GenerationError> {
        let per_sheet = request.validate()?;
        let topic_set: BTreeSet<Topic> = request.topics.iter().copied().collect();
        let intent = request.content_type.render_intent();
        let options = LayoutOptions {
            sticker_cut_guides: request.cut_guides,
        };

        let mut sheets = Vec::with_capacity(request.sheet_count);
        for sheet_index in 0..request.sheet_count {
            let verses = match request.content_type {
                ContentType::Cards => self.selector.select_for_topics(&request.topics, per_sheet, rng),
                _ => self.selector.select(per_sheet, &topic_set, rng),
            };

            let backgrounds = futures::future::join_all(
                verses.iter().map(|v| self.resolver.resolve(v, &intent)),
            )
            .await;
            let phrases = verses
                .iter()
                .map(|v| self.phrases.generate(v, request.language))
                .collect();

            let sheet = layout::compose(
                verses,
                backgrounds,
                phrases,
                request.content_type,
                &request.topics,
                options,
                rng,
            )?;
            info!(
                "Composed {} sheet {}/{} ({} items)",
                request.content_type.name(),
                sheet_index + 1,
                request.sheet_count,
                sheet.items.len()
            );
            sheets.push(sheet);
        }

        Ok(GeneratedBatch {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            content_type: request.content_type,
            language: request.language,
            sheets,
        })
    }
}
