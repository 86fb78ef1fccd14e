//! Extraction orchestration
//!
//! Annotates the text, runs the pattern matcher and folds entities, matches
//! and noun chunks into an `ExtractionResult`. Never fails: annotator and
//! document errors become the result's `error` marker.

use std::collections::HashSet;
use std::sync::Arc;

use dcv_core::{AppConfig, Contact, ExtractionConfig, ExtractionResult};
use dcv_parser::{DocumentFormat, ExtractorRegistry};

use crate::document::{AnnotatedDocument, EntityLabel};
use crate::matcher::{PatternId, PatternMatch, PatternMatcher};
use crate::model::{LanguageModel, SharedAnnotator, UnavailableAnnotator};
use crate::Annotator;

/// Extract résumé fields with the shared model and default settings
pub fn extract_resume_info(text: &str) -> ExtractionResult {
    ResumeExtractor::shared().extract(text)
}

/// Résumé extraction pipeline
#[derive(Clone)]
pub struct ResumeExtractor {
    annotator: Arc<dyn Annotator>,
    matcher: PatternMatcher,
    config: ExtractionConfig,
}

impl ResumeExtractor {
    pub fn new(annotator: Arc<dyn Annotator>) -> Self {
        Self {
            annotator,
            matcher: PatternMatcher::new(),
            config: ExtractionConfig::default(),
        }
    }

    /// Pipeline over the process-wide shared model
    pub fn shared() -> Self {
        Self::new(Arc::new(SharedAnnotator))
    }

    /// Pipeline with its own model built from `config`
    ///
    /// A model that fails to load yields a pipeline whose results are all
    /// degraded.
    pub fn from_config(config: &AppConfig) -> Self {
        let annotator: Arc<dyn Annotator> = match LanguageModel::load(&config.model) {
            Ok(model) => Arc::new(model),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Language model failed to load; extraction will degrade"
                );
                Arc::new(UnavailableAnnotator::new(e.to_string()))
            }
        };
        Self::new(annotator).with_config(config.extraction.clone())
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Extract résumé fields from plain text
    pub fn extract(&self, text: &str) -> ExtractionResult {
        let doc = match self.annotator.annotate(text) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(error = %e, "Annotation failed; returning degraded result");
                return ExtractionResult::degraded(e.to_string());
            }
        };

        let matches = self.matcher.find_matches(&doc);
        tracing::debug!(
            tokens = doc.len(),
            entities = doc.entities.len(),
            matches = matches.len(),
            "Annotated document"
        );

        self.assemble(&doc, &matches)
    }

    /// Extract text from a document, then résumé fields from the text
    pub fn extract_document(
        &self,
        registry: &ExtractorRegistry,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> ExtractionResult {
        match registry.extract(bytes, format) {
            Ok(text) => self.extract(&text),
            Err(e) => {
                tracing::warn!(%format, error = %e, "Text extraction failed");
                ExtractionResult::degraded(e.to_string())
            }
        }
    }

    /// Fold annotations and matches into a result
    pub fn assemble(&self, doc: &AnnotatedDocument, matches: &[PatternMatch]) -> ExtractionResult {
        let mut result = ExtractionResult::default();

        for entity in &doc.entities {
            match entity.label {
                EntityLabel::Person if result.name.is_none() => {
                    result.name = Some(entity.text.clone());
                }
                EntityLabel::Organization => result.organizations.push(entity.text.clone()),
                EntityLabel::Location => result.locations.push(entity.text.clone()),
                _ => {}
            }
        }

        for m in matches {
            match m.pattern_id {
                PatternId::Email => result.contacts.push(Contact::email(m.matched_text.clone())),
                PatternId::Phone => result.contacts.push(Contact::phone(m.matched_text.clone())),
                PatternId::Education => result.education.push(self.context(doc, m)),
                PatternId::Experience => result.experience.push(self.context(doc, m)),
            }
        }

        result.skills = self.skills(doc, &result);
        result.skills.truncate(self.config.max_skills);
        result.dedup_all();
        result
    }

    /// Match text widened by the context window, clamped to the document
    fn context(&self, doc: &AnnotatedDocument, m: &PatternMatch) -> String {
        let window = m.token_span.widen(self.config.context_window, doc.len());
        doc.span_text(window).to_string()
    }

    /// Noun chunks of skill length not already claimed by another field
    fn skills(&self, doc: &AnnotatedDocument, result: &ExtractionResult) -> Vec<String> {
        let claimed: HashSet<String> = result
            .contacts
            .iter()
            .map(|c| &c.value)
            .chain(&result.education)
            .chain(&result.experience)
            .chain(&result.organizations)
            .chain(&result.locations)
            .map(|s| s.to_lowercase())
            .collect();

        let lengths = self.config.skill_chunk_min_tokens..=self.config.skill_chunk_max_tokens;

        doc.noun_chunks
            .iter()
            .filter(|span| lengths.contains(&span.len()))
            .map(|span| doc.span_text(*span))
            .filter(|text| !text.is_empty() && !claimed.contains(&text.to_lowercase()))
            .map(str::to_string)
            .collect()
    }
}

impl Default for ResumeExtractor {
    fn default() -> Self {
        Self::shared()
    }
}

impl std::fmt::Debug for ResumeExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResumeExtractor")
            .field("matcher", &self.matcher)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
