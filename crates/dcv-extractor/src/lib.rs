//! DescomplicaCV Extractor - Résumé information extraction pipeline
//!
//! Turns résumé text into a structured `ExtractionResult`:
//! - Linguistic annotation: tokens, sentences, POS tags, named entities and
//!   noun chunks from a Portuguese lexicon model
//! - Pattern matching: e-mail, phone, education and experience rules
//! - Orchestration: combines entities and matches into the final record

use dcv_core::Result;

pub mod chunker;
pub mod document;
pub mod lexicon;
pub mod matcher;
pub mod model;
pub mod ner;
pub mod pipeline;
pub mod pos;
pub mod tokenizer;

pub use document::{AnnotatedDocument, Entity, EntityLabel, PosTag, Token, TokenSpan};
pub use matcher::{PatternId, PatternMatch, PatternMatcher};
pub use model::{
    init_shared_model, shared_model, LanguageModel, SharedAnnotator, UnavailableAnnotator,
};
pub use pipeline::{extract_resume_info, ResumeExtractor};

/// Trait for linguistic annotators
pub trait Annotator: Send + Sync {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;
}
