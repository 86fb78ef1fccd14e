//! Language model loading and the process-wide shared instance
//!
//! The model is loaded once per process. A failed load is remembered and
//! reported as `CvError::ModelUnavailable` on every later request instead of
//! being retried.

use std::sync::{Arc, OnceLock};

use dcv_core::{CvError, ModelConfig, Result};

use crate::chunker::noun_chunks;
use crate::document::AnnotatedDocument;
use crate::lexicon::Lexicon;
use crate::ner::EntityRecognizer;
use crate::pos::PosTagger;
use crate::tokenizer::{sentence_spans, tokenize};
use crate::Annotator;

/// Outcome of the first shared model load.
static SHARED_MODEL: OnceLock<std::result::Result<Arc<LanguageModel>, String>> = OnceLock::new();

/// Loaded lexicon model; read-only after construction
#[derive(Debug, Clone)]
pub struct LanguageModel {
    language: String,
    tagger: PosTagger,
    recognizer: EntityRecognizer,
}

impl LanguageModel {
    /// Load the model described by `config`
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let lexicon = match &config.lexicon_path {
            Some(path) => Lexicon::from_file(path),
            None => Lexicon::embedded(),
        }
        .map_err(|e| CvError::ModelLoad(e.to_string()))?;

        if lexicon.language != config.language {
            return Err(CvError::ModelLoad(format!(
                "no model for language '{}' (lexicon provides '{}')",
                config.language, lexicon.language
            )));
        }

        Ok(Self::from_lexicon(&lexicon))
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        Self {
            language: lexicon.language.clone(),
            tagger: PosTagger::from_lexicon(lexicon),
            recognizer: EntityRecognizer::from_lexicon(lexicon),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Run the full annotation pipeline over `text`
    pub fn analyze(&self, text: &str) -> AnnotatedDocument {
        let mut tokens = tokenize(text);
        self.tagger.tag_all(&mut tokens);

        let sentences = sentence_spans(&tokens);
        let entities = self.recognizer.recognize(text, &tokens);
        let noun_chunks = noun_chunks(&tokens);

        AnnotatedDocument {
            text: text.to_string(),
            tokens,
            sentences,
            entities,
            noun_chunks,
        }
    }
}

impl Annotator for LanguageModel {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        Ok(self.analyze(text))
    }
}

// ============================================================================
// Shared instance
// ============================================================================

/// Load the shared model, once per process
///
/// Only the first call loads; later calls return the remembered outcome
/// whatever `config` they pass.
pub fn init_shared_model(config: &ModelConfig) -> Result<Arc<LanguageModel>> {
    SHARED_MODEL
        .get_or_init(|| match LanguageModel::load(config) {
            Ok(model) => {
                tracing::info!(language = %model.language(), "Language model loaded");
                Ok(Arc::new(model))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Language model failed to load; extraction will degrade"
                );
                Err(e.to_string())
            }
        })
        .clone()
        .map_err(CvError::ModelUnavailable)
}

/// The shared model, loading it with the default config if needed
pub fn shared_model() -> Result<Arc<LanguageModel>> {
    init_shared_model(&ModelConfig::default())
}

/// Annotator backed by the shared model
#[derive(Debug, Clone, Copy, Default)]
pub struct SharedAnnotator;

impl Annotator for SharedAnnotator {
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument> {
        shared_model()?.annotate(text)
    }
}

/// Annotator standing in for a model that failed to load
#[derive(Debug, Clone)]
pub struct UnavailableAnnotator {
    reason: String,
}

impl UnavailableAnnotator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Annotator for UnavailableAnnotator {
    fn annotate(&self, _text: &str) -> Result<AnnotatedDocument> {
        Err(CvError::ModelUnavailable(self.reason.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EntityLabel, PosTag};
    use std::io::Write;

    #[test]
    fn test_load_default_model() {
        let model = LanguageModel::load(&ModelConfig::default()).unwrap();
        assert_eq!(model.language(), "pt");
    }

    #[test]
    fn test_unsupported_language() {
        let config = ModelConfig {
            language: "en".to_string(),
            lexicon_path: None,
        };
        let err = LanguageModel::load(&config).unwrap_err();
        assert!(matches!(err, CvError::ModelLoad(_)));
        assert!(err.to_string().contains("'en'"));
    }

    #[test]
    fn test_missing_lexicon_file() {
        let config = ModelConfig {
            lexicon_path: Some("/nonexistent/pt.toml".into()),
            ..Default::default()
        };
        assert!(matches!(
            LanguageModel::load(&config),
            Err(CvError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_custom_lexicon_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            language = "pt"
            [closed_class]
            prepositions = ["em"]
            [open_class]
            [entities]
            given_names = ["zuleica"]
            organization_markers = ["cooperativa"]
            locations = ["aracaju"]
            "#
        )
        .unwrap();

        let config = ModelConfig {
            lexicon_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        let model = LanguageModel::load(&config).unwrap();
        let doc = model.analyze("Zuleica Prado mora em Aracaju");

        let labels: Vec<EntityLabel> = doc.entities.iter().map(|e| e.label).collect();
        assert_eq!(labels, vec![EntityLabel::Person, EntityLabel::Location]);
        assert_eq!(doc.entities[0].text, "Zuleica Prado");
    }

    #[test]
    fn test_analyze_populates_every_layer() {
        let model = LanguageModel::load(&ModelConfig::default()).unwrap();
        let doc = model.analyze("Maria Souza. Trabalhou com análise de dados em Curitiba.");

        assert_eq!(doc.sentences.len(), 2);
        assert!(doc.tokens.iter().all(|t| t.pos != PosTag::X));
        assert_eq!(doc.entities[0].label, EntityLabel::Person);
        assert_eq!(doc.entities[1].text, "Curitiba");
        assert!(doc
            .noun_chunks
            .iter()
            .any(|span| doc.span_text(*span) == "análise de dados"));
    }

    #[test]
    fn test_unavailable_annotator() {
        let err = UnavailableAnnotator::new("lexicon missing")
            .annotate("texto")
            .unwrap_err();
        assert!(matches!(err, CvError::ModelUnavailable(ref r) if r == "lexicon missing"));
    }
}
