//! Lexicon model data
//!
//! The language model is a set of word lists and gazetteers serialized as
//! TOML. The Portuguese lexicon is embedded in the binary; a replacement can
//! be loaded from disk.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedded Portuguese lexicon
pub const EMBEDDED_PT_LEXICON: &str = include_str!("../lexicon/pt.toml");

/// Errors raised while loading a lexicon
#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse lexicon: {0}")]
    Parse(String),

    #[error("Lexicon section {0} must not be empty")]
    EmptySection(&'static str),
}

/// Serialized lexicon model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    /// Language code the lexicon describes
    pub language: String,
    pub closed_class: ClosedClass,
    pub open_class: OpenClass,
    pub entities: EntityLists,
}

/// Function words, matched exactly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClosedClass {
    pub determiners: Vec<String>,
    pub prepositions: Vec<String>,
    pub coordinating_conjunctions: Vec<String>,
    pub subordinating_conjunctions: Vec<String>,
    pub pronouns: Vec<String>,
    pub adverbs: Vec<String>,
    pub auxiliaries: Vec<String>,
}

/// Content word lists and suffix rules
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenClass {
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
    /// Nouns that the suffix rules would mistag
    pub nouns: Vec<String>,
    pub verb_suffixes: Vec<String>,
    pub adjective_suffixes: Vec<String>,
}

/// Gazetteers for named entity recognition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EntityLists {
    /// Lowercase words allowed inside a multi-word name
    pub name_particles: Vec<String>,
    pub given_names: Vec<String>,
    /// Words that make a capitalized run an organization
    pub organization_markers: Vec<String>,
    pub organizations: Vec<String>,
    pub locations: Vec<String>,
    /// Uppercase region codes
    pub state_codes: Vec<String>,
}

impl Lexicon {
    /// The embedded Portuguese lexicon
    pub fn embedded() -> Result<Self, LexiconError> {
        Self::from_toml(EMBEDDED_PT_LEXICON)
    }

    /// Parse and validate a TOML lexicon
    pub fn from_toml(source: &str) -> Result<Self, LexiconError> {
        let lexicon: Self =
            toml::from_str(source).map_err(|e| LexiconError::Parse(e.to_string()))?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    /// Load a lexicon file
    pub fn from_file(path: &Path) -> Result<Self, LexiconError> {
        let source = std::fs::read_to_string(path).map_err(|e| LexiconError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&source)
    }

    fn validate(&self) -> Result<(), LexiconError> {
        let required: [(&'static str, &[String]); 4] = [
            ("closed_class.prepositions", &self.closed_class.prepositions),
            ("entities.given_names", &self.entities.given_names),
            ("entities.organization_markers", &self.entities.organization_markers),
            ("entities.locations", &self.entities.locations),
        ];

        for (section, entries) in required {
            if entries.is_empty() {
                return Err(LexiconError::EmptySection(section));
            }
        }
        Ok(())
    }
}

/// Build a lowercase lookup set from a word list
pub(crate) fn word_set(words: &[String]) -> HashSet<String> {
    words.iter().map(|w| normalize_entry(w)).collect()
}

/// Lowercase and collapse internal whitespace
pub(crate) fn normalize_entry(entry: &str) -> String {
    entry
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_lexicon_loads() {
        let lexicon = Lexicon::embedded().unwrap();
        assert_eq!(lexicon.language, "pt");
        assert!(lexicon.entities.given_names.iter().any(|n| n == "joão"));
        assert!(lexicon.entities.state_codes.iter().any(|c| c == "SP"));
    }

    #[test]
    fn test_empty_required_section() {
        let source = r#"
            language = "pt"
            [closed_class]
            prepositions = ["de"]
            [open_class]
            [entities]
            given_names = []
            organization_markers = ["banco"]
            locations = ["recife"]
        "#;

        let err = Lexicon::from_toml(source).unwrap_err();
        assert!(matches!(err, LexiconError::EmptySection("entities.given_names")));
    }

    #[test]
    fn test_malformed_lexicon() {
        assert!(matches!(
            Lexicon::from_toml("language = "),
            Err(LexiconError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{EMBEDDED_PT_LEXICON}").unwrap();

        let lexicon = Lexicon::from_file(file.path()).unwrap();
        assert_eq!(lexicon.language, "pt");

        let missing = Lexicon::from_file(Path::new("/nonexistent/lexicon.toml"));
        assert!(matches!(missing, Err(LexiconError::Read { .. })));
    }

    #[test]
    fn test_normalize_entry() {
        assert_eq!(normalize_entry("  Rio  de Janeiro "), "rio de janeiro");
    }
}
