//! DescomplicaCV Core - Domain models, errors, and configuration
//!
//! This crate defines the abstractions shared by the extraction pipeline:
//! - The structured résumé record (`ExtractionResult`)
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{AppConfig, ConfigError, ExtractionConfig, LoggingConfig, ModelConfig};

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::Hash;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for extraction operations
#[derive(Error, Debug)]
pub enum CvError {
    /// The language model failed to initialize; cached for the process lifetime
    #[error("Language model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Failed to load language model: {0}")]
    ModelLoad(String),

    /// Reserved. The extraction core accepts every text value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, CvError>;

// ============================================================================
// Extraction Result
// ============================================================================

/// Kind of contact information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    Email,
    Phone,
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
        }
    }
}

/// A single contact entry found in the résumé
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "type")]
    pub kind: ContactType,
    pub value: String,
}

impl Contact {
    pub fn email(value: impl Into<String>) -> Self {
        Self {
            kind: ContactType::Email,
            value: value.into(),
        }
    }

    pub fn phone(value: impl Into<String>) -> Self {
        Self {
            kind: ContactType::Phone,
            value: value.into(),
        }
    }
}

/// Structured résumé record produced by the extraction pipeline
///
/// Every list is an ordered set: insertion order, first occurrence kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// First person name found in the document
    pub name: Option<String>,

    pub organizations: Vec<String>,

    pub locations: Vec<String>,

    pub contacts: Vec<Contact>,

    /// Context snippets around education keywords
    pub education: Vec<String>,

    /// Context snippets around experience keywords
    pub experience: Vec<String>,

    /// Skill phrases, capped by `ExtractionConfig::max_skills`
    pub skills: Vec<String>,

    /// Failure marker when extraction degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// An error-flagged result with every field empty
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            error: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Whether the result carries a failure marker
    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }

    /// Whether no field was populated
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.organizations.is_empty()
            && self.locations.is_empty()
            && self.contacts.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.skills.is_empty()
    }

    /// Deduplicate every list field in place
    pub fn dedup_all(&mut self) {
        dedup_in_place(&mut self.organizations);
        dedup_in_place(&mut self.locations);
        dedup_in_place(&mut self.contacts);
        dedup_in_place(&mut self.education);
        dedup_in_place(&mut self.experience);
        dedup_in_place(&mut self.skills);
    }
}

/// Remove repeated items, keeping the first occurrence of each
pub fn dedup_in_place<T: Eq + Hash + Clone>(items: &mut Vec<T>) {
    let mut seen: HashSet<T> = HashSet::with_capacity(items.len());
    items.retain(|item| seen.insert(item.clone()));
}

// ============================================================================
// Tests
// ============================================================================
