//! DescomplicaCV Parser - Document text extraction
//!
//! Résumés arrive as:
//! - PDF documents
//! - Microsoft Word (DOCX)
//! - Plain text files
//!
//! Each extractor implements the `TextExtractor` trait and turns raw bytes
//! into a single linear text string. Only the plain-text extractor ships
//! here; container formats are plugged into an `ExtractorRegistry` by the
//! caller.

pub mod text;

pub use text::PlainTextExtractor;

use serde::Serialize;
use std::path::Path;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during text extraction
#[derive(Error, Debug)]
pub enum ParserError {
    /// File format is not supported
    #[error("Unsupported file format: {0}. Supported formats: pdf, docx, txt")]
    UnsupportedFormat(String),

    /// Supported format, but no extractor was registered for it
    #[error("No text extractor registered for {0} documents")]
    NoExtractor(DocumentFormat),

    /// Encoding error
    #[error("Text encoding error: {0}")]
    EncodingError(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// Document Formats
// ============================================================================

/// Supported résumé formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    #[serde(rename = "txt")]
    PlainText,
}

impl DocumentFormat {
    /// Every format the service accepts
    pub const ALL: [DocumentFormat; 3] = [Self::Pdf, Self::Docx, Self::PlainText];

    /// Detect format from extension (with or without the leading dot)
    pub fn from_extension(ext: &str) -> Result<Self> {
        let normalized = ext.trim_start_matches('.').to_lowercase();
        match normalized.as_str() {
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::PlainText),
            _ => Err(ParserError::UnsupportedFormat(format!(".{normalized}"))),
        }
    }

    /// Detect format from path
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| ParserError::UnsupportedFormat("(no extension)".to_string()))?;
        Self::from_extension(ext)
    }

    /// MIME type reported for the format
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::PlainText => "text/plain",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::PlainText => write!(f, "txt"),
        }
    }
}

// ============================================================================
// Document Summary
// ============================================================================

/// Characters kept in a `DocumentInfo` text sample
pub const TEXT_SAMPLE_CHARS: usize = 100;

/// Short description of an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub format: DocumentFormat,
    pub mime_type: &'static str,
    pub char_count: usize,
    pub line_count: usize,
    /// First `TEXT_SAMPLE_CHARS` characters, suffixed with "..." when cut
    pub text_sample: String,
}

impl DocumentInfo {
    /// Summarize extracted text
    pub fn summarize(format: DocumentFormat, text: &str) -> Self {
        let char_count = text.chars().count();
        let text_sample = if char_count > TEXT_SAMPLE_CHARS {
            let cut: String = text.chars().take(TEXT_SAMPLE_CHARS).collect();
            format!("{cut}...")
        } else {
            text.to_string()
        };

        Self {
            format,
            mime_type: format.mime_type(),
            char_count,
            line_count: text.matches('\n').count() + 1,
            text_sample,
        }
    }
}

// ============================================================================
// Extractor Trait
// ============================================================================

/// Trait for document text extractors
pub trait TextExtractor: Send + Sync {
    /// Produce the linear text of a document
    fn extract_text(&self, bytes: &[u8]) -> Result<String>;

    /// Get supported formats
    fn supported_formats(&self) -> &[DocumentFormat];

    /// Check if this extractor can handle a format
    fn can_extract(&self, format: DocumentFormat) -> bool {
        self.supported_formats().contains(&format)
    }
}

// ============================================================================
// Extractor Registry
// ============================================================================

/// Registry of available extractors
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Registry with the built-in plain-text extractor
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PlainTextExtractor::new());
        registry
    }

    /// Register an extractor; earlier registrations win for a shared format
    pub fn register<E: TextExtractor + 'static>(&mut self, extractor: E) {
        self.extractors.push(Box::new(extractor));
    }

    /// Find an extractor for a format
    pub fn find_extractor(&self, format: DocumentFormat) -> Option<&dyn TextExtractor> {
        self.extractors
            .iter()
            .find(|e| e.can_extract(format))
            .map(|e| e.as_ref())
    }

    /// Formats with at least one registered extractor
    pub fn available_formats(&self) -> Vec<DocumentFormat> {
        DocumentFormat::ALL
            .into_iter()
            .filter(|f| self.find_extractor(*f).is_some())
            .collect()
    }

    /// Extract text using the appropriate extractor
    pub fn extract(&self, bytes: &[u8], format: DocumentFormat) -> Result<String> {
        let extractor = self
            .find_extractor(format)
            .ok_or(ParserError::NoExtractor(format))?;

        let text = extractor.extract_text(bytes)?;
        tracing::debug!(
            %format,
            bytes = bytes.len(),
            chars = text.len(),
            "Extracted document text"
        );
        Ok(text)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ============================================================================
// Tests
// ============================================================================
