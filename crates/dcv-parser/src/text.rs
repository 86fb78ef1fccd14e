//! Plain text extractor
//!
//! Decodes UTF-8 résumé files into text.

use crate::{DocumentFormat, ParserError, Result, TextExtractor};

const UTF8_BOM: &str = "\u{feff}";

/// Plain text extractor
pub struct PlainTextExtractor {
    /// Convert Windows line endings to `\n`
    pub normalize_newlines: bool,
}

impl PlainTextExtractor {
    /// Create a new plain text extractor with default settings
    pub fn new() -> Self {
        Self {
            normalize_newlines: true,
        }
    }

    /// Toggle line ending normalization
    pub fn with_newline_normalization(mut self, enabled: bool) -> Self {
        self.normalize_newlines = enabled;
        self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextExtractor for PlainTextExtractor {
    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            ParserError::EncodingError(format!(
                "invalid UTF-8 sequence at byte {}",
                e.valid_up_to()
            ))
        })?;

        let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

        if self.normalize_newlines {
            Ok(text.replace("\r\n", "\n"))
        } else {
            Ok(text.to_string())
        }
    }

    fn supported_formats(&self) -> &[DocumentFormat] {
        &[DocumentFormat::PlainText]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_utf8() {
        let extractor = PlainTextExtractor::new();
        let text = extractor
            .extract_text("Formação: Engenharia\r\nSão Paulo".as_bytes())
            .unwrap();
        assert_eq!(text, "Formação: Engenharia\nSão Paulo");
    }

    #[test]
    fn test_strips_bom() {
        let extractor = PlainTextExtractor::new();
        let bytes = [0xEF, 0xBB, 0xBF, b'o', b'i'];
        assert_eq!(extractor.extract_text(&bytes).unwrap(), "oi");
    }

    #[test]
    fn test_keeps_crlf_when_disabled() {
        let extractor = PlainTextExtractor::new().with_newline_normalization(false);
        assert_eq!(extractor.extract_text(b"a\r\nb").unwrap(), "a\r\nb");
    }

    #[test]
    fn test_invalid_utf8() {
        let extractor = PlainTextExtractor::new();
        // Latin-1 encoded "ção"
        let err = extractor.extract_text(&[b'a', 0xE7, 0xE3, b'o']).unwrap_err();

        assert!(matches!(err, ParserError::EncodingError(_)));
        assert!(err.to_string().contains("byte 1"));
    }

    #[test]
    fn test_empty_input() {
        let extractor = PlainTextExtractor::new();
        assert_eq!(extractor.extract_text(b"").unwrap(), "");
    }
}
