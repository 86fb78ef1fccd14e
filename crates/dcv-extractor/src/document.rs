//! Annotated document model
//!
//! One `AnnotatedDocument` is produced per input text and dropped once the
//! orchestrator has read it.

use serde::Serialize;

// ============================================================================
// Part-of-speech tags
// ============================================================================

/// Universal part-of-speech tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Det,
    Adp,
    Cconj,
    Sconj,
    Pron,
    Num,
    Punct,
    Sym,
    X,
}

impl PosTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "NOUN",
            Self::Propn => "PROPN",
            Self::Verb => "VERB",
            Self::Aux => "AUX",
            Self::Adj => "ADJ",
            Self::Adv => "ADV",
            Self::Det => "DET",
            Self::Adp => "ADP",
            Self::Cconj => "CCONJ",
            Self::Sconj => "SCONJ",
            Self::Pron => "PRON",
            Self::Num => "NUM",
            Self::Punct => "PUNCT",
            Self::Sym => "SYM",
            Self::X => "X",
        }
    }

    /// Heads of nominal phrases
    pub fn is_nominal_head(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }

    /// Tokens that may appear inside a nominal phrase
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn | Self::Adj)
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Spans and tokens
// ============================================================================

/// Token index range, end-exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Extend by `margin` tokens on both sides, clamped to `[0, limit)`
    pub fn widen(&self, margin: usize, limit: usize) -> Self {
        Self {
            start: self.start.saturating_sub(margin),
            end: self.end.saturating_add(margin).min(limit),
        }
    }
}

/// A single token with its annotations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Surface text
    pub text: String,

    /// Byte offset of the first character in the source text
    pub start: usize,

    /// Byte offset just past the last character
    pub end: usize,

    pub pos: PosTag,

    /// Every character is alphabetic
    pub is_alpha: bool,

    /// local-part@domain shaped
    pub like_email: bool,

    /// First token of a sentence
    pub is_sent_start: bool,
}

impl Token {
    pub fn lower(&self) -> String {
        self.text.to_lowercase()
    }

    /// Starts with an uppercase letter
    pub fn is_capitalized(&self) -> bool {
        self.text.chars().next().is_some_and(char::is_uppercase)
    }

    /// Two or more letters, all uppercase
    pub fn is_upper(&self) -> bool {
        let letters: Vec<char> = self.text.chars().filter(|c| c.is_alphabetic()).collect();
        letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// Named entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    Person,
    Organization,
    Location,
    /// Capitalized multi-word name of no known category
    Misc,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Person => "PERSON",
            Self::Organization => "ORGANIZATION",
            Self::Location => "LOCATION",
            Self::Misc => "MISC",
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Labeled token span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    pub label: EntityLabel,
    pub span: TokenSpan,
    pub text: String,
}

// ============================================================================
// Annotated document
// ============================================================================

/// Output of the linguistic annotator for one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotatedDocument {
    pub text: String,
    pub tokens: Vec<Token>,
    pub sentences: Vec<TokenSpan>,
    pub entities: Vec<Entity>,
    pub noun_chunks: Vec<TokenSpan>,
}

impl AnnotatedDocument {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Source text covered by a token span, original spacing kept
    ///
    /// Empty or out-of-range spans yield an empty string.
    pub fn span_text(&self, span: TokenSpan) -> &str {
        if span.is_empty() || span.end > self.tokens.len() {
            return "";
        }
        let from = self.tokens[span.start].start;
        let to = self.tokens[span.end - 1].end;
        self.text.get(from..to).unwrap_or("")
    }

    /// Whether the span is a non-empty range inside the token sequence
    pub fn contains_span(&self, span: TokenSpan) -> bool {
        !span.is_empty() && span.end <= self.tokens.len()
    }
}
