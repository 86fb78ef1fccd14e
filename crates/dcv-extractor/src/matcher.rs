//! Rule-based pattern matching over annotated documents
//!
//! Patterns run in registration order; each reports its matches left to
//! right. Matches of one pattern never overlap; matches of different
//! patterns may.

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::document::{AnnotatedDocument, TokenSpan};

/// Phone shape over the literal surface text, e.g. `(11)91234-5678`
static PHONE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Longest token run tried as a phone number
const MAX_PHONE_TOKENS: usize = 6;

/// Literal phone shapes accepted without the regex; `d` is any ASCII digit
const PHONE_SHAPES: &[&str] = &[
    "(dd)ddddd-dddd",
    "(dd)dddd-dddd",
    "dd-ddddd-dddd",
    "dd-dddd-dddd",
    "dd ddddd-dddd",
];

const EDUCATION_KEYWORDS: &[&str] = &[
    "graduação",
    "graduacao",
    "formação",
    "formacao",
    "bacharel",
    "bacharelado",
    "licenciatura",
    "mestrado",
    "doutorado",
    "especialização",
    "especializacao",
    "pós-graduação",
    "pos-graduacao",
];

const EXPERIENCE_KEYWORDS: &[&str] = &[
    "experiência",
    "experiencia",
    "profissional",
    "trabalhou",
    "atuou",
];

fn phone_pattern() -> &'static Regex {
    PHONE_PATTERN.get_or_init(|| {
        Regex::new(r"^\(?[0-9]{2}\)?[ -]?[0-9]{4,5}[- ][0-9]{4}$")
            .expect("phone regex must compile")
    })
}

// ============================================================================
// Pattern Table
// ============================================================================

/// Registered pattern identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatternId {
    Email,
    Phone,
    Education,
    Experience,
}

impl PatternId {
    /// Default registration order
    pub const REGISTERED: [PatternId; 4] = [
        PatternId::Email,
        PatternId::Phone,
        PatternId::Education,
        PatternId::Experience,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Phone => "PHONE",
            Self::Education => "EDUCATION",
            Self::Experience => "EXPERIENCE",
        }
    }

    /// Token spans this pattern matches, left to right
    pub fn find_spans(self, doc: &AnnotatedDocument) -> Vec<TokenSpan> {
        match self {
            Self::Email => email_spans(doc),
            Self::Phone => phone_spans(doc),
            Self::Education => keyword_spans(doc, EDUCATION_KEYWORDS),
            Self::Experience => keyword_spans(doc, EXPERIENCE_KEYWORDS),
        }
    }
}

impl std::fmt::Display for PatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One pattern hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub pattern_id: PatternId,
    /// Non-empty, within the document's tokens
    pub token_span: TokenSpan,
    pub matched_text: String,
}

// ============================================================================
// Matcher
// ============================================================================

/// Runs a fixed table of patterns over a document
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<PatternId>,
}

impl PatternMatcher {
    /// Matcher with every registered pattern
    pub fn new() -> Self {
        Self::with_patterns(PatternId::REGISTERED.to_vec())
    }

    pub fn with_patterns(patterns: Vec<PatternId>) -> Self {
        Self { patterns }
    }

    /// All matches, grouped by pattern in registration order
    pub fn find_matches(&self, doc: &AnnotatedDocument) -> Vec<PatternMatch> {
        self.patterns
            .iter()
            .flat_map(|&pattern_id| {
                pattern_id
                    .find_spans(doc)
                    .into_iter()
                    .filter(|span| doc.contains_span(*span))
                    .map(move |token_span| PatternMatch {
                        pattern_id,
                        token_span,
                        matched_text: doc.span_text(token_span).to_string(),
                    })
            })
            .collect()
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Pattern Rules
// ============================================================================

fn email_spans(doc: &AnnotatedDocument) -> Vec<TokenSpan> {
    doc.tokens
        .iter()
        .enumerate()
        .filter(|(_, t)| t.like_email)
        .map(|(i, _)| TokenSpan::new(i, i + 1))
        .collect()
}

/// Longest phone-shaped run per start; scanning resumes after each hit
fn phone_spans(doc: &AnnotatedDocument) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < doc.len() {
        if !could_start_phone(&doc.tokens[i].text) {
            i += 1;
            continue;
        }

        let longest = MAX_PHONE_TOKENS.min(doc.len() - i);
        let hit = (1..=longest)
            .rev()
            .map(|len| TokenSpan::new(i, i + len))
            .find(|span| is_phone(doc.span_text(*span)));

        match hit {
            Some(span) => {
                spans.push(span);
                i = span.end;
            }
            None => i += 1,
        }
    }

    spans
}

fn could_start_phone(text: &str) -> bool {
    text == "(" || text.starts_with(|c: char| c.is_ascii_digit())
}

fn is_phone(surface: &str) -> bool {
    PHONE_SHAPES.iter().any(|shape| has_shape(surface, shape)) || phone_pattern().is_match(surface)
}

fn has_shape(text: &str, shape: &str) -> bool {
    text.len() == shape.len()
        && text.bytes().zip(shape.bytes()).all(|(c, s)| match s {
            b'd' => c.is_ascii_digit(),
            _ => c == s,
        })
}

/// Keyword token plus any directly following alphabetic tokens
///
/// Scanning resumes after each match, so keywords inside a match are
/// part of it and every token is visited once.
fn keyword_spans(doc: &AnnotatedDocument, keywords: &[&str]) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < doc.len() {
        if !keywords.contains(&doc.tokens[i].lower().as_str()) {
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while doc.tokens.get(end).is_some_and(|t| t.is_alpha) {
            end += 1;
        }
        spans.push(TokenSpan::new(i, end));
        i = end;
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn doc(text: &str) -> AnnotatedDocument {
        AnnotatedDocument {
            text: text.to_string(),
            tokens: tokenize(text),
            ..Default::default()
        }
    }

    fn matches(text: &str) -> Vec<(PatternId, String)> {
        PatternMatcher::new()
            .find_matches(&doc(text))
            .into_iter()
            .map(|m| (m.pattern_id, m.matched_text))
            .collect()
    }

    #[test]
    fn test_email() {
        assert_eq!(
            matches("escreva para ana.souza+cv@empresa.com.br hoje"),
            vec![(PatternId::Email, "ana.souza+cv@empresa.com.br".to_string())]
        );
    }

    #[test]
    fn test_phone_shapes() {
        let found = matches("(11)91234-5678 ou 11-1234-5678 ou (21) 3456-7890 ou 11 91234 5678");
        let phones: Vec<&str> = found.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            phones,
            vec!["(11)91234-5678", "11-1234-5678", "(21) 3456-7890", "11 91234 5678"]
        );
        assert!(found.iter().all(|(id, _)| *id == PatternId::Phone));
    }

    #[test]
    fn test_not_phones() {
        assert!(matches("2019-2021 R$ 5.000 1234-5678").is_empty());
        // Line breaks are not separators
        assert!(matches("11\n91234-5678").is_empty());
    }

    #[test]
    fn test_phone_shape_fast_path_agrees_with_regex() {
        let samples = [
            "(11)91234-5678",
            "(11)1234-5678",
            "11-91234-5678",
            "11-1234-5678",
            "11 91234-5678",
        ];
        for sample in samples {
            assert!(PHONE_SHAPES.iter().any(|s| has_shape(sample, s)));
            assert!(phone_pattern().is_match(sample), "{sample}");
        }
    }

    #[test]
    fn test_education_extends_over_words() {
        assert_eq!(
            matches("Graduação em Engenharia Civil, 2015"),
            vec![(PatternId::Education, "Graduação em Engenharia Civil".to_string())]
        );
        assert_eq!(
            matches("pós-graduação"),
            vec![(PatternId::Education, "pós-graduação".to_string())]
        );
    }

    #[test]
    fn test_keywords_inside_a_match_join_it() {
        assert_eq!(
            matches("Experiência profissional em vendas."),
            vec![(PatternId::Experience, "Experiência profissional em vendas".to_string())]
        );
    }

    #[test]
    fn test_patterns_overlap_each_other() {
        assert_eq!(
            matches("Formação profissional em vendas"),
            vec![
                (PatternId::Education, "Formação profissional em vendas".to_string()),
                (PatternId::Experience, "profissional em vendas".to_string()),
            ]
        );
    }

    #[test]
    fn test_keywords_split_by_punctuation() {
        assert_eq!(
            matches("Formação: Graduação/Mestrado em Física"),
            vec![
                (PatternId::Education, "Formação".to_string()),
                (PatternId::Education, "Graduação".to_string()),
                (PatternId::Education, "Mestrado em Física".to_string()),
            ]
        );
        assert_eq!(
            matches("Engenharia.Experiência profissional"),
            vec![(PatternId::Experience, "Experiência profissional".to_string())]
        );
    }

    #[test]
    fn test_repeated_keywords_stay_linear() {
        let text = "experiência ".repeat(5_000);
        let found = PatternMatcher::new().find_matches(&doc(&text));

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token_span, TokenSpan::new(0, 5_000));
        assert_eq!(found[0].matched_text, text.trim_end());
    }

    #[test]
    fn test_registration_order() {
        let found = matches("Mestrado em Física. Contato: ana@exemplo.com, (11)91234-5678");
        let ids: Vec<PatternId> = found.iter().map(|(id, _)| *id).collect();
        assert_eq!(
            ids,
            vec![PatternId::Email, PatternId::Phone, PatternId::Education]
        );
    }

    #[test]
    fn test_restricted_table() {
        let matcher = PatternMatcher::with_patterns(vec![PatternId::Phone]);
        let found = matcher.find_matches(&doc("Mestrado, ana@exemplo.com, 11-1234-5678"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].token_span.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        assert!(matches("").is_empty());
    }
}
