//! Tokenization and sentence segmentation
//!
//! Produces e-mail tokens, word tokens and single-character punctuation
//! tokens. Words join across internal apostrophes and hyphens. Periods and
//! slashes join only digit groups (`5.000`, `01/2020`) and single-letter
//! abbreviations (`S.A`), so `Engenharia.Experiência` and
//! `Graduação/Mestrado` split into separate words.

use std::sync::OnceLock;

use regex::Regex;

use crate::document::{PosTag, Token, TokenSpan};

/// Token scanner, compiled once.
static TOKEN_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Punctuation that closes a sentence
const SENTENCE_TERMINATORS: &[&str] = &[".", "!", "?", ";", "…"];

fn token_pattern() -> &'static Regex {
    TOKEN_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<email>[\w.+\-]+@[\w\-]+(?:\.[\w\-]+)*\.[A-Za-z]{2,})
            | (?P<word>
                \p{L}(?:\.\p{L})+\b
                | (?:\p{N}+(?:[./]\p{N}+)+ | [\p{L}\p{N}]+)
                  (?:['’\-](?:\p{N}+(?:[./]\p{N}+)+ | [\p{L}\p{N}]+))*
              )
            | (?P<punct>[^\s\p{L}\p{N}])
            ",
        )
        .expect("token regex must compile")
    })
}

/// Split text into tokens with sentence-start flags set
///
/// Part-of-speech tags are left as `PosTag::X` for the tagger to fill in.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for caps in token_pattern().captures_iter(text) {
        let Some(mat) = caps.get(0) else { continue };
        let surface = mat.as_str();

        let is_sent_start = match tokens.last() {
            None => true,
            Some(prev) => {
                SENTENCE_TERMINATORS.contains(&prev.text.as_str())
                    || text[prev.end..mat.start()].contains('\n')
            }
        };

        tokens.push(Token {
            text: surface.to_string(),
            start: mat.start(),
            end: mat.end(),
            pos: PosTag::X,
            is_alpha: surface.chars().all(char::is_alphabetic),
            like_email: caps.name("email").is_some(),
            is_sent_start,
        });
    }

    tokens
}

/// Sentence spans derived from the sentence-start flags
pub fn sentence_spans(tokens: &[Token]) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, token) in tokens.iter().enumerate().skip(1) {
        if token.is_sent_start {
            spans.push(TokenSpan::new(start, i));
            start = i;
        }
    }
    if start < tokens.len() {
        spans.push(TokenSpan::new(start, tokens.len()));
    }

    spans
}
