//! Noun chunk detection
//!
//! A chunk is an optional determiner followed by a run of nouns, proper nouns
//! and adjectives. One `de`-family preposition may link the run to a second
//! nominal run ("gestão de projetos"). Chunks need a noun head and never cross
//! a sentence start.

use crate::document::{PosTag, Token, TokenSpan};

/// Prepositions that may link two nominal runs
const LINKING_PREPOSITIONS: &[&str] = &["de", "do", "da", "dos", "das"];

/// Find noun chunks in document order
pub fn noun_chunks(tokens: &[Token]) -> Vec<TokenSpan> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let start = i;
        let mut head = i;

        if tokens[i].pos == PosTag::Det && continues_phrase(tokens, i + 1) {
            head = i + 1;
        }
        if !tokens[head].pos.is_nominal() {
            i += 1;
            continue;
        }

        let mut end = nominal_run_end(tokens, head);
        if is_link(tokens, end) && continues_phrase(tokens, end + 1) {
            end = nominal_run_end(tokens, end + 1);
        }

        if tokens[start..end].iter().any(|t| t.pos.is_nominal_head()) {
            chunks.push(TokenSpan::new(start, end));
        }
        i = end;
    }

    chunks
}

/// Token at `i` is nominal and inside the current sentence
fn continues_phrase(tokens: &[Token], i: usize) -> bool {
    tokens
        .get(i)
        .is_some_and(|t| t.pos.is_nominal() && !t.is_sent_start)
}

fn nominal_run_end(tokens: &[Token], start: usize) -> usize {
    let mut end = start + 1;
    while continues_phrase(tokens, end) {
        end += 1;
    }
    end
}

fn is_link(tokens: &[Token], i: usize) -> bool {
    tokens.get(i).is_some_and(|t| {
        t.pos == PosTag::Adp
            && !t.is_sent_start
            && LINKING_PREPOSITIONS.contains(&t.lower().as_str())
    })
}
