//! Named Entity Recognition (NER) module
//!
//! Rule-based recognition over capitalized runs:
//! - Organization: the run contains an organization marker word or is a
//!   known organization
//! - Location: the run starts with a known location or is a region code
//! - Person: the run starts with a known given name
//! - Misc: any other multi-word capitalized run

use std::collections::HashSet;

use crate::document::{Entity, EntityLabel, Token, TokenSpan};
use crate::lexicon::{normalize_entry, word_set, Lexicon};

// ============================================================================
// Gazetteer
// ============================================================================

/// Dictionaries backing entity classification
#[derive(Debug, Clone)]
pub struct Gazetteer {
    particles: HashSet<String>,
    given_names: HashSet<String>,
    organization_markers: HashSet<String>,
    organizations: HashSet<String>,
    locations: HashSet<String>,
    state_codes: HashSet<String>,
    /// Longest location entry, in words
    max_location_words: usize,
}

impl Gazetteer {
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let entities = &lexicon.entities;
        let locations = word_set(&entities.locations);
        let max_location_words = locations
            .iter()
            .map(|l| l.split(' ').count())
            .max()
            .unwrap_or(1);

        Self {
            particles: word_set(&entities.name_particles),
            given_names: word_set(&entities.given_names),
            organization_markers: word_set(&entities.organization_markers),
            organizations: word_set(&entities.organizations),
            locations,
            state_codes: entities.state_codes.iter().map(|c| c.trim().to_string()).collect(),
            max_location_words,
        }
    }

    fn is_particle(&self, token: &Token) -> bool {
        !token.is_capitalized() && self.particles.contains(&token.lower())
    }
}

// ============================================================================
// Rule-based NER
// ============================================================================

/// Rule-based NER using capitalization and gazetteers
#[derive(Debug, Clone)]
pub struct EntityRecognizer {
    gazetteer: Gazetteer,
}

impl EntityRecognizer {
    pub fn new(gazetteer: Gazetteer) -> Self {
        Self { gazetteer }
    }

    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        Self::new(Gazetteer::from_lexicon(lexicon))
    }

    /// Find entities in document order
    pub fn recognize(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            if !is_name_like(&tokens[i]) {
                i += 1;
                continue;
            }

            let end = self.run_end(tokens, i);
            let (label, span) = self.classify(tokens, TokenSpan::new(i, end));

            if let Some(label) = label {
                entities.push(Entity {
                    label,
                    span,
                    text: span_text(text, tokens, span).to_string(),
                });
            }
            i = span.end;
        }

        entities
    }

    /// End of the capitalized run starting at `start`
    ///
    /// Particles join two capitalized words; runs never cross a sentence start.
    fn run_end(&self, tokens: &[Token], start: usize) -> usize {
        let mut end = start + 1;
        loop {
            match tokens.get(end) {
                Some(next) if next.is_sent_start => break,
                Some(next) if is_name_like(next) => end += 1,
                Some(next) if self.gazetteer.is_particle(next) => {
                    match tokens.get(end + 1) {
                        Some(after) if is_name_like(after) && !after.is_sent_start => end += 2,
                        _ => break,
                    }
                }
                _ => break,
            }
        }
        end
    }

    /// Label a run; a location prefix may split it
    fn classify(&self, tokens: &[Token], run: TokenSpan) -> (Option<EntityLabel>, TokenSpan) {
        let g = &self.gazetteer;
        let run_tokens = &tokens[run.start..run.end];
        let joined = joined_lower(run_tokens);

        let has_marker = run_tokens
            .iter()
            .any(|t| g.organization_markers.contains(&t.lower()));
        if has_marker || g.organizations.contains(&joined) {
            return (Some(EntityLabel::Organization), run);
        }

        if g.state_codes.contains(run_tokens[0].text.as_str()) {
            return (
                Some(EntityLabel::Location),
                TokenSpan::new(run.start, run.start + 1),
            );
        }

        if let Some(len) = self.location_prefix(run_tokens) {
            return (
                Some(EntityLabel::Location),
                TokenSpan::new(run.start, run.start + len),
            );
        }

        if g.given_names.contains(&run_tokens[0].lower()) {
            return (Some(EntityLabel::Person), run);
        }

        if run.len() >= 2 {
            return (Some(EntityLabel::Misc), run);
        }

        (None, run)
    }

    /// Length of the longest known location at the start of the run
    fn location_prefix(&self, run_tokens: &[Token]) -> Option<usize> {
        let g = &self.gazetteer;
        let longest = run_tokens.len().min(g.max_location_words);

        (1..=longest).rev().find(|&len| {
            // A location never ends on a particle
            !g.is_particle(&run_tokens[len - 1])
                && g.locations.contains(&joined_lower(&run_tokens[..len]))
        })
    }
}

/// Capitalized word that can be part of a name
fn is_name_like(token: &Token) -> bool {
    !token.like_email
        && token.is_capitalized()
        && token
            .text
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\'' | '’' | '/'))
}

fn joined_lower(tokens: &[Token]) -> String {
    let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    normalize_entry(&words.join(" "))
}

fn span_text<'a>(text: &'a str, tokens: &[Token], span: TokenSpan) -> &'a str {
    if span.is_empty() {
        return "";
    }
    text.get(tokens[span.start].start..tokens[span.end - 1].end)
        .unwrap_or("")
}

// ============================================================================
// Tests
// ============================================================================
