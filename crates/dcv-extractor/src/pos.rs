//! Part-of-speech tagging
//!
//! Lexicon lookups for function words, gazetteer and capitalization cues for
//! proper nouns, then suffix rules for verbs and adjectives. Everything else
//! is a noun.

use std::collections::HashSet;

use crate::document::{PosTag, Token};
use crate::lexicon::{word_set, Lexicon};

/// Stem characters a word must keep after removing a suffix
const MIN_STEM_CHARS: usize = 2;

/// Lexicon-driven POS tagger
#[derive(Debug, Clone)]
pub struct PosTagger {
    /// Function word classes, checked in order
    closed_class: Vec<(HashSet<String>, PosTag)>,
    verbs: HashSet<String>,
    adjectives: HashSet<String>,
    nouns: HashSet<String>,
    /// Words that read as proper nouns even at sentence start
    proper_nouns: HashSet<String>,
    verb_suffixes: Vec<String>,
    adjective_suffixes: Vec<String>,
}

impl PosTagger {
    pub fn from_lexicon(lexicon: &Lexicon) -> Self {
        let closed = &lexicon.closed_class;
        let open = &lexicon.open_class;
        let entities = &lexicon.entities;

        let closed_class = vec![
            (word_set(&closed.determiners), PosTag::Det),
            (word_set(&closed.prepositions), PosTag::Adp),
            (word_set(&closed.coordinating_conjunctions), PosTag::Cconj),
            (word_set(&closed.subordinating_conjunctions), PosTag::Sconj),
            (word_set(&closed.pronouns), PosTag::Pron),
            (word_set(&closed.adverbs), PosTag::Adv),
            (word_set(&closed.auxiliaries), PosTag::Aux),
        ];

        let mut proper_nouns = word_set(&entities.given_names);
        proper_nouns.extend(word_set(&entities.organizations));
        proper_nouns.extend(word_set(&entities.locations));

        Self {
            closed_class,
            verbs: word_set(&open.verbs),
            adjectives: word_set(&open.adjectives),
            nouns: word_set(&open.nouns),
            proper_nouns,
            verb_suffixes: longest_first(&open.verb_suffixes),
            adjective_suffixes: longest_first(&open.adjective_suffixes),
        }
    }

    /// Tag every token in place
    pub fn tag_all(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            token.pos = self.tag(token);
        }
    }

    /// Tag a single token
    pub fn tag(&self, token: &Token) -> PosTag {
        if token.like_email {
            return PosTag::X;
        }
        if !token.text.chars().any(char::is_alphanumeric) {
            return if token.text.chars().all(is_punctuation) {
                PosTag::Punct
            } else {
                PosTag::Sym
            };
        }
        if !token.text.chars().any(char::is_alphabetic) {
            return PosTag::Num;
        }

        // Mid-sentence capitals are names
        if token.is_capitalized() && !token.is_sent_start {
            return PosTag::Propn;
        }

        let lower = token.lower();
        if let Some((_, tag)) = self.closed_class.iter().find(|(set, _)| set.contains(&lower)) {
            return *tag;
        }

        if token.is_capitalized() && (self.proper_nouns.contains(&lower) || token.is_upper()) {
            return PosTag::Propn;
        }

        if self.nouns.contains(&lower) {
            return PosTag::Noun;
        }
        if self.verbs.contains(&lower) {
            return PosTag::Verb;
        }
        if self.adjectives.contains(&lower) {
            return PosTag::Adj;
        }
        if has_suffix(&lower, &self.verb_suffixes) {
            return PosTag::Verb;
        }
        if has_suffix(&lower, &self.adjective_suffixes) {
            return PosTag::Adj;
        }

        PosTag::Noun
    }
}

fn is_punctuation(c: char) -> bool {
    (c.is_ascii_punctuation()
        && !matches!(c, '$' | '%' | '&' | '+' | '<' | '=' | '>' | '^' | '|' | '~' | '#' | '@'))
        || matches!(c, '–' | '—' | '…' | '“' | '”' | '‘' | '’' | '«' | '»' | '•')
}

fn longest_first(suffixes: &[String]) -> Vec<String> {
    let mut sorted: Vec<String> = suffixes.iter().map(|s| s.to_lowercase()).collect();
    sorted.sort_by_key(|s| std::cmp::Reverse(s.chars().count()));
    sorted
}

fn has_suffix(word: &str, suffixes: &[String]) -> bool {
    let word_chars = word.chars().count();
    suffixes
        .iter()
        .any(|s| word.ends_with(s.as_str()) && word_chars >= s.chars().count() + MIN_STEM_CHARS)
}
