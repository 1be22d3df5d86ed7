use crate::language::Language;
use itertools::Itertools;
use rand::Rng;

/// Engine-facing source of reference text.
///
/// The session engine treats the text as opaque; implementations only
/// promise space-separated lowercase tokens.
pub trait TextProvider {
    fn generate(&self, word_count: usize) -> String;
}

/// Uniform random selection over an embedded vocabulary.
pub struct WordGenerator {
    language: Language,
}

impl WordGenerator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }
}

impl TextProvider for WordGenerator {
    fn generate(&self, word_count: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..word_count)
            .map(|_| {
                let idx = rng.gen_range(0..self.language.words.len());
                self.language.words[idx].as_str()
            })
            .join(" ")
    }
}

/// Canned reference text for deterministic tests.
pub struct FixedTextProvider {
    text: String,
}

impl FixedTextProvider {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl TextProvider for FixedTextProvider {
    fn generate(&self, _word_count: usize) -> String {
        self.text.clone()
    }
}
