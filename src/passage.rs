use rand::seq::SliceRandom;
use rand::Rng;

use crate::language::WordSource;

pub const DEFAULT_WORD_COUNT: usize = 20;

/// The text the user has to reproduce. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    words: Vec<String>,
    text: String,
    letters: Vec<char>,
}

impl Passage {
    pub fn from_words(words: Vec<String>) -> Self {
        let text = words.join(" ");
        let letters = text.chars().collect();
        Self {
            words,
            text,
            letters,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Letters in order, word boundaries included as `' '`.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.letters.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

impl From<&str> for Passage {
    fn from(text: &str) -> Self {
        Self::from_words(text.split(' ').map(str::to_string).collect())
    }
}

/// Builds passages by drawing words uniformly, with replacement.
pub struct PassageGenerator {
    source: Box<dyn WordSource>,
    word_count: usize,
}

impl PassageGenerator {
    pub fn new(source: Box<dyn WordSource>, word_count: usize) -> Self {
        Self { source, word_count }
    }

    pub fn with_default_count(source: Box<dyn WordSource>) -> Self {
        Self::new(source, DEFAULT_WORD_COUNT)
    }

    pub fn generate(&self) -> Passage {
        self.generate_with(&mut rand::thread_rng())
    }

    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Passage {
        let candidates = self.source.words();
        let words = (0..self.word_count)
            .filter_map(|_| candidates.choose(rng).cloned())
            .collect();
        Passage::from_words(words)
    }
}

impl std::fmt::Debug for PassageGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PassageGenerator")
            .field("word_count", &self.word_count)
            .field("candidates", &self.source.words().len())
            .finish()
    }
}
