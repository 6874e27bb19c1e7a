pub mod core;

pub use core::Language;

/// Anything that can hand out candidate words for a passage.
pub trait WordSource {
    fn words(&self) -> &[String];
}

/// A fixed, in-memory word list.
#[derive(Debug, Clone, Default)]
pub struct StaticWords(pub Vec<String>);

impl StaticWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(words.into_iter().map(Into::into).collect())
    }
}

impl WordSource for StaticWords {
    fn words(&self) -> &[String] {
        &self.0
    }
}
