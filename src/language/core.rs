use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use super::WordSource;
use crate::error::{KeyraceError, Result};

static LANG_DIR: Dir = include_dir!("src/lang");

/// A bundled word list.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
}

impl Language {
    /// Load one of the word lists embedded in the binary, e.g. `english`.
    pub fn new(file_name: &str) -> Result<Self> {
        read_language_from_file(file_name)
    }
}

impl WordSource for Language {
    fn words(&self) -> &[String] {
        &self.words
    }
}

fn read_language_from_file(file_name: &str) -> Result<Language> {
    let file = LANG_DIR
        .get_file(format!("{file_name}.json"))
        .ok_or_else(|| KeyraceError::UnknownLanguage(file_name.to_string()))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| KeyraceError::InvalidEncoding(file_name.to_string()))?;

    parse_language(file_name, file_as_str)
}

pub(crate) fn parse_language(file_name: &str, json: &str) -> Result<Language> {
    let lang: Language = from_str(json).map_err(|source| KeyraceError::MalformedWordList {
        name: file_name.to_string(),
        source,
    })?;

    if lang.words.is_empty() {
        return Err(KeyraceError::EmptyWordList(file_name.to_string()));
    }
    // a passage word must be one non-empty run without gaps
    if let Some(word) = lang
        .words
        .iter()
        .find(|w| w.is_empty() || w.contains(char::is_whitespace))
    {
        return Err(KeyraceError::InvalidWord {
            name: file_name.to_string(),
            word: word.clone(),
        });
    }

    Ok(lang)
}
