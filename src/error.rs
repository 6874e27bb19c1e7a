use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyraceError {
    #[error("no word list named `{0}` is bundled")]
    UnknownLanguage(String),

    #[error("word list `{0}` contains no words")]
    EmptyWordList(String),

    #[error("word list `{name}` has an entry that is blank or holds whitespace: {word:?}")]
    InvalidWord { name: String, word: String },

    #[error("word list `{name}` is malformed: {source}")]
    MalformedWordList {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("word list `{0}` is not valid utf-8")]
    InvalidEncoding(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeyraceError>;
