use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an anagram search before it starts.
///
/// Finding no anagrams is not an error: searches return an empty result.
#[derive(Error, Debug)]
pub enum AnagramError {
    #[error("the phrase is empty once whitespace is removed")]
    EmptyPhrase,

    #[error("'{ch}' in \"{input}\" is not a letter from a to z")]
    InvalidCharacter { ch: char, input: String },

    #[error("could not load dictionary {}: {reason}", path.display())]
    DictionaryLoad { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not start worker pool: {0}")]
    ThreadPool(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnagramError {
    /// True for errors caused by the phrase itself rather than the environment.
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnagramError::EmptyPhrase | AnagramError::InvalidCharacter { .. }
        )
    }

    pub(crate) fn load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AnagramError::DictionaryLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AnagramError>;
