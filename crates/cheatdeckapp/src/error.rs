use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheatdeckError {
    #[error("Cheatsheet not found: {0}")]
    NotFound(String),

    #[error("Malformed document {name}: {reason}")]
    Malformed { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid cheatsheet name: '{0}'")]
    InvalidName(String),

    #[error("Language catalog {0} could not be loaded; refusing to overwrite it")]
    CatalogUnreadable(String),

    #[error("Unsupported language: {0}")]
    UnknownLanguage(String),

    #[error("Cannot remove the default language: {0}")]
    DefaultLanguage(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl CheatdeckError {
    pub fn malformed(name: impl Into<String>, reason: impl ToString) -> Self {
        CheatdeckError::Malformed {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// True when the error means "the thing is simply absent".
    pub fn is_not_found(&self) -> bool {
        matches!(self, CheatdeckError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, CheatdeckError>;
