use thiserror::Error;

/// Failures raised inside the storage engine.
///
/// A missing id is not an error: lookups return `Option` and deletes return
/// `bool`. Field validation happens before a call reaches the engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{table} table lock poisoned")]
    Poisoned { table: &'static str },

    #[error("username already taken: {username}")]
    DuplicateUsername { username: String },

    #[error("{table} id space exhausted")]
    IdsExhausted { table: &'static str },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Problems loading or validating [`crate::config::Settings`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}
