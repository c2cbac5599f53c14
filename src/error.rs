use thiserror::Error;

pub type Result<T> = std::result::Result<T, GuardError>;

#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("could not find branch name {0}: branch not found")]
    BranchNotFound(String),

    #[error("Release has an empty target commitish")]
    CommitishMissing,

    #[error("Snapshot error in {path}: {message}")]
    Snapshot { path: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GuardError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
