use std::fmt;
use thiserror::Error;

/// The pipeline step an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Search,
    Fetch,
    Extraction,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Config => "config",
            Stage::Search => "search",
            Stage::Fetch => "fetch",
            Stage::Extraction => "extraction",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Extraction failed: {0}")]
    Extraction(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Stage the error belongs to, when it is tied to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Config(_) => Some(Stage::Config),
            Error::Search(_) => Some(Stage::Search),
            Error::Fetch(_) => Some(Stage::Fetch),
            Error::Extraction(_) => Some(Stage::Extraction),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
