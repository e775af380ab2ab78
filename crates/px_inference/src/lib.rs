use std::time::Duration;

pub mod corpus;
pub mod extractor;
pub mod models;
pub mod prompt;
pub mod schema;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend name, see [`models::ModelKind`]
    pub model: String,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "openai".to_string(),
            api_key: None,
            model_name: None,
            model_url: None,
            timeout: Duration::from_secs(30),
        }
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::corpus::{default_corpus, Example};
    pub use super::extractor::Extractor;
    pub use super::models::create_model;
    pub use super::prompt::render_articles;
    pub use px_core::{Article, Data, Result, Error};
}

pub use extractor::Extractor;
pub use models::create_model;
