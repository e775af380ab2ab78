use std::str::FromStr;
use std::sync::Arc;
use px_core::{Error, Result, StructuredModel};
use crate::Config;

pub mod openai;
pub mod replay;

pub use openai::OpenAiModel;
pub use replay::ReplayModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    OpenAi,
    Replay,
}

impl FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ModelKind::OpenAi),
            "replay" => Ok(ModelKind::Replay),
            other => Err(Error::Config(format!(
                "Unknown model '{}'. Available models: openai, replay",
                other
            ))),
        }
    }
}

pub fn create_model(config: &Config) -> Result<Arc<dyn StructuredModel>> {
    let model: Arc<dyn StructuredModel> = match config.model.parse::<ModelKind>()? {
        ModelKind::OpenAi => Arc::new(OpenAiModel::new(config)?),
        ModelKind::Replay => Arc::new(ReplayModel::default()),
    };
    tracing::debug!("Created {} model", model.name());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_kind_from_str() {
        assert_eq!("openai".parse::<ModelKind>().unwrap(), ModelKind::OpenAi);
        assert_eq!("Replay".parse::<ModelKind>().unwrap(), ModelKind::Replay);
        assert!(matches!("ollama".parse::<ModelKind>(), Err(Error::Config(_))));
    }

    #[test]
    fn test_create_model() {
        let config = Config {
            model: "replay".to_string(),
            ..Config::default()
        };
        assert_eq!(create_model(&config).unwrap().name(), "Replay");

        let config = Config {
            model: "openai".to_string(),
            api_key: None,
            ..Config::default()
        };
        assert!(create_model(&config).is_err());
    }
}
