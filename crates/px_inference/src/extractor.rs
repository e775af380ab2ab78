use std::fmt;
use std::sync::Arc;
use px_core::{Conversation, Data, Error, Message, Result, StructuredModel, ToolSpec};
use crate::corpus::Example;
use crate::prompt::{build_conversation, prime};
use crate::schema::data_tool;

/// Few-shot primed structured extraction over a single model call.
pub struct Extractor {
    model: Arc<dyn StructuredModel>,
    priming: Vec<Message>,
    tool: ToolSpec,
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("model", &self.model.name())
            .field("priming", &self.priming.len())
            .finish()
    }
}

impl Extractor {
    pub fn new(model: Arc<dyn StructuredModel>, examples: &[Example]) -> Result<Self> {
        Ok(Self {
            model,
            priming: prime(examples)?,
            tool: data_tool(),
        })
    }

    pub fn priming(&self) -> &[Message] {
        &self.priming
    }

    pub fn conversation(&self, text: &str) -> Conversation {
        build_conversation(&self.priming, text)
    }

    pub async fn extract(&self, text: &str) -> Result<Data> {
        let conversation = self.conversation(text);
        tracing::info!(
            "🤖 Extracting with {} ({} messages)",
            self.model.name(),
            conversation.len()
        );

        let value = self.model.invoke(&conversation, &self.tool).await.map_err(|e| match e {
            Error::Extraction(_) | Error::Config(_) => e,
            other => Error::Extraction(other.to_string()),
        })?;

        let data: Data = serde_json::from_value(value).map_err(|e| {
            Error::Extraction(format!("Model output does not match the Data schema: {}", e))
        })?;
        tracing::info!("✨ Extracted {} articles", data.articles.len());
        Ok(data)
    }
}
