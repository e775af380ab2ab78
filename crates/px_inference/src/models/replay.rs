use std::fmt;
use serde_json::Value;
use px_core::{Conversation, Data, Result, StructuredModel, ToolSpec};
use crate::corpus::{default_corpus, Example};

/// Offline backend: answers with the expected result of the worked example
/// whose text matches the final user turn, and with no articles otherwise.
pub struct ReplayModel {
    examples: Vec<Example>,
}

impl fmt::Debug for ReplayModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReplayModel")
            .field("examples", &self.examples.len())
            .finish()
    }
}

impl ReplayModel {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }
}

impl Default for ReplayModel {
    fn default() -> Self {
        Self::new(default_corpus())
    }
}

#[async_trait::async_trait]
impl StructuredModel for ReplayModel {
    fn name(&self) -> &str {
        "Replay"
    }

    async fn invoke(&self, conversation: &Conversation, _tool: &ToolSpec) -> Result<Value> {
        let text = conversation.last_human().unwrap_or_default().trim();
        let data: Data = self
            .examples
            .iter()
            .find(|example| example.text.trim() == text)
            .map(|example| example.expected.clone())
            .unwrap_or_default();
        Ok(serde_json::to_value(data)?)
    }
}
