use async_trait::async_trait;
use serde_json::Value;
use crate::conversation::Conversation;
use crate::Result;

/// A function-style tool the model is forced to call; its parameters are the
/// output schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

#[async_trait]
pub trait StructuredModel: Send + Sync {
    fn name(&self) -> &str;

    /// Send the conversation and return the arguments of the tool call the
    /// model made. Exactly one request per invocation.
    async fn invoke(&self, conversation: &Conversation, tool: &ToolSpec) -> Result<Value>;
}
