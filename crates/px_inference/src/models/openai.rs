use std::fmt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;
use px_core::{Conversation, Error, Message, Result, StructuredModel, ToolSpec};
use crate::Config;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Serialize, Debug, PartialEq)]
struct ChatMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunction,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct WireFunction {
    name: String,
    /// JSON-encoded arguments
    arguments: String,
}

#[derive(Serialize)]
struct ToolDefinition<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: FunctionDefinition<'a>,
}

#[derive(Serialize)]
struct FunctionDefinition<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: ToolChoiceFunction<'a>,
}

#[derive(Serialize)]
struct ToolChoiceFunction<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    tools: Vec<ToolDefinition<'a>>,
    tool_choice: ToolChoice<'a>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

fn to_wire(message: &Message) -> Result<ChatMessage> {
    let wire = match message {
        Message::System { content } => ChatMessage {
            role: "system",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        Message::Human { content } => ChatMessage {
            role: "user",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        },
        Message::Ai { content, tool_calls } => {
            let calls = tool_calls
                .iter()
                .map(|call| -> Result<WireToolCall> {
                    Ok(WireToolCall {
                        id: call.id.clone(),
                        kind: "function".to_string(),
                        function: WireFunction {
                            name: call.name.clone(),
                            arguments: serde_json::to_string(&call.args)?,
                        },
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            ChatMessage {
                role: "assistant",
                content: if content.is_empty() && !calls.is_empty() {
                    None
                } else {
                    Some(content.clone())
                },
                tool_calls: calls,
                tool_call_id: None,
            }
        }
        Message::Tool { tool_call_id, content } => ChatMessage {
            role: "tool",
            content: Some(content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.clone()),
        },
    };
    Ok(wire)
}

/// Pulls the forced tool call's arguments out of a chat completion.
fn tool_arguments(response: ChatResponse, tool_name: &str) -> Result<Value> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Extraction("Response contained no choices".to_string()))?;

    let call = choice
        .message
        .tool_calls
        .into_iter()
        .find(|call| call.function.name == tool_name)
        .ok_or_else(|| Error::Extraction(format!("Model did not call the {} tool", tool_name)))?;

    serde_json::from_str(&call.function.arguments).map_err(|e| {
        Error::Extraction(format!("Tool arguments are not valid JSON: {}", e))
    })
}

/// Chat-completions backend with forced function calling.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OpenAiModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config("OpenAI API key is required".to_string()))?;

        let base_url = config
            .model_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|e| Error::Config(format!("Invalid model URL '{}': {}", base_url, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        })
    }

    fn request<'a>(&'a self, conversation: &Conversation, tool: &'a ToolSpec) -> Result<ChatRequest<'a>> {
        let messages = conversation
            .messages()
            .iter()
            .map(to_wire)
            .collect::<Result<Vec<_>>>()?;

        Ok(ChatRequest {
            model: &self.model_name,
            messages,
            tools: vec![ToolDefinition {
                kind: "function",
                function: FunctionDefinition {
                    name: &tool.name,
                    description: &tool.description,
                    parameters: &tool.parameters,
                },
            }],
            tool_choice: ToolChoice {
                kind: "function",
                function: ToolChoiceFunction { name: &tool.name },
            },
            temperature: 0.0,
        })
    }
}

#[async_trait]
impl StructuredModel for OpenAiModel {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn invoke(&self, conversation: &Conversation, tool: &ToolSpec) -> Result<Value> {
        let request = self.request(conversation, tool)?;
        tracing::debug!(
            "Sending {} messages to {} ({})",
            request.messages.len(),
            self.base_url,
            self.model_name
        );

        let response = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Extraction(format!("Request to {} failed: {}", self.base_url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Extraction(format!("{} returned {}: {}", self.name(), status, body)));
        }

        let body = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Extraction(format!("Malformed chat completion: {}", e)))?;

        tool_arguments(body, &tool.name)
    }
}
