use px_core::{Conversation, Data, FetchedArticle, Message, Result, ToolCall};
use crate::corpus::Example;
use crate::schema::DATA_TOOL_NAME;

pub const SYSTEM_INSTRUCTION: &str = "You are an expert extraction algorithm. \
Only extract relevant information from the text. \
If you do not know the value of an attribute asked to extract, \
return null for the attribute's value.";

pub const TOOL_ACK: &str = "You have correctly called this tool.";

pub const DETECTED_ARTICLES: &str = "Detected articles.";
pub const DETECTED_NONE: &str = "Detected no articles.";

pub fn confirmation_for(expected: &Data) -> &'static str {
    if expected.articles.is_empty() {
        DETECTED_NONE
    } else {
        DETECTED_ARTICLES
    }
}

/// Turns worked examples into tool-calling turns, four per example:
/// the text, the assistant's `Data` call, the tool acknowledgement, and the
/// assistant's confirmation.
pub fn prime(examples: &[Example]) -> Result<Vec<Message>> {
    let mut messages = Vec::with_capacity(examples.len() * 4);
    for example in examples {
        let call = ToolCall::new(DATA_TOOL_NAME, serde_json::to_value(&example.expected)?);
        let call_id = call.id.clone();
        messages.push(Message::human(example.text.clone()));
        messages.push(Message::ai_tool_call(call));
        messages.push(Message::tool(call_id, TOOL_ACK));
        messages.push(Message::ai(example.confirmation.clone()));
    }
    Ok(messages)
}

pub fn build_conversation(priming: &[Message], text: &str) -> Conversation {
    let mut messages = Vec::with_capacity(priming.len() + 2);
    messages.push(Message::system(SYSTEM_INSTRUCTION));
    messages.extend_from_slice(priming);
    messages.push(Message::human(text));
    Conversation::new(messages)
}

/// Renders fetched articles as the text of the final user turn.
pub fn render_articles(articles: &[FetchedArticle]) -> String {
    articles
        .iter()
        .enumerate()
        .map(|(idx, article)| {
            format!(
                "Article {}:\nTitle: {}\nAbstract: {}\n",
                idx + 1,
                article.title,
                article.abstract_text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
