use px_core::ToolSpec;
use serde_json::{json, Value};

pub const DATA_TOOL_NAME: &str = "Data";

fn nullable_string(description: &str) -> Value {
    json!({
        "type": ["string", "null"],
        "description": description,
    })
}

/// JSON schema of `Data`: an ordered list of articles with five optional
/// text fields.
pub fn data_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "articles": {
                "type": "array",
                "items": {
                    "type": "object",
                    "description": "Information about an article.",
                    "properties": {
                        "title": nullable_string("The title of the article"),
                        "abstract": nullable_string("Generate a 3-5 sentence summary of the article"),
                        "domain": nullable_string("The domain of the article (ex: physics, biology, mathematics, finance.)"),
                        "topic": nullable_string("The main topic of the article (ex: quantum mechanics, cell biology, calculus, stock market.)"),
                        "subtopic": nullable_string("The subtopic of the article if any (ex: string theory, cell division, integration, options trading.)"),
                    },
                },
            },
        },
        "required": ["articles"],
    })
}

pub fn data_tool() -> ToolSpec {
    ToolSpec {
        name: DATA_TOOL_NAME.to_string(),
        description: "Extracted data about articles.".to_string(),
        parameters: data_schema(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_article_field_is_nullable() {
        let schema = data_schema();
        let properties = schema["properties"]["articles"]["items"]["properties"]
            .as_object()
            .unwrap();
        let mut names: Vec<&str> = properties.keys().map(String::as_str).collect();
        names.sort();
        assert_eq!(names, vec!["abstract", "domain", "subtopic", "title", "topic"]);
        for field in properties.values() {
            assert_eq!(field["type"], json!(["string", "null"]));
        }
    }

    #[test]
    fn test_data_tool() {
        let tool = data_tool();
        assert_eq!(tool.name, "Data");
        assert_eq!(tool.parameters["required"], json!(["articles"]));
    }
}
