use serde::{Deserialize, Serialize};

/// Information about an article. Every field may be unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub domain: Option<String>,
    pub topic: Option<String>,
    pub subtopic: Option<String>,
}

impl Article {
    pub fn classified(title: &str, domain: &str, topic: &str, subtopic: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            abstract_text: None,
            domain: Some(domain.to_string()),
            topic: Some(topic.to_string()),
            subtopic: Some(subtopic.to_string()),
        }
    }
}

/// Extracted data about articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Data {
    pub articles: Vec<Article>,
}

impl Data {
    pub fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// A PubMed record that carried both a title and an abstract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchedArticle {
    pub pmid: Option<String>,
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
}
