use async_trait::async_trait;
use crate::Result;

/// One record as returned by the literature database. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PubmedRecord {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
}

#[async_trait]
pub trait LiteratureSource: Send + Sync {
    /// Search the index and return at most `max_results` record identifiers
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>>;

    /// Resolve identifiers to full records in a single batched call
    async fn fetch(&self, ids: &[String]) -> Result<Vec<PubmedRecord>>;
}
