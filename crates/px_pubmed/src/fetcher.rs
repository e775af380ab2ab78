use std::fmt;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use px_core::{Error, FetchedArticle, LiteratureSource, PubmedRecord, Result};
use crate::logging::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MissingField {
    Title,
    Abstract,
    Both,
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingField::Title => f.write_str("title"),
            MissingField::Abstract => f.write_str("abstract"),
            MissingField::Both => f.write_str("title and abstract"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    pub pmid: Option<String>,
    pub missing: MissingField,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Kept(FetchedArticle),
    Skipped(SkippedRecord),
}

impl From<PubmedRecord> for RecordOutcome {
    fn from(record: PubmedRecord) -> Self {
        match (record.title, record.abstract_text) {
            (Some(title), Some(abstract_text)) => RecordOutcome::Kept(FetchedArticle {
                pmid: record.pmid,
                title,
                abstract_text,
            }),
            (None, Some(_)) => RecordOutcome::Skipped(SkippedRecord {
                pmid: record.pmid,
                missing: MissingField::Title,
            }),
            (Some(_), None) => RecordOutcome::Skipped(SkippedRecord {
                pmid: record.pmid,
                missing: MissingField::Abstract,
            }),
            (None, None) => RecordOutcome::Skipped(SkippedRecord {
                pmid: record.pmid,
                missing: MissingField::Both,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FetchReport {
    pub query: String,
    pub articles: Vec<FetchedArticle>,
    pub skipped: Vec<SkippedRecord>,
    pub fetched_at: DateTime<Utc>,
}

impl FetchReport {
    /// Share of fetched records dropped for a missing field.
    pub fn drop_rate(&self) -> f64 {
        let total = self.articles.len() + self.skipped.len();
        if total == 0 {
            0.0
        } else {
            self.skipped.len() as f64 / total as f64
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The search matched; the report may still hold zero usable articles.
    Found(FetchReport),
    /// The search returned no identifiers at all.
    NoMatches { query: String },
}

impl FetchOutcome {
    pub fn articles(&self) -> &[FetchedArticle] {
        match self {
            FetchOutcome::Found(report) => &report.articles,
            FetchOutcome::NoMatches { .. } => &[],
        }
    }
}

/// Runs a keyword search and turns the matching records into title/abstract pairs.
pub struct Fetcher {
    source: Arc<dyn LiteratureSource>,
    logger: Logger,
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("source", &"<dyn LiteratureSource>")
            .finish()
    }
}

impl Fetcher {
    pub fn new(source: Arc<dyn LiteratureSource>) -> Self {
        Self {
            source,
            logger: Logger::new().with_prefix("[pubmed]".to_string()),
        }
    }

    pub async fn fetch(&self, query: &str, max_results: usize) -> Result<FetchOutcome> {
        if max_results == 0 {
            return Err(Error::Config("max results must be at least 1".to_string()));
        }
        let logger = self.logger.clone().with_prefix(format!("[{}]", query));

        logger.info(&format!("🔍 Searching (max {} results)", max_results));
        let ids = self.source.search(query, max_results).await?;
        if ids.is_empty() {
            logger.info("No matching records");
            return Ok(FetchOutcome::NoMatches {
                query: query.to_string(),
            });
        }

        logger.info(&format!("📥 Fetching {} records", ids.len()));
        let records = self.source.fetch(&ids).await?;

        let mut articles = Vec::new();
        let mut skipped = Vec::new();
        for record in records {
            match RecordOutcome::from(record) {
                RecordOutcome::Kept(article) => articles.push(article),
                RecordOutcome::Skipped(record) => {
                    logger.warn(&format!(
                        "⏭️ Skipping record {}: missing {}",
                        record.pmid.as_deref().unwrap_or("<no pmid>"),
                        record.missing
                    ));
                    skipped.push(record);
                }
            }
        }
        articles.truncate(max_results);

        let report = FetchReport {
            query: query.to_string(),
            articles,
            skipped,
            fetched_at: Utc::now(),
        };
        logger.info(&format!(
            "✨ Kept {} articles, skipped {} ({:.0}% dropped)",
            report.articles.len(),
            report.skipped.len(),
            report.drop_rate() * 100.0
        ));
        Ok(FetchOutcome::Found(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use px_core::Stage;

    struct FakeSource {
        ids: Vec<String>,
        records: Vec<PubmedRecord>,
        fetch_calls: Mutex<Vec<Vec<String>>>,
        fail_search: bool,
        fail_fetch: bool,
    }

    impl FakeSource {
        fn new(ids: &[&str], records: Vec<PubmedRecord>) -> Self {
            Self {
                ids: ids.iter().map(|s| s.to_string()).collect(),
                records,
                fetch_calls: Mutex::new(Vec::new()),
                fail_search: false,
                fail_fetch: false,
            }
        }
    }

    #[async_trait]
    impl LiteratureSource for FakeSource {
        async fn search(&self, _query: &str, max_results: usize) -> Result<Vec<String>> {
            if self.fail_search {
                return Err(Error::Search("connection reset".to_string()));
            }
            Ok(self.ids.iter().take(max_results).cloned().collect())
        }

        async fn fetch(&self, ids: &[String]) -> Result<Vec<PubmedRecord>> {
            self.fetch_calls.lock().unwrap().push(ids.to_vec());
            if self.fail_fetch {
                return Err(Error::Fetch("efetch returned 502".to_string()));
            }
            Ok(self.records.clone())
        }
    }

    fn record(pmid: &str, title: Option<&str>, abstract_text: Option<&str>) -> PubmedRecord {
        PubmedRecord {
            pmid: Some(pmid.to_string()),
            title: title.map(str::to_string),
            abstract_text: abstract_text.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_no_identifiers_is_no_matches() {
        let source = Arc::new(FakeSource::new(&[], vec![record("1", Some("t"), Some("a"))]));
        let fetcher = Fetcher::new(source.clone());

        let outcome = fetcher.fetch("zzzz", 5).await.unwrap();
        assert!(matches!(outcome, FetchOutcome::NoMatches { ref query } if query == "zzzz"));
        assert!(outcome.articles().is_empty());
        assert!(source.fetch_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_records_missing_fields_are_skipped() {
        let source = Arc::new(FakeSource::new(
            &["1", "2", "3", "4"],
            vec![
                record("1", Some("Title one"), Some("Abstract one")),
                record("2", None, Some("Abstract two")),
                record("3", Some("Title three"), None),
                record("4", None, None),
            ],
        ));
        let fetcher = Fetcher::new(source.clone());

        let outcome = fetcher.fetch("math", 5).await.unwrap();
        let report = match outcome {
            FetchOutcome::Found(report) => report,
            other => panic!("expected Found, got {:?}", other),
        };
        assert_eq!(report.articles.len(), 1);
        assert_eq!(report.articles[0].pmid.as_deref(), Some("1"));
        assert_eq!(
            report.skipped.iter().map(|s| s.missing).collect::<Vec<_>>(),
            vec![MissingField::Title, MissingField::Abstract, MissingField::Both]
        );
        assert!((report.drop_rate() - 0.75).abs() < f64::EPSILON);

        // one batched fetch with every id
        let calls = source.fetch_calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 4);
    }

    #[tokio::test]
    async fn test_all_records_skipped_is_still_found() {
        let source = Arc::new(FakeSource::new(&["9"], vec![record("9", Some("Letter"), None)]));
        let outcome = Fetcher::new(source).fetch("math", 5).await.unwrap();
        match outcome {
            FetchOutcome::Found(report) => {
                assert!(report.articles.is_empty());
                assert_eq!(report.skipped.len(), 1);
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_result_count_never_exceeds_max() {
        let records = (0..8)
            .map(|i| record(&i.to_string(), Some("t"), Some("a")))
            .collect();
        let source = Arc::new(FakeSource::new(&["0", "1", "2", "3", "4", "5", "6", "7"], records));
        let outcome = Fetcher::new(source).fetch("math", 3).await.unwrap();
        assert_eq!(outcome.articles().len(), 3);
    }

    #[tokio::test]
    async fn test_search_failure_is_reported() {
        let mut source = FakeSource::new(&["1"], vec![]);
        source.fail_search = true;
        let result = Fetcher::new(Arc::new(source)).fetch("math", 5).await;
        assert!(matches!(result, Err(Error::Search(_))));
    }

    #[tokio::test]
    async fn test_fetch_failure_names_fetch_stage() {
        let mut source = FakeSource::new(&["1", "2"], vec![record("1", Some("t"), Some("a"))]);
        source.fail_fetch = true;
        let source = Arc::new(source);
        let result = Fetcher::new(source.clone()).fetch("math", 5).await;

        let err = result.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
        assert_eq!(err.stage(), Some(Stage::Fetch));
        assert_eq!(source.fetch_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_zero_max_results_rejected() {
        let source = Arc::new(FakeSource::new(&["1"], vec![]));
        let result = Fetcher::new(source).fetch("math", 0).await;
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
