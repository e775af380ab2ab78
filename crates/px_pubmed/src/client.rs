use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;
use px_core::{Error, LiteratureSource, PubmedRecord, Result};
use crate::parser::parse_efetch_xml;

pub const DEFAULT_EUTILS_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";
pub const DEFAULT_EMAIL: &str = "your_email@example.com";
const TOOL_NAME: &str = "px";

#[derive(Debug, Clone)]
pub struct PubmedConfig {
    pub base_url: String,
    /// Contact address NCBI asks every E-utilities caller to send
    pub email: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for PubmedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EUTILS_URL.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Deserialize)]
struct ESearchResponse {
    esearchresult: ESearchResult,
}

#[derive(Deserialize)]
struct ESearchResult {
    #[serde(default)]
    idlist: Vec<String>,
    #[serde(rename = "ERROR")]
    error: Option<String>,
}

/// NCBI E-utilities client for the `pubmed` database.
pub struct PubmedClient {
    client: Client,
    base_url: Url,
    email: String,
    api_key: Option<String>,
}

impl fmt::Debug for PubmedClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PubmedClient")
            .field("client", &"<reqwest::Client>")
            .field("base_url", &self.base_url.as_str())
            .field("email", &self.email)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .finish()
    }
}

impl PubmedClient {
    pub fn new(config: PubmedConfig) -> Result<Self> {
        if config.email.trim().is_empty() {
            return Err(Error::Config("NCBI requires a contact email for E-utilities".to_string()));
        }

        let mut base = config.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base_url = Url::parse(&base)
            .map_err(|e| Error::Config(format!("Invalid E-utilities URL '{}': {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("px/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            email: config.email,
            api_key: config.api_key,
        })
    }

    fn endpoint(&self, name: &str) -> Result<Url> {
        self.base_url
            .join(name)
            .map_err(|e| Error::Config(format!("Invalid E-utilities endpoint {}: {}", name, e)))
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("tool", TOOL_NAME.to_string()),
            ("email", self.email.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }
}

#[async_trait]
impl LiteratureSource for PubmedClient {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<String>> {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max_results.to_string()));
        params.push(("retmode", "json".to_string()));

        let response = self.client
            .get(self.endpoint("esearch.fcgi")?)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Search(e.to_string()))?;

        let body: ESearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Malformed esearch response: {}", e)))?;

        if let Some(error) = body.esearchresult.error {
            return Err(Error::Search(error));
        }

        tracing::debug!("esearch returned {} ids for '{}'", body.esearchresult.idlist.len(), query);
        Ok(body.esearchresult.idlist)
    }

    async fn fetch(&self, ids: &[String]) -> Result<Vec<PubmedRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut params = self.base_params();
        params.push(("id", ids.join(",")));
        params.push(("rettype", "abstract".to_string()));
        params.push(("retmode", "xml".to_string()));

        let xml = self.client
            .get(self.endpoint("efetch.fcgi")?)
            .query(&params)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Fetch(e.to_string()))?
            .text()
            .await
            .map_err(|e| Error::Fetch(e.to_string()))?;

        parse_efetch_xml(&xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_requires_email() {
        let config = PubmedConfig {
            email: "  ".to_string(),
            ..Default::default()
        };
        let result = PubmedClient::new(config);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_endpoints_join_base_url() {
        let client = PubmedClient::new(PubmedConfig {
            base_url: "http://localhost:8080/eutils".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint("esearch.fcgi").unwrap().as_str(),
            "http://localhost:8080/eutils/esearch.fcgi"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = PubmedClient::new(PubmedConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_base_params_carry_contact() {
        let client = PubmedClient::new(PubmedConfig {
            api_key: Some("secret".to_string()),
            ..Default::default()
        })
        .unwrap();
        let params = client.base_params();
        assert!(params.contains(&("email", DEFAULT_EMAIL.to_string())));
        assert!(params.contains(&("api_key", "secret".to_string())));
        assert!(!format!("{:?}", client).contains("secret"));
    }

    #[test]
    fn test_esearch_error_payload() {
        let body: ESearchResponse =
            serde_json::from_str(r#"{"esearchresult":{"ERROR":"Invalid query"}}"#).unwrap();
        assert!(body.esearchresult.idlist.is_empty());
        assert_eq!(body.esearchresult.error.as_deref(), Some("Invalid query"));
    }

    #[tokio::test]
    #[ignore = "hits the live NCBI service"]
    async fn test_live_search() {
        let client = PubmedClient::new(PubmedConfig::default()).unwrap();
        let ids = client.search("math", 5).await.unwrap();
        assert!(ids.len() <= 5);
        let records = client.fetch(&ids).await.unwrap();
        assert!(records.len() <= ids.len());
    }
}
