use std::time::Duration;
use clap::Args;
use crate::client::{PubmedConfig, DEFAULT_EMAIL, DEFAULT_EUTILS_URL};

#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// PubMed search term
    #[arg(long, default_value = "math")]
    pub query: String,

    /// Contact email sent with every E-utilities request
    #[arg(long, env = "NCBI_EMAIL", default_value = DEFAULT_EMAIL)]
    pub email: String,

    /// Maximum number of records to search for
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: u32,

    /// Optional NCBI API key for a higher rate allowance
    #[arg(long, env = "NCBI_API_KEY", hide_env_values = true)]
    pub ncbi_api_key: Option<String>,

    /// E-utilities base URL
    #[arg(long, env = "NCBI_EUTILS_URL", default_value = DEFAULT_EUTILS_URL)]
    pub eutils_url: String,
}

impl FetchArgs {
    pub fn to_config(&self, timeout: Duration) -> PubmedConfig {
        PubmedConfig {
            base_url: self.eutils_url.clone(),
            email: self.email.clone(),
            api_key: self.ncbi_api_key.clone(),
            timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        fetch: FetchArgs,
    }

    #[test]
    fn test_defaults_match_reference_run() {
        let cli = TestCli::try_parse_from(["px"]).unwrap();
        assert_eq!(cli.fetch.query, "math");
        assert_eq!(cli.fetch.max_results, 5);

        let config = cli.fetch.to_config(Duration::from_secs(10));
        assert_eq!(config.base_url, DEFAULT_EUTILS_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_zero_max_results_rejected() {
        assert!(TestCli::try_parse_from(["px", "--max-results", "0"]).is_err());
    }
}
