use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use tracing::{info, warn};
use px_inference::models::openai::DEFAULT_MODEL;
use px_inference::prelude::*;
use px_pubmed::logging::init_logging;
use px_pubmed::{FetchArgs, FetchOutcome, Fetcher, PubmedClient};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let duration = humantime::parse_duration(s.trim()).map_err(|e| e.to_string())?;
        if duration.is_zero() {
            return Err("Duration must be greater than zero".to_string());
        }
        Ok(HumanDuration(duration))
    }
}

/// Fetch PubMed abstracts and extract structured article metadata with a
/// few-shot primed language model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    fetch: FetchArgs,
    #[arg(long, default_value = "openai", help = "Model to use for extraction. Available models: openai (default), replay")]
    model: String,
    #[arg(long, default_value = DEFAULT_MODEL)]
    model_name: String,
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    #[arg(long, env = "OPENAI_BASE_URL")]
    model_url: Option<String>,
    /// Deadline for each outbound request (e.g. 30s, 2m)
    #[arg(long, default_value = "30s")]
    timeout: HumanDuration,
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            model_name: Some(self.model_name.clone()),
            model_url: self.model_url.clone(),
            timeout: self.timeout.0,
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let source = Arc::new(PubmedClient::new(cli.fetch.to_config(cli.timeout.0))?);

    let model = create_model(&cli.inference_config())?;
    info!("🧠 Inference model initialized (using {})", model.name());
    let extractor = Extractor::new(model, &default_corpus())?;

    let fetcher = Fetcher::new(source);
    let report = match fetcher.fetch(&cli.fetch.query, cli.fetch.max_results as usize).await? {
        FetchOutcome::NoMatches { query } => {
            println!("No results found for '{}'", query);
            return Ok(());
        }
        FetchOutcome::Found(report) => report,
    };

    if report.articles.is_empty() {
        warn!("All {} fetched records lacked a title or abstract", report.skipped.len());
        println!("{}", serde_json::to_string_pretty(&Data::default())?);
        return Ok(());
    }

    let text = render_articles(&report.articles);
    let data = extractor.extract(&text).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}

/// One stderr line per failure, always led by the stage it came from.
fn failure_line(e: &Error) -> String {
    match e.stage() {
        Some(stage) => format!("error: {}: {}", stage, e),
        None => format!("error: internal: {}", e),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    init_logging("info");

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", failure_line(&e));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_duration() {
        assert_eq!("30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(30));
        assert_eq!("1m 30s".parse::<HumanDuration>().unwrap().0, Duration::from_secs(90));
        assert!("0s".parse::<HumanDuration>().is_err());
        assert!("soon".parse::<HumanDuration>().is_err());
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["px"]).unwrap();
        assert_eq!(cli.fetch.query, "math");
        assert_eq!(cli.fetch.max_results, 5);
        assert_eq!(cli.model, "openai");
        assert_eq!(cli.timeout.0, Duration::from_secs(30));

        let config = cli.inference_config();
        assert_eq!(config.model_name.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_failure_line_names_stage() {
        assert_eq!(
            failure_line(&Error::Fetch("efetch returned 502".to_string())),
            "error: fetch: Fetch failed: efetch returned 502"
        );
        assert_eq!(
            failure_line(&Error::Config("OpenAI API key is required".to_string())),
            "error: config: Configuration error: OpenAI API key is required"
        );
        let err = serde_json::from_str::<Data>("{}").unwrap_err();
        assert!(failure_line(&Error::from(err)).starts_with("error: internal: Serialization error:"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "px",
            "--query",
            "foot arch",
            "--max-results",
            "2",
            "--model",
            "replay",
            "--timeout",
            "5s",
        ])
        .unwrap();
        assert_eq!(cli.fetch.query, "foot arch");
        assert_eq!(cli.fetch.max_results, 2);
        assert_eq!(cli.inference_config().model, "replay");
        assert_eq!(cli.inference_config().timeout, Duration::from_secs(5));
    }
}
