pub mod cli;
pub mod client;
pub mod fetcher;
pub mod logging;
pub mod parser;

pub use cli::FetchArgs;
pub use client::{PubmedClient, PubmedConfig};
pub use fetcher::{FetchOutcome, FetchReport, Fetcher, MissingField, RecordOutcome, SkippedRecord};
