//! Google Cloud Secret Manager example
//!
//! ```sh
//! export GCP_PROJECT_ID=my-project
//! export GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token)
//! cargo run --example secret_manager --features gcp
//! ```
//!
//! Secrets that are missing from the project fall back to their defaults.

use anyhow::Context;
use secretconf::{GcpSecretManager, Loader, Resolver, SecretConf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, SecretConf)]
struct Config {
    #[secret("DATABASE_URL,default=postgres://localhost/dev")]
    pub database_url: String,

    #[secret("API_KEY,default=dev-key")]
    pub api_key: String,

    #[secret("WORKER_COUNT,default=4")]
    pub worker_count: u16,

    #[secret("ALLOWED_REGIONS")]
    pub allowed_regions: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let project_id = std::env::var("GCP_PROJECT_ID").context("GCP_PROJECT_ID is not set")?;
    let source = GcpSecretManager::from_env(project_id)?;

    let resolver = Resolver::builder()
        .source(source)
        .fetch_timeout(Duration::from_secs(5))
        .build();
    let config: Config = Loader::new(resolver).load_new().await?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", mask(&config.api_key));
    println!("  Worker Count: {}", config.worker_count);
    println!("  Allowed Regions: {:?}", config.allowed_regions);

    Ok(())
}

fn mask(value: &str) -> String {
    let visible: String = value.chars().take(3).collect();
    format!("{visible}***")
}
