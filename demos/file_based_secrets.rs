//! File-based secrets example
//!
//! Reads secrets from a directory laid out like a Docker or Kubernetes
//! secret mount: one file per key, file content is the value.

use secretconf::{FileSource, Loader, Resolver, SecretConf};
use std::fs;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, SecretConf)]
struct Config {
    #[secret("DATABASE_PASSWORD,required")]
    pub database_password: String,

    #[secret("API_KEY,required")]
    pub api_key: String,

    #[secret("API_TIMEOUT,default=30")]
    pub api_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let secrets_dir = std::env::temp_dir().join("secretconf-demo-secrets");
    fs::create_dir_all(&secrets_dir)?;

    // Trailing newlines are trimmed when read
    fs::write(secrets_dir.join("DATABASE_PASSWORD"), "super_secret_password\n")?;
    fs::write(secrets_dir.join("API_KEY"), "sk-file-based-key\n")?;

    // Environment variables still take precedence over files
    std::env::set_var("API_KEY", "sk-from-environment");

    let resolver = Resolver::builder()
        .source(FileSource::new(&secrets_dir))
        .build();
    let config: Config = Loader::new(resolver).load_new().await?;

    println!("Configuration loaded:");
    println!("  Database Password: {}", config.database_password);
    println!("  API Key: {}", config.api_key);
    println!("  API Timeout: {}", config.api_timeout);

    fs::remove_dir_all(&secrets_dir)?;
    Ok(())
}
