//! Environment variable prefix example

use secretconf::{Loader, Resolver, ResolverConfig, SecretConf, ENV_PREFIX_VAR};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, SecretConf)]
struct Config {
    // Reads MYAPP_DATABASE_URL
    #[secret("DATABASE_URL,required")]
    pub database_url: String,

    // Reads MYAPP_API_KEY
    #[secret("API_KEY,required")]
    pub api_key: String,

    // Reads MYAPP_MAX_RETRIES, defaults to 3
    #[secret("MAX_RETRIES,default=3")]
    pub max_retries: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Resolver settings can come from the environment too
    std::env::set_var(ENV_PREFIX_VAR, "MYAPP_");

    std::env::set_var("MYAPP_DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("MYAPP_API_KEY", "secret123");
    // Unprefixed variables are not consulted
    std::env::set_var("MAX_RETRIES", "99");

    let config = ResolverConfig::from_env()?;
    println!("Resolver settings: {config:?}");

    let loader = Loader::new(Resolver::builder().config(config).build());
    let config: Config = loader.load_new().await?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  API Key: {}", config.api_key);
    println!("  Max Retries: {}", config.max_retries);

    Ok(())
}
