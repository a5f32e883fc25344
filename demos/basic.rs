//! Basic usage example

use secretconf::{Loader, Resolver, SecretConf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, SecretConf)]
struct Config {
    // Required field: loaded from DATABASE_URL
    #[secret("DATABASE_URL,required")]
    pub database_url: String,

    // With default value
    #[secret("SERVER_ADDR,default=127.0.0.1:8080")]
    pub server_addr: String,

    // Numeric type
    #[secret("MAX_CONNECTIONS,default=10")]
    pub max_connections: u32,

    // Boolean type
    #[secret("DEBUG_MODE,default=false")]
    pub debug_mode: bool,

    // JSON array or comma-separated list
    #[secret("ALLOWED_ORIGINS")]
    pub allowed_origins: Vec<String>,

    // Never touched by the loader
    #[secret("-")]
    pub build_id: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set RUST_LOG=secretconf=debug to see which tier served each field
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Set environment variables for demonstration
    std::env::set_var("DATABASE_URL", "postgres://localhost/mydb");
    std::env::set_var("SERVER_ADDR", "0.0.0.0:3000");
    std::env::set_var("ALLOWED_ORIGINS", "https://a.example, https://b.example");

    // No secret store bound: environment variables and defaults only
    let loader = Loader::new(Resolver::new());
    let config: Config = loader.load_new().await?;

    println!("Configuration loaded:");
    println!("  Database URL: {}", config.database_url);
    println!("  Server Address: {}", config.server_addr);
    println!("  Max Connections: {}", config.max_connections);
    println!("  Debug Mode: {}", config.debug_mode);
    println!("  Allowed Origins: {:?}", config.allowed_origins);
    println!("  Build ID: {:?}", config.build_id);

    Ok(())
}
