//! Resolving reference expressions without a struct

use secretconf::{MemorySource, Resolver};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    std::env::set_var("LOG_LEVEL", "debug");

    // In-memory store standing in for a real secret manager
    let store = MemorySource::new()
        .with("DB_PASSWORD", "from-the-store")
        .with("FEATURE_FLAGS", r#"["search","export"]"#);

    let resolver = Resolver::builder().source(store).build();

    // Environment wins over the store and the fallback
    println!("LOG_LEVEL   = {}", resolver.resolve("sm://LOG_LEVEL||info").await?);

    // Not in the environment, served by the store
    println!("DB_PASSWORD = {}", resolver.resolve("sm://DB_PASSWORD||changeme").await?);

    // Neither environment nor store, fallback applies
    println!("DB_HOST     = {}", resolver.resolve("sm://DB_HOST||localhost").await?);

    // Not a reference: returned verbatim
    println!("literal     = {}", resolver.resolve("plain-value").await?);

    // No fallback and nothing found
    match resolver.resolve("sm://MISSING_KEY").await {
        Ok(value) => println!("MISSING_KEY = {value}"),
        Err(e) => println!("MISSING_KEY -> {e}"),
    }

    // A single reference holding a JSON array expands into its elements
    let flags = resolver.resolve_list(&["sm://FEATURE_FLAGS"]).await?;
    println!("flags       = {flags:?}");

    // Mixed lists are resolved element by element
    let hosts = resolver
        .resolve_list(&["sm://DB_HOST||db-1", "db-2.internal"])
        .await?;
    println!("hosts       = {hosts:?}");

    Ok(())
}
