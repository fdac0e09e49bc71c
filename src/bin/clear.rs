use tracing::info;

use mytheater::{config::Config, db, store::Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = Store::new(db);

    let (contents, reviews) = store.table_counts().await?;
    info!(contents, reviews, "current row counts");

    if contents == 0 && reviews == 0 {
        info!("database is already empty");
        return Ok(());
    }

    let (deleted_contents, deleted_reviews) = store.clear_all().await?;
    info!(deleted_contents, deleted_reviews, "all data cleared, id sequences reset");
    Ok(())
}
