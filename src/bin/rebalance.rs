use tracing::info;

use mytheater::{config::Config, db, store::Store};

// Title keywords whose reviews get dropped, moving those rows into the
// review-less archive section.
const ARCHIVE_MOVIES: &[&str] = &["Joker", "Avengers"];
const ARCHIVE_BOOKS: &[&str] = &["Selfish Gene", "Brief History"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = Store::new(db);

    let contents = store.all_contents().await?;
    info!(total = contents.len(), "rebalancing sample data");

    let mut archived = 0u64;
    let mut kept = 0u64;

    for item in contents {
        let archive_keywords = match item.kind.as_str() {
            "movie" => ARCHIVE_MOVIES,
            "book" => ARCHIVE_BOOKS,
            _ => continue,
        };

        if archive_keywords.iter().any(|keyword| item.title.contains(keyword)) {
            let deleted = store.delete_reviews_for_content(item.id).await?;
            if deleted > 0 {
                info!(id = item.id, title = %item.title, deleted, "moved to archive");
                archived += 1;
            }
        } else {
            let count = store.review_count_for_content(item.id).await?;
            if count > 0 {
                info!(id = item.id, title = %item.title, reviews = count, "keeping reviews");
                kept += 1;
            }
        }
    }

    info!(archived, kept, "rebalance complete");
    Ok(())
}
