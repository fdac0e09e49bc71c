use std::time::Duration;

use tracing::{info, warn};

use mytheater::{
    books::BooksClient, config::Config, db, models::NewContent, store::Store, tmdb::TmdbClient,
};

const MOVIE_TITLES: &[&str] =
    &["Interstellar", "Inception", "Parasite", "Avengers: Endgame", "Joker"];

const BOOK_TITLES: &[&str] = &[
    "Sapiens",
    "Cosmos Carl Sagan",
    "Guns, Germs, and Steel",
    "The Selfish Gene",
    "A Brief History of Time",
];

// Titles that get a review attached so the watched/read sections are not
// empty on first load. Everything else lands in the archive.
const SAMPLE_REVIEWS: &[(&str, i32, &str)] = &[
    ("Interstellar", 5, "Space epic that still lands on rewatch"),
    ("Inception", 5, "A heist movie folded inside a dream"),
    ("Parasite", 5, "Razor-sharp class satire"),
    ("Sapiens", 5, "Made me rethink the last 70,000 years"),
    ("Cosmos", 5, "Science writing at its warmest"),
    ("Guns", 4, "Dense but worth the climb"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = Config::from_env()?;
    if config.tmdb_api_key.trim().is_empty() {
        anyhow::bail!("TMDB_API_KEY must be set to seed sample data");
    }
    if config.books_api_key.trim().is_empty() {
        anyhow::bail!("GOOGLE_BOOKS_API_KEY must be set to seed sample data");
    }

    let http = reqwest::Client::builder()
        .user_agent("mytheater/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;
    let store = Store::new(db);

    let tmdb = TmdbClient::new(
        http.clone(),
        config.tmdb_api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_language.clone(),
    );
    let books = BooksClient::new(
        http,
        config.books_api_key.clone(),
        config.books_base_url.clone(),
        config.books_language.clone(),
    );

    info!("seeding sample movies");
    for title in MOVIE_TITLES {
        match tmdb.search(title).await {
            Ok(items) => save_first_hit(&store, title, items).await?,
            Err(err) => warn!(%title, error = %err, "movie search failed"),
        }
        tokio::time::sleep(Duration::from_millis(config.seed_delay_ms)).await;
    }

    info!("seeding sample books");
    for title in BOOK_TITLES {
        match books.search(title).await {
            Ok(items) => save_first_hit(&store, title, items).await?,
            Err(err) => warn!(%title, error = %err, "book search failed"),
        }
        tokio::time::sleep(Duration::from_millis(config.seed_delay_ms)).await;
    }

    let (contents, reviews) = store.table_counts().await?;
    info!(contents, reviews, "sample data seeded");
    Ok(())
}

async fn save_first_hit(
    store: &Store,
    searched: &str,
    items: Vec<NewContent>,
) -> anyhow::Result<()> {
    let Some(item) = items.into_iter().next() else {
        warn!(title = searched, "no search results");
        return Ok(());
    };

    let saved = store.insert_content(&item).await?;
    info!(id = saved.id, kind = %saved.kind, title = %saved.title, "seeded content");

    if let Some((_, rating, one_liner)) =
        SAMPLE_REVIEWS.iter().find(|(keyword, _, _)| saved.title.contains(keyword))
    {
        let review = store
            .insert_review(saved.id, *rating, Some(one_liner.to_string()), None)
            .await?;
        info!(id = review.id, content_id = saved.id, rating, "seeded review");
    }

    Ok(())
}
