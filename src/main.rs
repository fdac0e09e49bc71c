use std::{sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use mytheater::{
    AppState, books::BooksClient, config::Config, db, routes, store::Store, tmdb::TmdbClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,mytheater=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

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

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
        tmdb: Arc::new(tmdb),
        books: Arc::new(books),
    });

    let app = Router::new()
        .route("/api/search/movies", get(routes::search_movies))
        .route("/api/search/books", get(routes::search_books))
        .route("/api/contents", get(routes::list_contents).post(routes::create_content))
        .route("/api/contents/{id}", get(routes::content_detail).delete(routes::delete_content))
        .route("/api/reviews", get(routes::list_reviews).post(routes::create_review))
        .route("/api/reviews/{id}", put(routes::update_review).delete(routes::delete_review))
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
