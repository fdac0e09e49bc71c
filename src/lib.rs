pub mod books;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tmdb;

use std::sync::Arc;

use crate::{books::BooksClient, config::Config, store::Store, tmdb::TmdbClient};

pub struct AppState {
    pub config: Arc<Config>,
    pub store: Store,
    pub tmdb: Arc<TmdbClient>,
    pub books: Arc<BooksClient>,
}
