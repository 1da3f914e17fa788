//! HTTP handlers for the catalog pages

pub mod authors;
pub mod catalog;
pub mod genres;
pub mod health;

use axum::{routing::get, Router};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(catalog::home))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/catalog", get(catalog::index))
        // Authors
        .route("/catalog/authors", get(authors::author_list))
        .route(
            "/catalog/author/create",
            get(authors::author_create_get).post(authors::author_create_post),
        )
        .route("/catalog/author/:id", get(authors::author_detail))
        .route(
            "/catalog/author/:id/delete",
            get(authors::author_delete_get).post(authors::author_delete_post),
        )
        .route(
            "/catalog/author/:id/update",
            get(authors::author_update_get).post(authors::author_update_post),
        )
        // Genres
        .route("/catalog/genres", get(genres::genre_list))
        .route(
            "/catalog/genre/create",
            get(genres::genre_create_get).post(genres::genre_create_post),
        )
        .route("/catalog/genre/:id", get(genres::genre_detail))
        .route(
            "/catalog/genre/:id/delete",
            get(genres::genre_delete_get).post(genres::genre_delete_post),
        )
        .route(
            "/catalog/genre/:id/update",
            get(genres::genre_update_get).post(genres::genre_update_post),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .with_state(state)
}
