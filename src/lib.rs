//! LocalLibrary catalog
//!
//! A server-rendered web application for browsing and editing the authors
//! and genres of a small library catalog.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
    pub views: views::Views,
}

impl AppState {
    /// Build the state around an already-opened repository
    pub fn new(config: AppConfig, repository: repository::Repository) -> AppResult<Self> {
        let services = services::Services::new(repository, &config.catalog);
        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
            views: views::Views::new()?,
        })
    }
}
