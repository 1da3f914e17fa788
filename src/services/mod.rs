//! Business logic services
//!
//! Author and genre flows share one shape: fetch the record and the books
//! that reference it concurrently, then branch on what came back.

pub mod authors;
pub mod catalog;
pub mod genres;

use std::time::Duration;

use uuid::Uuid;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::{Book, BookFilter, Entity},
    repository::{Repository, Store},
    validation::FieldError,
};

/// A record together with the books that depend on it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithBooks<E> {
    pub entity: E,
    pub books: Vec<Book>,
}

/// Result of a create or update submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<E> {
    /// The record was written
    Saved(E),
    /// An equivalent record already existed and nothing was written
    Existing(E),
    /// The form failed validation and nothing was written
    Rejected(Vec<FieldError>),
}

/// Result of a guarded delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deletion<E> {
    Deleted,
    /// Books still reference the record
    Blocked(WithBooks<E>),
}

/// Fetch a record and its dependent books concurrently.
///
/// Fails with the first error of either read, or with a timeout when both
/// have not completed within `limit`.
pub async fn fetch_with_books<E: Entity>(
    entities: &dyn Store<E>,
    books: &dyn Store<Book>,
    id: Uuid,
    filter: BookFilter,
    limit: Duration,
) -> AppResult<(Option<E>, Vec<Book>)> {
    let both = async { tokio::try_join!(entities.find_by_id(id), books.find_where(&filter)) };
    tokio::time::timeout(limit, both).await.map_err(|_| {
        AppError::Timeout(format!("Fetching {} {} and its books", E::KIND.slug(), id))
    })?
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorService,
    pub genres: genres::GenreService,
    pub catalog: catalog::CatalogService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, catalog_config: &CatalogConfig) -> Self {
        let fetch_timeout = catalog_config.fetch_timeout();
        Self {
            authors: authors::AuthorService::new(repository.clone(), fetch_timeout),
            genres: genres::GenreService::new(repository.clone(), fetch_timeout),
            catalog: catalog::CatalogService::new(repository),
        }
    }
}
