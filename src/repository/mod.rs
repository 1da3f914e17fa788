//! Repository layer for catalog storage
//!
//! Every entity kind is reached through the same [`Store`] interface. The
//! PostgreSQL repositories are used in production, [`MemoryStore`] backs the
//! `memory` storage backend and the tests.

pub mod authors;
pub mod books;
pub mod genres;
pub mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, Book, Entity, Genre},
};

pub use memory::MemoryStore;

/// Storage operations for one entity kind.
///
/// Absence is reported as `None` or `false`, never as an error.
#[async_trait]
pub trait Store<E: Entity>: Send + Sync {
    /// All records, ascending by the kind's sort key
    async fn find_all_sorted(&self) -> AppResult<Vec<E>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<E>>;

    /// Records matching an equality filter, ascending by sort key
    async fn find_where(&self, filter: &E::Filter) -> AppResult<Vec<E>>;

    async fn insert(&self, entity: &E) -> AppResult<E>;

    /// Returns whether a record was removed
    async fn remove_by_id(&self, id: Uuid) -> AppResult<bool>;

    /// Overwrite every field of the record stored under `id`.
    /// `entity.id()` must equal `id`.
    async fn update_by_id(&self, id: Uuid, entity: &E) -> AppResult<Option<E>>;

    async fn count(&self) -> AppResult<i64> {
        Ok(self.find_all_sorted().await?.len() as i64)
    }
}

/// Main repository struct holding one store per entity kind
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub authors: Arc<dyn Store<Author>>,
    pub genres: Arc<dyn Store<Genre>>,
    pub books: Arc<dyn Store<Book>>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            authors: Arc::new(authors::AuthorsRepository::new(pool.clone())),
            genres: Arc::new(genres::GenresRepository::new(pool.clone())),
            books: Arc::new(books::BooksRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Create a repository whose records live in process memory
    pub fn in_memory() -> Self {
        Self {
            pool: None,
            authors: Arc::new(MemoryStore::<Author>::new()),
            genres: Arc::new(MemoryStore::<Genre>::new()),
            books: Arc::new(MemoryStore::<Book>::new()),
        }
    }

    /// Check that the backing database answers
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}
