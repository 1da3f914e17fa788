//! Catalog overview service

use serde::Serialize;

use crate::{error::AppResult, repository::Repository};

/// Record counts shown on the catalog home page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogCounts {
    pub authors: i64,
    pub genres: i64,
    pub books: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn counts(&self) -> AppResult<CatalogCounts> {
        let (authors, genres, books) = tokio::try_join!(
            self.repository.authors.count(),
            self.repository.genres.count(),
            self.repository.books.count()
        )?;
        Ok(CatalogCounts {
            authors,
            genres,
            books,
        })
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }
}
