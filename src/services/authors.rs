//! Author service

use std::time::Duration;

use uuid::Uuid;

use super::{fetch_with_books, Deletion, Submission, WithBooks};
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorForm, BookFilter},
    repository::Repository,
};

#[derive(Clone)]
pub struct AuthorService {
    repository: Repository,
    fetch_timeout: Duration,
}

impl AuthorService {
    pub fn new(repository: Repository, fetch_timeout: Duration) -> Self {
        Self {
            repository,
            fetch_timeout,
        }
    }

    /// All authors, by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors.find_all_sorted().await
    }

    /// Author and their books
    pub async fn get_with_books(&self, id: Uuid) -> AppResult<WithBooks<Author>> {
        let (author, books) = fetch_with_books(
            self.repository.authors.as_ref(),
            self.repository.books.as_ref(),
            id,
            BookFilter::Author(id),
            self.fetch_timeout,
        )
        .await?;
        let author = author.ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
        Ok(WithBooks {
            entity: author,
            books,
        })
    }

    pub async fn create(&self, form: &AuthorForm) -> AppResult<Submission<Author>> {
        let data = match form.validate() {
            Ok(data) => data,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };
        let author = self
            .repository
            .authors
            .insert(&Author::from_new(Uuid::new_v4(), data))
            .await?;
        tracing::info!("Created author {} ({})", author.id, author.name());
        Ok(Submission::Saved(author))
    }

    /// Delete an author unless books still reference them.
    ///
    /// The book check and the removal are separate store calls, so a book
    /// added in between is not seen.
    pub async fn delete(&self, id: Uuid) -> AppResult<Deletion<Author>> {
        let record = self.get_with_books(id).await?;
        if !record.books.is_empty() {
            tracing::info!(
                "Refusing to delete author {}: {} book(s) reference it",
                id,
                record.books.len()
            );
            return Ok(Deletion::Blocked(record));
        }

        if !self.repository.authors.remove_by_id(id).await? {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        tracing::info!("Deleted author {}", id);
        Ok(Deletion::Deleted)
    }

    /// Overwrite the author stored under `id` with the submitted fields
    pub async fn update(&self, id: Uuid, form: &AuthorForm) -> AppResult<Submission<Author>> {
        let data = match form.validate() {
            Ok(data) => data,
            Err(errors) => {
                if self.repository.authors.find_by_id(id).await?.is_none() {
                    return Err(AppError::NotFound(format!("Author {} not found", id)));
                }
                return Ok(Submission::Rejected(errors));
            }
        };
        let author = Author::from_new(id, data);
        let updated = self
            .repository
            .authors
            .update_by_id(id, &author)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
        tracing::info!("Updated author {}", id);
        Ok(Submission::Saved(updated))
    }
}
