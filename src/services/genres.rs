//! Genre service

use std::time::Duration;

use uuid::Uuid;

use super::{fetch_with_books, Deletion, Submission, WithBooks};
use crate::{
    error::{AppError, AppResult},
    models::{BookFilter, Genre, GenreFilter, GenreForm},
    repository::Repository,
};

#[derive(Clone)]
pub struct GenreService {
    repository: Repository,
    fetch_timeout: Duration,
}

impl GenreService {
    pub fn new(repository: Repository, fetch_timeout: Duration) -> Self {
        Self {
            repository,
            fetch_timeout,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres.find_all_sorted().await
    }

    pub async fn get_with_books(&self, id: Uuid) -> AppResult<WithBooks<Genre>> {
        let (genre, books) = fetch_with_books(
            self.repository.genres.as_ref(),
            self.repository.books.as_ref(),
            id,
            BookFilter::Genre(id),
            self.fetch_timeout,
        )
        .await?;
        let genre = genre.ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))?;
        Ok(WithBooks {
            entity: genre,
            books,
        })
    }

    /// Create a genre, or resolve to the existing one with the same name.
    ///
    /// The name lookup and the insert are not atomic: two concurrent
    /// submissions of a new name can both insert.
    pub async fn create(&self, form: &GenreForm) -> AppResult<Submission<Genre>> {
        let data = match form.validate() {
            Ok(data) => data,
            Err(errors) => return Ok(Submission::Rejected(errors)),
        };

        let existing = self
            .repository
            .genres
            .find_where(&GenreFilter::Name(data.name.clone()))
            .await?;
        if let Some(genre) = existing.into_iter().next() {
            tracing::info!("Genre {:?} already exists as {}", genre.name, genre.id);
            return Ok(Submission::Existing(genre));
        }

        let genre = self
            .repository
            .genres
            .insert(&Genre::from_new(Uuid::new_v4(), data))
            .await?;
        tracing::info!("Created genre {} ({})", genre.id, genre.name);
        Ok(Submission::Saved(genre))
    }

    /// Delete a genre unless books are still filed under it
    pub async fn delete(&self, id: Uuid) -> AppResult<Deletion<Genre>> {
        let record = self.get_with_books(id).await?;
        if !record.books.is_empty() {
            tracing::info!(
                "Refusing to delete genre {}: {} book(s) reference it",
                id,
                record.books.len()
            );
            return Ok(Deletion::Blocked(record));
        }

        if !self.repository.genres.remove_by_id(id).await? {
            return Err(AppError::NotFound(format!("Genre {} not found", id)));
        }
        tracing::info!("Deleted genre {}", id);
        Ok(Deletion::Deleted)
    }

    pub async fn update(&self, id: Uuid, form: &GenreForm) -> AppResult<Submission<Genre>> {
        let data = match form.validate() {
            Ok(data) => data,
            Err(errors) => {
                if self.repository.genres.find_by_id(id).await?.is_none() {
                    return Err(AppError::NotFound(format!("Genre {} not found", id)));
                }
                return Ok(Submission::Rejected(errors));
            }
        };
        let genre = Genre::from_new(id, data);
        let updated = self
            .repository
            .genres
            .update_by_id(id, &genre)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Genre {} not found", id)))?;
        tracing::info!("Updated genre {}", id);
        Ok(Submission::Saved(updated))
    }
}
