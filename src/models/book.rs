//! Book model
//!
//! Books only matter to the catalog controllers as dependents of authors and
//! genres. They are written through the store directly.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, EntityKind};

/// Book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub isbn: String,
    pub author_id: Uuid,
    /// A book can be filed under several genres
    pub genre_ids: Vec<Uuid>,
}

/// Foreign-key filters on books
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFilter {
    Author(Uuid),
    Genre(Uuid),
}

impl Entity for Book {
    type Filter = BookFilter;

    const KIND: EntityKind = EntityKind::Book;

    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.title
    }

    fn matches(&self, filter: &BookFilter) -> bool {
        match *filter {
            BookFilter::Author(id) => self.author_id == id,
            BookFilter::Genre(id) => self.genre_ids.contains(&id),
        }
    }
}
