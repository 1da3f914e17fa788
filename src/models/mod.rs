//! Data models for the catalog
//!
//! Entities are plain records. Persistence lives behind
//! [`crate::repository::Store`], and derived fields such as the canonical URL
//! are computed at read time by [`url_for`].

pub mod author;
pub mod book;
pub mod genre;

use serde::Serialize;
use uuid::Uuid;

// Re-export commonly used types
pub use author::{Author, AuthorFilter, AuthorForm, AuthorView, NewAuthor};
pub use book::{Book, BookFilter};
pub use genre::{Genre, GenreFilter, GenreForm, NewGenre};

/// Kinds of record that have a canonical page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Author,
    Genre,
    Book,
}

impl EntityKind {
    pub fn slug(self) -> &'static str {
        match self {
            EntityKind::Author => "author",
            EntityKind::Genre => "genre",
            EntityKind::Book => "book",
        }
    }

    /// URL of the collection page for this kind
    pub fn list_url(self) -> String {
        format!("/catalog/{}s", self.slug())
    }
}

/// Canonical detail URL of a record
pub fn url_for(kind: EntityKind, id: Uuid) -> String {
    format!("/catalog/{}/{}", kind.slug(), id)
}

/// A record kind the store knows how to hold
pub trait Entity: Clone + Send + Sync + 'static {
    /// Equality filters accepted by `find_where`
    type Filter: Send + Sync;

    const KIND: EntityKind;

    fn id(&self) -> Uuid;

    /// Key the collection is listed by
    fn sort_key(&self) -> &str;

    fn matches(&self, filter: &Self::Filter) -> bool;

    fn url(&self) -> String {
        url_for(Self::KIND, self.id())
    }
}

/// A record paired with its derived URL, as handed to the templates
#[derive(Debug, Serialize)]
pub struct Linked<'a, E: Serialize> {
    #[serde(flatten)]
    pub record: &'a E,
    pub url: String,
}

impl<'a, E: Entity + Serialize> Linked<'a, E> {
    pub fn new(record: &'a E) -> Self {
        Self {
            url: record.url(),
            record,
        }
    }

    pub fn all(records: &'a [E]) -> Vec<Self> {
        records.iter().map(Linked::new).collect()
    }
}
