//! Genre model

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, EntityKind};
use crate::validation::{Check, FieldError, Fields, Rules};

/// Genre record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Genre {
    pub id: Uuid,
    /// 3 to 100 characters. Unique by convention only
    pub name: String,
}

impl Genre {
    pub fn from_new(id: Uuid, data: NewGenre) -> Self {
        Self {
            id,
            name: data.name,
        }
    }
}

/// Equality filters on genres
#[derive(Debug, Clone)]
pub enum GenreFilter {
    /// Exact, case-sensitive name match
    Name(String),
}

impl Entity for Genre {
    type Filter = GenreFilter;

    const KIND: EntityKind = EntityKind::Genre;

    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.name
    }

    fn matches(&self, filter: &GenreFilter) -> bool {
        match filter {
            GenreFilter::Name(name) => &self.name == name,
        }
    }
}

/// Genre form as submitted
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenreForm {
    #[serde(default)]
    pub name: String,
}

/// Sanitized genre fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGenre {
    pub name: String,
}

static GENRE_RULES: Lazy<Rules> = Lazy::new(|| {
    Rules::new()
        .rule("name", Check::Required, "Genre name required")
        .rule(
            "name",
            Check::Length { min: 3, max: 100 },
            "Genre name must be between 3 and 100 characters.",
        )
});

impl Fields for GenreForm {
    fn field(&self, name: &str) -> &str {
        match name {
            "name" => &self.name,
            _ => "",
        }
    }
}

impl GenreForm {
    pub fn validate(&self) -> Result<NewGenre, Vec<FieldError>> {
        let errors = GENRE_RULES.evaluate(self);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewGenre {
            name: self.name.trim().to_string(),
        })
    }
}

impl From<&Genre> for GenreForm {
    fn from(genre: &Genre) -> Self {
        Self {
            name: genre.name.clone(),
        }
    }
}
