//! Author model and related types

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::{Entity, EntityKind};
use crate::validation::{optional_date, Check, FieldError, Fields, Rules};

/// Full author model from the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Build a record from sanitized fields, keeping `id` as given
    pub fn from_new(id: Uuid, data: NewAuthor) -> Self {
        Self {
            id,
            first_name: data.first_name,
            family_name: data.family_name,
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        }
    }

    /// Display name, "family, first"
    pub fn name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            format_date(self.date_of_birth),
            format_date(self.date_of_death)
        )
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Author as handed to the templates, with its derived fields
#[derive(Debug, Serialize)]
pub struct AuthorView<'a> {
    #[serde(flatten)]
    pub author: &'a Author,
    pub url: String,
    pub name: String,
    pub lifespan: String,
}

impl<'a> From<&'a Author> for AuthorView<'a> {
    fn from(author: &'a Author) -> Self {
        Self {
            url: author.url(),
            name: author.name(),
            lifespan: author.lifespan(),
            author,
        }
    }
}

/// Equality filters on authors
#[derive(Debug, Clone)]
pub enum AuthorFilter {
    FamilyName(String),
}

impl Entity for Author {
    type Filter = AuthorFilter;

    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> Uuid {
        self.id
    }

    fn sort_key(&self) -> &str {
        &self.family_name
    }

    fn matches(&self, filter: &AuthorFilter) -> bool {
        match filter {
            AuthorFilter::FamilyName(name) => &self.family_name == name,
        }
    }
}

/// Author form as submitted, before any sanitization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub family_name: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub date_of_death: String,
}

/// Sanitized author fields, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuthor {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

static AUTHOR_RULES: Lazy<Rules> = Lazy::new(|| {
    Rules::new()
        .rule("first_name", Check::Required, "First name must be specified.")
        .rule(
            "first_name",
            Check::Length { min: 1, max: 100 },
            "First name must be at most 100 characters.",
        )
        .rule(
            "first_name",
            Check::Alphanumeric,
            "First name has non alphanumeric characters.",
        )
        .rule("family_name", Check::Required, "Family name must be specified.")
        .rule(
            "family_name",
            Check::Length { min: 1, max: 100 },
            "Family name must be at most 100 characters.",
        )
        .rule(
            "family_name",
            Check::Alphanumeric,
            "Family name has non alphanumeric characters.",
        )
        .rule("date_of_birth", Check::OptionalIsoDate, "Invalid date of birth")
        .rule("date_of_death", Check::OptionalIsoDate, "Invalid date of death")
});

impl Fields for AuthorForm {
    fn field(&self, name: &str) -> &str {
        match name {
            "first_name" => &self.first_name,
            "family_name" => &self.family_name,
            "date_of_birth" => &self.date_of_birth,
            "date_of_death" => &self.date_of_death,
            _ => "",
        }
    }
}

impl AuthorForm {
    /// Check the form and return the sanitized fields, or every failure
    pub fn validate(&self) -> Result<NewAuthor, Vec<FieldError>> {
        let errors = AUTHOR_RULES.evaluate(self);
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewAuthor {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: optional_date(&self.date_of_birth),
            date_of_death: optional_date(&self.date_of_death),
        })
    }
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            family_name: author.family_name.clone(),
            date_of_birth: format_date(author.date_of_birth),
            date_of_death: format_date(author.date_of_death),
        }
    }
}
