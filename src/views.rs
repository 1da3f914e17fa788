//! Server-side HTML views
//!
//! Templates are compiled into the binary and rendered with Tera. Names end in
//! `.html`, so every interpolated value is HTML-escaped unless marked `safe`.

use std::sync::Arc;

use axum::response::Html;
use tera::{Context, Tera};

use crate::error::AppResult;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    ("errors.html", include_str!("../templates/errors.html")),
    ("index.html", include_str!("../templates/index.html")),
    ("author_list.html", include_str!("../templates/author_list.html")),
    ("author_detail.html", include_str!("../templates/author_detail.html")),
    ("author_form.html", include_str!("../templates/author_form.html")),
    ("author_delete.html", include_str!("../templates/author_delete.html")),
    ("genre_list.html", include_str!("../templates/genre_list.html")),
    ("genre_detail.html", include_str!("../templates/genre_detail.html")),
    ("genre_form.html", include_str!("../templates/genre_form.html")),
    ("genre_delete.html", include_str!("../templates/genre_delete.html")),
];

/// Compiled template set, cheap to clone
#[derive(Clone)]
pub struct Views {
    tera: Arc<Tera>,
}

impl Views {
    pub fn new() -> AppResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.iter().copied())?;
        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    pub fn render(&self, template: &str, context: &Context) -> AppResult<Html<String>> {
        Ok(Html(self.tera.render(template, context)?))
    }
}
