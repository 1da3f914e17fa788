//! Author pages

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;
use tera::Context;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Author, AuthorForm, AuthorView, Entity, EntityKind, Linked},
    services::{Deletion, Submission, WithBooks},
    validation::FieldError,
    AppState,
};

/// Body of the delete confirmation form
#[derive(Debug, Deserialize)]
pub struct AuthorDeleteForm {
    pub authorid: Uuid,
}

fn record_context(title: &str, record: &WithBooks<Author>) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", &AuthorView::from(&record.entity));
    context.insert("author_books", &Linked::all(&record.books));
    context
}

fn render_form(
    state: &AppState,
    title: &str,
    form: &AuthorForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("author", form);
    context.insert("errors", errors);
    state.views.render("author_form.html", &context)
}

fn submitted(
    state: &AppState,
    title: &str,
    form: &AuthorForm,
    outcome: Submission<Author>,
) -> AppResult<Response> {
    match outcome {
        Submission::Saved(author) | Submission::Existing(author) => {
            Ok(Redirect::to(&author.url()).into_response())
        }
        Submission::Rejected(errors) => {
            Ok(render_form(state, title, form, &errors)?.into_response())
        }
    }
}

/// List all authors
pub async fn author_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let authors = state.services.authors.list().await?;
    let author_list: Vec<AuthorView> = authors.iter().map(AuthorView::from).collect();
    let mut context = Context::new();
    context.insert("title", "Author List");
    context.insert("author_list", &author_list);
    state.views.render("author_list.html", &context)
}

/// Author with their books
pub async fn author_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.authors.get_with_books(id).await?;
    state
        .views
        .render("author_detail.html", &record_context("Author Detail", &record))
}

pub async fn author_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Author", &AuthorForm::default(), &[])
}

pub async fn author_create_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let outcome = state.services.authors.create(&form).await?;
    submitted(&state, "Create Author", &form, outcome)
}

pub async fn author_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.authors.get_with_books(id).await?;
    state
        .views
        .render("author_delete.html", &record_context("Delete Author", &record))
}

/// Delete the author named in the form body, or show what still blocks it
pub async fn author_delete_post(
    State(state): State<AppState>,
    Form(form): Form<AuthorDeleteForm>,
) -> AppResult<Response> {
    match state.services.authors.delete(form.authorid).await? {
        Deletion::Deleted => Ok(Redirect::to(&EntityKind::Author.list_url()).into_response()),
        Deletion::Blocked(record) => Ok(state
            .views
            .render("author_delete.html", &record_context("Delete Author", &record))?
            .into_response()),
    }
}

pub async fn author_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.authors.get_with_books(id).await?;
    let mut context = record_context("Update Author", &record);
    context.insert("author", &AuthorForm::from(&record.entity));
    context.insert("errors", &Vec::<FieldError>::new());
    state.views.render("author_form.html", &context)
}

pub async fn author_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<AuthorForm>,
) -> AppResult<Response> {
    let outcome = state.services.authors.update(id, &form).await?;
    submitted(&state, "Update Author", &form, outcome)
}
