//! Genre pages

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
    models::{Entity, EntityKind, Genre, GenreForm, Linked},
    services::{Deletion, Submission, WithBooks},
    validation::FieldError,
    AppState,
};

/// Body of the delete confirmation form
#[derive(Debug, Deserialize)]
pub struct GenreDeleteForm {
    pub genreid: Uuid,
}

fn record_context(title: &str, record: &WithBooks<Genre>) -> Context {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("genre", &Linked::new(&record.entity));
    context.insert("genre_books", &Linked::all(&record.books));
    context
}

fn render_form(
    state: &AppState,
    title: &str,
    form: &GenreForm,
    errors: &[FieldError],
) -> AppResult<Html<String>> {
    let mut context = Context::new();
    context.insert("title", title);
    context.insert("genre", form);
    context.insert("errors", errors);
    state.views.render("genre_form.html", &context)
}

fn submitted(
    state: &AppState,
    title: &str,
    form: &GenreForm,
    outcome: Submission<Genre>,
) -> AppResult<Response> {
    match outcome {
        Submission::Saved(genre) | Submission::Existing(genre) => {
            Ok(Redirect::to(&genre.url()).into_response())
        }
        Submission::Rejected(errors) => {
            Ok(render_form(state, title, form, &errors)?.into_response())
        }
    }
}

/// List all genres
pub async fn genre_list(State(state): State<AppState>) -> AppResult<Html<String>> {
    let genres = state.services.genres.list().await?;
    let mut context = Context::new();
    context.insert("title", "Genre List");
    context.insert("genre_list", &Linked::all(&genres));
    state.views.render("genre_list.html", &context)
}

/// Genre with the books filed under it
pub async fn genre_detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.genres.get_with_books(id).await?;
    state
        .views
        .render("genre_detail.html", &record_context("Genre Detail", &record))
}

pub async fn genre_create_get(State(state): State<AppState>) -> AppResult<Html<String>> {
    render_form(&state, "Create Genre", &GenreForm::default(), &[])
}

/// Create a genre; an existing genre of the same name is shown instead
pub async fn genre_create_post(
    State(state): State<AppState>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.create(&form).await?;
    submitted(&state, "Create Genre", &form, outcome)
}

pub async fn genre_delete_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.genres.get_with_books(id).await?;
    state
        .views
        .render("genre_delete.html", &record_context("Delete Genre", &record))
}

pub async fn genre_delete_post(
    State(state): State<AppState>,
    Form(form): Form<GenreDeleteForm>,
) -> AppResult<Response> {
    match state.services.genres.delete(form.genreid).await? {
        Deletion::Deleted => Ok(Redirect::to(&EntityKind::Genre.list_url()).into_response()),
        Deletion::Blocked(record) => Ok(state
            .views
            .render("genre_delete.html", &record_context("Delete Genre", &record))?
            .into_response()),
    }
}

pub async fn genre_update_get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Html<String>> {
    let record = state.services.genres.get_with_books(id).await?;
    let mut context = record_context("Update Genre", &record);
    context.insert("genre", &GenreForm::from(&record.entity));
    context.insert("errors", &Vec::<FieldError>::new());
    state.views.render("genre_form.html", &context)
}

pub async fn genre_update_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Form(form): Form<GenreForm>,
) -> AppResult<Response> {
    let outcome = state.services.genres.update(id, &form).await?;
    submitted(&state, "Update Genre", &form, outcome)
}
