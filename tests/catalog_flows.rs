//! End-to-end page flows against the in-memory store

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use uuid::Uuid;

use locallibrary_server::{
    api,
    config::AppConfig,
    models::{Book, GenreFilter},
    repository::Repository,
    AppState,
};

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

fn app() -> (Router, Repository) {
    let repository = Repository::in_memory();
    let state = AppState::new(AppConfig::default(), repository.clone()).expect("state");
    (api::router(state), repository)
}

async fn send(app: &Router, request: Request<Body>) -> Page {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().expect("location").to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
    Page {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

async fn get(app: &Router, uri: &str) -> Page {
    send(app, Request::get(uri).body(Body::empty()).expect("request")).await
}

async fn post_form(app: &Router, uri: &str, form: &str) -> Page {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("request");
    send(app, request).await
}

/// Id at the end of a `/catalog/{kind}/{id}` location
fn id_from(location: &str) -> Uuid {
    location
        .rsplit('/')
        .next()
        .and_then(|id| id.parse().ok())
        .expect("location ends with an id")
}

async fn create_author(app: &Router, first: &str, family: &str) -> Uuid {
    let page = post_form(
        app,
        "/catalog/author/create",
        &format!("first_name={}&family_name={}", first, family),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    id_from(&page.location.expect("redirect"))
}

#[tokio::test]
async fn creates_author_and_shows_detail() {
    let (app, repository) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=Jane&family_name=Austen&date_of_birth=&date_of_death=",
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    let location = page.location.expect("redirect");
    let id = id_from(&location);
    assert_eq!(location, format!("/catalog/author/{}", id));

    let stored = repository.authors.find_by_id(id).await.expect("store").expect("author");
    assert_eq!(stored.first_name, "Jane");
    assert_eq!(stored.family_name, "Austen");
    assert_eq!(stored.date_of_birth, None);
    assert_eq!(stored.date_of_death, None);

    let detail = get(&app, &location).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Austen, Jane"));
    assert!(detail.body.contains("This author has no books."));
}

#[tokio::test]
async fn invalid_author_redisplays_form_with_errors() {
    let (app, repository) = app();

    let page = post_form(
        &app,
        "/catalog/author/create",
        "first_name=&family_name=Austen&date_of_birth=someday",
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("First name must be specified."));
    assert!(page.body.contains("Invalid date of birth"));
    assert!(page.body.contains("value=\"someday\""));
    assert_eq!(repository.authors.count().await.expect("count"), 0);
}

#[tokio::test]
async fn author_list_is_sorted_by_family_name() {
    let (app, _) = app();
    create_author(&app, "Mary", "Shelley").await;
    create_author(&app, "Jane", "Austen").await;

    let page = get(&app, "/catalog/authors").await;
    assert_eq!(page.status, StatusCode::OK);
    let austen = page.body.find("Austen, Jane").expect("Austen listed");
    let shelley = page.body.find("Shelley, Mary").expect("Shelley listed");
    assert!(austen < shelley);
}

#[tokio::test]
async fn author_with_books_cannot_be_deleted() {
    let (app, repository) = app();
    let author_id = create_author(&app, "Jane", "Austen").await;
    repository
        .books
        .insert(&Book {
            id: Uuid::new_v4(),
            title: "Persuasion".to_string(),
            summary: "Anne Elliot meets Captain Wentworth again.".to_string(),
            isbn: "9780141439686".to_string(),
            author_id,
            genre_ids: vec![],
        })
        .await
        .expect("book");

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", author_id),
        &format!("authorid={}", author_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("Delete the following books"));
    assert!(page.body.contains("Persuasion"));

    let detail = get(&app, &format!("/catalog/author/{}", author_id)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body.contains("Persuasion"));
}

#[tokio::test]
async fn author_without_books_is_deleted() {
    let (app, _) = app();
    let author_id = create_author(&app, "Jane", "Austen").await;

    let confirm = get(&app, &format!("/catalog/author/{}/delete", author_id)).await;
    assert_eq!(confirm.status, StatusCode::OK);
    assert!(confirm.body.contains("Do you really want to delete this author?"));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/delete", author_id),
        &format!("authorid={}", author_id),
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location.as_deref(), Some("/catalog/authors"));

    let detail = get(&app, &format!("/catalog/author/{}", author_id)).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
    let list = get(&app, "/catalog/authors").await;
    assert!(!list.body.contains("Austen, Jane"));
}

#[tokio::test]
async fn author_update_keeps_identifier() {
    let (app, repository) = app();
    let author_id = create_author(&app, "Jane", "Austen").await;

    let form = get(&app, &format!("/catalog/author/{}/update", author_id)).await;
    assert_eq!(form.status, StatusCode::OK);
    assert!(form.body.contains("value=\"Jane\""));

    let page = post_form(
        &app,
        &format!("/catalog/author/{}/update", author_id),
        "first_name=Jane&family_name=Austen&date_of_birth=1775-12-16&date_of_death=1817-07-18",
    )
    .await;
    assert_eq!(page.status, StatusCode::SEE_OTHER);
    assert_eq!(page.location, Some(format!("/catalog/author/{}", author_id)));

    let authors = repository.authors.find_all_sorted().await.expect("store");
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].id, author_id);
    assert!(authors[0].date_of_birth.is_some());
}

#[tokio::test]
async fn duplicate_genre_redirects_to_existing() {
    let (app, repository) = app();

    let first = post_form(&app, "/catalog/genre/create", "name=Fiction").await;
    assert_eq!(first.status, StatusCode::SEE_OTHER);
    let second = post_form(&app, "/catalog/genre/create", "name=Fiction").await;
    assert_eq!(second.status, StatusCode::SEE_OTHER);
    assert_eq!(first.location, second.location);

    let fiction = repository
        .genres
        .find_where(&GenreFilter::Name("Fiction".to_string()))
        .await
        .expect("store");
    assert_eq!(fiction.len(), 1);
}

#[tokio::test]
async fn genre_flows() {
    let (app, repository) = app();

    let short = post_form(&app, "/catalog/genre/create", "name=SF").await;
    assert_eq!(short.status, StatusCode::OK);
    assert!(short.body.contains("Genre name must be between 3 and 100 characters."));

    let created = post_form(&app, "/catalog/genre/create", "name=Poetyr").await;
    let genre_id = id_from(&created.location.expect("redirect"));

    let updated = post_form(
        &app,
        &format!("/catalog/genre/{}/update", genre_id),
        "name=Poetry",
    )
    .await;
    assert_eq!(updated.location, Some(format!("/catalog/genre/{}", genre_id)));

    let list = get(&app, "/catalog/genres").await;
    assert!(list.body.contains("Poetry"));
    assert!(!list.body.contains("Poetyr"));

    repository
        .books
        .insert(&Book {
            id: Uuid::new_v4(),
            title: "Leaves of Grass".to_string(),
            summary: "Collected poems.".to_string(),
            isbn: "9780192834935".to_string(),
            author_id: Uuid::new_v4(),
            genre_ids: vec![genre_id],
        })
        .await
        .expect("book");

    let detail = get(&app, &format!("/catalog/genre/{}", genre_id)).await;
    assert!(detail.body.contains("Leaves of Grass"));

    let blocked = post_form(
        &app,
        &format!("/catalog/genre/{}/delete", genre_id),
        &format!("genreid={}", genre_id),
    )
    .await;
    assert_eq!(blocked.status, StatusCode::OK);
    assert!(blocked.body.contains("Leaves of Grass"));
    assert_eq!(repository.genres.count().await.expect("count"), 1);
}

#[tokio::test]
async fn missing_records_are_not_found_everywhere() {
    let (app, _) = app();
    let id = Uuid::new_v4();

    for uri in [
        format!("/catalog/author/{}", id),
        format!("/catalog/author/{}/delete", id),
        format!("/catalog/author/{}/update", id),
        format!("/catalog/genre/{}", id),
        format!("/catalog/genre/{}/delete", id),
        format!("/catalog/genre/{}/update", id),
    ] {
        assert_eq!(get(&app, &uri).await.status, StatusCode::NOT_FOUND, "{}", uri);
    }

    let delete = post_form(
        &app,
        &format!("/catalog/genre/{}/delete", id),
        &format!("genreid={}", id),
    )
    .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let update = post_form(&app, &format!("/catalog/genre/{}/update", id), "name=Drama").await;
    assert_eq!(update.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_update_of_missing_record_is_not_found() {
    let (app, _) = app();
    let id = Uuid::new_v4();

    let author = post_form(
        &app,
        &format!("/catalog/author/{}/update", id),
        "first_name=&family_name=Austen",
    )
    .await;
    assert_eq!(author.status, StatusCode::NOT_FOUND);

    let genre = post_form(&app, &format!("/catalog/genre/{}/update", id), "name=SF").await;
    assert_eq!(genre.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_identifier_is_rejected() {
    let (app, _) = app();
    let page = get(&app, "/catalog/author/not-an-id").await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn home_and_health() {
    let (app, _) = app();
    create_author(&app, "Jane", "Austen").await;

    let home = get(&app, "/").await;
    assert_eq!(home.status, StatusCode::SEE_OTHER);
    assert_eq!(home.location.as_deref(), Some("/catalog"));

    let index = get(&app, "/catalog").await;
    assert_eq!(index.status, StatusCode::OK);
    assert!(index.body.contains("<strong>Authors:</strong> 1"));

    assert_eq!(get(&app, "/health").await.status, StatusCode::OK);
    assert_eq!(get(&app, "/ready").await.status, StatusCode::OK);
}
