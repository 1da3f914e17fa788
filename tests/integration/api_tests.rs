//! Live server integration tests
//!
//! These expect a server on `BASE_URL` backed by an empty database.

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

async fn location_of(response: reqwest::Response) -> String {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("No location header")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_readiness_check() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_author() {
    let client = client();

    let response = client
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", "Emily"), ("family_name", "Bronte")])
        .send()
        .await
        .expect("Failed to send request");
    let location = location_of(response).await;
    let id = location.rsplit('/').next().expect("No author ID").to_string();

    let response = client
        .get(format!("{}{}", BASE_URL, location))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.text().await.expect("Failed to read body");
    assert!(body.contains("Bronte, Emily"));

    let response = client
        .post(format!("{}/catalog/author/{}/delete", BASE_URL, id))
        .form(&[("authorid", id.as_str())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(location_of(response).await, "/catalog/authors");
}

#[tokio::test]
#[ignore]
async fn test_genre_create_is_idempotent_by_name() {
    let client = client();
    let name = format!("Genre{}", std::process::id());

    let mut locations = Vec::new();
    for _ in 0..2 {
        let response = client
            .post(format!("{}/catalog/genre/create", BASE_URL))
            .form(&[("name", name.as_str())])
            .send()
            .await
            .expect("Failed to send request");
        locations.push(location_of(response).await);
    }
    assert_eq!(locations[0], locations[1]);

    // Cleanup
    let id = locations[0].rsplit('/').next().expect("No genre ID").to_string();
    let _ = client
        .post(format!("{}/catalog/genre/{}/delete", BASE_URL, id))
        .form(&[("genreid", id.as_str())])
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_unknown_author_is_not_found() {
    let response = client()
        .get(format!(
            "{}/catalog/author/00000000-0000-0000-0000-000000000000",
            BASE_URL
        ))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
