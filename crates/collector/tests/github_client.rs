//! GitHub collector against a local mock of the REST API

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use ghcard_collector::{CollectorConfig, CollectorError, GithubCollector};
use serde_json::json;
use std::collections::HashMap;

async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn user(Path(login): Path<String>) -> impl IntoResponse {
    match login.as_str() {
        "octocat" => (
            StatusCode::OK,
            Json(json!({
                "login": "octocat",
                "name": "The Octocat",
                "followers": 42,
                "following": 7,
                "public_repos": 3
            })),
        )
            .into_response(),
        "limited" => {
            let mut headers = HeaderMap::new();
            headers.insert("x-ratelimit-remaining", "0".parse().unwrap());
            headers.insert("x-ratelimit-reset", "0".parse().unwrap());
            (StatusCode::FORBIDDEN, headers, "rate limit exceeded").into_response()
        }
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        // Echo the decoded login so tests can see what reached the server.
        other if other.contains('/') => (
            StatusCode::OK,
            Json(json!({ "login": other })),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" }))).into_response(),
    }
}

async fn repos(
    Path(login): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if login != "octocat" {
        return StatusCode::NOT_FOUND.into_response();
    }
    // Only answer the exact query the collector is expected to send.
    if params.get("sort").map(String::as_str) != Some("updated")
        || params.get("per_page").map(String::as_str) != Some("100")
    {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!([
        { "name": "hello-world", "stargazers_count": 10, "forks_count": 2, "language": "Rust",
          "updated_at": "2024-05-01T12:00:00Z" },
        { "name": "spoon-knife", "stargazers_count": 5, "language": null },
        { "name": "dotfiles", "forks_count": 1, "language": "Shell" }
    ]))
    .into_response()
}

fn mock_router() -> Router {
    Router::new()
        .route("/users/{login}", get(user))
        .route("/users/{login}/repos", get(repos))
}

async fn collector() -> GithubCollector {
    let base = spawn_mock(mock_router()).await;
    GithubCollector::new(CollectorConfig::default().with_api_base(base)).unwrap()
}

#[tokio::test]
async fn fetches_profile_and_repositories() {
    let collector = collector().await;

    let (user, repos) = collector.fetch_profile("octocat").await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.name.as_deref(), Some("The Octocat"));
    assert_eq!(user.followers, 42);
    assert_eq!(user.public_repos, 3);

    assert_eq!(repos.len(), 3);
    assert_eq!(repos[0].name, "hello-world");
    assert!(repos[0].updated_at.is_some());
    // Absent counts deserialize as zero.
    assert_eq!(repos[1].forks_count, 0);
    assert_eq!(repos[2].stargazers_count, 0);
    assert_eq!(repos[1].language, None);
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let collector = collector().await;

    let err = collector.fetch_user("__does_not_exist__").await.unwrap_err();

    assert!(matches!(err, CollectorError::NotFound(ref login) if login == "__does_not_exist__"));
    assert!(err.is_not_found_like());
}

#[tokio::test]
async fn exhausted_rate_limit_is_reported() {
    let collector = collector().await;

    let err = collector.fetch_user("limited").await.unwrap_err();

    assert!(matches!(err, CollectorError::RateLimited(0)));
    assert!(err.is_not_found_like());
}

#[tokio::test]
async fn server_errors_are_api_errors() {
    let collector = collector().await;

    let err = collector.fetch_user("broken").await.unwrap_err();

    assert!(matches!(err, CollectorError::Api(_)));
    assert!(!err.is_not_found_like());
}

#[tokio::test]
async fn login_is_encoded_as_a_single_segment() {
    let collector = collector().await;

    let user = collector.fetch_user("a/../b").await.unwrap();

    assert_eq!(user.login, "a/../b");
}

#[tokio::test]
async fn blank_login_never_hits_the_network() {
    let collector = GithubCollector::new(
        CollectorConfig::default().with_api_base("http://127.0.0.1:9"),
    )
    .unwrap();

    let err = collector.fetch_user("  ").await.unwrap_err();

    assert!(matches!(err, CollectorError::NotFound(_)));
}

#[test]
fn malformed_base_url_is_rejected() {
    let result = GithubCollector::new(CollectorConfig::default().with_api_base("not a url"));

    assert!(matches!(result, Err(CollectorError::InvalidUrl(_))));
}
