mod common;

use axum::extract::Query as Params;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use petscout::domain::{build_query, FetchError, Filters};
use petscout::fetch::{HttpPageFetcher, PageFetcher};
use petscout::infrastructure::{build_client, endpoint};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;

/// Echoes the received query parameters inside a single item.
async fn echo(Params(params): Params<HashMap<String, String>>) -> Json<Value> {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    Json(json!({
        "items": [{"id": page, "name": format!("pet on page {page}"), "params": params}],
        "page": page,
        "total_pages": 3,
    }))
}

fn dog_filters() -> Filters {
    Filters {
        animal_type: Some("dog".into()),
        location: Some(String::new()),
        ..Filters::default()
    }
}

#[tokio::test]
async fn sends_canonical_parameters_and_page_override() {
    let base = common::serve(Router::new().route("/api/search", get(echo))).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let query = build_query(&dog_filters());
    let page = fetcher.fetch_page(&query, 2).await.unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);

    let params = page.items[0].get("params").unwrap();
    assert_eq!(params["animal_type"], "dog");
    assert_eq!(params["location"], "10001");
    assert_eq!(params["per_page"], "24");
    assert_eq!(params["page"], "2");
    assert!(params.get("age").is_none());
    assert!(params.get("size").is_none());
}

#[tokio::test]
async fn unknown_item_fields_pass_through() {
    let app = Router::new().route(
        "/api/search",
        get(|| async {
            Json(json!({
                "items": [{"id": "x1", "name": "Mochi", "shelter": {"name": "Happy Tails"}}],
                "page": 1,
                "total_pages": 1,
            }))
        }),
    );
    let base = common::serve(app).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let page = fetcher
        .fetch_page(&build_query(&Filters::default()), 1)
        .await
        .unwrap();
    assert_eq!(page.items[0].get("shelter").unwrap()["name"], "Happy Tails");
    assert!(page.is_last());
}

#[tokio::test]
async fn server_error_is_http_status() {
    let app = Router::new().route(
        "/api/search",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = common::serve(app).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let err = fetcher
        .fetch_page(&build_query(&dog_filters()), 2)
        .await
        .unwrap_err();
    assert_eq!(err, FetchError::HttpStatus(500));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let app = Router::new().route("/api/search", get(|| async { "<html>oops</html>" }));
    let base = common::serve(app).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let err = fetcher
        .fetch_page(&build_query(&Filters::default()), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn page_beyond_total_is_malformed() {
    let app = Router::new().route(
        "/api/search",
        get(|| async { Json(json!({"items": [], "page": 4, "total_pages": 2})) }),
    );
    let base = common::serve(app).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let err = fetcher
        .fetch_page(&build_query(&Filters::default()), 4)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn legacy_plain_array_is_malformed() {
    let app = Router::new().route(
        "/api/search",
        get(|| async { Json(json!([{"id": 1, "name": "Rex"}])) }),
    );
    let base = common::serve(app).await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let err = fetcher
        .fetch_page(&build_query(&Filters::default()), 1)
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Malformed(_)));
}

#[tokio::test]
async fn timeout_is_network_error() {
    let app = Router::new().route(
        "/api/search",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"items": [], "page": 1, "total_pages": 1}))
        }),
    );
    let base = common::serve(app).await;
    let client = build_client(Duration::from_millis(200)).unwrap();
    let fetcher = HttpPageFetcher::new(client, endpoint(&base, "/api/search").unwrap());

    let err = fetcher
        .fetch_page(&build_query(&Filters::default()), 1)
        .await
        .unwrap_err();
    assert!(err.is_network(), "expected network error, got {err:?}");
}

#[tokio::test]
async fn connection_refused_is_network_error() {
    let base = common::closed_port().await;
    let fetcher = HttpPageFetcher::from_config(&common::config(&base)).unwrap();

    let err = fetcher
        .fetch_page(&build_query(&Filters::default()), 1)
        .await
        .unwrap_err();
    assert!(err.is_network());
}
