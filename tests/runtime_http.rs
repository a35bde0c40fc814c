mod common;

use axum::extract::Query as Params;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use petscout::app::{Event, SearchCommands};
use petscout::domain::Category;
use petscout::ui::TerminalSink;
use petscout::Runtime;
use serde_json::json;
use std::collections::HashMap;

const TOTAL_PAGES: u32 = 2;

/// Two pages of 24 pets; page 3 and beyond answer 500.
async fn search(Params(params): Params<HashMap<String, String>>) -> Response {
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    if page > TOTAL_PAGES {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    let kind = params.get("animal_type").cloned().unwrap_or_else(|| "dog".into());
    let items: Vec<_> = (0..24)
        .map(|i| json!({"id": format!("{page}-{i}"), "name": format!("Pet {page}-{i}"), "type": kind}))
        .collect();
    Json(json!({"items": items, "page": page, "total_pages": TOTAL_PAGES})).into_response()
}

#[tokio::test]
async fn initial_search_and_load_more_against_http() {
    let base = common::serve(Router::new().route("/api/search", get(search))).await;
    let mut runtime =
        Runtime::from_config(&common::config(&base), TerminalSink::new(Vec::new())).unwrap();

    runtime.dispatch(&Event::Initialize).unwrap();
    runtime.run_until_idle().await.unwrap();
    assert_eq!(runtime.state().session.accumulated().len(), 24);

    runtime.commands().on_load_more().unwrap();
    runtime.run_until_idle().await.unwrap();
    assert_eq!(runtime.state().session.accumulated().len(), 48);
    assert_eq!(runtime.state().session.current_page(), 2);

    runtime.commands().on_load_more().unwrap();
    runtime.run_until_idle().await.unwrap();

    let text = String::from_utf8(runtime.into_sink().into_inner()).unwrap();
    assert!(text.contains("Searching pets near 10001..."));
    assert!(text.contains("== Available Pets (24) =="));
    assert!(text.contains("Page 2 of 2 · 48 loaded · end of results"));
    assert!(text.contains(" 48. Pet 2-23 [2-23]"));
    assert!(text.contains("Nothing to load: all pages are loaded."));
}

#[tokio::test]
async fn category_search_reports_typed_title() {
    let base = common::serve(Router::new().route("/api/search", get(search))).await;
    let mut runtime =
        Runtime::from_config(&common::config(&base), TerminalSink::new(Vec::new())).unwrap();

    runtime.commands().on_category_select(Category::Cats).unwrap();
    runtime.run_until_idle().await.unwrap();

    let text = String::from_utf8(runtime.into_sink().into_inner()).unwrap();
    assert!(text.contains("== Found 24 cats =="));
}

#[tokio::test]
async fn unreachable_server_is_reported_and_session_stays_usable() {
    let base = common::closed_port().await;
    let mut runtime =
        Runtime::from_config(&common::config(&base), TerminalSink::new(Vec::new())).unwrap();

    runtime.dispatch(&Event::Initialize).unwrap();
    runtime.run_until_idle().await.unwrap();

    assert!(runtime.state().session.accumulated().is_empty());
    assert!(!runtime.state().session.is_loading());

    let text = String::from_utf8(runtime.into_sink().into_inner()).unwrap();
    assert!(text.contains("Error loading pets: network error"));
}
