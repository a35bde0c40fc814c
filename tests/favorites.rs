mod common;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use petscout::domain::{FavoritesError, FetchError, Pet};
use petscout::favorites::{FavoritesBackend, HttpFavorites};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Store {
    items: Arc<Mutex<Vec<Value>>>,
    posts: Arc<Mutex<usize>>,
}

async fn list(State(store): State<Store>) -> Json<Value> {
    Json(Value::Array(store.items.lock().unwrap().clone()))
}

async fn add(State(store): State<Store>, Json(item): Json<Value>) -> (StatusCode, Json<Value>) {
    *store.posts.lock().unwrap() += 1;
    if item.get("id").is_none() || item.get("name").is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"ok": false, "error": "id and name required"})),
        );
    }
    let id = item["id"].clone();
    let mut items = store.items.lock().unwrap();
    if items.iter().any(|existing| existing["id"] == id) {
        return (
            StatusCode::CONFLICT,
            Json(json!({"ok": false, "error": "already saved"})),
        );
    }
    items.push(item);
    (StatusCode::CREATED, Json(json!({"ok": true, "id": id})))
}

async fn remove(State(store): State<Store>, Path(id): Path<String>) -> Json<Value> {
    store
        .items
        .lock()
        .unwrap()
        .retain(|item| item["id"].as_str() != Some(id.as_str()) && item["id"].to_string() != id);
    Json(json!({"ok": true}))
}

async fn export(State(store): State<Store>) -> String {
    let mut csv = String::from("id,name\n");
    for item in store.items.lock().unwrap().iter() {
        csv.push_str(&format!("{},{}\n", item["id"], item["name"].as_str().unwrap_or("")));
    }
    csv
}

async fn start() -> (HttpFavorites, Store) {
    let store = Store::default();
    let app = Router::new()
        .route("/api/favorites", get(list).post(add))
        .route("/api/favorites/export.csv", get(export))
        .route("/api/favorites/{id}", delete(remove))
        .with_state(store.clone());
    let base = common::serve(app).await;
    let client = HttpFavorites::from_config(&common::config(&base)).unwrap();
    (client, store)
}

fn pet(value: Value) -> Pet {
    Pet::from_value(value).unwrap()
}

#[tokio::test]
async fn add_list_remove_round_trip() {
    let (client, _store) = start().await;
    let rex = pet(json!({"id": "p1", "name": "Rex", "type": "Dog", "extra": {"k": 1}}));
    let tom = pet(json!({"id": 7, "name": "Tom", "type": "Cat"}));

    client.add(&rex).await.unwrap();
    client.add(&tom).await.unwrap();

    let listed = client.list().await.unwrap();
    assert_eq!(listed, vec![rex.clone(), tom]);

    client.remove("p1").await.unwrap();
    let listed = client.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name(), Some("Tom"));
}

#[tokio::test]
async fn missing_name_is_rejected_before_sending() {
    let (client, store) = start().await;

    let err = client.add(&pet(json!({"id": "p2"}))).await.unwrap_err();

    assert_eq!(err, FavoritesError::Rejected("id and name required".into()));
    assert_eq!(*store.posts.lock().unwrap(), 0);
}

#[tokio::test]
async fn server_refusal_carries_its_message() {
    let (client, _store) = start().await;
    let rex = pet(json!({"id": "p1", "name": "Rex"}));

    client.add(&rex).await.unwrap();
    let err = client.add(&rex).await.unwrap_err();

    assert_eq!(err, FavoritesError::Rejected("already saved".into()));
}

#[tokio::test]
async fn export_downloads_csv() {
    let (client, _store) = start().await;
    client
        .add(&pet(json!({"id": "p1", "name": "Rex"})))
        .await
        .unwrap();

    let csv = String::from_utf8(client.export_csv().await.unwrap()).unwrap();
    assert!(csv.starts_with("id,name\n"));
    assert!(csv.contains("Rex"));
}

#[tokio::test]
async fn malformed_list_is_a_request_error() {
    let app = Router::new().route("/api/favorites", get(|| async { Json(json!({"not": "a list"})) }));
    let base = common::serve(app).await;
    let client = HttpFavorites::from_config(&common::config(&base)).unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, FavoritesError::Request(FetchError::Malformed(_))));
}

#[tokio::test]
async fn status_without_ack_body_is_http_status() {
    let app = Router::new().route(
        "/api/favorites/{id}",
        delete(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
    );
    let base = common::serve(app).await;
    let client = HttpFavorites::from_config(&common::config(&base)).unwrap();

    let err = client.remove("p1").await.unwrap_err();
    assert_eq!(err, FavoritesError::Request(FetchError::HttpStatus(503)));
}

#[tokio::test]
async fn unreachable_server_is_network_error() {
    let base = common::closed_port().await;
    let client = HttpFavorites::from_config(&common::config(&base)).unwrap();

    let err = client.list().await.unwrap_err();
    assert!(matches!(err, FavoritesError::Request(FetchError::Network(_))));
}
