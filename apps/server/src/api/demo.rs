//! Demo CRUD endpoints.
//!
//! Nothing here touches a store: GET synthesizes items from the requested
//! id, POST derives an id from the request time, PUT echoes the given id,
//! and DELETE acknowledges without deleting anything. Responses exist only
//! for the lifetime of the request.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::api::shared::{iso_timestamp, PrettyJson};
use crate::main_lib::AppState;

#[derive(Serialize)]
struct DemoResponse {
    method: String,
    timestamp: String,
    endpoint: &'static str,
    message: String,
    data: Value,
}

fn respond(method: &Method, message: String, data: Value) -> PrettyJson<DemoResponse> {
    PrettyJson(DemoResponse {
        method: method.to_string(),
        timestamp: iso_timestamp(),
        endpoint: "/api",
        message,
        data,
    })
}

async fn get_item(method: Method, id: Option<Path<String>>) -> PrettyJson<DemoResponse> {
    tracing::info!(method = %method, "API endpoint called");
    match id {
        Some(Path(id)) => respond(
            &method,
            format!("Retrieved item with ID: {}", id),
            item_for_id(&id),
        ),
        None => respond(&method, "Retrieved all items".to_string(), all_items()),
    }
}

async fn create_item(method: Method, body: Bytes) -> PrettyJson<DemoResponse> {
    tracing::info!(method = %method, "API endpoint called");
    let data = synthesize_item(None, parse_body(&body), Utc::now().timestamp_millis());
    respond(&method, "Created new item".to_string(), data)
}

async fn update_item(
    method: Method,
    id: Option<Path<String>>,
    body: Bytes,
) -> PrettyJson<DemoResponse> {
    tracing::info!(method = %method, "API endpoint called");
    let id = id.map(|Path(id)| id);
    let message = match &id {
        Some(id) => format!("Updated item with ID: {}", id),
        None => "Updated item".to_string(),
    };
    let data = synthesize_item(
        id.as_deref(),
        parse_body(&body),
        Utc::now().timestamp_millis(),
    );
    respond(&method, message, data)
}

async fn delete_item(method: Method, id: Option<Path<String>>) -> PrettyJson<DemoResponse> {
    tracing::info!(method = %method, "API endpoint called");
    let id = id.map(|Path(id)| id);
    let message = match &id {
        Some(id) => format!("Deleted item with ID: {}", id),
        None => "Delete operation".to_string(),
    };
    respond(&method, message, delete_ack(id.as_deref()))
}

// ============================================================================
// Per-request synthesis
// ============================================================================

/// Malformed or empty request bodies are treated as an empty object.
fn parse_body(body: &[u8]) -> Map<String, Value> {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default()
}

fn item_for_id(id: &str) -> Value {
    json!({ "id": id, "name": format!("Item {}", id) })
}

fn all_items() -> Value {
    json!([
        { "id": 1, "name": "Item 1" },
        { "id": 2, "name": "Item 2" },
        { "id": 3, "name": "Item 3" },
    ])
}

/// Merge the request body over a synthesized id. Body fields win, matching
/// a client that supplies its own id.
fn synthesize_item(id: Option<&str>, body: Map<String, Value>, now_ms: i64) -> Value {
    let mut item = Map::new();
    match id {
        Some(id) => {
            item.insert("id".to_string(), Value::String(id.to_string()));
        }
        None => {
            item.insert("id".to_string(), json!(now_ms));
        }
    }
    for (key, value) in body {
        item.insert(key, value);
    }
    Value::Object(item)
}

fn delete_ack(id: Option<&str>) -> Value {
    let mut ack = Map::new();
    ack.insert("deleted".to_string(), Value::Bool(true));
    if let Some(id) = id {
        ack.insert("id".to_string(), Value::String(id.to_string()));
    }
    Value::Object(ack)
}

pub fn router() -> Router<Arc<AppState>> {
    let handlers = get(get_item)
        .post(create_item)
        .put(update_item)
        .delete(delete_item);
    Router::new()
        .route("/", handlers.clone())
        .route("/{id}", handlers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_for_id_echoes_id_as_string() {
        let item = item_for_id("123");
        assert_eq!(item["id"], "123");
        assert_eq!(item["name"], "Item 123");
    }

    #[test]
    fn test_all_items_fixed_list() {
        let items = all_items();
        let list = items.as_array().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[0]["id"], 1);
        assert_eq!(list[2]["name"], "Item 3");
    }

    #[test]
    fn test_parse_body_malformed_is_empty_object() {
        assert!(parse_body(b"not json").is_empty());
        assert!(parse_body(b"").is_empty());
        // Non-object JSON is also flattened to empty
        assert!(parse_body(b"[1, 2]").is_empty());
    }

    #[test]
    fn test_synthesize_item_without_id_uses_time() {
        let data = synthesize_item(None, Map::new(), 1754480000000);
        assert_eq!(data["id"], 1754480000000i64);
    }

    #[test]
    fn test_synthesize_item_merges_body() {
        let body = parse_body(br#"{"name": "Widget", "qty": 2}"#);
        let data = synthesize_item(Some("7"), body, 0);
        assert_eq!(data["id"], "7");
        assert_eq!(data["name"], "Widget");
        assert_eq!(data["qty"], 2);
    }

    #[test]
    fn test_synthesize_item_body_id_wins() {
        let body = parse_body(br#"{"id": 42}"#);
        let data = synthesize_item(None, body, 1754480000000);
        assert_eq!(data["id"], 42);
    }

    #[test]
    fn test_delete_ack_with_and_without_id() {
        let with_id = delete_ack(Some("9"));
        assert_eq!(with_id["deleted"], true);
        assert_eq!(with_id["id"], "9");

        let without_id = delete_ack(None);
        assert_eq!(without_id["deleted"], true);
        assert!(without_id.get("id").is_none());
    }
}
