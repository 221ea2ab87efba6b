use std::sync::Arc;

use axum::extract::{OriginalUri, Query};
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::api::shared::{iso_timestamp, PrettyJson};
use crate::main_lib::AppState;

#[derive(Deserialize)]
struct GreetingQuery {
    name: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GreetingResponse {
    message: String,
    timestamp: String,
    method: String,
    url: String,
    function_name: &'static str,
}

/// Greeting echo: `name` comes from the query string, then the raw body
/// text, then a fixed default.
async fn http_trigger(
    method: Method,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<GreetingQuery>,
    body: String,
) -> PrettyJson<GreetingResponse> {
    tracing::info!("HTTP trigger function processed a request");

    let name = match query.name.filter(|n| !n.is_empty()) {
        Some(name) => name,
        None if !body.is_empty() => body,
        None => "World".to_string(),
    };

    PrettyJson(GreetingResponse {
        message: format!("Hello, {}! This function executed successfully.", name),
        timestamp: iso_timestamp(),
        method: method.to_string(),
        url: uri.to_string(),
        function_name: "httpTrigger",
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/httpTrigger", get(http_trigger).post(http_trigger))
}
