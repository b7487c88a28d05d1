use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use chatgate_gateway::{error_response, forward, ForwardRequest};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status))
        .route("/api/status", get(status))
        .route("/api/openai/*path", any(forward_openai))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn status() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// Relay `/api/openai/<path>` upstream. The route prefix is stripped by the
/// wildcard capture; everything after it, query included, goes upstream.
async fn forward_openai(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path_and_query = match query {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    let request = ForwardRequest { method, path_and_query, authorization, body };
    match forward(&state.http, &state.config, request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("forwarding failed: {e}");
            error_response(&e)
        }
    }
}
