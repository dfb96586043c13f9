//! Same-origin relay in front of the backend services. The UI talks to this
//! process only; it forwards `GET /api/graph` and `POST /api/path` upstream,
//! adds permissive CORS headers, and turns any upstream failure into a
//! `500 { "error": ... }`. Wrong methods get the router's `405`.
//!
//! The path response is forwarded byte-for-byte: the compute service emits a
//! non-JSON infinity token that the client sanitizes itself, so the relay
//! must not re-encode the body.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
struct Upstream {
    client: reqwest::Client,
    base_url: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("UPSTREAM_URL").unwrap_or_else(|_| "http://127.0.0.1:3001".to_string());
    let listen =
        std::env::var("PROXY_LISTEN").unwrap_or_else(|_| "127.0.0.1:3000".to_string());

    let upstream = Upstream {
        client: reqwest::Client::new(),
        base_url,
    };
    tracing::info!(
        "proxy listening on {}, upstream {}",
        listen,
        upstream.base_url
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/graph", get(relay_graph))
        .route("/api/path", post(relay_path))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(upstream);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    axum::serve(listener, app).await
}

async fn relay_graph(State(upstream): State<Upstream>) -> impl IntoResponse {
    let url = format!("{}/api/graph", upstream.base_url);
    match forward(upstream.client.get(url)).await {
        Ok(body) => json_body(body).into_response(),
        Err(detail) => {
            tracing::error!("graph relay failed: {}", detail);
            relay_error("Failed to fetch graph data").into_response()
        }
    }
}

async fn relay_path(State(upstream): State<Upstream>, body: String) -> impl IntoResponse {
    let url = format!("{}/api/path", upstream.base_url);
    let request = upstream
        .client
        .post(url)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body);
    match forward(request).await {
        Ok(body) => json_body(body).into_response(),
        Err(detail) => {
            tracing::error!("path relay failed: {}", detail);
            relay_error("Failed to calculate path").into_response()
        }
    }
}

async fn forward(request: reqwest::RequestBuilder) -> Result<String, String> {
    let response = request.send().await.map_err(|e| e.to_string())?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("upstream answered with HTTP {}", status.as_u16()));
    }
    response.text().await.map_err(|e| e.to_string())
}

fn json_body(body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
}

fn relay_error(message: &str) -> impl IntoResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({ "error": message })),
    )
}
