use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct PingResponse {
    message: &'static str,
    hostname: String,
}

/// Liveness probe that also reports which replica answered.
pub async fn ping() -> Json<PingResponse> {
    let hostname = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_default();
    Json(PingResponse {
        message: "pong",
        hostname,
    })
}
