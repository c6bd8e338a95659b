use std::collections::BTreeMap;

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse { status: "healthy" }))
}

pub async fn root_handler() -> impl IntoResponse {
    let endpoints = BTreeMap::from([
        (
            "/extract/pdf/",
            "Extract content from PDF file using open-source or enterprise method",
        ),
        (
            "/extract/website/",
            "Extract content from website using open-source or enterprise method",
        ),
    ]);

    Json(ServiceInfo {
        message: "PDF Processing API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints,
    })
}
