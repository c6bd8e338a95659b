use axum::Json;
use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::presentation::state::AppState;

use super::error::{conversion_error_response, error_response};

const DEFAULT_PDF_NAME: &str = "document.pdf";

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub markdown_url: String,
}

#[derive(Debug, Deserialize)]
pub struct WebsiteForm {
    pub url: String,
    pub method: String,
}

struct PdfUpload {
    file_name: String,
    data: Vec<u8>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn extract_pdf_handler(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut upload: Option<PdfUpload> = None;
    let mut method: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {e}"),
                );
            }
        };

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_PDF_NAME)
                    .to_string();
                match field.bytes().await {
                    Ok(data) => {
                        upload = Some(PdfUpload {
                            file_name,
                            data: data.to_vec(),
                        })
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read file bytes");
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read file: {e}"),
                        );
                    }
                }
            }
            Some("method") => match field.text().await {
                Ok(text) => method = Some(text),
                Err(e) => {
                    return error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read method: {e}"),
                    );
                }
            },
            other => tracing::debug!(field = ?other, "Ignoring multipart field"),
        }
    }

    let Some(upload) = upload else {
        return error_response(StatusCode::BAD_REQUEST, "Missing form field 'file'");
    };
    let Some(method) = method else {
        return error_response(StatusCode::BAD_REQUEST, "Missing form field 'method'");
    };

    tracing::debug!(file_name = %upload.file_name, bytes = upload.data.len(), method = %method, "PDF received");

    match state
        .conversion_service
        .convert_pdf(&upload.data, &upload.file_name, &method)
        .await
    {
        Ok(asset) => (
            StatusCode::OK,
            Json(ExtractResponse {
                markdown_url: asset.url,
            }),
        )
            .into_response(),
        Err(e) => conversion_error_response(&e),
    }
}

#[tracing::instrument(skip(state, form))]
pub async fn extract_website_handler(
    State(state): State<AppState>,
    form: Result<Form<WebsiteForm>, FormRejection>,
) -> Response {
    let Form(form) = match form {
        Ok(form) => form,
        Err(e) => {
            tracing::warn!(error = %e, "Malformed website form");
            return error_response(StatusCode::BAD_REQUEST, e.body_text());
        }
    };

    match state
        .conversion_service
        .convert_website(&form.url, &form.method)
        .await
    {
        Ok(asset) => (
            StatusCode::OK,
            Json(ExtractResponse {
                markdown_url: asset.url,
            }),
        )
            .into_response(),
        Err(e) => conversion_error_response(&e),
    }
}
