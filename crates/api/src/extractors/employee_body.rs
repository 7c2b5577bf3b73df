//! Request body extractor for employee payloads.
//!
//! JSON bodies may arrive as `application/json` or, from some clients, as
//! `application/javascript`; both decode identically. HTML form posts
//! (`application/x-www-form-urlencoded`) decode into the same structure.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Request body decoded from JSON or form fields.
#[derive(Debug, Clone)]
pub struct EmployeeBody<T>(pub T);

/// Body encodings the extractor decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
}

/// Classifies a `Content-Type` value, ignoring parameters such as `charset`.
///
/// `application/json`, `application/*+json` and `application/javascript` are
/// JSON; `application/x-www-form-urlencoded` is a form.
fn body_format(content_type: &str) -> Option<BodyFormat> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/json" | "application/javascript" => Some(BodyFormat::Json),
        "application/x-www-form-urlencoded" => Some(BodyFormat::Form),
        other if other.starts_with("application/") && other.ends_with("+json") => {
            Some(BodyFormat::Json)
        }
        _ => None,
    }
}

fn content_type(headers: &HeaderMap) -> Option<&str> {
    headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(bytes)
        .map_err(|e| ApiError::Validation(format!("Invalid request body: {}", e)))
}

fn body_rejection(status: StatusCode, message: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge(message)
    } else {
        ApiError::Validation(message)
    }
}

#[async_trait]
impl<S, T> FromRequest<S> for EmployeeBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = match content_type(req.headers()) {
            Some(ct) => body_format(ct).ok_or_else(|| {
                ApiError::UnsupportedMediaType(format!(
                    "Expected application/json, application/javascript or \
                     application/x-www-form-urlencoded, got {}",
                    ct
                ))
            })?,
            None => {
                return Err(ApiError::UnsupportedMediaType(
                    "Missing Content-Type header".to_string(),
                ))
            }
        };

        match format {
            BodyFormat::Json => {
                let bytes = Bytes::from_request(req, state)
                    .await
                    .map_err(|rejection| {
                        body_rejection(rejection.status(), rejection.body_text())
                    })?;
                decode(&bytes).map(EmployeeBody)
            }
            BodyFormat::Form => {
                let Form(value) = Form::<T>::from_request(req, state)
                    .await
                    .map_err(|rejection| {
                        body_rejection(rejection.status(), rejection.body_text())
                    })?;
                Ok(EmployeeBody(value))
            }
        }
    }
}
