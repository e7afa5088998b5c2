use axum::extract::{FromRequest, FromRequestParts};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// `axum::Json` whose rejections become `{"error": ...}` 400 responses.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` whose rejections become `{"error": ...}` 400 responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// `axum::extract::Path` whose rejections become `{"error": ...}` 400 responses.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

/// Body of successful write operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
    /// Identifier of the created row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            id: None,
        }
    }

    pub fn created(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: message.into(),
            id: Some(id),
        }
    }
}

/// Message used when a create request lacks a mandatory field.
pub const MISSING_FIELDS: &str = "Dados obrigatórios faltando";

/// Unwrap a mandatory request field.
///
/// # Errors
///
/// `AppError::BadRequest` with [`MISSING_FIELDS`] when the field is absent.
pub fn required<T>(field: Option<T>) -> AppResult<T> {
    field.ok_or_else(|| AppError::BadRequest(MISSING_FIELDS.to_string()))
}

/// Reject blank strings in mandatory text fields.
///
/// # Errors
///
/// `AppError::BadRequest` with [`MISSING_FIELDS`] when the field is absent or blank.
pub fn required_text(field: Option<String>) -> AppResult<String> {
    match field {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
    }
}
