use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// Driver failure while serving a specific endpoint; `context` is the
    /// message returned to the client.
    #[error("{context}: {source}")]
    Query {
        context: &'static str,
        #[source]
        source: DbErr,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
            Self::Query { context, source } => {
                tracing::error!(context = %context, "Query failed: {source:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, (*context).to_string())
            }
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro interno do servidor".to_string(),
                )
            }
            Self::Config(e) => {
                tracing::error!("Config error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro de configuração".to_string(),
                )
            }
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::BadRequest("Corpo da requisição inválido".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(format!("Parâmetros inválidos: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameters: {}", rejection.body_text());
        Self::BadRequest("Parâmetro de rota inválido".to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Attach the client-facing message of an endpoint to a driver error.
pub trait QueryContext<T> {
    /// # Errors
    ///
    /// Converts the underlying `DbErr` into `AppError::Query`.
    fn context(self, context: &'static str) -> AppResult<T>;
}

impl<T> QueryContext<T> for Result<T, DbErr> {
    fn context(self, context: &'static str) -> AppResult<T> {
        self.map_err(|source| match source.sql_err() {
            // Constraint violations are caused by the request, not the backend.
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                tracing::debug!(context = %context, "Unique constraint violated: {detail}");
                AppError::BadRequest("Registro duplicado".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                tracing::debug!(context = %context, "Foreign key violated: {detail}");
                AppError::BadRequest("Referência inexistente ou em uso".to_string())
            }
            _ => AppError::Query { context, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_errors_keep_endpoint_message() {
        let result: Result<(), DbErr> = Err(DbErr::Custom("connection refused".to_string()));
        let err = result.context("Erro ao buscar zonas").unwrap_err();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            AppError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
