use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::{ApiError, NavigationError};

/// JSON error response.
///
/// Serialises as `{ "ok": false, "error": { "code": "<code>", "message": "<message>" } }`.
#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: HttpErrorResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct HttpErrorResponse {
    pub ok: bool,
    pub error: HttpErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct HttpErrorBody {
    pub code: String,
    pub message: String,
}

impl HttpError {
    pub fn new(status: StatusCode, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            body: HttpErrorResponse {
                ok: false,
                error: HttpErrorBody {
                    code: code.into(),
                    message: message.into(),
                },
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "not_found", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<NavigationError> for HttpError {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::InvalidPath(path) => {
                Self::not_found(format!("Content not found: {}", path))
            }
            other => Self::internal(other.to_string()),
        }
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Navigation(nav) => nav.into(),
            other => Self::internal(other.to_string()),
        }
    }
}
