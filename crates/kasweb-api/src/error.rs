//! Error types for kasweb-api

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use kasweb_client::ClientError;
use kasweb_core::CoreError;
use thiserror::Error;

/// Marker left on a response whose session must be dropped
///
/// The guard layer turns it into a cookie-clearing `Set-Cookie` header.
#[derive(Debug, Clone, Copy)]
pub struct SessionExpired;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Backend rejected the token, or no session where one is needed
    #[error("Unauthorized")]
    Unauthorized,

    /// Signed in, but the role does not allow the action
    #[error("Forbidden")]
    Forbidden,

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Form input rejected before calling the backend
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Backend call failed; `message` is ready for display
    #[error("Backend error ({status}): {message}")]
    Backend { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Map a client error, using `fallback` when the backend gave no message
    pub fn backend(err: ClientError, fallback: &str) -> Self {
        if err.is_unauthorized() {
            return ApiError::Unauthorized;
        }
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if err.is_client_error() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else {
            StatusCode::BAD_GATEWAY
        };
        let mut message = err.user_message(fallback);
        if let Some(action) = err.action() {
            message = format!("{}. {}", message, action);
        }
        ApiError::Backend { status, message }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::BadRequest {
            message: err.to_string(),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        ApiError::backend(err, "Terjadi kesalahan pada server")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => {
                log::info!("Session rejected, redirecting to login");
                let mut response = Redirect::to("/login").into_response();
                response.extensions_mut().insert(SessionExpired);
                return response;
            }
            ApiError::Forbidden => return Redirect::to("/dashboard").into_response(),
            ApiError::NotFound { resource } => (StatusCode::NOT_FOUND, format!("{} tidak ditemukan", resource)),
            ApiError::BadRequest { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::Backend { status, message } => {
                if status.is_server_error() {
                    log::error!("Backend error: {}", message);
                } else {
                    log::warn!("Backend refused request: {}", message);
                }
                (status, message)
            }
        };

        (status, Html(crate::alert_html("error", &message))).into_response()
    }
}
