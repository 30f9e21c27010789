use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ServerError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ServerError::InvalidBody(rejection) => {
                let status = rejection.status();
                tracing::warn!(
                    status = %status,
                    debug_message = %rejection.body_text(),
                    "Generation request rejected"
                );
                let message = match rejection {
                    JsonRejection::JsonSyntaxError(_) => "invalid JSON",
                    JsonRejection::MissingJsonContentType(_) => "expected application/json",
                    _ => "invalid request",
                };
                (
                    StatusCode::BAD_REQUEST,
                    ApiErrorObject {
                        code: "INVALID_ARGUMENT".to_string(),
                        message: message.to_string(),
                    },
                )
            }
        };

        (status, Json(ApiErrorBody { inner: body })).into_response()
    }
}

/// Standardized API error response payload.
#[derive(Debug, Serialize)]
pub struct ApiErrorObject {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    #[serde(rename = "error")]
    pub inner: ApiErrorObject,
}
