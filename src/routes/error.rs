use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::core::GameError;

impl GameError {
    /// HTTP status reported for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            GameError::SessionNotFound => StatusCode::NOT_FOUND,
            GameError::SessionFull | GameError::InvalidMove(_) | GameError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GameError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GameError {
    fn into_response(self) -> Response {
        tracing::debug!("Request failed: {}", self);
        (self.status_code(), self.to_string()).into_response()
    }
}
