use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{debug, error};

use service::booking::errors::BookingError;

/// JSON error body with a stable shape: `{"error", "detail"}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, title = self.title, detail = ?self.detail, "request failed");
        }
        (self.status, Json(serde_json::json!({"error": self.title, "detail": self.detail})))
            .into_response()
    }
}

impl From<BookingError> for JsonApiError {
    fn from(e: BookingError) -> Self {
        let (status, title) = match &e {
            BookingError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Not Authenticated"),
            BookingError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            BookingError::Validation { .. } => (StatusCode::BAD_REQUEST, "Validation Error"),
            BookingError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            BookingError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Storage Error"),
        };
        debug!(code = e.code(), err = %e, "booking error mapped");
        JsonApiError::new(status, title, Some(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_errors_map_to_expected_status_codes() {
        let cases = [
            (BookingError::Unauthenticated, StatusCode::UNAUTHORIZED),
            (BookingError::forbidden("nope"), StatusCode::FORBIDDEN),
            (BookingError::validation("is_paid", "frozen"), StatusCode::BAD_REQUEST),
            (BookingError::NotFound, StatusCode::NOT_FOUND),
            (BookingError::Repository("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let mapped = JsonApiError::from(err);
            assert_eq!(mapped.status, status);
        }
    }

    #[test]
    fn validation_detail_names_the_field() {
        let mapped = JsonApiError::from(BookingError::validation("scheduled_at", "in the past"));
        assert!(mapped.detail.unwrap().contains("scheduled_at"));
    }
}
