//! Error handlers
//!
//! Maps hard dispatch errors to HTTP responses and provides central error
//! logging.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::error;

use crate::error::types::DispatchError;

/// Log a hard dispatch error before it leaves the server.
pub fn handle_error(err: &DispatchError) {
    error!("Request aborted: {}", err);
}

/// Convert a hard error to its HTTP status code.
///
/// Soft failures never reach this mapping; they are rendered as a 200 with
/// the JSON failure body by the dispatcher.
pub fn error_to_status_code(err: &DispatchError) -> StatusCode {
    match err {
        DispatchError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DispatchError::MissingParameter(_) => StatusCode::BAD_REQUEST,
        DispatchError::PathTraversal(_) => StatusCode::BAD_REQUEST,
        DispatchError::UnknownAction(_) => StatusCode::BAD_REQUEST,
        DispatchError::SourceNotFound(_) => StatusCode::NOT_FOUND,
        DispatchError::DestinationExists(_) => StatusCode::CONFLICT,
        DispatchError::NoFiles => StatusCode::BAD_REQUEST,
        DispatchError::FileTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
    }
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (error_to_status_code(&self), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_split_client_and_server_faults() {
        assert_eq!(
            error_to_status_code(&DispatchError::Configuration("no root".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_to_status_code(&DispatchError::MissingParameter("dir")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_to_status_code(&DispatchError::SourceNotFound("/a.txt".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_to_status_code(&DispatchError::DestinationExists("/b.txt".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_to_status_code(&DispatchError::FileTooLarge("big.iso".into())),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }
}
