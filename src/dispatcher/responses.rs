//! Wire responses
//!
//! The fixed response shapes the browser widget understands: the two-shape
//! operation result, the directory listing, and raw content/download
//! bodies.

use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

const JSON_UTF8: &str = "application/json; charset=UTF-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// Two-shape result for mutating operations: `{"result":"1"}` on success,
/// `{"result":"0"}` with an optional `gserror` message on soft failure.
#[derive(Debug, Serialize)]
pub struct OperationResponse {
    pub result: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gserror: Option<String>,
}

/// One listing entry.
#[derive(Debug, Serialize)]
pub struct Item {
    pub name: String,
    pub path: String,
    pub id: String,
    #[serde(rename = "lastMod")]
    pub last_mod: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub extension: String,
    pub size: u64,
}

/// Directory listing split into directories and files, each in natural
/// order.
#[derive(Debug, Default, Serialize)]
pub struct DirectoryListing {
    pub gsdirs: Vec<Item>,
    pub gsfiles: Vec<Item>,
}

/// Everything a handler can answer with. Soft failures are a regular
/// response (HTTP 200); hard errors never reach this type.
#[derive(Debug)]
pub enum GsResponse {
    Success,
    Failure(Option<String>),
    Listing(DirectoryListing),
    /// File content for the read action; `text` marks a base64 body.
    Content { body: Vec<u8>, text: bool },
    /// File content with binary-download headers.
    Download { filename: String, body: Vec<u8> },
}

impl GsResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        GsResponse::Failure(Some(message.into()))
    }
}

fn json_body<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| r#"{"result":"0"}"#.to_string())
}

impl IntoResponse for GsResponse {
    fn into_response(self) -> Response {
        match self {
            GsResponse::Success => (
                [(header::CONTENT_TYPE, JSON_UTF8)],
                json_body(&OperationResponse {
                    result: "1",
                    gserror: None,
                }),
            )
                .into_response(),
            GsResponse::Failure(message) => (
                [(header::CONTENT_TYPE, JSON_UTF8)],
                json_body(&OperationResponse {
                    result: "0",
                    gserror: message,
                }),
            )
                .into_response(),
            GsResponse::Listing(listing) => {
                ([(header::CONTENT_TYPE, JSON_UTF8)], json_body(&listing)).into_response()
            }
            GsResponse::Content { body, text } => {
                let content_type = if text {
                    "text/plain; charset=UTF-8"
                } else {
                    OCTET_STREAM
                };
                ([(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            GsResponse::Download { filename, body } => (
                [
                    (header::CONTENT_TYPE, OCTET_STREAM.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                    (header::CONTENT_LENGTH, body.len().to_string()),
                ],
                body,
            )
                .into_response(),
        }
    }
}
