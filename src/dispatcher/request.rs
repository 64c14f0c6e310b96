//! Request parameters
//!
//! Decodes the loosely-typed parameter set of an inbound call. Parameters
//! arrive urlencoded (query string or form body) or as `multipart/form-data`
//! for uploads, where `opt` and `dir` ride along as hidden form fields.
//! The widget serializes list parameters jQuery-style as repeated `files[]`
//! keys; plain repeated `files` keys are accepted as well.

use axum::extract::{Form, FromRequest, Multipart, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::upload::UploadedFile;

/// The parameters of one inbound call. Constructed per request, dropped
/// when the response is written.
#[derive(Debug, Default)]
pub struct FileRequest {
    pub opt: Option<String>,
    pub dir: Option<String>,
    pub filename: Option<String>,
    pub new_filename: Option<String>,
    pub files: Option<Vec<String>>,
    pub file_content: Option<String>,
    pub base64_encode: bool,
    pub uploads: Vec<UploadedFile>,
}

impl FileRequest {
    fn set_param(&mut self, name: &str, value: String) {
        match name {
            "opt" => self.opt = Some(value),
            "dir" => self.dir = Some(value),
            "filename" => self.filename = Some(value),
            "newfilename" => self.new_filename = Some(value),
            // field name as the widget spells it
            "filenContent" => self.file_content = Some(value),
            "base64_encode" => self.base64_encode = value == "1",
            "files" | "files[]" => self.files.get_or_insert_with(Vec::new).push(value),
            _ => {}
        }
    }

    /// Decode an HTTP request into parameters. Transport-level decode
    /// failures are answered directly with the extractor's 4xx response.
    pub async fn from_http(req: Request) -> Result<FileRequest, Response> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.starts_with("multipart/form-data"))
            .unwrap_or(false);

        if is_multipart {
            Self::from_multipart(req).await
        } else {
            Self::from_form(req).await
        }
    }

    async fn from_form(req: Request) -> Result<FileRequest, Response> {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, &())
            .await
            .map_err(|rejection| rejection.into_response())?;

        let mut request = FileRequest::default();
        for (name, value) in pairs {
            request.set_param(&name, value);
        }
        Ok(request)
    }

    async fn from_multipart(req: Request) -> Result<FileRequest, Response> {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|rejection| rejection.into_response())?;

        let mut request = FileRequest::default();
        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response()),
            };
            let name = field.name().unwrap_or_default().to_string();
            if let Some(file_name) = field.file_name() {
                let file_name = file_name.to_string();
                match field.bytes().await {
                    Ok(bytes) => request.uploads.push(UploadedFile {
                        name: file_name,
                        data: bytes.to_vec(),
                    }),
                    Err(e) => {
                        return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response());
                    }
                }
            } else {
                match field.text().await {
                    Ok(value) => request.set_param(&name, value),
                    Err(e) => {
                        return Err((StatusCode::BAD_REQUEST, e.to_string()).into_response());
                    }
                }
            }
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> FileRequest {
        let mut request = FileRequest::default();
        for (name, value) in pairs {
            request.set_param(name, value.to_string());
        }
        request
    }

    #[test]
    fn named_parameters_land_in_their_fields() {
        let request = from_pairs(&[
            ("opt", "6"),
            ("dir", "/docs/"),
            ("filename", "old.txt"),
            ("newfilename", "new.txt"),
            ("filenContent", "body"),
            ("base64_encode", "1"),
        ]);
        assert_eq!(request.opt.as_deref(), Some("6"));
        assert_eq!(request.dir.as_deref(), Some("/docs/"));
        assert_eq!(request.filename.as_deref(), Some("old.txt"));
        assert_eq!(request.new_filename.as_deref(), Some("new.txt"));
        assert_eq!(request.file_content.as_deref(), Some("body"));
        assert!(request.base64_encode);
    }

    #[test]
    fn repeated_files_keys_collect_in_order() {
        let request = from_pairs(&[("files[]", "/a.txt"), ("files[]", "/b.txt"), ("files", "/c.txt")]);
        assert_eq!(
            request.files.as_deref(),
            Some(&["/a.txt".to_string(), "/b.txt".to_string(), "/c.txt".to_string()][..])
        );
    }

    #[test]
    fn unknown_parameters_are_ignored() {
        let request = from_pairs(&[("rnd", "123"), ("dir", "/")]);
        assert_eq!(request.dir.as_deref(), Some("/"));
        assert!(request.opt.is_none());
        assert!(request.files.is_none());
    }
}
