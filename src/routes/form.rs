//! Action form extraction
//!
//! The action endpoints accept either a multipart upload (file input plus
//! optional hidden fields) or a plain url-encoded form that only names an
//! already-stored file.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRequest, Multipart, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form,
};
use tracing::debug;

/// A file part sent with a client-side filename
#[derive(Debug)]
pub struct FileUpload {
    pub filename: String,
    pub data: Bytes,
}

/// Fields of an action request
#[derive(Debug, Default)]
pub struct ActionForm {
    /// Uploaded file; takes priority over the name fields
    pub upload: Option<FileUpload>,
    /// `file` text field naming a stored file
    pub file: Option<String>,
    /// `filename` text field naming a stored file
    pub filename: Option<String>,
}

impl ActionForm {
    /// Name of an already-stored file, `file` before `filename`.
    pub fn stored_name(&self) -> Option<&str> {
        self.file.as_deref().or(self.filename.as_deref())
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = ActionForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(bad_multipart)?
        {
            let name = field.name().unwrap_or("").to_string();
            let client_filename = field.file_name().map(str::to_string);

            match (name.as_str(), client_filename) {
                ("file", Some(filename)) => {
                    let data = field.bytes().await.map_err(bad_multipart)?;
                    // An empty file input still arrives as a part with no name
                    if !filename.is_empty() && form.upload.is_none() {
                        form.upload = Some(FileUpload { filename, data });
                    }
                }
                ("file", None) => {
                    let value = field.text().await.map_err(bad_multipart)?;
                    form.file = non_empty(value);
                }
                ("filename", _) => {
                    let value = field.text().await.map_err(bad_multipart)?;
                    form.filename = non_empty(value);
                }
                // Unread fields are drained by the next `next_field` call
                (other, _) => {
                    debug!(field = %other, "Ignoring unknown form field");
                }
            }
        }

        Ok(form)
    }
}

fn bad_multipart(err: MultipartError) -> Response {
    (StatusCode::BAD_REQUEST, format!("Failed to read form: {}", err)).into_response()
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

impl<S> FromRequest<S> for ActionForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(mut fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(ActionForm {
                upload: None,
                file: fields.remove("file").and_then(non_empty),
                filename: fields.remove("filename").and_then(non_empty),
            })
        } else {
            // No form at all: treated as "no filename"
            Ok(ActionForm::default())
        }
    }
}
