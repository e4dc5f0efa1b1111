use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::ApiError;

/// Extra information returned to API consumers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub details: String,
}

impl Message {
    pub fn new(text: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            details: details.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Form fields of a create or update request. Accepts both
/// `multipart/form-data` and `application/x-www-form-urlencoded` bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub complete: bool,
}

impl TaskForm {
    /// `complete` counts as set when present, non-empty and not `"false"`.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let complete = fields
            .get("complete")
            .is_some_and(|v| !v.is_empty() && v != "false");

        Self {
            title: fields.get("title").cloned().unwrap_or_default(),
            complete,
        }
    }
}

impl<S> FromRequest<S> for TaskForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("multipart/form-data"));

        let fields = if is_multipart {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?
            {
                let Some(name) = field.name().map(str::to_string) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;
                fields.insert(name, value);
            }
            fields
        } else {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            fields
        };

        Ok(Self::from_fields(&fields))
    }
}
