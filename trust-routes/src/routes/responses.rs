use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use routing::error::MessageBody;
use serde::Serialize;
use std::borrow::Cow;
use trust_core::ordered::ReorderOutcome;
use utoipa::ToSchema;

/// A successful answer carrying `T` as its JSON body.
#[derive(Debug)]
pub struct Reply<T> {
    status_code: StatusCode,
    body: T,
}

impl<T> Reply<T> {
    pub fn ok(body: T) -> Self {
        Self {
            status_code: StatusCode::OK,
            body,
        }
    }

    pub fn created(body: T) -> Self {
        Self {
            status_code: StatusCode::CREATED,
            body,
        }
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        (self.status_code, Json(self.body)).into_response()
    }
}

pub fn acknowledge(message: impl Into<Cow<'static, str>>) -> Reply<MessageBody> {
    Reply::ok(MessageBody::new(message))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReorderResponse {
    message: String,
    #[serde(flatten)]
    outcome: ReorderOutcome,
}

impl ReorderResponse {
    pub fn new(label: &str, outcome: ReorderOutcome) -> Self {
        Self {
            message: format!("{label} order updated successfully"),
            outcome,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    message: &'static str,
    image_url: String,
}

impl UploadResponse {
    pub fn new(image_url: String) -> Self {
        Self {
            message: "Image uploaded successfully!",
            image_url,
        }
    }
}
