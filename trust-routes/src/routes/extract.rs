use crate::ServiceResult;
use crate::error::ServiceError;
use axum::extract::FromRequest;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use error_stack::IntoReport;
use routing::error::MessageBody;
use tracing::debug;
use trust_core::model::EntityId;

/// JSON request body whose rejections are answered with a `{message}` 400.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(BodyRejection))]
pub struct Body<T>(pub T);

#[derive(Debug)]
pub struct BodyRejection(JsonRejection);

impl From<JsonRejection> for BodyRejection {
    fn from(value: JsonRejection) -> Self {
        Self(value)
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        debug!("request body rejected: {}", self.0.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(MessageBody::new(format!("Bad Request: {}", self.0.body_text()))),
        )
            .into_response()
    }
}

/// A path id that is not an id cannot name a stored record.
pub fn parse_id(raw: &str, kind: &'static str) -> ServiceResult<EntityId> {
    raw.parse::<EntityId>()
        .map_err(|e| ServiceError::NotFound(kind).into_report().attach(e.to_string()))
}

pub fn found<T>(value: Option<T>, kind: &'static str) -> ServiceResult<T> {
    value.ok_or_else(|| ServiceError::NotFound(kind).into_report())
}
