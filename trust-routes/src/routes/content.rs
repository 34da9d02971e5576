use super::HandlerResult;
use super::extract::Body;
use super::responses::Reply;
use crate::service::ContentService;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use serde_json::Value;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{PageContent, Stored};

pub(super) const CONTENT_PATH: &str = "/content/{section_name}";

/// A section that was never saved is created from its default on first read.
#[utoipa::path(
    get,
    path = CONTENT_PATH,
    tag = "content",
    params(("section_name" = String, Path, description = "Name of the page section, e.g. hero")),
    responses((status = OK, description = "The content of the section", body = Stored<PageContent>))
)]
#[instrument(skip(service), err(Debug))]
pub async fn get_content<E: ContentEngine>(
    State(service): State<ContentService<E>>,
    Path(section_name): Path<String>,
) -> HandlerResult {
    Ok(Reply::ok(service.section(section_name).await?).into_response())
}

/// The request body becomes the section's content as a whole. Open to
/// everyone, like the page itself.
#[utoipa::path(
    put,
    path = CONTENT_PATH,
    tag = "content",
    request_body(content = Value, description = "Free-form content of the section"),
    params(("section_name" = String, Path, description = "Name of the page section, e.g. hero")),
    responses(
        (status = OK, description = "The stored content", body = Stored<PageContent>),
        (status = BAD_REQUEST, description = "The body is not JSON", body = MessageBody),
    )
)]
#[instrument(skip(service, content), err(Debug))]
pub async fn update_content<E: ContentEngine>(
    State(service): State<ContentService<E>>,
    Path(section_name): Path<String>,
    Body(content): Body<Value>,
) -> HandlerResult {
    Ok(Reply::ok(service.update(section_name, content).await?).into_response())
}
