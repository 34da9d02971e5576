//! The gallery. None of these routes ask for a token.

use super::extract::Body;
use super::responses::{ReorderResponse, Reply};
use super::{HandlerResult, ordered};
use crate::service::OrderedService;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use serde::Deserialize;
use tracing::{debug, instrument};
use trust_core::ContentEngine;
use trust_core::model::{MediaDraft, MediaItem, MediaType, MediaUpdateDraft, Ordered};
use trust_core::ordered::OrderAssignment;
use utoipa::IntoParams;

pub(super) const MEDIA_PATH: &str = "/media";
pub(super) const MEDIA_ITEM_PATH: &str = "/media/{id}";
pub(super) const MEDIA_ORDER_PATH: &str = "/media/order";

#[derive(Debug, Deserialize, IntoParams)]
pub struct MediaQuery {
    /// `photo` or `video`. Omitted lists every item.
    #[serde(rename = "type")]
    media_type: Option<String>,
}

#[utoipa::path(
    get,
    path = MEDIA_PATH,
    tag = "media",
    params(MediaQuery),
    responses(
        (status = OK, description = "Media items in display order; empty for an unknown type", body = [Ordered<MediaItem>]),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_media<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Query(query): Query<MediaQuery>,
) -> HandlerResult {
    let partition = match query.media_type.as_deref().map(str::parse::<MediaType>) {
        None => None,
        Some(Ok(media_type)) => Some(media_type),
        Some(Err(e)) => {
            debug!("{}", e.detail());
            return Ok(Reply::ok(Vec::<Ordered<MediaItem>>::new()).into_response());
        }
    };
    ordered::list::<E, MediaItem>(service, partition).await
}

/// Photos and videos are ordered separately. A video's `url` is its thumbnail.
#[utoipa::path(
    post,
    path = MEDIA_PATH,
    tag = "media",
    request_body = MediaDraft,
    responses(
        (status = CREATED, description = "The item was appended", body = Ordered<MediaItem>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
    )
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_media<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(draft): Body<MediaDraft>,
) -> HandlerResult {
    ordered::create::<E, MediaItem>(service, draft).await
}

/// The media type cannot change. Leaving out `videoUrl` removes it.
#[utoipa::path(
    put,
    path = MEDIA_ITEM_PATH,
    tag = "media",
    request_body = MediaUpdateDraft,
    responses(
        (status = OK, description = "The updated item", body = Ordered<MediaItem>),
        (status = NOT_FOUND, description = "No item has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the media item"))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_media<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<MediaUpdateDraft>,
) -> HandlerResult {
    ordered::update::<E, MediaItem>(service, &id, draft).await
}

#[utoipa::path(
    delete,
    path = MEDIA_ITEM_PATH,
    tag = "media",
    responses(
        (status = OK, description = "The item was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No item has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the media item"))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_media<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    ordered::delete::<E, MediaItem>(service, &id).await
}

#[utoipa::path(
    put,
    path = MEDIA_ORDER_PATH,
    tag = "media",
    request_body = Vec<OrderAssignment>,
    responses(
        (status = OK, description = "How many assignments were applied", body = ReorderResponse),
    )
)]
#[instrument(skip_all, err(Debug), fields(req.count = assignments.len()))]
pub async fn reorder_media<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(assignments): Body<Vec<OrderAssignment>>,
) -> HandlerResult {
    ordered::reorder::<E, MediaItem>(service, "Media", assignments).await
}
