use super::extract::Body;
use super::responses::ReorderResponse;
use super::{HandlerResult, ordered};
use crate::service::OrderedService;
use axum::extract::{Path, State};
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Sponsor, SponsorDraft, Ordered};
use trust_core::ordered::{OrderAssignment, Unpartitioned};

pub(super) const SPONSORS_PATH: &str = "/sponsors";
pub(super) const SPONSOR_PATH: &str = "/sponsors/{id}";
pub(super) const SPONSORS_ORDER_PATH: &str = "/sponsors/order";

/// Every sponsor in display order.
#[utoipa::path(
    get,
    path = SPONSORS_PATH,
    tag = "sponsors",
    responses(
        (status = OK, description = "Every sponsor, in display order", body = [Ordered<Sponsor>]),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_sponsors<E: ContentEngine>(State(service): State<OrderedService<E>>) -> HandlerResult {
    ordered::list::<E, Sponsor>(service, Some(Unpartitioned)).await
}

#[utoipa::path(
    post,
    path = SPONSORS_PATH,
    tag = "sponsors",
    request_body = SponsorDraft,
    responses(
        (status = CREATED, description = "The sponsor was appended", body = Ordered<Sponsor>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_sponsor<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(draft): Body<SponsorDraft>,
) -> HandlerResult {
    ordered::create::<E, Sponsor>(service, draft).await
}

#[utoipa::path(
    put,
    path = SPONSOR_PATH,
    tag = "sponsors",
    request_body = SponsorDraft,
    responses(
        (status = OK, description = "The updated sponsor", body = Ordered<Sponsor>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = NOT_FOUND, description = "No sponsor has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the sponsor")),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_sponsor<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<SponsorDraft>,
) -> HandlerResult {
    ordered::update::<E, Sponsor>(service, &id, draft).await
}

#[utoipa::path(
    delete,
    path = SPONSOR_PATH,
    tag = "sponsors",
    responses(
        (status = OK, description = "The sponsor was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No sponsor has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the sponsor")),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_sponsor<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    ordered::delete::<E, Sponsor>(service, &id).await
}

#[utoipa::path(
    put,
    path = SPONSORS_ORDER_PATH,
    tag = "sponsors",
    request_body = Vec<OrderAssignment>,
    responses(
        (status = OK, description = "How many assignments were applied", body = ReorderResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug), fields(req.count = assignments.len()))]
pub async fn reorder_sponsors<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(assignments): Body<Vec<OrderAssignment>>,
) -> HandlerResult {
    ordered::reorder::<E, Sponsor>(service, "Sponsor", assignments).await
}
