use super::extract::Body;
use super::responses::ReorderResponse;
use super::{HandlerResult, ordered};
use crate::service::OrderedService;
use axum::extract::{Path, State};
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Event, EventDraft, Ordered};
use trust_core::ordered::{OrderAssignment, Unpartitioned};

pub(super) const EVENTS_PATH: &str = "/events";
pub(super) const EVENT_PATH: &str = "/events/{id}";
pub(super) const EVENTS_ORDER_PATH: &str = "/events/order";

/// The festival programme, day by day.
#[utoipa::path(
    get,
    path = EVENTS_PATH,
    tag = "events",
    responses(
        (status = OK, description = "Every event, in display order", body = [Ordered<Event>]),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_events<E: ContentEngine>(State(service): State<OrderedService<E>>) -> HandlerResult {
    ordered::list::<E, Event>(service, Some(Unpartitioned)).await
}

#[utoipa::path(
    post,
    path = EVENTS_PATH,
    tag = "events",
    request_body = EventDraft,
    responses(
        (status = CREATED, description = "The event was appended", body = Ordered<Event>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_event<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(draft): Body<EventDraft>,
) -> HandlerResult {
    ordered::create::<E, Event>(service, draft).await
}

/// Replace every field of an event. Its position is kept.
#[utoipa::path(
    put,
    path = EVENT_PATH,
    tag = "events",
    request_body = EventDraft,
    responses(
        (status = OK, description = "The updated event", body = Ordered<Event>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = NOT_FOUND, description = "No event has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the event")),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_event<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<EventDraft>,
) -> HandlerResult {
    ordered::update::<E, Event>(service, &id, draft).await
}

#[utoipa::path(
    delete,
    path = EVENT_PATH,
    tag = "events",
    responses(
        (status = OK, description = "The event was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No event has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the event")),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_event<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    ordered::delete::<E, Event>(service, &id).await
}

#[utoipa::path(
    put,
    path = EVENTS_ORDER_PATH,
    tag = "events",
    request_body = Vec<OrderAssignment>,
    responses(
        (status = OK, description = "How many assignments were applied", body = ReorderResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug), fields(req.count = assignments.len()))]
pub async fn reorder_events<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(assignments): Body<Vec<OrderAssignment>>,
) -> HandlerResult {
    ordered::reorder::<E, Event>(service, "Event", assignments).await
}
