use super::HandlerResult;
use super::extract::{Body, found, parse_id};
use super::responses::{Reply, acknowledge};
use crate::service::UpcomingEventService;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Stored, UpcomingEvent, UpcomingEventDraft};

pub(super) const UPCOMING_EVENTS_PATH: &str = "/upcoming-events";
pub(super) const UPCOMING_EVENT_PATH: &str = "/upcoming-events/{id}";

const KIND: &str = "Event";

#[utoipa::path(
    get,
    path = UPCOMING_EVENTS_PATH,
    tag = "upcoming-events",
    responses((status = OK, description = "Upcoming events in the order they were added", body = [Stored<UpcomingEvent>]))
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_upcoming<E: ContentEngine>(
    State(service): State<UpcomingEventService<E>>,
) -> HandlerResult {
    Ok(Reply::ok(service.list().await?).into_response())
}

#[utoipa::path(
    post,
    path = UPCOMING_EVENTS_PATH,
    tag = "upcoming-events",
    request_body = UpcomingEventDraft,
    responses(
        (status = CREATED, description = "The event was stored", body = Stored<UpcomingEvent>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_upcoming<E: ContentEngine>(
    State(service): State<UpcomingEventService<E>>,
    Body(draft): Body<UpcomingEventDraft>,
) -> HandlerResult {
    Ok(Reply::created(service.create(draft).await?).into_response())
}

#[utoipa::path(
    put,
    path = UPCOMING_EVENT_PATH,
    tag = "upcoming-events",
    request_body = UpcomingEventDraft,
    params(("id" = String, Path, description = "Id of the upcoming event")),
    responses(
        (status = OK, description = "The updated event", body = Stored<UpcomingEvent>),
        (status = NOT_FOUND, description = "No event has the id", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_upcoming<E: ContentEngine>(
    State(service): State<UpcomingEventService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<UpcomingEventDraft>,
) -> HandlerResult {
    let id = parse_id(&id, KIND)?;
    let updated = found(service.update(id, draft).await?, KIND)?;
    Ok(Reply::ok(updated).into_response())
}

#[utoipa::path(
    delete,
    path = UPCOMING_EVENT_PATH,
    tag = "upcoming-events",
    params(("id" = String, Path, description = "Id of the upcoming event")),
    responses(
        (status = OK, description = "The event was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No event has the id", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_upcoming<E: ContentEngine>(
    State(service): State<UpcomingEventService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id = parse_id(&id, KIND)?;
    found(service.delete(id).await?, KIND)?;
    Ok(acknowledge("Event deleted successfully").into_response())
}
