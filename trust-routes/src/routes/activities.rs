use super::extract::Body;
use super::responses::{ReorderResponse, Reply};
use super::{HandlerResult, ordered};
use crate::service::OrderedService;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::{debug, instrument};
use trust_core::ContentEngine;
use trust_core::model::{Activity, ActivityDraft, ActivityUpdateDraft, Ordered, SectionType};
use trust_core::ordered::OrderAssignment;

pub(super) const ACTIVITIES_PATH: &str = "/activities";
// The list route names its segment `id` too; it shares the matcher with PUT and DELETE.
pub(super) const ACTIVITY_PATH: &str = "/activities/{id}";
pub(super) const ACTIVITIES_ORDER_PATH: &str = "/activities/order";

/// List the activities of one section, in display order.
#[utoipa::path(
    get,
    path = ACTIVITY_PATH,
    tag = "activities",
    responses(
        (status = OK, description = "Activities of the section; empty for an unknown section", body = [Ordered<Activity>]),
    ),
    params(
        ("id" = SectionType, Path, description = "The section type, social or cultural"),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_activities<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(section_type): Path<String>,
) -> HandlerResult {
    match section_type.parse::<SectionType>() {
        Ok(section) => ordered::list::<E, Activity>(service, Some(section)).await,
        Err(e) => {
            debug!("{}", e.detail());
            Ok(Reply::ok(Vec::<Ordered<Activity>>::new()).into_response())
        }
    }
}

/// Append an activity to the end of its section.
#[utoipa::path(
    post,
    path = ACTIVITIES_PATH,
    tag = "activities",
    request_body = ActivityDraft,
    responses(
        (status = CREATED, description = "The activity was created", body = Ordered<Activity>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_activity<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(draft): Body<ActivityDraft>,
) -> HandlerResult {
    ordered::create::<E, Activity>(service, draft).await
}

/// Replace the content of an activity. Its section and order are kept.
#[utoipa::path(
    put,
    path = ACTIVITY_PATH,
    tag = "activities",
    request_body = ActivityUpdateDraft,
    responses(
        (status = OK, description = "The updated activity", body = Ordered<Activity>),
        (status = NOT_FOUND, description = "No activity has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the activity")),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_activity<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<ActivityUpdateDraft>,
) -> HandlerResult {
    ordered::update::<E, Activity>(service, &id, draft).await
}

#[utoipa::path(
    delete,
    path = ACTIVITY_PATH,
    tag = "activities",
    responses(
        (status = OK, description = "The activity was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No activity has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the activity")),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_activity<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    ordered::delete::<E, Activity>(service, &id).await
}

/// Move activities to new positions. Every pair is applied on its own.
#[utoipa::path(
    put,
    path = ACTIVITIES_ORDER_PATH,
    tag = "activities",
    request_body = Vec<OrderAssignment>,
    responses(
        (status = OK, description = "How many assignments were applied", body = ReorderResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug), fields(req.count = assignments.len()))]
pub async fn reorder_activities<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(assignments): Body<Vec<OrderAssignment>>,
) -> HandlerResult {
    ordered::reorder::<E, Activity>(service, "Activity", assignments).await
}
