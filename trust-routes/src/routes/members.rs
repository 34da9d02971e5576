use super::extract::Body;
use super::responses::ReorderResponse;
use super::{HandlerResult, ordered};
use crate::service::OrderedService;
use axum::extract::{Path, Query, State};
use routing::error::MessageBody;
use serde::Deserialize;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Member, MemberDraft, MemberGroup, Ordered};
use trust_core::ordered::OrderAssignment;
use utoipa::IntoParams;

pub(super) const MEMBERS_PATH: &str = "/members";
pub(super) const MEMBER_PATH: &str = "/members/{id}";
pub(super) const MEMBERS_ORDER_PATH: &str = "/members/order";

#[derive(Debug, Deserialize, IntoParams)]
pub struct MemberQuery {
    /// `true` lists the featured members, anything else the regular ones.
    featured: Option<String>,
}

/// Featured members and regular members are listed separately.
#[utoipa::path(
    get,
    path = MEMBERS_PATH,
    tag = "members",
    params(MemberQuery),
    responses(
        (status = OK, description = "Members of the group, in display order", body = [Ordered<Member>]),
    )
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_members<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Query(query): Query<MemberQuery>,
) -> HandlerResult {
    let group = MemberGroup::from_query(query.featured.as_deref());
    ordered::list::<E, Member>(service, Some(group)).await
}

/// A featured member needs a designation and an image.
#[utoipa::path(
    post,
    path = MEMBERS_PATH,
    tag = "members",
    request_body = MemberDraft,
    responses(
        (status = CREATED, description = "The member was appended to its group", body = Ordered<Member>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_member<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(draft): Body<MemberDraft>,
) -> HandlerResult {
    ordered::create::<E, Member>(service, draft).await
}

/// Replace a member. Turning a featured member into a regular one drops the
/// designation; the order value is kept either way.
#[utoipa::path(
    put,
    path = MEMBER_PATH,
    tag = "members",
    request_body = MemberDraft,
    responses(
        (status = OK, description = "The updated member", body = Ordered<Member>),
        (status = BAD_REQUEST, description = "A required field is missing", body = MessageBody),
        (status = NOT_FOUND, description = "No member has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the member")),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn update_member<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
    Body(draft): Body<MemberDraft>,
) -> HandlerResult {
    ordered::update::<E, Member>(service, &id, draft).await
}

#[utoipa::path(
    delete,
    path = MEMBER_PATH,
    tag = "members",
    responses(
        (status = OK, description = "The member was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No member has the id", body = MessageBody),
    ),
    params(("id" = String, Path, description = "Id of the member")),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_member<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    ordered::delete::<E, Member>(service, &id).await
}

#[utoipa::path(
    put,
    path = MEMBERS_ORDER_PATH,
    tag = "members",
    request_body = Vec<OrderAssignment>,
    responses(
        (status = OK, description = "How many assignments were applied", body = ReorderResponse),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug), fields(req.count = assignments.len()))]
pub async fn reorder_members<E: ContentEngine>(
    State(service): State<OrderedService<E>>,
    Body(assignments): Body<Vec<OrderAssignment>>,
) -> HandlerResult {
    ordered::reorder::<E, Member>(service, "Member", assignments).await
}
