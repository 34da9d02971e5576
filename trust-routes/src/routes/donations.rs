use super::HandlerResult;
use super::extract::Body;
use super::responses::Reply;
use crate::service::DonationService;
use axum::extract::State;
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Donation, DonationDraft, DonationPatch, DonationPatchDraft, Stored};

pub(super) const DONATIONS_PATH: &str = "/donations";

/// The active donation details, created from the defaults if there are none.
#[utoipa::path(
    get,
    path = DONATIONS_PATH,
    tag = "donations",
    responses((status = OK, description = "The active donation details", body = Stored<Donation>))
)]
#[instrument(skip(service), err(Debug))]
pub async fn get_donation<E: ContentEngine>(State(service): State<DonationService<E>>) -> HandlerResult {
    Ok(Reply::ok(service.active().await?).into_response())
}

/// Fields that are left out keep their value. `qrCodeUrl` and `upiId` can be
/// removed by sending `null`.
#[utoipa::path(
    put,
    path = DONATIONS_PATH,
    tag = "donations",
    request_body = DonationPatchDraft,
    responses(
        (status = OK, description = "The updated donation details", body = Stored<Donation>),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn update_donation<E: ContentEngine>(
    State(service): State<DonationService<E>>,
    Body(draft): Body<DonationPatchDraft>,
) -> HandlerResult {
    let updated = service.update(DonationPatch::from(draft)).await?;
    Ok(Reply::ok(updated).into_response())
}

#[utoipa::path(
    post,
    path = DONATIONS_PATH,
    tag = "donations",
    request_body = DonationDraft,
    responses(
        (status = CREATED, description = "The stored donation details", body = Stored<Donation>),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_donation<E: ContentEngine>(
    State(service): State<DonationService<E>>,
    Body(draft): Body<DonationDraft>,
) -> HandlerResult {
    Ok(Reply::created(service.create(draft).await?).into_response())
}
