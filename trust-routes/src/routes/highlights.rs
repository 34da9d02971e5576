use super::HandlerResult;
use super::extract::{Body, found};
use super::responses::{Reply, acknowledge};
use crate::service::HighlightService;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{Highlight, HighlightDraft, HighlightList, PhotoDraft, Stored, VideoDraft};

pub(super) const HIGHLIGHTS_PATH: &str = "/highlights";
pub(super) const HIGHLIGHT_YEARS_PATH: &str = "/highlights/years/all";
pub(super) const HIGHLIGHT_PATH: &str = "/highlights/{year}";
pub(super) const HIGHLIGHT_PHOTOS_PATH: &str = "/highlights/{year}/photos";
pub(super) const HIGHLIGHT_PHOTO_PATH: &str = "/highlights/{year}/photos/{photo_id}";
pub(super) const HIGHLIGHT_VIDEOS_PATH: &str = "/highlights/{year}/videos";
pub(super) const HIGHLIGHT_VIDEO_PATH: &str = "/highlights/{year}/videos/{video_id}";

const YEAR: &str = "Year";

#[utoipa::path(
    post,
    path = HIGHLIGHTS_PATH,
    tag = "highlights",
    request_body = HighlightDraft,
    responses(
        (status = CREATED, description = "The year was created with no photos or videos", body = Stored<Highlight>),
        (status = BAD_REQUEST, description = "The year is missing or already exists", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn create_year<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Body(draft): Body<HighlightDraft>,
) -> HandlerResult {
    let created = service.create(draft).await?;
    Ok(Reply::created(created).into_response())
}

/// Every year that has highlights, newest first.
#[utoipa::path(
    get,
    path = HIGHLIGHT_YEARS_PATH,
    tag = "highlights",
    responses((status = OK, description = "Years, newest first", body = Vec<String>))
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_years<E: ContentEngine>(State(service): State<HighlightService<E>>) -> HandlerResult {
    Ok(Reply::ok(service.years().await?).into_response())
}

/// A year nobody created yet answers with empty lists rather than a 404.
#[utoipa::path(
    get,
    path = HIGHLIGHT_PATH,
    tag = "highlights",
    params(("year" = String, Path, description = "The festival year")),
    responses((status = OK, description = "The highlights of the year", body = Stored<Highlight>))
)]
#[instrument(skip(service), err(Debug))]
pub async fn get_year<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path(year): Path<String>,
) -> HandlerResult {
    let response = match service.find(year.clone()).await? {
        Some(highlight) => Reply::ok(highlight).into_response(),
        None => Reply::ok(Highlight::empty(year)).into_response(),
    };
    Ok(response)
}

#[utoipa::path(
    delete,
    path = HIGHLIGHT_PATH,
    tag = "highlights",
    params(("year" = String, Path, description = "The festival year")),
    responses(
        (status = OK, description = "The year and its highlights were deleted", body = MessageBody),
        (status = NOT_FOUND, description = "The year does not exist", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_year<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path(year): Path<String>,
) -> HandlerResult {
    found(service.delete(year).await?, YEAR)?;
    Ok(acknowledge("Highlight year deleted successfully").into_response())
}

#[utoipa::path(
    post,
    path = HIGHLIGHT_PHOTOS_PATH,
    tag = "highlights",
    request_body = PhotoDraft,
    params(("year" = String, Path, description = "The festival year")),
    responses(
        (status = CREATED, description = "The highlight with the photo appended", body = Stored<Highlight>),
        (status = NOT_FOUND, description = "The year does not exist", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn add_photo<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path(year): Path<String>,
    Body(draft): Body<PhotoDraft>,
) -> HandlerResult {
    let updated = found(service.add_photo(year, draft).await?, YEAR)?;
    Ok(Reply::created(updated).into_response())
}

#[utoipa::path(
    delete,
    path = HIGHLIGHT_PHOTO_PATH,
    tag = "highlights",
    params(
        ("year" = String, Path, description = "The festival year"),
        ("photo_id" = String, Path, description = "Id of the photo to remove"),
    ),
    responses(
        (status = OK, description = "The highlight without the photo", body = Stored<Highlight>),
        (status = NOT_FOUND, description = "The year does not exist", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_photo<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path((year, photo_id)): Path<(String, String)>,
) -> HandlerResult {
    let updated = found(
        service.remove(year, HighlightList::Photos, &photo_id).await?,
        YEAR,
    )?;
    Ok(Reply::ok(updated).into_response())
}

#[utoipa::path(
    post,
    path = HIGHLIGHT_VIDEOS_PATH,
    tag = "highlights",
    request_body = VideoDraft,
    params(("year" = String, Path, description = "The festival year")),
    responses(
        (status = CREATED, description = "The highlight with the video appended", body = Stored<Highlight>),
        (status = NOT_FOUND, description = "The year does not exist", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service, draft), err(Debug))]
pub async fn add_video<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path(year): Path<String>,
    Body(draft): Body<VideoDraft>,
) -> HandlerResult {
    let updated = found(service.add_video(year, draft).await?, YEAR)?;
    Ok(Reply::created(updated).into_response())
}

#[utoipa::path(
    delete,
    path = HIGHLIGHT_VIDEO_PATH,
    tag = "highlights",
    params(
        ("year" = String, Path, description = "The festival year"),
        ("video_id" = String, Path, description = "Id of the video to remove"),
    ),
    responses(
        (status = OK, description = "The highlight without the video", body = Stored<Highlight>),
        (status = NOT_FOUND, description = "The year does not exist", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_video<E: ContentEngine>(
    State(service): State<HighlightService<E>>,
    Path((year, video_id)): Path<(String, String)>,
) -> HandlerResult {
    let updated = found(
        service.remove(year, HighlightList::Videos, &video_id).await?,
        YEAR,
    )?;
    Ok(Reply::ok(updated).into_response())
}
