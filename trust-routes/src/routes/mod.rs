use crate::error::ServiceError;
use crate::state::TrustAppState;
use axum::Router;
use axum::response::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use routing::error::{EndpointError, MessageBody};
use routing::router::RouterBuilder;
use tracing::info;
use trust_core::ContentEngine;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

mod activities;
mod auth;
mod content;
mod donations;
mod events;
mod extract;
mod highlights;
mod media;
mod members;
mod messages;
mod ordered;
mod responses;
mod sponsors;
mod upcoming;
mod upload;

use activities::*;
use auth::*;
use content::*;
use donations::*;
use events::*;
use highlights::*;
use media::*;
use members::*;
use messages::*;
use sponsors::*;
use upcoming::*;
use upload::*;

pub use extract::{Body, BodyRejection};

const API_ROOT_PATH: &str = "/api";
const GREETING_PATH: &str = "/";

type HandlerResult = Result<axum::response::Response, EndpointError<ServiceError>>;

#[derive(OpenApi)]
#[openapi(
    nest(
        (path = API_ROOT_PATH, api = TrustDocs),
    ),
    modifiers(&BearerAuth),
    info(title = "Mandal trust content service")
)]
struct ApiDoc;

#[derive(OpenApi)]
#[openapi(paths(
    greeting,
    list_activities,
    create_activity,
    update_activity,
    delete_activity,
    reorder_activities,
    list_events,
    create_event,
    update_event,
    delete_event,
    reorder_events,
    list_sponsors,
    create_sponsor,
    update_sponsor,
    delete_sponsor,
    reorder_sponsors,
    list_members,
    create_member,
    update_member,
    delete_member,
    reorder_members,
    list_media,
    create_media,
    update_media,
    delete_media,
    reorder_media,
    create_year,
    list_years,
    get_year,
    delete_year,
    add_photo,
    delete_photo,
    add_video,
    delete_video,
    submit_message,
    list_messages,
    mark_message,
    delete_message,
    get_content,
    update_content,
    get_donation,
    update_donation,
    create_donation,
    list_upcoming,
    create_upcoming,
    update_upcoming,
    delete_upcoming,
    upload_image,
    login,
    register,
    me,
))]
struct TrustDocs;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// Builds the whole api under `/api`. `/metrics` is served from the root and
/// answers 503 when no recorder is given.
pub fn build<E: ContentEngine>(
    app_state: TrustAppState<E>,
    metrics_handle: Option<PrometheusHandle>,
) -> Router {
    let builder = RouterBuilder::new(API_ROOT_PATH, app_state.auth())
        .get(GREETING_PATH, greeting)
        // ordered resources
        .get(ACTIVITY_PATH, list_activities::<E>)
        .gated_post(ACTIVITIES_PATH, create_activity::<E>)
        .gated_put(ACTIVITIES_ORDER_PATH, reorder_activities::<E>)
        .gated_put(ACTIVITY_PATH, update_activity::<E>)
        .gated_delete(ACTIVITY_PATH, delete_activity::<E>)
        .get(EVENTS_PATH, list_events::<E>)
        .gated_post(EVENTS_PATH, create_event::<E>)
        .gated_put(EVENTS_ORDER_PATH, reorder_events::<E>)
        .gated_put(EVENT_PATH, update_event::<E>)
        .gated_delete(EVENT_PATH, delete_event::<E>)
        .get(SPONSORS_PATH, list_sponsors::<E>)
        .gated_post(SPONSORS_PATH, create_sponsor::<E>)
        .gated_put(SPONSORS_ORDER_PATH, reorder_sponsors::<E>)
        .gated_put(SPONSOR_PATH, update_sponsor::<E>)
        .gated_delete(SPONSOR_PATH, delete_sponsor::<E>)
        .get(MEMBERS_PATH, list_members::<E>)
        .gated_post(MEMBERS_PATH, create_member::<E>)
        .gated_put(MEMBERS_ORDER_PATH, reorder_members::<E>)
        .gated_put(MEMBER_PATH, update_member::<E>)
        .gated_delete(MEMBER_PATH, delete_member::<E>)
        // the gallery has never asked for a token
        .get(MEDIA_PATH, list_media::<E>)
        .post(MEDIA_PATH, create_media::<E>)
        .put(MEDIA_ORDER_PATH, reorder_media::<E>)
        .put(MEDIA_ITEM_PATH, update_media::<E>)
        .delete(MEDIA_ITEM_PATH, delete_media::<E>)
        // highlights
        .gated_post(HIGHLIGHTS_PATH, create_year::<E>)
        .get(HIGHLIGHT_YEARS_PATH, list_years::<E>)
        .get(HIGHLIGHT_PATH, get_year::<E>)
        .gated_delete(HIGHLIGHT_PATH, delete_year::<E>)
        .gated_post(HIGHLIGHT_PHOTOS_PATH, add_photo::<E>)
        .gated_delete(HIGHLIGHT_PHOTO_PATH, delete_photo::<E>)
        .gated_post(HIGHLIGHT_VIDEOS_PATH, add_video::<E>)
        .gated_delete(HIGHLIGHT_VIDEO_PATH, delete_video::<E>)
        // contact form
        .post(MESSAGES_PATH, submit_message::<E>)
        .gated_get(MESSAGES_PATH, list_messages::<E>)
        .gated_put(MESSAGE_PATH, mark_message::<E>)
        .gated_delete(MESSAGE_PATH, delete_message::<E>)
        // singletons; content edits have never needed a token
        .get(CONTENT_PATH, get_content::<E>)
        .put(CONTENT_PATH, update_content::<E>)
        .get(DONATIONS_PATH, get_donation::<E>)
        .gated_put(DONATIONS_PATH, update_donation::<E>)
        .gated_post(DONATIONS_PATH, create_donation::<E>)
        .get(UPCOMING_EVENTS_PATH, list_upcoming::<E>)
        .gated_post(UPCOMING_EVENTS_PATH, create_upcoming::<E>)
        .gated_put(UPCOMING_EVENT_PATH, update_upcoming::<E>)
        .gated_delete(UPCOMING_EVENT_PATH, delete_upcoming::<E>)
        .gated_post_limited(UPLOAD_PATH, upload_image::<E>, app_state.uploads.max_bytes())
        // accounts
        .post(LOGIN_PATH, login::<E>)
        .post(REGISTER_PATH, register::<E>)
        .gated_get(ME_PATH, me);

    match metrics_handle {
        Some(handle) => {
            info!("metrics enabled, setting up metrics handler");
            builder.build_with_metrics(app_state, ApiDoc::openapi(), handle)
        }
        None => {
            info!("metrics not enabled, setting up service unavailable metrics handler");
            builder.build_no_metrics(app_state, ApiDoc::openapi())
        }
    }
}

#[utoipa::path(
    get,
    path = GREETING_PATH,
    tag = "health",
    responses((status = OK, description = "The api is up", body = MessageBody))
)]
async fn greeting() -> Json<MessageBody> {
    Json(MessageBody::new("Hello from the Mandal Backend!"))
}
