use super::HandlerResult;
use super::extract::Body;
use super::responses::Reply;
use crate::service::{AccountService, Credentials, Session};
use axum::Extension;
use axum::extract::State;
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::AdminUser;

pub(super) const LOGIN_PATH: &str = "/auth/login";
pub(super) const REGISTER_PATH: &str = "/auth/register";
pub(super) const ME_PATH: &str = "/auth/me";

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = LOGIN_PATH,
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = OK, description = "The admin and a fresh token", body = Session),
        (status = UNAUTHORIZED, description = "Unknown user or wrong password", body = MessageBody),
    )
)]
#[instrument(skip_all, err(Debug))]
pub async fn login<E: ContentEngine>(
    State(service): State<AccountService<E>>,
    Body(credentials): Body<Credentials>,
) -> HandlerResult {
    Ok(Reply::ok(service.login(credentials).await?).into_response())
}

/// Create the first admin account. Closed once any admin exists.
#[utoipa::path(
    post,
    path = REGISTER_PATH,
    tag = "auth",
    request_body = Credentials,
    responses(
        (status = CREATED, description = "The new admin and a token", body = Session),
        (status = FORBIDDEN, description = "An admin already exists", body = MessageBody),
    )
)]
#[instrument(skip_all, err(Debug))]
pub async fn register<E: ContentEngine>(
    State(service): State<AccountService<E>>,
    Body(credentials): Body<Credentials>,
) -> HandlerResult {
    Ok(Reply::created(service.register(credentials).await?).into_response())
}

/// The admin the bearer token belongs to.
#[utoipa::path(
    get,
    path = ME_PATH,
    tag = "auth",
    responses(
        (status = OK, description = "The signed-in admin", body = AdminUser),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all)]
pub async fn me(Extension(admin): Extension<AdminUser>) -> Reply<AdminUser> {
    Reply::ok(admin)
}
