use super::HandlerResult;
use super::extract::{Body, found, parse_id};
use super::responses::{Reply, acknowledge};
use crate::service::MessageService;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use routing::error::MessageBody;
use tracing::instrument;
use trust_core::ContentEngine;
use trust_core::model::{ContactMessage, MessageDraft, MessageStatus, Stored};

pub(super) const MESSAGES_PATH: &str = "/messages";
pub(super) const MESSAGE_PATH: &str = "/messages/{id}";

const KIND: &str = "Message";

/// The public contact form. No token needed.
#[utoipa::path(
    post,
    path = MESSAGES_PATH,
    tag = "messages",
    request_body = MessageDraft,
    responses(
        (status = CREATED, description = "The message was stored", body = MessageBody),
        (status = BAD_REQUEST, description = "A field is missing or the email is malformed", body = MessageBody),
    )
)]
#[instrument(skip_all, err(Debug))]
pub async fn submit_message<E: ContentEngine>(
    State(service): State<MessageService<E>>,
    Body(draft): Body<MessageDraft>,
) -> HandlerResult {
    service.submit(draft).await?;
    Ok(Reply::created(MessageBody::new("Message sent successfully!")).into_response())
}

#[utoipa::path(
    get,
    path = MESSAGES_PATH,
    tag = "messages",
    responses(
        (status = OK, description = "Every message, newest first", body = [Stored<ContactMessage>]),
        (status = UNAUTHORIZED, description = "No valid bearer token", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn list_messages<E: ContentEngine>(State(service): State<MessageService<E>>) -> HandlerResult {
    Ok(Reply::ok(service.list().await?).into_response())
}

#[utoipa::path(
    put,
    path = MESSAGE_PATH,
    tag = "messages",
    request_body = MessageStatus,
    params(("id" = String, Path, description = "Id of the message")),
    responses(
        (status = OK, description = "The updated message", body = Stored<ContactMessage>),
        (status = NOT_FOUND, description = "No message has the id", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn mark_message<E: ContentEngine>(
    State(service): State<MessageService<E>>,
    Path(id): Path<String>,
    Body(status): Body<MessageStatus>,
) -> HandlerResult {
    let id = parse_id(&id, KIND)?;
    let updated = found(service.set_read(id, status.is_read).await?, KIND)?;
    Ok(Reply::ok(updated).into_response())
}

#[utoipa::path(
    delete,
    path = MESSAGE_PATH,
    tag = "messages",
    params(("id" = String, Path, description = "Id of the message")),
    responses(
        (status = OK, description = "The message was deleted", body = MessageBody),
        (status = NOT_FOUND, description = "No message has the id", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip(service), err(Debug))]
pub async fn delete_message<E: ContentEngine>(
    State(service): State<MessageService<E>>,
    Path(id): Path<String>,
) -> HandlerResult {
    let id = parse_id(&id, KIND)?;
    found(service.delete(id).await?, KIND)?;
    Ok(acknowledge("Message deleted successfully").into_response())
}
