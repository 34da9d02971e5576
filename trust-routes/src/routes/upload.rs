use super::HandlerResult;
use super::responses::{Reply, UploadResponse};
use crate::ServiceResult;
use crate::error::ServiceError;
use crate::service::UploadService;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use routing::error::MessageBody;
use tracing::{debug, instrument};
use trust_core::ContentEngine;
use trust_core::repository::ImageUpload;

pub(super) const UPLOAD_PATH: &str = "/upload";

const IMAGE_FIELD: &str = "image";
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Forward an image to the image host and hand back its public URL.
#[utoipa::path(
    post,
    path = UPLOAD_PATH,
    tag = "upload",
    request_body(content_type = "multipart/form-data", description = "The file in a field named `image`"),
    responses(
        (status = OK, description = "The image was stored", body = UploadResponse),
        (status = BAD_REQUEST, description = "No image file was sent", body = MessageBody),
        (status = PAYLOAD_TOO_LARGE, description = "The body is over the upload limit", body = MessageBody),
        (status = INTERNAL_SERVER_ERROR, description = "The image host failed", body = MessageBody),
    ),
    security(("bearer" = []))
)]
#[instrument(skip_all, err(Debug))]
pub async fn upload_image<E: ContentEngine>(
    State(service): State<UploadService<E>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> HandlerResult {
    let image = match multipart {
        Ok(multipart) => image_field(multipart).await?,
        Err(rejection) => {
            debug!("upload without a multipart body: {rejection}");
            None
        }
    };

    let image_url = service.upload(image).await?;
    Ok(Reply::ok(UploadResponse::new(image_url)).into_response())
}

async fn image_field(mut multipart: Multipart) -> ServiceResult<Option<ImageUpload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(unreadable)?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_owned);
        let content_type = field
            .content_type()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(unreadable)?;

        return Ok(Some(ImageUpload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        }));
    }
    Ok(None)
}

fn unreadable(error: MultipartError) -> Report<ServiceError> {
    let context = if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::ImageTooLarge
    } else {
        ServiceError::Invalid("Malformed multipart body".into())
    };
    Report::new(error).change_context(context)
}
