use std::borrow::Cow;

use axum::http::StatusCode;
use routing::error::PublicError;
use trust_core::validation::ValidationError;

/// Everything a service call can fail with. The first group is shown to
/// clients as is; `Repository` and `Internal` become a generic 500.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("invalid request: {0}")]
    Invalid(Cow<'static, str>),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("conflict: {0}")]
    Conflict(&'static str),
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("an admin account already exists")]
    RegistrationClosed,
    #[error("no image file was provided")]
    NoImage,
    #[error("the upload is larger than the body limit")]
    ImageTooLarge,
    #[error("the image could not be uploaded")]
    ImageUpload,
    #[error("repository operation failed")]
    Repository,
    #[error("internal failure")]
    Internal,
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        ServiceError::Invalid(Cow::Owned(value.detail().to_owned()))
    }
}

impl PublicError for ServiceError {
    fn public(&self) -> Option<(StatusCode, Cow<'static, str>)> {
        let public = match self {
            ServiceError::Invalid(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ServiceError::NotFound(kind) => {
                (StatusCode::NOT_FOUND, Cow::Owned(format!("{kind} not found")))
            }
            ServiceError::Conflict(message) => (StatusCode::BAD_REQUEST, Cow::Borrowed(*message)),
            ServiceError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Cow::Borrowed("Invalid username or password"),
            ),
            ServiceError::RegistrationClosed => (
                StatusCode::FORBIDDEN,
                Cow::Borrowed("An admin account already exists"),
            ),
            ServiceError::NoImage => {
                (StatusCode::BAD_REQUEST, Cow::Borrowed("No image file provided."))
            }
            ServiceError::ImageTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Cow::Borrowed("Image is larger than the upload limit."),
            ),
            ServiceError::ImageUpload => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Cow::Borrowed("Server Error during image upload."),
            ),
            ServiceError::Repository | ServiceError::Internal => return None,
        };
        Some(public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_kind() {
        let (status, message) = ServiceError::NotFound("Media item").public().unwrap();

        assert_eq!(StatusCode::NOT_FOUND, status);
        assert_eq!("Media item not found", message);
    }

    #[test]
    fn validation_detail_is_kept_verbatim() {
        let error = ServiceError::from(ValidationError::new("Please provide a valid email address"));

        assert_eq!(
            Some((
                StatusCode::BAD_REQUEST,
                Cow::Borrowed("Please provide a valid email address")
            )),
            error.public()
        );
    }

    #[test]
    fn oversized_uploads_are_payload_too_large() {
        let (status, _) = ServiceError::ImageTooLarge.public().unwrap();

        assert_eq!(StatusCode::PAYLOAD_TOO_LARGE, status);
    }

    #[test]
    fn repository_failures_stay_private() {
        assert!(ServiceError::Repository.public().is_none());
    }
}
