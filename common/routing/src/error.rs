use std::{borrow::Cow, fmt::Debug};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_stack::Report;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

const GENERIC_MESSAGE: &str = "Server Error";

/// A bare `{"message": "..."}` body, used for errors and plain acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageBody {
    #[schema(value_type = String)]
    pub message: Cow<'static, str>,
}

impl MessageBody {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An error context that knows what, if anything, a client may see of it.
pub trait PublicError: std::error::Error + Send + Sync + 'static {
    /// `None` hides the error behind a generic 500.
    fn public(&self) -> Option<(StatusCode, Cow<'static, str>)>;
}

/// Handler error carrying the whole report. Only the public part of the
/// current context reaches the client; the report itself is logged.
pub struct EndpointError<C>(Report<C>);

impl<C> Debug for EndpointError<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<C> From<Report<C>> for EndpointError<C> {
    fn from(value: Report<C>) -> Self {
        Self(value)
    }
}

impl<C: PublicError> IntoResponse for EndpointError<C> {
    fn into_response(self) -> Response {
        match self.0.current_context().public() {
            Some((status, message)) => {
                debug!("answering {status}: {message}");
                (status, Json(MessageBody::new(message))).into_response()
            }
            None => {
                error!("{:?}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(MessageBody::new(GENERIC_MESSAGE)),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use error_stack::IntoReport;

    #[derive(Debug, thiserror::Error)]
    enum Failure {
        #[error("gone")]
        Gone,
        #[error("database exploded at 10.0.0.3")]
        Internal,
    }

    impl PublicError for Failure {
        fn public(&self) -> Option<(StatusCode, Cow<'static, str>)> {
            match self {
                Failure::Gone => Some((StatusCode::NOT_FOUND, "Thing not found".into())),
                Failure::Internal => None,
            }
        }
    }

    async fn body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn public_context_is_shown() {
        let response = EndpointError::from(Failure::Gone.into_report()).into_response();

        assert_eq!(StatusCode::NOT_FOUND, response.status());
        assert_eq!(
            serde_json::json!({ "message": "Thing not found" }),
            body(response).await
        );
    }

    #[tokio::test]
    async fn internal_details_stay_hidden() {
        let response = EndpointError::from(Failure::Internal.into_report()).into_response();

        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, response.status());
        assert_eq!(
            serde_json::json!({ "message": "Server Error" }),
            body(response).await
        );
    }
}
