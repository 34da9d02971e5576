use crate::error::ServiceError;
use crate::metrics;
use crate::ServiceResult;
use error_stack::{IntoReport, ResultExt};
use tracing::{debug, error, info, instrument};
use trust_core::ContentEngine;
use trust_core::repository::{ImageStore, ImageUpload};

/// Upload bodies up to this size are read unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Hands admin images to the image host.
#[derive(Debug, Clone)]
pub struct UploadService<E> {
    engine: E,
    max_bytes: usize,
}

impl<E: ContentEngine> UploadService<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_bytes(self, max_bytes: usize) -> Self {
        Self { max_bytes, ..self }
    }

    /// Largest upload request body the upload route reads.
    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Returns the public URL of the stored image.
    #[instrument(skip_all, name = "service#upload")]
    pub async fn upload(&self, image: Option<ImageUpload>) -> ServiceResult<String> {
        let Some(image) = image.filter(|i| !i.bytes.is_empty()) else {
            return Err(ServiceError::NoImage.into_report());
        };
        debug!("uploading {} bytes of {}", image.bytes.len(), image.content_type);

        let url = self
            .engine
            .images()
            .upload(image)
            .await
            .inspect_err(|e| error!("image upload failed: {e:?}"))
            .change_context(ServiceError::ImageUpload)?;

        info!("image uploaded to {url}");
        metrics::increment_images_uploaded();
        Ok(url)
    }
}
