use error_stack::{IntoReport, Report, ResultExt};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};
use trust_core::repository::{ImageStore, ImageUpload};
use trust_core::result::ImageStoreError;

const UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";
pub const DEFAULT_FOLDER: &str = "mandal-trust";

/// Where unsigned uploads go: the cloud, the upload preset that allows them
/// and the folder they are filed under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
    pub folder: String,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Image host client. Without a config every upload fails with
/// [`ImageStoreError::NotConfigured`].
#[derive(Debug, Clone, Default)]
pub struct CloudinaryStore {
    config: Option<Arc<CloudinaryConfig>>,
    client: reqwest::Client,
}

impl CloudinaryStore {
    pub fn new(config: Option<CloudinaryConfig>) -> Self {
        Self {
            config: config.map(Arc::new),
            client: reqwest::Client::new(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }
}

impl ImageStore for CloudinaryStore {
    #[instrument(skip_all, fields(image.size = image.bytes.len(), image.content_type = %image.content_type))]
    async fn upload(&self, image: ImageUpload) -> Result<String, Report<ImageStoreError>> {
        let Some(config) = &self.config else {
            return Err(ImageStoreError::NotConfigured.into_report());
        };

        let file = Part::bytes(image.bytes)
            .file_name(image.file_name.unwrap_or_else(|| "upload".to_string()))
            .mime_str(&image.content_type)
            .change_context(ImageStoreError::Upload)
            .attach_with(|| format!("unusable content type '{}'", image.content_type))?;
        let form = Form::new()
            .part("file", file)
            .text("upload_preset", config.upload_preset.clone())
            .text("folder", config.folder.clone());

        let url = format!("{UPLOAD_BASE_URL}/{}/image/upload", config.cloud_name);
        let response: UploadResponse = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .change_context(ImageStoreError::Upload)?
            .error_for_status()
            .change_context(ImageStoreError::Upload)?
            .json()
            .await
            .change_context(ImageStoreError::Upload)?;

        debug!("image stored at {}", response.secure_url);
        Ok(response.secure_url)
    }
}
