use error_stack::Report;
use routing::ArwLock;
use trust_core::repository::{ImageStore, ImageUpload};
use trust_core::result::ImageStoreError;

/// Keeps uploads in memory and hands out `memory://images/{n}` URLs.
#[derive(Debug, Clone, Default)]
pub struct MemoryImageStore {
    uploads: ArwLock<Vec<ImageUpload>>,
}

impl MemoryImageStore {
    pub async fn uploads(&self) -> Vec<ImageUpload> {
        self.uploads.read().await.clone()
    }
}

impl ImageStore for MemoryImageStore {
    async fn upload(&self, image: ImageUpload) -> Result<String, Report<ImageStoreError>> {
        let mut uploads = self.uploads.write().await;
        uploads.push(image);
        Ok(format!("memory://images/{}", uploads.len()))
    }
}
