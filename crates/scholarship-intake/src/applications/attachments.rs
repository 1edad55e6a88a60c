use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::ImageAttachment;

/// An upload the applicant selected but which has not been read yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingImage {
    pub name: String,
    pub size: u64,
    pub content_type: String,
    /// Opaque handle the reader resolves, e.g. a file path.
    pub location: String,
}

impl PendingImage {
    pub fn is_image(&self) -> bool {
        self.content_type
            .parse::<mime::Mime>()
            .map(|parsed| parsed.type_() == mime::IMAGE)
            .unwrap_or(false)
    }
}

/// Reads an upload's bytes and returns them base64 encoded.
#[async_trait]
pub trait ImageReader: Send + Sync {
    async fn read_as_base64(&self, image: &PendingImage) -> Result<String, ReadError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("image not found: {0}")]
    NotFound(String),
    #[error("unable to read image: {0}")]
    Io(String),
}

/// Images attached during the current session, in the order they finished reading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ImageGallery {
    images: Vec<ImageAttachment>,
}

impl ImageGallery {
    pub fn push(&mut self, image: ImageAttachment) -> usize {
        self.images.push(image);
        self.images.len() - 1
    }

    /// Remove the image at `index`. Later images shift down so indices stay contiguous.
    pub fn remove(&mut self, index: usize) -> Option<ImageAttachment> {
        (index < self.images.len()).then(|| self.images.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&ImageAttachment> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageAttachment> {
        self.images.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.images.iter().map(|image| image.name.clone()).collect()
    }

    pub fn clear(&mut self) {
        self.images.clear();
    }

    /// Read and append each upload. Non-image uploads and failed reads are skipped.
    /// Returns how many images were attached.
    pub async fn attach<R>(&mut self, reader: &R, uploads: Vec<PendingImage>) -> usize
    where
        R: ImageReader + ?Sized,
    {
        let mut attached = 0;
        for upload in uploads {
            if !upload.is_image() {
                debug!(name = %upload.name, content_type = %upload.content_type, "skipping non-image upload");
                continue;
            }

            let read = reader.read_as_base64(&upload).await;
            match read {
                Ok(data) => {
                    self.push(ImageAttachment {
                        name: upload.name,
                        size: upload.size,
                        data,
                    });
                    attached += 1;
                }
                Err(err) => {
                    debug!(name = %upload.name, error = %err, "skipping unreadable image");
                }
            }
        }
        attached
    }
}

impl FromIterator<ImageAttachment> for ImageGallery {
    fn from_iter<I: IntoIterator<Item = ImageAttachment>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}
