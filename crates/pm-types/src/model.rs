//! Records persisted in the project collection.
//!
//! Field names serialize in camelCase so a collection written by the browser
//! front-end (`createdAt`, `mimeType`, `dataUrl`) loads unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::new_id;

/// A named collection of images.
///
/// `images` is ordered most-recently-added first. Images are owned by exactly
/// one project; dropping the project drops its images.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl Project {
    /// Create an empty project with a fresh id, stamped with the current time.
    ///
    /// The name is stored as given; validation happens at the store boundary
    /// (see [`crate::project_name`]).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            created_at: Utc::now(),
            images: Vec::new(),
        }
    }

    /// Look up an image of this project by id.
    pub fn image(&self, image_id: &str) -> Option<&Image> {
        self.images.iter().find(|img| img.id == image_id)
    }

    /// Put an image at the front of the sequence.
    pub fn push_front(&mut self, image: Image) {
        self.images.insert(0, image);
    }

    /// Remove an image by id. Returns `true` if it was present.
    pub fn remove_image(&mut self, image_id: &str) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.id != image_id);
        self.images.len() != before
    }

    /// Sum of the original byte sizes of all images.
    pub fn total_image_bytes(&self) -> u64 {
        self.images.iter().map(|img| img.size).sum()
    }
}

/// An uploaded file carried inline as a data URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: String,
    pub filename: String,
    pub mime_type: String,
    /// Size of the original file in bytes (not of the encoded text).
    pub size: u64,
    pub created_at: DateTime<Utc>,
    pub data_url: String,
}

impl Image {
    /// Build an image record with a fresh id and the current time.
    pub fn new(
        filename: impl Into<String>,
        mime_type: impl Into<String>,
        size: u64,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            filename: filename.into(),
            mime_type: mime_type.into(),
            size,
            created_at: Utc::now(),
            data_url: data_url.into(),
        }
    }
}
