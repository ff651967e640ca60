//! Store keys.
//!
//! The project collection lives under one fixed key. Annotations live under
//! one key per image: the prefix followed by the image id.

/// Key holding the JSON array of every project.
pub const PROJECTS_KEY: &str = "pm_projects_v1";

/// Prefix of the per-image annotation keys.
pub const ANNOTATIONS_KEY_PREFIX: &str = "pm_annotations_v1:";

/// Key holding the annotations of `image_id`.
pub fn annotations_key(image_id: &str) -> String {
    format!("{ANNOTATIONS_KEY_PREFIX}{image_id}")
}
