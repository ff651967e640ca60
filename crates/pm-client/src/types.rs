//! Records exchanged with the API server.
//!
//! Field names follow the server's snake_case JSON. Ids are numeric on the
//! server; client methods accept any `Display` id so callers can treat them
//! as opaque.

use pm_types::BoxAnnotation;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteProject {
    pub id: i64,
    pub name: String,
    /// Creation time as sent by the server (ISO-8601).
    pub created_at: String,
}

/// An image hosted by the server, fetched through `url` rather than inline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteImage {
    pub id: i64,
    pub project_id: i64,
    pub filename: String,
    pub mime_type: String,
    pub size: u64,
    pub created_at: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteAnnotation {
    pub id: i64,
    pub image_id: i64,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub class_name: String,
}

impl RemoteAnnotation {
    /// Drop the server-side ids.
    pub fn to_box(&self) -> BoxAnnotation {
        BoxAnnotation::new(self.x, self.y, self.w, self.h, self.class_name.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body of `POST /images/{id}/annotations`.
#[derive(Serialize)]
pub(crate) struct AnnotationsSave<'a> {
    pub annotations: &'a [BoxAnnotation],
}

/// Body of `POST /projects`.
#[derive(Serialize)]
pub(crate) struct ProjectCreate<'a> {
    pub name: &'a str,
}
