//! Per-image annotation records.
//!
//! Each image id gets its own key holding a JSON array of annotation records.
//! The record shape belongs to the caller: any `Serialize + DeserializeOwned`
//! type works, [`pm_types::BoxAnnotation`] being the usual one.
//!
//! Records are independent of the project collection. Deleting an image or
//! its project leaves its annotation record behind.

use pm_store::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{LocalError, LocalResult};
use crate::keys::{annotations_key, ANNOTATIONS_KEY_PREFIX};

/// Annotation records keyed by image id, over a [`KeyValueStore`].
#[derive(Debug)]
pub struct AnnotationStore<S> {
    store: S,
}

impl<S: KeyValueStore> AnnotationStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Annotations saved for `image_id`, or an empty list when there is no
    /// record or the record is malformed.
    pub fn get_annotations<A: DeserializeOwned>(&self, image_id: &str) -> LocalResult<Vec<A>> {
        Ok(self.find_annotations(image_id)?.unwrap_or_default())
    }

    /// Like [`Self::get_annotations`] but tells "no record" (`None`) apart
    /// from a saved empty list (`Some(vec![])`). Malformed records read as
    /// `None`.
    pub fn find_annotations<A: DeserializeOwned>(
        &self,
        image_id: &str,
    ) -> LocalResult<Option<Vec<A>>> {
        let key = annotations_key(image_id);
        let Some(raw) = self.store.get_item(&key)? else {
            return Ok(None);
        };
        match serde_json::from_str::<Vec<A>>(&raw) {
            Ok(annotations) => Ok(Some(annotations)),
            Err(e) => {
                warn!(key = %key, error = %e, "discarding malformed annotation record");
                Ok(None)
            }
        }
    }

    /// Replace the whole record for `image_id`.
    pub fn save_annotations<A: Serialize>(
        &self,
        image_id: &str,
        annotations: &[A],
    ) -> LocalResult<()> {
        let key = annotations_key(image_id);
        let raw = serde_json::to_string(annotations)
            .map_err(|e| LocalError::Serialization(e.to_string()))?;
        self.store.set_item(&key, &raw)?;
        debug!(key = %key, count = annotations.len(), "saved annotations");
        Ok(())
    }

    /// Ids of every image that has an annotation record, sorted.
    ///
    /// Includes images that no longer exist in any project.
    pub fn image_ids_with_annotations(&self) -> LocalResult<Vec<String>> {
        Ok(self
            .store
            .keys_with_prefix(ANNOTATIONS_KEY_PREFIX)?
            .into_iter()
            .filter_map(|k| k.strip_prefix(ANNOTATIONS_KEY_PREFIX).map(str::to_string))
            .collect())
    }
}
