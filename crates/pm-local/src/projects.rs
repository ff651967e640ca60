//! The project collection.
//!
//! All projects, with their images inline as data URLs, are stored as one
//! JSON array under [`PROJECTS_KEY`], newest project first.

use pm_store::KeyValueStore;
use pm_types::{project_name, Image, Project, UploadFile};
use tracing::{debug, warn};

use crate::error::{LocalError, LocalResult};
use crate::keys::PROJECTS_KEY;

/// Project and image CRUD over a [`KeyValueStore`].
///
/// Cheap to construct; pass an `Arc` of the backend to share it with an
/// [`crate::AnnotationStore`].
#[derive(Debug)]
pub struct LocalProjectStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> LocalProjectStore<S> {
    /// Bind to the default collection key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, PROJECTS_KEY)
    }

    /// Bind to a custom collection key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The underlying key-value store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The key the collection is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> LocalResult<Vec<Project>> {
        let Some(raw) = self.store.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<Project>>(&raw) {
            Ok(projects) => Ok(projects),
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed project collection");
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, projects: &[Project]) -> LocalResult<()> {
        let raw = serde_json::to_string(projects)
            .map_err(|e| LocalError::Serialization(e.to_string()))?;
        self.store.set_item(&self.key, &raw)?;
        debug!(key = %self.key, projects = projects.len(), bytes = raw.len(), "saved project collection");
        Ok(())
    }

    /// Every project, newest first. Empty if nothing is stored or the stored
    /// payload is malformed.
    pub fn list_projects(&self) -> LocalResult<Vec<Project>> {
        self.load()
    }

    /// Find a project by id. `Ok(None)` if it does not exist.
    pub fn get_project(&self, id: &str) -> LocalResult<Option<Project>> {
        Ok(self.load()?.into_iter().find(|p| p.id == id))
    }

    /// Create an empty project at the front of the collection.
    ///
    /// The name is trimmed; a blank name fails with
    /// [`LocalError::Validation`] and nothing is written.
    pub fn create_project(&self, name: &str) -> LocalResult<Project> {
        let name = project_name(name)?;
        let mut projects = self.load()?;

        let project = Project::new(name);
        projects.insert(0, project.clone());
        self.save(&projects)?;

        debug!(id = %project.id, name = %project.name, "created project");
        Ok(project)
    }

    /// Remove a project and, with it, its images. Idempotent: returns
    /// `false` without writing if the project does not exist.
    ///
    /// Annotations recorded for its images are left in place.
    pub fn delete_project(&self, id: &str) -> LocalResult<bool> {
        let mut projects = self.load()?;
        let before = projects.len();
        projects.retain(|p| p.id != id);
        if projects.len() == before {
            return Ok(false);
        }
        self.save(&projects)?;
        debug!(id, "deleted project");
        Ok(true)
    }

    /// Encode each file and put it at the front of the project's images.
    ///
    /// Files are encoded one after another, so the last file of the batch
    /// ends up first. The collection is written once, after every file is
    /// encoded; if any file fails to encode nothing is written.
    pub async fn add_images(&self, project_id: &str, files: &[UploadFile]) -> LocalResult<Project> {
        let mut projects = self.load()?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| LocalError::ProjectNotFound(project_id.to_string()))?;

        for file in files {
            let encoded = pm_codec::encode_file(file)
                .await
                .map_err(|source| LocalError::Encode {
                    filename: file.filename.clone(),
                    source,
                })?;
            project.push_front(Image::new(
                file.filename.clone(),
                file.mime_type.clone(),
                encoded.size,
                encoded.data_url,
            ));
        }

        let updated = project.clone();
        self.save(&projects)?;
        debug!(project = project_id, added = files.len(), "added images");
        Ok(updated)
    }

    /// Remove one image from a project.
    ///
    /// Returns `false` without writing when the project or the image does
    /// not exist.
    pub fn delete_image(&self, project_id: &str, image_id: &str) -> LocalResult<bool> {
        let mut projects = self.load()?;
        let Some(project) = projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(false);
        };
        if !project.remove_image(image_id) {
            return Ok(false);
        }
        self.save(&projects)?;
        debug!(project = project_id, image = image_id, "deleted image");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    use pm_store::{FileKeyValueStore, InMemoryKeyValueStore, StoreConfig, StoreError};
    use pm_types::TypeError;

    fn memory_store() -> LocalProjectStore<Arc<InMemoryKeyValueStore>> {
        LocalProjectStore::new(Arc::new(InMemoryKeyValueStore::new()))
    }

    fn png(name: &str, bytes: &[u8]) -> UploadFile {
        UploadFile::from_bytes(name, "image/png", bytes.to_vec())
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    #[test]
    fn empty_store_lists_nothing() {
        let store = memory_store();
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn create_then_get() {
        let store = memory_store();
        let created = store.create_project("  Cats  ").unwrap();
        assert_eq!(created.name, "Cats");
        assert!(created.images.is_empty());

        let fetched = store.get_project(&created.id).unwrap().expect("should exist");
        assert_eq!(fetched, created);
    }

    #[test]
    fn blank_name_is_rejected_without_writing() {
        let store = memory_store();
        let err = store.create_project("   ").unwrap_err();
        assert!(matches!(err, LocalError::Validation(TypeError::EmptyName)));
        assert!(!store.store().contains_key(PROJECTS_KEY).unwrap());
    }

    #[test]
    fn created_ids_are_fresh() {
        let store = memory_store();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let project = store.create_project(&format!("p{i}")).unwrap();
            assert!(seen.insert(project.id.clone()));
            assert!(store.get_project(&project.id).unwrap().is_some());
        }
    }

    #[test]
    fn newest_project_is_listed_first() {
        let store = memory_store();
        store.create_project("first").unwrap();
        store.create_project("second").unwrap();
        store.create_project("third").unwrap();

        let names: Vec<String> = store
            .list_projects()
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[test]
    fn get_missing_returns_none() {
        let store = memory_store();
        store.create_project("Cats").unwrap();
        assert!(store.get_project("nope").unwrap().is_none());
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = memory_store();
        let keep = store.create_project("keep").unwrap();
        let gone = store.create_project("gone").unwrap();

        assert!(store.delete_project(&gone.id).unwrap());
        assert!(store.get_project(&gone.id).unwrap().is_none());
        assert!(store.get_project(&keep.id).unwrap().is_some());
    }

    #[test]
    fn delete_is_idempotent() {
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();
        assert!(store.delete_project(&project.id).unwrap());
        assert!(!store.delete_project(&project.id).unwrap());
        assert!(!store.delete_project("never-existed").unwrap());
    }

    // -----------------------------------------------------------------------
    // Malformed payloads
    // -----------------------------------------------------------------------

    #[test]
    fn invalid_json_reads_as_empty() {
        let store = memory_store();
        store.store().set_item(PROJECTS_KEY, "{ definitely not json").unwrap();
        assert!(store.list_projects().unwrap().is_empty());
        assert!(store.get_project("any").unwrap().is_none());
    }

    #[test]
    fn wrong_shape_reads_as_empty() {
        let store = memory_store();
        store
            .store()
            .set_item(PROJECTS_KEY, r#"[{"id":"ok","name":"x","createdAt":"2024-01-01T00:00:00Z"},{"id":7}]"#)
            .unwrap();
        assert!(store.list_projects().unwrap().is_empty());
    }

    #[test]
    fn create_over_malformed_payload_starts_fresh() {
        let store = memory_store();
        store.store().set_item(PROJECTS_KEY, "garbage").unwrap();
        let project = store.create_project("Cats").unwrap();
        assert_eq!(store.list_projects().unwrap(), vec![project]);
    }

    // -----------------------------------------------------------------------
    // Images
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn last_added_image_comes_first() {
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();

        let updated = store
            .add_images(&project.id, &[png("a.png", b"aaa"), png("b.png", b"bb")])
            .await
            .unwrap();

        let names: Vec<&str> = updated.images.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["b.png", "a.png"]);
        assert_eq!(store.get_project(&project.id).unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn added_images_carry_decodable_payloads() {
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();
        let bytes = vec![0u8, 159, 146, 150, 255];
        let updated = store
            .add_images(&project.id, &[png("cat.png", &bytes)])
            .await
            .unwrap();

        let image = &updated.images[0];
        assert_eq!(image.size, 5);
        assert_eq!(image.mime_type, "image/png");
        let decoded = pm_codec::decode(&image.data_url).unwrap();
        assert_eq!(decoded.data(), bytes.as_slice());
    }

    #[tokio::test]
    async fn adding_to_missing_project_fails() {
        let store = memory_store();
        let err = store
            .add_images("missing", &[png("a.png", b"a")])
            .await
            .unwrap_err();
        assert!(matches!(err, LocalError::ProjectNotFound(id) if id == "missing"));
    }

    #[tokio::test]
    async fn encode_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();

        let files = [
            png("ok.png", b"fine"),
            UploadFile::from_path(dir.path().join("missing.png"), "image/png"),
            png("never.png", b"x"),
        ];
        let err = store.add_images(&project.id, &files).await.unwrap_err();
        assert!(matches!(err, LocalError::Encode { ref filename, .. } if filename == "missing.png"));

        let stored = store.get_project(&project.id).unwrap().unwrap();
        assert!(stored.images.is_empty());
    }

    #[tokio::test]
    async fn quota_overflow_surfaces_as_store_error() {
        let backend = Arc::new(InMemoryKeyValueStore::with_config(StoreConfig::with_quota(512)));
        let store = LocalProjectStore::new(backend);
        let project = store.create_project("Cats").unwrap();

        let err = store
            .add_images(&project.id, &[png("huge.png", &vec![7u8; 4096])])
            .await
            .unwrap_err();
        assert!(matches!(err, LocalError::Store(StoreError::QuotaExceeded { .. })));
        assert!(store.get_project(&project.id).unwrap().unwrap().images.is_empty());
    }

    #[tokio::test]
    async fn delete_image_removes_only_that_image() {
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();
        let updated = store
            .add_images(&project.id, &[png("a.png", b"a"), png("b.png", b"b")])
            .await
            .unwrap();
        let victim = updated.images[0].id.clone();

        assert!(store.delete_image(&project.id, &victim).unwrap());
        assert!(!store.delete_image(&project.id, &victim).unwrap());

        let stored = store.get_project(&project.id).unwrap().unwrap();
        assert_eq!(stored.images.len(), 1);
        assert_eq!(stored.images[0].filename, "a.png");
    }

    #[test]
    fn delete_image_on_missing_project_is_a_no_op() {
        let store = memory_store();
        assert!(!store.delete_image("missing", "img").unwrap());
        assert!(!store.store().contains_key(PROJECTS_KEY).unwrap());
    }

    // -----------------------------------------------------------------------
    // Scenarios
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn upload_two_delete_one_keeps_survivor_intact() {
        let store = memory_store();
        let project = store.create_project("Cats").unwrap();
        let updated = store
            .add_images(
                &project.id,
                &[
                    UploadFile::from_bytes("tabby.jpg", "image/jpeg", vec![1u8; 10]),
                    UploadFile::from_bytes("siamese.png", "image/png", vec![2u8; 20]),
                ],
            )
            .await
            .unwrap();
        let survivor = updated.images[1].clone();
        let removed = updated.images[0].id.clone();

        store.delete_image(&project.id, &removed).unwrap();

        let stored = store.get_project(&project.id).unwrap().unwrap();
        assert_eq!(stored.images.len(), 1);
        let image = &stored.images[0];
        assert_eq!(image.id, survivor.id);
        assert_eq!(image.filename, "tabby.jpg");
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.size, 10);
        assert_eq!(image, &survivor);
    }

    #[tokio::test]
    async fn file_backed_collection_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("local-storage.json");

        let project_id = {
            let backend = FileKeyValueStore::open(&path, StoreConfig::default()).unwrap();
            let store = LocalProjectStore::new(backend);
            let project = store.create_project("Cats").unwrap();
            store
                .add_images(&project.id, &[png("a.png", b"abc")])
                .await
                .unwrap();
            project.id
        };

        let backend = FileKeyValueStore::open(&path, StoreConfig::default()).unwrap();
        let store = LocalProjectStore::new(backend);
        let project = store.get_project(&project_id).unwrap().unwrap();
        assert_eq!(project.images.len(), 1);
        assert_eq!(project.images[0].filename, "a.png");
    }

    #[test]
    fn custom_key_isolates_collections() {
        let backend = Arc::new(InMemoryKeyValueStore::new());
        let first = LocalProjectStore::new(Arc::clone(&backend));
        let second = LocalProjectStore::with_key(Arc::clone(&backend), "other_projects");

        first.create_project("Cats").unwrap();
        assert!(second.list_projects().unwrap().is_empty());
        assert_eq!(second.key(), "other_projects");
    }
}
