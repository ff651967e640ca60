use std::collections::HashSet;
use std::sync::Arc;

use pm_client::{ApiClient, ClientConfig};
use pm_local::{AnnotationStore, LocalProjectStore};
use pm_store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
use tracing::info;

use crate::config::AppConfig;
use crate::error::SdkResult;

/// Type-erased store shared by the project and annotation stores.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// One opened store plus the services built on it.
pub struct Workspace {
    store: SharedStore,
    projects: LocalProjectStore<SharedStore>,
    annotations: AnnotationStore<SharedStore>,
    api: ClientConfig,
}

impl Workspace {
    /// Open the store named by `config`: the file at `store.path` when set,
    /// an in-memory store otherwise.
    pub fn open(config: &AppConfig) -> SdkResult<Self> {
        let store: SharedStore = match &config.store.path {
            Some(path) => {
                let store = FileKeyValueStore::open(path, config.store_config())?;
                info!(path = %path.display(), "opened file-backed workspace");
                Arc::new(store)
            }
            None => {
                info!("opened in-memory workspace");
                Arc::new(InMemoryKeyValueStore::with_config(config.store_config()))
            }
        };
        Ok(Self::with_store(store, config.api.clone()))
    }

    /// An empty in-memory workspace with default API settings.
    pub fn in_memory() -> Self {
        Self::with_store(
            Arc::new(InMemoryKeyValueStore::new()),
            ClientConfig::default(),
        )
    }

    /// Build on an existing store.
    pub fn with_store(store: SharedStore, api: ClientConfig) -> Self {
        Self {
            projects: LocalProjectStore::new(Arc::clone(&store)),
            annotations: AnnotationStore::new(Arc::clone(&store)),
            store,
            api,
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn projects(&self) -> &LocalProjectStore<SharedStore> {
        &self.projects
    }

    pub fn annotations(&self) -> &AnnotationStore<SharedStore> {
        &self.annotations
    }

    /// A client for the configured API server.
    pub fn remote(&self) -> SdkResult<ApiClient> {
        Ok(ApiClient::new(&self.api)?)
    }

    /// Image ids that still have annotation records although no project
    /// holds the image any more.
    pub fn orphaned_annotations(&self) -> SdkResult<Vec<String>> {
        let live: HashSet<String> = self
            .projects
            .list_projects()?
            .into_iter()
            .flat_map(|p| p.images.into_iter().map(|img| img.id))
            .collect();
        Ok(self
            .annotations
            .image_ids_with_annotations()?
            .into_iter()
            .filter(|id| !live.contains(id))
            .collect())
    }
}
