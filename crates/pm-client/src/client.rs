use std::fmt::Display;
use std::time::Duration;

use pm_types::{BoxAnnotation, UploadFile};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::types::{
    AnnotationsSave, HealthStatus, ProjectCreate, RemoteAnnotation, RemoteImage, RemoteProject,
};

/// Multipart field name every uploaded file is attached under.
pub const UPLOAD_FIELD: &str = "files";

/// Client for the Projects Manager REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    /// Build a client for the base URL named by the environment.
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and apply the status contract. `Ok(None)` on 204.
    async fn execute(&self, request: RequestBuilder) -> ClientResult<Option<String>> {
        let response = request.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "api response");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                text
            };
            warn!(status = status.as_u16(), %message, "api request failed");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message,
            });
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<Option<T>> {
        match self.execute(request).await? {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }

    async fn expect_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClientResult<T> {
        self.json(request).await?.ok_or(ClientError::EmptyResponse)
    }

    // ---- Projects ----

    /// `GET /projects`
    pub async fn list_projects(&self) -> ClientResult<Vec<RemoteProject>> {
        Ok(self
            .json(self.http.get(self.url("/projects")))
            .await?
            .unwrap_or_default())
    }

    /// `POST /projects` with `{name}`. The server validates the name.
    pub async fn create_project(&self, name: &str) -> ClientResult<RemoteProject> {
        let request = self
            .http
            .post(self.url("/projects"))
            .json(&ProjectCreate { name });
        self.expect_json(request).await
    }

    /// `DELETE /projects/{id}`
    pub async fn delete_project(&self, id: impl Display) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(&format!("/projects/{id}"))))
            .await?;
        Ok(())
    }

    // ---- Images ----

    /// `GET /projects/{id}/images`
    pub async fn list_project_images(&self, project_id: impl Display) -> ClientResult<Vec<RemoteImage>> {
        let request = self
            .http
            .get(self.url(&format!("/projects/{project_id}/images")));
        Ok(self.json(request).await?.unwrap_or_default())
    }

    /// `POST /projects/{id}/images`, every file under the `files` field of
    /// one multipart body.
    ///
    /// Files are read before anything is sent; an unreadable file fails the
    /// call with [`ClientError::Read`] and no request is made.
    pub async fn upload_images(
        &self,
        project_id: impl Display,
        files: &[UploadFile],
    ) -> ClientResult<Vec<RemoteImage>> {
        let mut form = Form::new();
        for file in files {
            let bytes = pm_codec::read_file(file).await?;
            let mut part = Part::bytes(bytes).file_name(file.filename.clone());
            if !file.mime_type.is_empty() {
                part = part.mime_str(&file.mime_type)?;
            }
            form = form.part(UPLOAD_FIELD, part);
        }

        let request = self
            .http
            .post(self.url(&format!("/projects/{project_id}/images")))
            .multipart(form);
        Ok(self.json(request).await?.unwrap_or_default())
    }

    /// `DELETE /images/{id}`
    pub async fn delete_image(&self, image_id: impl Display) -> ClientResult<()> {
        self.execute(self.http.delete(self.url(&format!("/images/{image_id}"))))
            .await?;
        Ok(())
    }

    // ---- Annotations ----

    /// `GET /images/{id}/annotations`
    pub async fn get_annotations(&self, image_id: impl Display) -> ClientResult<Vec<RemoteAnnotation>> {
        let request = self
            .http
            .get(self.url(&format!("/images/{image_id}/annotations")));
        Ok(self.json(request).await?.unwrap_or_default())
    }

    /// `POST /images/{id}/annotations`; replaces the image's annotations.
    pub async fn save_annotations(
        &self,
        image_id: impl Display,
        annotations: &[BoxAnnotation],
    ) -> ClientResult<Vec<RemoteAnnotation>> {
        let request = self
            .http
            .post(self.url(&format!("/images/{image_id}/annotations")))
            .json(&AnnotationsSave { annotations });
        Ok(self.json(request).await?.unwrap_or_default())
    }

    /// `DELETE /annotations/{id}`
    pub async fn delete_annotation(&self, annotation_id: impl Display) -> ClientResult<()> {
        self.execute(
            self.http
                .delete(self.url(&format!("/annotations/{annotation_id}"))),
        )
        .await?;
        Ok(())
    }

    /// `POST /predict/{image_id}`: ask the server to propose annotations.
    pub async fn predict(&self, image_id: impl Display) -> ClientResult<Vec<RemoteAnnotation>> {
        let request = self.http.post(self.url(&format!("/predict/{image_id}")));
        Ok(self.json(request).await?.unwrap_or_default())
    }

    /// `GET /health`
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        self.expect_json(self.http.get(self.url("/health"))).await
    }
}
