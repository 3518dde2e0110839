//! reqwest-backed implementation of [`Gateway`].

use async_trait::async_trait;
use edutrail_config::GatewayConfig;
use edutrail_core::ApiError;
use edutrail_models::{
    ChapterEntity, ChapterId, ClassEntity, ClassId, Resource, ResourceEnvelope, Section,
    SubjectEntity, SubjectId, TopicEntity, TopicId, UpdateChapterDto, UpdateTopicDto,
    VideoResourceEntity,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{Gateway, GatewayResult, paths};

const USER_AGENT_VALUE: &str = concat!("edutrail/", env!("CARGO_PKG_VERSION"));

/// Authenticated JSON client for the backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::Transport("API token contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = self.config.url(path);
        debug!(%url, "GET");

        let response = self.client.get(&url).send().await.map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.url(path);
        debug!(%url, "PATCH");

        let response = self
            .client
            .patch(&url)
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> GatewayResult<T> {
        let status = response.status();
        let body = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let err = ApiError::from_response_body(status.as_u16(), &body);
            warn!(status = status.as_u16(), error = %err, "Backend rejected request");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    #[instrument(skip(self))]
    async fn list_classes(&self, section: Option<Section>) -> GatewayResult<Vec<ClassEntity>> {
        self.get_json(&paths::classes(section)).await
    }

    #[instrument(skip(self))]
    async fn list_subjects(&self, class: ClassId) -> GatewayResult<Vec<SubjectEntity>> {
        self.get_json(&paths::subjects(class)).await
    }

    #[instrument(skip(self))]
    async fn list_chapters(
        &self,
        class: ClassId,
        subject: SubjectId,
    ) -> GatewayResult<Vec<ChapterEntity>> {
        self.get_json(&paths::chapters(class, subject)).await
    }

    #[instrument(skip(self))]
    async fn list_topics(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
    ) -> GatewayResult<Vec<TopicEntity>> {
        self.get_json(&paths::topics(class, subject, chapter)).await
    }

    #[instrument(skip(self))]
    async fn list_resources(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        topic: TopicId,
    ) -> GatewayResult<Vec<Resource>> {
        let wrapped: Vec<ResourceEnvelope> = self
            .get_json(&paths::resources(class, subject, chapter, topic))
            .await?;
        Ok(wrapped.into_iter().map(Resource::from).collect())
    }

    #[instrument(skip(self))]
    async fn class_resources(&self, class: ClassId) -> GatewayResult<Vec<Resource>> {
        self.get_json(&paths::class_resources(class)).await
    }

    #[instrument(skip(self))]
    async fn class_video_resources(
        &self,
        class: ClassId,
    ) -> GatewayResult<Vec<VideoResourceEntity>> {
        self.get_json(&paths::class_video_resources(class)).await
    }

    #[instrument(skip(self))]
    async fn update_chapter(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        dto: &UpdateChapterDto,
    ) -> GatewayResult<ChapterEntity> {
        self.patch_json(&paths::chapter(class, subject, chapter), dto)
            .await
    }

    #[instrument(skip(self))]
    async fn update_topic(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        topic: TopicId,
        dto: &UpdateTopicDto,
    ) -> GatewayResult<TopicEntity> {
        self.patch_json(&paths::topic(class, subject, chapter, topic), dto)
            .await
    }
}
