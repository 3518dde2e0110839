//! # Edutrail Gateway
//!
//! The remote data gateway: one async operation per backend call the
//! navigation layer needs. [`Gateway`] is the seam the navigation controller
//! depends on; [`HttpGateway`] is the production implementation.
//!
//! Every call is a single attempt. Failures come back as a structured
//! [`ApiError`](edutrail_core::ApiError) and are never retried here.

pub mod client;
pub mod paths;

pub use client::HttpGateway;

use async_trait::async_trait;
use edutrail_core::ApiError;
use edutrail_models::{
    ChapterEntity, ChapterId, ClassEntity, ClassId, Resource, Section, SubjectEntity, SubjectId,
    TopicEntity, TopicId, UpdateChapterDto, UpdateTopicDto, VideoResourceEntity,
};

pub type GatewayResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait Gateway: Send + Sync {
    /// Lists classes, optionally restricted to one section.
    async fn list_classes(&self, section: Option<Section>) -> GatewayResult<Vec<ClassEntity>>;

    async fn list_subjects(&self, class: ClassId) -> GatewayResult<Vec<SubjectEntity>>;

    async fn list_chapters(
        &self,
        class: ClassId,
        subject: SubjectId,
    ) -> GatewayResult<Vec<ChapterEntity>>;

    async fn list_topics(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
    ) -> GatewayResult<Vec<TopicEntity>>;

    /// Lists a topic's resources, already unwrapped from their envelopes.
    async fn list_resources(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        topic: TopicId,
    ) -> GatewayResult<Vec<Resource>>;

    /// Resources attached directly to a class rather than to a topic.
    async fn class_resources(&self, class: ClassId) -> GatewayResult<Vec<Resource>>;

    async fn class_video_resources(
        &self,
        class: ClassId,
    ) -> GatewayResult<Vec<VideoResourceEntity>>;

    async fn update_chapter(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        dto: &UpdateChapterDto,
    ) -> GatewayResult<ChapterEntity>;

    async fn update_topic(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        topic: TopicId,
        dto: &UpdateTopicDto,
    ) -> GatewayResult<TopicEntity>;
}
