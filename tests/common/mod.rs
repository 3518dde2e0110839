use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use edutrail::navigation::{LevelController, NavigationStore, PersistedNavigation};
use edutrail_core::ApiError;
use edutrail_gateway::{Gateway, GatewayResult};
use edutrail_models::{
    ChapterEntity, ChapterId, ClassEntity, ClassId, EducationLevel, Resource, ResourceId,
    ResourceKind, Section, SubjectEntity, SubjectId, TopicEntity, TopicId, UpdateChapterDto,
    UpdateTopicDto, VideoResourceEntity,
};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// One gateway invocation, as recorded by [`MockGateway`].
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    ListClasses(Option<Section>),
    ListSubjects(ClassId),
    ListChapters(ClassId, SubjectId),
    ListTopics(ClassId, SubjectId, ChapterId),
    ListResources(ClassId, SubjectId, ChapterId, TopicId),
    ClassResources(ClassId),
    ClassVideos(ClassId),
    UpdateChapter(ChapterId, i32),
    UpdateTopic(TopicId, i32),
}

impl Call {
    pub fn is_update(&self) -> bool {
        matches!(self, Call::UpdateChapter(..) | Call::UpdateTopic(..))
    }
}

/// In-memory backend with a call log, injectable failures and gates.
///
/// Listings are keyed by parent id only; any class/subject combination returns
/// the same chapters for a given subject, which is enough for navigation tests.
#[derive(Default)]
pub struct MockGateway {
    classes: Vec<ClassEntity>,
    subjects: HashMap<ClassId, Vec<SubjectEntity>>,
    chapters: HashMap<SubjectId, Vec<ChapterEntity>>,
    topics: HashMap<ChapterId, Vec<TopicEntity>>,
    resources: HashMap<TopicId, Vec<Resource>>,
    class_resources: HashMap<ClassId, Vec<Resource>>,
    class_videos: HashMap<ClassId, Vec<VideoResourceEntity>>,

    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashMap<Call, ApiError>>,
    gates: Mutex<HashMap<Call, Arc<Notify>>>,
}

#[allow(dead_code)]
impl MockGateway {
    /// Two classes; class 1 has subjects, chapters, topics and resources down to topic 100.
    pub fn seeded() -> Self {
        let mut gateway = Self {
            classes: vec![
                class(1, "Form 1", Section::Anglophone),
                class(2, "6ème", Section::Francophone),
            ],
            ..Self::default()
        };
        gateway
            .subjects
            .insert(ClassId::new(1), vec![subject(5, "Biology"), subject(6, "History")]);
        gateway.chapters.insert(
            SubjectId::new(5),
            vec![chapter(20, "Cells", 2), chapter(21, "Genetics", 1)],
        );
        gateway.chapters.insert(SubjectId::new(6), vec![chapter(30, "Empires", 1)]);
        gateway.topics.insert(
            ChapterId::new(20),
            vec![topic(10, "Mitosis", 1), topic(11, "Meiosis", 2), topic(12, "Organelles", 3)],
        );
        gateway.resources.insert(
            TopicId::new(10),
            vec![pdf(100, "Mitosis notes"), revision(101, "Mitosis summary")],
        );
        gateway
            .class_resources
            .insert(ClassId::new(1), vec![pdf(200, "Syllabus")]);
        gateway.class_videos.insert(
            ClassId::new(1),
            vec![VideoResourceEntity {
                id: ResourceId::new(300),
                title: "Welcome".into(),
                description: String::new(),
                video_file: "/media/welcome.mp4".into(),
                thumbnail: None,
            }],
        );
        gateway
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub fn update_calls(&self) -> Vec<Call> {
        self.calls.lock().iter().copied().filter(Call::is_update).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    /// Makes `call` fail with `err` until [`MockGateway::succeed`] is called for it.
    pub fn fail(&self, call: Call, err: ApiError) {
        self.failures.lock().insert(call, err);
    }

    pub fn succeed(&self, call: Call) {
        self.failures.lock().remove(&call);
    }

    /// Holds `call` until the returned handle is notified.
    pub fn gate(&self, call: Call) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates.lock().insert(call, Arc::clone(&notify));
        notify
    }

    async fn record(&self, call: Call) -> GatewayResult<()> {
        self.calls.lock().push(call);

        let gate = self.gates.lock().get(&call).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.failures.lock().get(&call) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_classes(&self, section: Option<Section>) -> GatewayResult<Vec<ClassEntity>> {
        self.record(Call::ListClasses(section)).await?;
        Ok(self
            .classes
            .iter()
            .filter(|c| section.is_none_or(|s| c.section == s))
            .cloned()
            .collect())
    }

    async fn list_subjects(&self, class: ClassId) -> GatewayResult<Vec<SubjectEntity>> {
        self.record(Call::ListSubjects(class)).await?;
        Ok(self.subjects.get(&class).cloned().unwrap_or_default())
    }

    async fn list_chapters(
        &self,
        class: ClassId,
        subject: SubjectId,
    ) -> GatewayResult<Vec<ChapterEntity>> {
        self.record(Call::ListChapters(class, subject)).await?;
        Ok(self.chapters.get(&subject).cloned().unwrap_or_default())
    }

    async fn list_topics(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
    ) -> GatewayResult<Vec<TopicEntity>> {
        self.record(Call::ListTopics(class, subject, chapter)).await?;
        Ok(self.topics.get(&chapter).cloned().unwrap_or_default())
    }

    async fn list_resources(
        &self,
        class: ClassId,
        subject: SubjectId,
        chapter: ChapterId,
        topic: TopicId,
    ) -> GatewayResult<Vec<Resource>> {
        self.record(Call::ListResources(class, subject, chapter, topic))
            .await?;
        Ok(self.resources.get(&topic).cloned().unwrap_or_default())
    }

    async fn class_resources(&self, class: ClassId) -> GatewayResult<Vec<Resource>> {
        self.record(Call::ClassResources(class)).await?;
        Ok(self.class_resources.get(&class).cloned().unwrap_or_default())
    }

    async fn class_video_resources(
        &self,
        class: ClassId,
    ) -> GatewayResult<Vec<VideoResourceEntity>> {
        self.record(Call::ClassVideos(class)).await?;
        Ok(self.class_videos.get(&class).cloned().unwrap_or_default())
    }

    async fn update_chapter(
        &self,
        _class: ClassId,
        _subject: SubjectId,
        chapter: ChapterId,
        dto: &UpdateChapterDto,
    ) -> GatewayResult<ChapterEntity> {
        let order = dto.order.unwrap_or_default();
        self.record(Call::UpdateChapter(chapter, order)).await?;
        Ok(ChapterEntity {
            id: chapter,
            title: dto.title.clone().unwrap_or_default(),
            description: String::new(),
            order,
        })
    }

    async fn update_topic(
        &self,
        _class: ClassId,
        _subject: SubjectId,
        _chapter: ChapterId,
        topic: TopicId,
        dto: &UpdateTopicDto,
    ) -> GatewayResult<TopicEntity> {
        let order = dto.order.unwrap_or_default();
        self.record(Call::UpdateTopic(topic, order)).await?;
        Ok(TopicEntity {
            id: topic,
            title: dto.title.clone().unwrap_or_default(),
            description: String::new(),
            order,
        })
    }
}

#[allow(dead_code)]
pub fn class(id: i64, name: &str, section: Section) -> ClassEntity {
    ClassEntity {
        id: ClassId::new(id),
        name: name.into(),
        section,
        level: EducationLevel::SecondaryFirstCycle,
        speciality: None,
        description: String::new(),
    }
}

#[allow(dead_code)]
pub fn subject(id: i64, name: &str) -> SubjectEntity {
    SubjectEntity {
        id: SubjectId::new(id),
        name: name.into(),
        description: String::new(),
    }
}

#[allow(dead_code)]
pub fn chapter(id: i64, title: &str, order: i32) -> ChapterEntity {
    ChapterEntity {
        id: ChapterId::new(id),
        title: title.into(),
        description: String::new(),
        order,
    }
}

#[allow(dead_code)]
pub fn topic(id: i64, title: &str, order: i32) -> TopicEntity {
    TopicEntity {
        id: TopicId::new(id),
        title: title.into(),
        description: String::new(),
        order,
    }
}

#[allow(dead_code)]
pub fn pdf(id: i64, title: &str) -> Resource {
    Resource {
        id: ResourceId::new(id),
        title: title.into(),
        description: String::new(),
        kind: ResourceKind::Pdf {
            pdf_file: format!("/media/{id}.pdf"),
        },
    }
}

#[allow(dead_code)]
pub fn revision(id: i64, title: &str) -> Resource {
    Resource {
        id: ResourceId::new(id),
        title: title.into(),
        description: String::new(),
        kind: ResourceKind::Revision {
            content: "Key points".into(),
        },
    }
}

#[allow(dead_code)]
pub fn server_error() -> ApiError {
    ApiError::Message {
        status: 500,
        message: "Internal server error".into(),
    }
}

/// A controller over a fresh store, starting at the class listing.
#[allow(dead_code)]
pub fn controller(gateway: &Arc<MockGateway>) -> LevelController<MockGateway> {
    LevelController::new(Arc::clone(gateway), NavigationStore::new().into_shared())
}

/// A controller over a store rebuilt from persisted selections, collections empty.
#[allow(dead_code)]
pub fn reloaded_controller(
    gateway: &Arc<MockGateway>,
    persisted: PersistedNavigation,
) -> LevelController<MockGateway> {
    LevelController::new(
        Arc::clone(gateway),
        NavigationStore::from_persisted(persisted).into_shared(),
    )
}

/// Selections down to topic 10 ("Mitosis") of class 1, as they would be persisted.
#[allow(dead_code)]
pub fn persisted_at_resources() -> PersistedNavigation {
    PersistedNavigation {
        current_level: edutrail::navigation::Level::Resources,
        current_class: Some(class(1, "Form 1", Section::Anglophone)),
        current_subject: Some(subject(5, "Biology")),
        current_chapter: Some(chapter(20, "Cells", 2)),
        current_topic: Some(topic(10, "Mitosis", 1)),
        active_tab: None,
    }
}

/// Drives a fresh controller from the class listing down to `depth` (0..=4).
#[allow(dead_code)]
pub async fn navigate_to_depth(controller: &LevelController<MockGateway>, depth: usize) {
    controller.show_classes(None).await.unwrap();
    if depth >= 1 {
        let c = controller.store().read().classes()[0].clone();
        controller.select_class(c).await.unwrap();
    }
    if depth >= 2 {
        let s = controller.store().read().subjects()[0].clone();
        controller.select_subject(s).await.unwrap();
    }
    if depth >= 3 {
        // chapters are sorted by order: Genetics (21) then Cells (20)
        let ch = controller
            .store()
            .read()
            .chapters()
            .iter()
            .find(|c| c.id == ChapterId::new(20))
            .cloned()
            .unwrap();
        controller.select_chapter(ch).await.unwrap();
    }
    if depth >= 4 {
        let t = controller.store().read().topics()[0].clone();
        controller.select_topic(t).await.unwrap();
    }
}
