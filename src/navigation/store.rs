//! Navigation state store.
//!
//! The store is split in two halves. [`PersistedNavigation`] survives a full
//! reload (current level, selections, class-listing tab). Everything else,
//! the fetched collections, the loading flag and the request generation,
//! lives in memory only and is rebuilt by the restoration procedure.
//!
//! Setters are independent: none of them resets another field. Keeping the
//! selections consistent with the level is the controller's job. The store
//! never performs I/O.

use std::collections::HashMap;
use std::sync::Arc;

use edutrail_core::NavError;
use edutrail_models::{
    ChapterEntity, ChapterId, ClassEntity, Resource, Section, SubjectEntity, TopicEntity, TopicId,
    VideoResourceEntity,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::level::Level;

/// The store shared between the controller and every view reading it.
///
/// Locks are short and never held across an `.await`.
pub type SharedStore = Arc<RwLock<NavigationStore>>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedNavigation {
    #[serde(default)]
    pub current_level: Level,
    #[serde(default)]
    pub current_class: Option<ClassEntity>,
    #[serde(default)]
    pub current_subject: Option<SubjectEntity>,
    #[serde(default)]
    pub current_chapter: Option<ChapterEntity>,
    #[serde(default)]
    pub current_topic: Option<TopicEntity>,
    #[serde(default)]
    pub active_tab: Option<Section>,
}

impl PersistedNavigation {
    /// Whether the selection at `depth` (1 = class .. 4 = topic) is set.
    fn has_selection(&self, depth: usize) -> bool {
        match depth {
            1 => self.current_class.is_some(),
            2 => self.current_subject.is_some(),
            3 => self.current_chapter.is_some(),
            4 => self.current_topic.is_some(),
            _ => true,
        }
    }

    /// Deepest level whose required selections are all present.
    pub fn deepest_consistent_level(&self) -> Level {
        let depth = (1..=4)
            .take_while(|&depth| self.has_selection(depth))
            .count();
        Level::from_depth(depth).unwrap_or(Level::Resources)
    }

    /// Every level implies all shallower selections are populated.
    pub fn prefix_invariant_holds(&self) -> bool {
        (1..=self.current_level.depth()).all(|depth| self.has_selection(depth))
    }

    /// Pulls `current_level` back to the deepest level the selections support.
    pub fn normalized(mut self) -> Self {
        if !self.prefix_invariant_holds() {
            let level = self.deepest_consistent_level().min(self.current_level);
            warn!(
                persisted = %self.current_level,
                restored = %level,
                "Persisted navigation is missing selections, truncating level"
            );
            self.current_level = level;

            let keep = level.depth();
            if keep < 4 {
                self.current_topic = None;
            }
            if keep < 3 {
                self.current_chapter = None;
            }
            if keep < 2 {
                self.current_subject = None;
            }
        }
        self
    }
}

/// A chapter or topic whose order is being synchronised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SiblingRef {
    Chapter(ChapterId),
    Topic(TopicId),
}

/// Server confirmation state of an optimistically reordered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSync {
    Pending,
    Confirmed,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct NavigationStore {
    persisted: PersistedNavigation,

    classes: Vec<ClassEntity>,
    subjects: Vec<SubjectEntity>,
    chapters: Vec<ChapterEntity>,
    topics: Vec<TopicEntity>,
    resources: Vec<Resource>,
    class_resources: Vec<Resource>,
    video_resources: Vec<VideoResourceEntity>,

    is_loading: bool,
    last_error: Option<NavError>,
    generation: u64,
    order_sync: HashMap<SiblingRef, OrderSync>,
}

impl NavigationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store after a reload: selections come back, collections start empty.
    pub fn from_persisted(persisted: PersistedNavigation) -> Self {
        Self {
            persisted: persisted.normalized(),
            ..Self::default()
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn persisted(&self) -> &PersistedNavigation {
        &self.persisted
    }

    // Persisted fields

    pub fn current_level(&self) -> Level {
        self.persisted.current_level
    }

    pub fn set_current_level(&mut self, level: Level) {
        self.persisted.current_level = level;
    }

    pub fn current_class(&self) -> Option<&ClassEntity> {
        self.persisted.current_class.as_ref()
    }

    pub fn set_current_class(&mut self, class: Option<ClassEntity>) {
        self.persisted.current_class = class;
    }

    pub fn current_subject(&self) -> Option<&SubjectEntity> {
        self.persisted.current_subject.as_ref()
    }

    pub fn set_current_subject(&mut self, subject: Option<SubjectEntity>) {
        self.persisted.current_subject = subject;
    }

    pub fn current_chapter(&self) -> Option<&ChapterEntity> {
        self.persisted.current_chapter.as_ref()
    }

    pub fn set_current_chapter(&mut self, chapter: Option<ChapterEntity>) {
        self.persisted.current_chapter = chapter;
    }

    pub fn current_topic(&self) -> Option<&TopicEntity> {
        self.persisted.current_topic.as_ref()
    }

    pub fn set_current_topic(&mut self, topic: Option<TopicEntity>) {
        self.persisted.current_topic = topic;
    }

    pub fn active_tab(&self) -> Option<Section> {
        self.persisted.active_tab
    }

    pub fn set_active_tab(&mut self, tab: Option<Section>) {
        self.persisted.active_tab = tab;
    }

    pub fn prefix_invariant_holds(&self) -> bool {
        self.persisted.prefix_invariant_holds()
    }

    // In-memory collections

    pub fn classes(&self) -> &[ClassEntity] {
        &self.classes
    }

    pub fn set_classes(&mut self, classes: Vec<ClassEntity>) {
        self.classes = classes;
    }

    pub fn subjects(&self) -> &[SubjectEntity] {
        &self.subjects
    }

    pub fn set_subjects(&mut self, subjects: Vec<SubjectEntity>) {
        self.subjects = subjects;
    }

    pub fn chapters(&self) -> &[ChapterEntity] {
        &self.chapters
    }

    pub fn set_chapters(&mut self, chapters: Vec<ChapterEntity>) {
        self.chapters = chapters;
    }

    pub fn topics(&self) -> &[TopicEntity] {
        &self.topics
    }

    pub fn set_topics(&mut self, topics: Vec<TopicEntity>) {
        self.topics = topics;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
    }

    pub fn class_resources(&self) -> &[Resource] {
        &self.class_resources
    }

    pub fn set_class_resources(&mut self, resources: Vec<Resource>) {
        self.class_resources = resources;
    }

    pub fn video_resources(&self) -> &[VideoResourceEntity] {
        &self.video_resources
    }

    pub fn set_video_resources(&mut self, videos: Vec<VideoResourceEntity>) {
        self.video_resources = videos;
    }

    /// Whether the collection shown at `level` has nothing loaded.
    pub fn is_collection_empty(&self, level: Level) -> bool {
        match level {
            Level::Classes => self.classes.is_empty(),
            Level::Subjects => self.subjects.is_empty(),
            Level::Chapters => self.chapters.is_empty(),
            Level::Topics => self.topics.is_empty(),
            Level::Resources => self.resources.is_empty(),
        }
    }

    // Request bookkeeping

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    pub fn last_error(&self) -> Option<&NavError> {
        self.last_error.as_ref()
    }

    pub fn set_last_error(&mut self, error: Option<NavError>) {
        self.last_error = error;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts a new request generation; responses tagged with older ones are stale.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    pub fn order_sync(&self, item: SiblingRef) -> Option<&OrderSync> {
        self.order_sync.get(&item)
    }

    pub fn set_order_sync(&mut self, item: SiblingRef, state: OrderSync) {
        self.order_sync.insert(item, state);
    }

    pub fn failed_order_syncs(&self) -> Vec<SiblingRef> {
        let mut failed: Vec<SiblingRef> = self
            .order_sync
            .iter()
            .filter(|(_, state)| matches!(state, OrderSync::Failed(_)))
            .map(|(item, _)| *item)
            .collect();
        failed.sort_by_key(|item| match item {
            SiblingRef::Chapter(id) => (0, id.get()),
            SiblingRef::Topic(id) => (1, id.get()),
        });
        failed
    }

    pub fn clear_order_sync(&mut self) {
        self.order_sync.clear();
    }
}
