//! Level transition controller.
//!
//! Forward navigation is fetch-then-transition: the children of the selected
//! entity are fetched first and the store only changes once they arrive, so a
//! failed fetch leaves level and selections untouched. Backward navigation is
//! synchronous and clears the selections deeper than the target level.
//!
//! Every navigation takes a new request generation. A response that comes back
//! after a newer navigation started is discarded instead of overwriting the
//! level the user has moved to.

use std::sync::Arc;

use edutrail_core::{ApiError, NavError, PreconditionError};
use edutrail_gateway::Gateway;
use edutrail_models::{
    ChapterEntity, ChapterId, ClassEntity, ClassId, Section, SubjectEntity, SubjectId,
    TopicEntity, TopicId, UpdateChapterDto, UpdateTopicDto,
};
use futures::future::join_all;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use super::level::Level;
use super::reorder::{ReorderReport, plan_move};
use super::store::{NavigationStore, OrderSync, SharedStore, SiblingRef};

/// What happened to the store after a forward navigation resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The fetched data was applied and the store now shows this level.
    Entered(Level),
    /// A newer navigation started while this one was in flight; its result was dropped.
    Superseded,
}

pub struct LevelController<G> {
    gateway: Arc<G>,
    store: SharedStore,
}

impl<G> Clone for LevelController<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: Arc::clone(&self.store),
        }
    }
}

impl<G: Gateway> LevelController<G> {
    pub fn new(gateway: Arc<G>, store: SharedStore) -> Self {
        Self { gateway, store }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Opens a new request generation and raises the loading flag.
    fn begin_request(&self) -> u64 {
        let mut store = self.store.write();
        let generation = store.next_generation();
        store.set_loading(true);
        store.set_last_error(None);
        generation
    }

    /// Applies a fetch result if `generation` is still the latest one.
    fn complete<T, F>(
        &self,
        generation: u64,
        result: Result<T, ApiError>,
        apply: F,
    ) -> Result<Transition, NavError>
    where
        F: FnOnce(&mut NavigationStore, T),
    {
        let mut store = self.store.write();

        if store.generation() != generation {
            debug!(
                generation,
                latest = store.generation(),
                "Discarding response of superseded navigation"
            );
            return Ok(Transition::Superseded);
        }

        store.set_loading(false);
        match result {
            Ok(data) => {
                apply(&mut *store, data);
                Ok(Transition::Entered(store.current_level()))
            }
            Err(err) => {
                warn!(error = %err, nav_level = %store.current_level(), "Navigation fetch failed");
                let err = NavError::from(err);
                store.set_last_error(Some(err.clone()));
                Err(err)
            }
        }
    }

    fn expect_level(store: &NavigationStore, requested: Level) -> Result<(), PreconditionError> {
        if store.current_level() != requested {
            return Err(PreconditionError::WrongLevel {
                requested: requested.as_str(),
                current: store.current_level().as_str(),
            });
        }
        Ok(())
    }

    fn selected_class(store: &NavigationStore) -> Result<ClassId, PreconditionError> {
        store
            .current_class()
            .map(|c| c.id)
            .ok_or(PreconditionError::MissingSelection("class"))
    }

    fn selected_subject(store: &NavigationStore) -> Result<SubjectId, PreconditionError> {
        store
            .current_subject()
            .map(|s| s.id)
            .ok_or(PreconditionError::MissingSelection("subject"))
    }

    fn selected_chapter(store: &NavigationStore) -> Result<ChapterId, PreconditionError> {
        store
            .current_chapter()
            .map(|c| c.id)
            .ok_or(PreconditionError::MissingSelection("chapter"))
    }

    /// Loads the class listing for a section tab. Only valid on the class listing.
    #[instrument(skip(self))]
    pub async fn show_classes(&self, section: Option<Section>) -> Result<Transition, NavError> {
        Self::expect_level(&self.store.read(), Level::Classes)?;

        let generation = self.begin_request();
        let result = self.gateway.list_classes(section).await;

        self.complete(generation, result, |store, classes| {
            store.set_active_tab(section);
            store.set_classes(classes);
        })
    }

    /// Opens a class: fetches its subjects plus the class-level resources.
    ///
    /// The three fetches run concurrently. Only the subject listing is
    /// required; the class resources are shown when they load and logged
    /// otherwise.
    #[instrument(skip(self, class), fields(class_id = %class.id))]
    pub async fn select_class(&self, class: ClassEntity) -> Result<Transition, NavError> {
        Self::expect_level(&self.store.read(), Level::Classes)?;

        let generation = self.begin_request();
        let class_id = class.id;
        let (subjects, resources, videos) = tokio::join!(
            self.gateway.list_subjects(class_id),
            self.gateway.class_resources(class_id),
            self.gateway.class_video_resources(class_id),
        );

        let resources = resources.unwrap_or_else(|err| {
            warn!(error = %err, %class_id, "Failed to load class resources");
            Vec::new()
        });
        let videos = videos.unwrap_or_else(|err| {
            warn!(error = %err, %class_id, "Failed to load class videos");
            Vec::new()
        });

        self.complete(generation, subjects, |store, subjects| {
            store.set_subjects(subjects);
            store.set_class_resources(resources);
            store.set_video_resources(videos);
            store.set_current_class(Some(class));
            store.set_current_level(Level::Subjects);
        })
    }

    #[instrument(skip(self, subject), fields(subject_id = %subject.id))]
    pub async fn select_subject(&self, subject: SubjectEntity) -> Result<Transition, NavError> {
        let class_id = {
            let store = self.store.read();
            Self::expect_level(&store, Level::Subjects)?;
            Self::selected_class(&store)?
        };

        let generation = self.begin_request();
        let result = self.gateway.list_chapters(class_id, subject.id).await;

        self.complete(generation, result, |store, mut chapters| {
            edutrail_models::ordering::sort_by_order(&mut chapters);
            store.set_chapters(chapters);
            store.clear_order_sync();
            store.set_current_subject(Some(subject));
            store.set_current_level(Level::Chapters);
        })
    }

    #[instrument(skip(self, chapter), fields(chapter_id = %chapter.id))]
    pub async fn select_chapter(&self, chapter: ChapterEntity) -> Result<Transition, NavError> {
        let (class_id, subject_id) = {
            let store = self.store.read();
            Self::expect_level(&store, Level::Chapters)?;
            (Self::selected_class(&store)?, Self::selected_subject(&store)?)
        };

        let generation = self.begin_request();
        let result = self
            .gateway
            .list_topics(class_id, subject_id, chapter.id)
            .await;

        self.complete(generation, result, |store, mut topics| {
            edutrail_models::ordering::sort_by_order(&mut topics);
            store.set_topics(topics);
            store.set_current_chapter(Some(chapter));
            store.set_current_level(Level::Topics);
        })
    }

    #[instrument(skip(self, topic), fields(topic_id = %topic.id))]
    pub async fn select_topic(&self, topic: TopicEntity) -> Result<Transition, NavError> {
        let (class_id, subject_id, chapter_id) = {
            let store = self.store.read();
            Self::expect_level(&store, Level::Topics)?;
            (
                Self::selected_class(&store)?,
                Self::selected_subject(&store)?,
                Self::selected_chapter(&store)?,
            )
        };

        let generation = self.begin_request();
        let result = self
            .gateway
            .list_resources(class_id, subject_id, chapter_id, topic.id)
            .await;

        self.complete(generation, result, |store, resources| {
            store.set_resources(resources);
            store.set_current_topic(Some(topic));
            store.set_current_level(Level::Resources);
        })
    }

    /// Goes up one level, clearing only the selection that opened the current one.
    ///
    /// Returns the new level, or `None` on the class listing. Collections are
    /// left in memory so the level can be re-entered from a breadcrumb.
    pub fn navigate_back(&self) -> Option<Level> {
        let target = self.store.read().current_level().parent()?;
        self.jump_to(target).ok()
    }

    /// Jumps to a shallower (or the current) level, clearing every deeper selection.
    pub fn jump_to(&self, target: Level) -> Result<Level, NavError> {
        let mut store = self.store.write();
        let current = store.current_level();
        if target > current {
            return Err(PreconditionError::WrongLevel {
                requested: target.as_str(),
                current: current.as_str(),
            }
            .into());
        }

        let keep = target.depth();
        if keep < 4 {
            store.set_current_topic(None);
        }
        if keep < 3 {
            store.set_current_chapter(None);
        }
        if keep < 2 {
            store.set_current_subject(None);
        }
        if keep < 1 {
            store.set_current_class(None);
        }
        store.set_current_level(target);

        // In-flight fetches belong to the level being left.
        store.next_generation();
        store.set_loading(false);

        info!(from = %current, to = %target, "Moved up the hierarchy");
        Ok(target)
    }

    /// Moves a chapter in the current subject and persists the new orders.
    #[instrument(skip(self))]
    pub async fn reorder_chapters(&self, from: usize, to: usize) -> Result<ReorderReport, NavError> {
        let (class_id, subject_id, changes) = {
            let mut store = self.store.write();
            if store.current_level() != Level::Chapters {
                return Err(PreconditionError::NotReorderable(store.current_level().as_str()).into());
            }
            let class_id = Self::selected_class(&store)?;
            let subject_id = Self::selected_subject(&store)?;

            let plan = plan_move(store.chapters(), from, to)?;
            store.set_chapters(plan.items);
            for (id, _) in &plan.changes {
                store.set_order_sync(SiblingRef::Chapter(*id), OrderSync::Pending);
            }
            (class_id, subject_id, plan.changes)
        };

        let changes: Vec<(SiblingRef, i32)> = changes
            .into_iter()
            .map(|(id, order)| (SiblingRef::Chapter(id), order))
            .collect();
        self.push_orders(class_id, subject_id, None, changes).await
    }

    /// Moves a topic in the current chapter and persists the new orders.
    #[instrument(skip(self))]
    pub async fn reorder_topics(&self, from: usize, to: usize) -> Result<ReorderReport, NavError> {
        let (class_id, subject_id, chapter_id, changes) = {
            let mut store = self.store.write();
            if store.current_level() != Level::Topics {
                return Err(PreconditionError::NotReorderable(store.current_level().as_str()).into());
            }
            let class_id = Self::selected_class(&store)?;
            let subject_id = Self::selected_subject(&store)?;
            let chapter_id = Self::selected_chapter(&store)?;

            let plan = plan_move(store.topics(), from, to)?;
            store.set_topics(plan.items);
            for (id, _) in &plan.changes {
                store.set_order_sync(SiblingRef::Topic(*id), OrderSync::Pending);
            }
            (class_id, subject_id, chapter_id, plan.changes)
        };

        let changes: Vec<(SiblingRef, i32)> = changes
            .into_iter()
            .map(|(id, order)| (SiblingRef::Topic(id), order))
            .collect();
        self.push_orders(class_id, subject_id, Some(chapter_id), changes)
            .await
    }

    /// Resends the current order of every item whose last update failed.
    ///
    /// Only items in the listing currently shown are retried; the others stay
    /// marked as failed.
    #[instrument(skip(self))]
    pub async fn retry_failed_reorders(&self) -> Result<ReorderReport, NavError> {
        let (class_id, subject_id, chapter_id, changes) = {
            let mut store = self.store.write();
            let class_id = Self::selected_class(&store)?;
            let subject_id = Self::selected_subject(&store)?;
            let chapter_id = store.current_chapter().map(|c| c.id);

            let changes: Vec<(SiblingRef, i32)> = store
                .failed_order_syncs()
                .into_iter()
                .filter_map(|item| {
                    let order = match item {
                        SiblingRef::Chapter(id) => store
                            .chapters()
                            .iter()
                            .find(|c| c.id == id)
                            .map(|c| c.order),
                        SiblingRef::Topic(id) if chapter_id.is_some() => store
                            .topics()
                            .iter()
                            .find(|t| t.id == id)
                            .map(|t| t.order),
                        SiblingRef::Topic(_) => None,
                    };
                    order.map(|order| (item, order))
                })
                .collect();

            for (item, _) in &changes {
                store.set_order_sync(*item, OrderSync::Pending);
            }
            (class_id, subject_id, chapter_id, changes)
        };

        self.push_orders(class_id, subject_id, chapter_id, changes)
            .await
    }

    /// Sends one update per changed item, concurrently, and records each outcome.
    async fn push_orders(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        chapter_id: Option<ChapterId>,
        changes: Vec<(SiblingRef, i32)>,
    ) -> Result<ReorderReport, NavError> {
        let requests = changes.iter().map(|&(item, order)| async move {
            let result = match item {
                SiblingRef::Chapter(id) => {
                    self.send_chapter_order(class_id, subject_id, id, order)
                        .await
                }
                SiblingRef::Topic(id) => match chapter_id {
                    Some(chapter_id) => {
                        self.send_topic_order(class_id, subject_id, chapter_id, id, order)
                            .await
                    }
                    None => Err(NavError::from(PreconditionError::MissingSelection(
                        "chapter",
                    ))),
                },
            };
            (item, result)
        });
        let outcomes = join_all(requests).await;

        record_outcomes(&mut self.store.write(), outcomes)
    }

    async fn send_chapter_order(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        chapter_id: ChapterId,
        order: i32,
    ) -> Result<(), NavError> {
        let dto = UpdateChapterDto::order(order);
        dto.validate()?;
        self.gateway
            .update_chapter(class_id, subject_id, chapter_id, &dto)
            .await?;
        Ok(())
    }

    async fn send_topic_order(
        &self,
        class_id: ClassId,
        subject_id: SubjectId,
        chapter_id: ChapterId,
        topic_id: TopicId,
        order: i32,
    ) -> Result<(), NavError> {
        let dto = UpdateTopicDto::order(order);
        dto.validate()?;
        self.gateway
            .update_topic(class_id, subject_id, chapter_id, topic_id, &dto)
            .await?;
        Ok(())
    }
}

/// Records the server outcome of every sent order.
///
/// Each item ends up `Confirmed` or `Failed`, even when one of them failed
/// for a reason other than the backend; that error is then returned after
/// the whole batch is recorded.
fn record_outcomes(
    store: &mut NavigationStore,
    outcomes: Vec<(SiblingRef, Result<(), NavError>)>,
) -> Result<ReorderReport, NavError> {
    let mut report = ReorderReport::default();
    let mut aborted: Option<NavError> = None;

    for (item, result) in outcomes {
        match result {
            Ok(()) => {
                store.set_order_sync(item, OrderSync::Confirmed);
                report.confirmed.push(item);
            }
            Err(NavError::Gateway(err)) => {
                warn!(?item, error = %err, "Order update failed");
                store.set_order_sync(item, OrderSync::Failed(err.to_string()));
                report.failed.push((item, err));
            }
            Err(other) => {
                warn!(?item, error = %other, "Order update not sent");
                store.set_order_sync(item, OrderSync::Failed(other.to_string()));
                aborted.get_or_insert(other);
            }
        }
    }

    if let Some(err) = aborted {
        store.set_last_error(Some(err.clone()));
        return Err(err);
    }
    if let Some((_, err)) = report.failed.first() {
        store.set_last_error(Some(NavError::from(err.clone())));
    }
    info!(
        confirmed = report.confirmed.len(),
        failed = report.failed.len(),
        "Reorder synchronised"
    );
    Ok(report)
}
