//! Restoration after a reload.
//!
//! Selections are persisted but collections are not, so after a reload the
//! store can say "resources of topic 12" with every listing empty. Walking
//! the levels root to leaf, each empty listing the current level depends on is
//! fetched again from the persisted selections, keeping the breadcrumb levels
//! navigable without sending the user back to the class listing.

use edutrail_core::ApiError;
use edutrail_gateway::Gateway;
use edutrail_models::ordering::sort_by_order;
use edutrail_models::{
    ChapterEntity, Resource, SubjectEntity, TopicEntity, VideoResourceEntity,
};
use tracing::{debug, info, instrument, warn};

use super::controller::LevelController;
use super::level::Level;
use super::store::{NavigationStore, PersistedNavigation};

const RESTORABLE: [Level; 4] = [
    Level::Subjects,
    Level::Chapters,
    Level::Topics,
    Level::Resources,
];

/// Outcome of one restoration pass. Failures are collected, never raised.
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub restored: Vec<Level>,
    pub failed: Vec<(Level, ApiError)>,
    /// A navigation started while restoring; the remaining levels were left alone.
    pub superseded: bool,
}

impl RestoreReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.superseded
    }
}

enum Fetched {
    /// Subjects plus whatever class-level resources loaded with them.
    Subjects {
        subjects: Vec<SubjectEntity>,
        resources: Vec<Resource>,
        videos: Vec<VideoResourceEntity>,
    },
    Chapters(Vec<ChapterEntity>),
    Topics(Vec<TopicEntity>),
    Resources(Vec<Resource>),
}

impl Fetched {
    fn apply(self, store: &mut NavigationStore) {
        match self {
            Fetched::Subjects {
                subjects,
                resources,
                videos,
            } => {
                store.set_subjects(subjects);
                store.set_class_resources(resources);
                store.set_video_resources(videos);
            }
            Fetched::Chapters(mut chapters) => {
                sort_by_order(&mut chapters);
                store.set_chapters(chapters);
            }
            Fetched::Topics(mut topics) => {
                sort_by_order(&mut topics);
                store.set_topics(topics);
            }
            Fetched::Resources(resources) => store.set_resources(resources),
        }
    }
}

impl<G: Gateway> LevelController<G> {
    /// Refetches the empty listings implied by the persisted level.
    ///
    /// Class resources and videos are reloaded together with the subject
    /// listing; their failure is logged and leaves them empty.
    ///
    /// Running it again with nothing missing issues no requests.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> RestoreReport {
        let (generation, snapshot) = {
            let store = self.store().read();
            (store.generation(), store.persisted().clone())
        };

        let mut report = RestoreReport::default();
        let pending: Vec<Level> = {
            let store = self.store().read();
            RESTORABLE
                .into_iter()
                .filter(|&level| level <= snapshot.current_level)
                .filter(|&level| store.is_collection_empty(level))
                .collect()
        };
        if pending.is_empty() {
            return report;
        }

        self.store().write().set_loading(true);

        for level in pending {
            let Some(result) = self.refetch(level, &snapshot).await else {
                debug!(nav_level = %level, "No persisted selection for level, skipping");
                continue;
            };

            match result {
                Ok(fetched) => {
                    let mut store = self.store().write();
                    if store.generation() != generation {
                        report.superseded = true;
                        break;
                    }
                    fetched.apply(&mut store);
                    report.restored.push(level);
                }
                Err(err) => {
                    warn!(nav_level = %level, error = %err, "Failed to restore level");
                    report.failed.push((level, err));
                }
            }
        }

        let mut store = self.store().write();
        if store.generation() == generation {
            store.set_loading(false);
        }

        info!(
            restored = report.restored.len(),
            failed = report.failed.len(),
            superseded = report.superseded,
            "Navigation restored"
        );
        report
    }

    async fn refetch(
        &self,
        level: Level,
        snapshot: &PersistedNavigation,
    ) -> Option<Result<Fetched, ApiError>> {
        let class = snapshot.current_class.as_ref().map(|c| c.id);
        let subject = snapshot.current_subject.as_ref().map(|s| s.id);
        let chapter = snapshot.current_chapter.as_ref().map(|c| c.id);
        let topic = snapshot.current_topic.as_ref().map(|t| t.id);
        let gateway = self.gateway();

        let result = match level {
            Level::Classes => return None,
            Level::Subjects => {
                let class = class?;
                let (subjects, resources, videos) = tokio::join!(
                    gateway.list_subjects(class),
                    gateway.class_resources(class),
                    gateway.class_video_resources(class),
                );
                subjects.map(|subjects| Fetched::Subjects {
                    subjects,
                    resources: resources.unwrap_or_else(|err| {
                        warn!(error = %err, class_id = %class, "Failed to restore class resources");
                        Vec::new()
                    }),
                    videos: videos.unwrap_or_else(|err| {
                        warn!(error = %err, class_id = %class, "Failed to restore class videos");
                        Vec::new()
                    }),
                })
            }
            Level::Chapters => gateway
                .list_chapters(class?, subject?)
                .await
                .map(Fetched::Chapters),
            Level::Topics => gateway
                .list_topics(class?, subject?, chapter?)
                .await
                .map(Fetched::Topics),
            Level::Resources => gateway
                .list_resources(class?, subject?, chapter?, topic?)
                .await
                .map(Fetched::Resources),
        };
        Some(result)
    }
}
