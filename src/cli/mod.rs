//! Terminal front end for the navigation layer.
//!
//! A [`Session`] loads the persisted selections, restores the listings a
//! reload lost, applies one command and saves the selections again.

pub mod browse;
pub mod view;

use std::sync::Arc;

use anyhow::{Context, bail};
use edutrail_gateway::Gateway;
use edutrail_models::Section;
use tracing::warn;

use crate::navigation::{Level, LevelController, NavigationStore, RestoreReport, Transition};
use crate::persistence::{NavigationPersistence, PersistenceError};

/// Discards the saved selections; the next session starts at the class listing.
///
/// Runs without a session so it works when the saved state or the backend
/// is broken.
pub fn reset<P: NavigationPersistence>(persistence: &P) -> anyhow::Result<()> {
    persistence
        .clear()
        .context("failed to clear navigation state")
}

pub struct Session<G, P> {
    controller: LevelController<G>,
    persistence: P,
}

impl<G: Gateway, P: NavigationPersistence> Session<G, P> {
    /// Loads saved selections and refetches the listings they depend on.
    ///
    /// A corrupt state file starts over from the class listing. Fetch
    /// failures are kept in the store and shown with the listing.
    pub async fn open(gateway: Arc<G>, persistence: P) -> anyhow::Result<(Self, RestoreReport)> {
        let persisted = match persistence.load() {
            Ok(persisted) => persisted.unwrap_or_default(),
            Err(err @ PersistenceError::Corrupt { .. }) => {
                warn!(error = %err, "Ignoring saved navigation state");
                eprintln!("⚠️  Saved navigation was unreadable, starting from the class listing");
                Default::default()
            }
            Err(err) => return Err(err).context("failed to load navigation state"),
        };
        let store = NavigationStore::from_persisted(persisted).into_shared();
        let session = Self {
            controller: LevelController::new(gateway, store),
            persistence,
        };

        let report = session.controller.restore().await;
        for (level, err) in &report.failed {
            eprintln!("⚠️  Could not reload {}: {}", level, err);
        }
        if let Err(err) = session.ensure_classes().await {
            warn!(error = %err, "Failed to load class listing");
        }

        Ok((session, report))
    }

    pub fn controller(&self) -> &LevelController<G> {
        &self.controller
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let persisted = self.controller.store().read().persisted().clone();
        self.persistence
            .save(&persisted)
            .context("failed to save navigation state")
    }

    /// The class listing is not part of restoration; load it when it is shown.
    async fn ensure_classes(&self) -> anyhow::Result<()> {
        let (level, empty, tab) = {
            let store = self.controller.store().read();
            (
                store.current_level(),
                store.is_collection_empty(Level::Classes),
                store.active_tab(),
            )
        };
        if level == Level::Classes && empty {
            self.controller.show_classes(tab).await?;
        }
        Ok(())
    }

    pub fn print_view(&self) {
        println!("{}", view::render(&self.controller.store().read()));
    }

    pub async fn handle_classes(&self, section: Option<Section>) -> anyhow::Result<()> {
        self.controller.jump_to(Level::Classes)?;
        self.controller.show_classes(section).await?;
        Ok(())
    }

    /// Opens the entry with `id` in the listing currently shown.
    pub async fn handle_open(&self, id: i64) -> anyhow::Result<Transition> {
        let level = self.controller.store().read().current_level();

        let transition = match level {
            Level::Classes => {
                let class = self
                    .controller
                    .store()
                    .read()
                    .classes()
                    .iter()
                    .find(|c| c.id.get() == id)
                    .cloned()
                    .with_context(|| format!("no class with id {id} in this listing"))?;
                self.controller.select_class(class).await?
            }
            Level::Subjects => {
                let subject = self
                    .controller
                    .store()
                    .read()
                    .subjects()
                    .iter()
                    .find(|s| s.id.get() == id)
                    .cloned()
                    .with_context(|| format!("no subject with id {id} in this listing"))?;
                self.controller.select_subject(subject).await?
            }
            Level::Chapters => {
                let chapter = self
                    .controller
                    .store()
                    .read()
                    .chapters()
                    .iter()
                    .find(|c| c.id.get() == id)
                    .cloned()
                    .with_context(|| format!("no chapter with id {id} in this listing"))?;
                self.controller.select_chapter(chapter).await?
            }
            Level::Topics => {
                let topic = self
                    .controller
                    .store()
                    .read()
                    .topics()
                    .iter()
                    .find(|t| t.id.get() == id)
                    .cloned()
                    .with_context(|| format!("no topic with id {id} in this listing"))?;
                self.controller.select_topic(topic).await?
            }
            Level::Resources => {
                let details = {
                    let store = self.controller.store().read();
                    store
                        .resources()
                        .iter()
                        .find(|r| r.id.get() == id)
                        .map(view::render_resource)
                        .with_context(|| format!("no resource with id {id} in this listing"))?
                };
                println!("{}", details);
                Transition::Entered(Level::Resources)
            }
        };

        Ok(transition)
    }

    pub async fn handle_back(&self) -> anyhow::Result<()> {
        if self.controller.navigate_back().is_none() {
            println!("ℹ️  Already at the class listing");
        }
        self.ensure_classes().await
    }

    pub async fn handle_jump(&self, level: Level) -> anyhow::Result<()> {
        self.controller.jump_to(level)?;
        self.ensure_classes().await
    }

    /// Moves the item at 1-based position `from` to position `to`.
    pub async fn handle_reorder(&self, from: usize, to: usize) -> anyhow::Result<()> {
        let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
            bail!("positions start at 1");
        };

        let level = self.controller.store().read().current_level();
        let report = match level {
            Level::Topics => self.controller.reorder_topics(from, to).await?,
            _ => self.controller.reorder_chapters(from, to).await?,
        };

        if report.is_complete() {
            println!("✅ {} position(s) saved", report.confirmed.len());
        } else {
            println!(
                "⚠️  {} of {} position(s) could not be saved; run `retry-reorders` to resend them",
                report.failed.len(),
                report.requests_sent()
            );
        }
        Ok(())
    }

    pub async fn handle_retry_reorders(&self) -> anyhow::Result<()> {
        let report = self.controller.retry_failed_reorders().await?;
        if report.requests_sent() == 0 {
            println!("ℹ️  Nothing to resend");
        } else {
            println!(
                "🔁 Resent {} position(s), {} still failing",
                report.requests_sent(),
                report.failed.len()
            );
        }
        Ok(())
    }

    pub async fn handle_restore(&self) -> RestoreReport {
        let report = self.controller.restore().await;
        if report.restored.is_empty() && report.failed.is_empty() {
            println!("ℹ️  Nothing to restore");
        }
        for level in &report.restored {
            println!("🔄 Reloaded {}", level);
        }
        report
    }
}
