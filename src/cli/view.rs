//! Plain-text rendering of the navigation store.

use std::fmt::Write;

use edutrail_models::{Resource, ResourceKind};

use crate::navigation::{
    Level, NavigationStore, OrderSync, SiblingRef, breadcrumb, breadcrumbs, heading,
};

/// One selectable row of the current listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i64,
    pub label: String,
}

pub fn rows(store: &NavigationStore) -> Vec<Row> {
    match store.current_level() {
        Level::Classes => store
            .classes()
            .iter()
            .map(|c| Row {
                id: c.id.get(),
                label: format!("{} ({})", c.display_name(), c.section),
            })
            .collect(),
        Level::Subjects => store
            .subjects()
            .iter()
            .map(|s| Row {
                id: s.id.get(),
                label: s.name.clone(),
            })
            .collect(),
        Level::Chapters => store
            .chapters()
            .iter()
            .map(|c| Row {
                id: c.id.get(),
                label: format!(
                    "{}. {}{}",
                    c.order,
                    c.title,
                    sync_marker(store.order_sync(SiblingRef::Chapter(c.id)))
                ),
            })
            .collect(),
        Level::Topics => store
            .topics()
            .iter()
            .map(|t| Row {
                id: t.id.get(),
                label: format!(
                    "{}. {}{}",
                    t.order,
                    t.title,
                    sync_marker(store.order_sync(SiblingRef::Topic(t.id)))
                ),
            })
            .collect(),
        Level::Resources => store
            .resources()
            .iter()
            .map(|r| Row {
                id: r.id.get(),
                label: format!("{} {} · {}", r.kind.icon(), r.title, r.kind.label()),
            })
            .collect(),
    }
}

fn sync_marker(state: Option<&OrderSync>) -> &'static str {
    match state {
        Some(OrderSync::Pending) => " (saving…)",
        Some(OrderSync::Failed(_)) => " (not saved)",
        Some(OrderSync::Confirmed) | None => "",
    }
}

pub fn render(store: &NavigationStore) -> String {
    let state = store.persisted();
    let mut out = String::new();

    let crumbs = breadcrumbs(state);
    if !crumbs.is_empty() {
        let _ = writeln!(out, "{}", breadcrumb::render(&crumbs));
    }
    let _ = writeln!(out, "📚 {}", heading(state));

    if store.is_loading() {
        let _ = writeln!(out, "⏳ Loading…");
    }
    if let Some(err) = store.last_error() {
        let _ = writeln!(out, "❌ {} ({})", err.user_message(), err);
    }

    let rows = rows(store);
    if rows.is_empty() {
        let _ = writeln!(out, "   (nothing here yet)");
    }
    for row in &rows {
        let _ = writeln!(out, "   [{}] {}", row.id, row.label);
    }

    if store.current_level() == Level::Subjects {
        let resources = store.class_resources().len();
        let videos = store.video_resources().len();
        if resources + videos > 0 {
            let _ = writeln!(
                out,
                "   + {} class resource(s), {} video(s)",
                resources, videos
            );
        }
    }

    out
}

pub fn render_resource(resource: &Resource) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} [{}]",
        resource.kind.icon(),
        resource.title,
        resource.kind.label()
    );
    if !resource.description.is_empty() {
        let _ = writeln!(out, "   {}", resource.description);
    }

    match &resource.kind {
        ResourceKind::Pdf { .. } | ResourceKind::Video { .. } => {}
        ResourceKind::Exercise { instructions, .. } => {
            if !instructions.is_empty() {
                let _ = writeln!(out, "   Instructions: {}", instructions);
            }
        }
        ResourceKind::Revision { content } => {
            let _ = writeln!(out, "   {}", content);
        }
    }
    for file in resource.kind.files() {
        let _ = writeln!(out, "   ⤓ {}", file);
    }

    out
}
