//! Breadcrumb projection of the navigation state.

use super::level::Level;
use super::store::PersistedNavigation;

/// One clickable step of the trail. Clicking it jumps to `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    pub target: Level,
}

/// Projects the state onto its trail.
///
/// The trail has one entry per level above the current one: empty on the
/// class listing, four entries (`Classes › class › subject › chapter`) on a
/// topic's resources. The current level itself is the page heading, see
/// [`heading`].
pub fn breadcrumbs(state: &PersistedNavigation) -> Vec<Breadcrumb> {
    (0..state.current_level.depth())
        .filter_map(Level::from_depth)
        .map(|target| Breadcrumb {
            label: label_for(state, target),
            target,
        })
        .collect()
}

/// Label of the crumb leading to `target`: the selection that opened it.
fn label_for(state: &PersistedNavigation, target: Level) -> String {
    let label = match target {
        Level::Classes => None,
        Level::Subjects => state.current_class.as_ref().map(|c| c.display_name()),
        Level::Chapters => state.current_subject.as_ref().map(|s| s.name.clone()),
        Level::Topics => state.current_chapter.as_ref().map(|c| c.title.clone()),
        Level::Resources => state.current_topic.as_ref().map(|t| t.title.clone()),
    };
    label.unwrap_or_else(|| target.title().to_string())
}

/// Title of the listing currently shown.
pub fn heading(state: &PersistedNavigation) -> String {
    let level = state.current_level;
    match level {
        Level::Classes => match state.active_tab {
            Some(section) => format!("Classes · {}", section),
            None => "Classes".to_string(),
        },
        _ => format!("{} · {}", label_for(state, level), level.title()),
    }
}

/// Renders the trail as `Classes › Form 1 › Biology`.
pub fn render(crumbs: &[Breadcrumb]) -> String {
    crumbs
        .iter()
        .map(|crumb| crumb.label.as_str())
        .collect::<Vec<_>>()
        .join(" › ")
}
