use serde::{Deserialize, Serialize};
use std::fmt;

/// One rung of the Class → Subject → Chapter → Topic → Resource hierarchy.
///
/// A level names the listing being shown: at `Chapters` the user sees the
/// chapters of the selected subject.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Classes,
    Subjects,
    Chapters,
    Topics,
    Resources,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Classes,
        Level::Subjects,
        Level::Chapters,
        Level::Topics,
        Level::Resources,
    ];

    /// Number of selections this level requires: 0 for `Classes`, 4 for `Resources`.
    pub fn depth(self) -> usize {
        match self {
            Level::Classes => 0,
            Level::Subjects => 1,
            Level::Chapters => 2,
            Level::Topics => 3,
            Level::Resources => 4,
        }
    }

    pub fn from_depth(depth: usize) -> Option<Level> {
        Self::ALL.get(depth).copied()
    }

    pub fn parent(self) -> Option<Level> {
        self.depth().checked_sub(1).and_then(Level::from_depth)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Classes => "classes",
            Level::Subjects => "subjects",
            Level::Chapters => "chapters",
            Level::Topics => "topics",
            Level::Resources => "resources",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Level::Classes => "Classes",
            Level::Subjects => "Subjects",
            Level::Chapters => "Chapters",
            Level::Topics => "Topics",
            Level::Resources => "Resources",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| format!("unknown level: {}", s))
    }
}
