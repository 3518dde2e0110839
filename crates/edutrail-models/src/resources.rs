//! Learning resources attached to a topic, or directly to a class.
//!
//! The backend discriminates resource variants with a `resource_type` string.
//! Here that becomes [`ResourceKind`], so every rendering site matches
//! exhaustively instead of comparing strings.

use edutrail_core::serde::{deserialize_null_as_empty, deserialize_optional_string};
use serde::{Deserialize, Serialize};

use crate::ids::ResourceId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
    #[serde(flatten)]
    pub kind: ResourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "resource_type")]
pub enum ResourceKind {
    #[serde(rename = "PDFResource")]
    Pdf { pdf_file: String },

    #[serde(rename = "VideoResource")]
    Video {
        video_file: String,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        thumbnail: Option<String>,
    },

    #[serde(rename = "ExerciseResource")]
    Exercise {
        #[serde(default, deserialize_with = "deserialize_null_as_empty")]
        instructions: String,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        exercise_file: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        solution_file: Option<String>,
    },

    #[serde(rename = "RevisionResource")]
    Revision { content: String },
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Pdf { .. } => "PDF",
            ResourceKind::Video { .. } => "Video",
            ResourceKind::Exercise { .. } => "Exercise",
            ResourceKind::Revision { .. } => "Revision",
        }
    }

    /// Single-glyph icon used by terminal listings.
    pub fn icon(&self) -> &'static str {
        match self {
            ResourceKind::Pdf { .. } => "📄",
            ResourceKind::Video { .. } => "🎬",
            ResourceKind::Exercise { .. } => "✏️",
            ResourceKind::Revision { .. } => "📝",
        }
    }

    /// Files that can be downloaded for this resource, main file first.
    pub fn files(&self) -> Vec<&str> {
        match self {
            ResourceKind::Pdf { pdf_file } => vec![pdf_file.as_str()],
            ResourceKind::Video { video_file, .. } => vec![video_file.as_str()],
            ResourceKind::Exercise {
                exercise_file,
                solution_file,
                ..
            } => exercise_file
                .iter()
                .chain(solution_file.iter())
                .map(String::as_str)
                .collect(),
            ResourceKind::Revision { .. } => Vec::new(),
        }
    }
}

/// Topic resource listings wrap each item as `{"resource": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceEnvelope {
    pub resource: Resource,
}

impl From<ResourceEnvelope> for Resource {
    fn from(envelope: ResourceEnvelope) -> Self {
        envelope.resource
    }
}

/// Entry of the class-level video listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResourceEntity {
    pub id: ResourceId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
    pub video_file: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub thumbnail: Option<String>,
}
