use edutrail_core::serde::deserialize_null_as_empty;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::ChapterId;
use crate::ordering::Ordered;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterEntity {
    pub id: ChapterId,
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
    pub order: i32,
}

impl Ordered for ChapterEntity {
    type Id = ChapterId;

    fn id(&self) -> ChapterId {
        self.id
    }

    fn order(&self) -> i32 {
        self.order
    }

    fn set_order(&mut self, order: i32) {
        self.order = order;
    }
}

/// Partial chapter update. Absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UpdateChapterDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1))]
    pub order: Option<i32>,
}

impl UpdateChapterDto {
    /// An update carrying only an absolute position.
    pub fn order(order: i32) -> Self {
        Self {
            order: Some(order),
            ..Self::default()
        }
    }
}
