use edutrail_core::serde::deserialize_null_as_empty;
use serde::{Deserialize, Serialize};

use crate::ids::SubjectId;

/// A subject taught in a class. The owning class is implied by the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectEntity {
    pub id: SubjectId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub description: String,
}
