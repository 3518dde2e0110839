//! # Edutrail Models
//!
//! View records for the Class → Subject → Chapter → Topic → Resource hierarchy,
//! as served by the REST backend, plus the update DTOs the client sends back.
//!
//! The client never originates identity: every id is assigned by the backend
//! and wrapped in a newtype from [`ids`].
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed entity ids
//! - [`classes`]: Classes, sections and education levels
//! - [`subjects`]: Subjects of a class
//! - [`chapters`]: Chapters of a subject and their update DTO
//! - [`topics`]: Topics of a chapter and their update DTO
//! - [`resources`]: The polymorphic learning resource
//! - [`ordering`]: Shared behaviour of sibling lists with an `order` column

pub mod chapters;
pub mod classes;
pub mod ids;
pub mod ordering;
pub mod resources;
pub mod subjects;
pub mod topics;

pub use chapters::{ChapterEntity, UpdateChapterDto};
pub use classes::{ClassEntity, EducationLevel, Section};
pub use ids::{ChapterId, ClassId, ResourceId, SubjectId, TopicId};
pub use ordering::Ordered;
pub use resources::{Resource, ResourceEnvelope, ResourceKind, VideoResourceEntity};
pub use subjects::SubjectEntity;
pub use topics::{TopicEntity, UpdateTopicDto};
