//! Strongly-typed ID newtypes for hierarchy entities.
//!
//! The backend assigns integer primary keys. Wrapping them keeps a `TopicId`
//! from being passed where a `ChapterId` is expected.
//!
//! ```ignore
//! use edutrail_models::ids::{ClassId, SubjectId};
//!
//! fn open_subject(class: ClassId, subject: SubjectId) { /* ... */ }
//!
//! open_subject(ClassId::new(1), SubjectId::new(4));   // OK
//! // open_subject(SubjectId::new(4), ClassId::new(1)); // Compile error
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Defines a transparent `i64` id newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[inline]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            #[inline]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            #[inline]
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            #[inline]
            fn from(id: $name) -> i64 {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse().map(Self)
            }
        }
    };
}

define_id!(
    /// Id of a class, the root of the hierarchy.
    ClassId
);

define_id!(
    /// Id of a subject within a class.
    SubjectId
);

define_id!(
    /// Id of a chapter within a subject.
    ChapterId
);

define_id!(
    /// Id of a topic within a chapter.
    TopicId
);

define_id!(
    /// Id of a learning resource.
    ResourceId
);
