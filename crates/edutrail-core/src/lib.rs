//! # Edutrail Core
//!
//! Foundational types shared by every edutrail crate:
//!
//! - [`errors`]: The error taxonomy surfaced to callers of the navigation layer
//! - [`serde`]: Custom serde deserialization helpers for backend payloads
//!
//! # Example
//!
//! ```ignore
//! use edutrail_core::{ApiError, NavError};
//!
//! let err = ApiError::from_response_body(404, r#"{"detail": "Not found."}"#);
//! let nav: NavError = err.into();
//! println!("{}", nav.user_message());
//! ```

pub mod errors;
pub mod serde;

pub use errors::{ApiError, NavError, PreconditionError, ReorderError};
