//! Hierarchical browsing: Class → Subject → Chapter → Topic → Resource.
//!
//! - [`level`]: The five levels and their ordering
//! - [`store`]: Persisted selections plus in-memory collections
//! - [`controller`]: Forward/backward transitions and reordering
//! - [`restore`]: Refetching collections lost on reload
//! - [`breadcrumb`]: The clickable trail
//! - [`reorder`]: Move-and-renumber of ordered siblings

pub mod breadcrumb;
pub mod controller;
pub mod level;
pub mod reorder;
pub mod restore;
pub mod store;

pub use breadcrumb::{Breadcrumb, breadcrumbs, heading};
pub use controller::{LevelController, Transition};
pub use level::Level;
pub use reorder::ReorderReport;
pub use restore::RestoreReport;
pub use store::{NavigationStore, OrderSync, PersistedNavigation, SharedStore, SiblingRef};
