//! Drag-and-drop reordering of chapters and topics.
//!
//! A move is a single-element remove-then-insert. After it, every sibling is
//! renumbered `order = index + 1`, and only the siblings whose order actually
//! changed need an update request. Each request carries the absolute target
//! order, so resending one is safe.

use edutrail_core::{ApiError, ReorderError};
use edutrail_models::Ordered;

use super::store::SiblingRef;

/// Result of moving one item: the reordered list and the `(id, new_order)` pairs to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderPlan<T: Ordered> {
    pub items: Vec<T>,
    pub changes: Vec<(T::Id, i32)>,
}

/// Moves `items[from]` to position `to`, then renumbers densely.
pub fn plan_move<T>(items: &[T], from: usize, to: usize) -> Result<ReorderPlan<T>, ReorderError>
where
    T: Ordered + Clone,
{
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(ReorderError::IndexOutOfRange { index, len });
        }
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);

    let changes = renumber(&mut reordered);
    Ok(ReorderPlan {
        items: reordered,
        changes,
    })
}

/// Assigns `order = index + 1` and reports the items whose order changed.
pub fn renumber<T: Ordered>(items: &mut [T]) -> Vec<(T::Id, i32)> {
    let mut changes = Vec::new();
    for (index, item) in items.iter_mut().enumerate() {
        let order = index as i32 + 1;
        if item.order() != order {
            item.set_order(order);
            changes.push((item.id(), order));
        }
    }
    changes
}

/// Outcome of pushing reordered positions to the backend.
///
/// The local list has already been updated; failures are not rolled back.
#[derive(Debug, Clone, Default)]
pub struct ReorderReport {
    pub confirmed: Vec<SiblingRef>,
    pub failed: Vec<(SiblingRef, ApiError)>,
}

impl ReorderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn requests_sent(&self) -> usize {
        self.confirmed.len() + self.failed.len()
    }
}
