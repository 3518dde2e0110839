//! Sibling lists with a dense `order` column.

use std::fmt::Debug;
use std::hash::Hash;

/// An entity whose position among its siblings is stored as `order`.
///
/// After any reorder the siblings' orders form the sequence `1..=N`.
pub trait Ordered {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
    fn order(&self) -> i32;
    fn set_order(&mut self, order: i32);
}

/// Sorts siblings by their `order`, keeping backend order for ties.
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}

/// Whether the orders are exactly `1..=N` in list position.
pub fn is_dense<T: Ordered>(items: &[T]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(index, item)| item.order() == index as i32 + 1)
}
