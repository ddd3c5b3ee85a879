//! Cart observers
//!
//! Hooks for presentation layers that want to react to cart changes, e.g.
//! by showing a transient confirmation. Observers are advisory: they cannot
//! veto or alter a mutation.

use crate::cart::CartLine;

/// Receives notifications about cart mutations.
///
/// All methods default to doing nothing.
pub trait CartObserver {
    /// Called after an item was added, with the line as it now stands.
    ///
    /// Fires for every add, including ones merged into an existing line.
    fn on_item_added(&mut self, _line: &CartLine) {}

    /// Called after a line was removed from the cart.
    fn on_item_removed(&mut self, _line: &CartLine) {}

    /// Called after a non-empty cart was cleared, with the number of lines dropped.
    fn on_cleared(&mut self, _lines: usize) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl CartObserver for NoopObserver {}

impl<O: CartObserver + ?Sized> CartObserver for &mut O {
    fn on_item_added(&mut self, line: &CartLine) {
        (**self).on_item_added(line);
    }

    fn on_item_removed(&mut self, line: &CartLine) {
        (**self).on_item_removed(line);
    }

    fn on_cleared(&mut self, lines: usize) {
        (**self).on_cleared(lines);
    }
}
