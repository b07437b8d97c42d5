//! Gates: shared open/closed preconditions for attaching a binding.

use std::cell::Cell;
use std::rc::Rc;

/// A shared boolean precondition.
///
/// Clones observe and mutate the same state, so whoever drives a gate (socket
/// events, lock hooks) and the binding that checks it only need a handle.
#[derive(Debug, Clone)]
pub struct Gate {
    open: Rc<Cell<bool>>,
}

impl Gate {
    /// A gate in the given state.
    pub fn new(open: bool) -> Self {
        Self {
            open: Rc::new(Cell::new(open)),
        }
    }

    /// A gate that allows attaching.
    pub fn open() -> Self {
        Self::new(true)
    }

    /// A gate that refuses attaching.
    pub fn locked() -> Self {
        Self::new(false)
    }

    /// Whether a binding may attach right now.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Open the gate for every clone.
    pub fn unlock(&self) {
        self.open.set(true);
    }

    /// Close the gate for every clone.
    pub fn lock(&self) {
        self.open.set(false);
    }

    /// Set the shared state directly.
    pub fn set_open(&self, open: bool) {
        self.open.set(open);
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::open()
    }
}
