//! Zero-argument notification hooks.

use std::fmt;

type Callback = Box<dyn FnMut()>;

/// An ordered list of observers for one event type.
///
/// Observers run in registration order. Owners fire a hook at most once per
/// state transition; the hook itself does not deduplicate.
#[derive(Default)]
pub struct Hook {
    observers: Vec<Callback>,
}

impl Hook {
    /// A hook with no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Run every observer once.
    pub fn emit(&mut self) {
        for observer in &mut self.observers {
            observer();
        }
    }

    /// Number of registered observers.
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observer is registered.
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook")
            .field("observers", &self.observers.len())
            .finish()
    }
}
