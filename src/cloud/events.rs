//! Lifecycle notifications and listener registry.

use crate::model::{CloudError, Word};

/// Something listeners may want to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum CloudEvent {
    /// A populated scene is about to be torn down for a new pass.
    PrePopulate,
    /// The current pass has handled every word.
    PostPopulate,
    /// A word was skipped during the pass.
    PlacementFailed {
        /// Word that got no placement.
        word: Word,
        /// Why.
        error: CloudError,
    },
}

/// Handle returned by [`Listeners::add`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&CloudEvent)>;

/// Ordered set of event callbacks.
#[derive(Default)]
pub struct Listeners {
    entries: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl Listeners {
    /// Register a callback. Callbacks run in registration order.
    pub fn add(&mut self, listener: impl FnMut(&CloudEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Unregister a callback. Returns `false` for unknown ids.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(existing, _)| *existing != id);
        self.entries.len() != before
    }

    /// Deliver `event` to every callback.
    pub fn emit(&mut self, event: &CloudEvent) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No callbacks registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.entries.len())
            .finish()
    }
}
