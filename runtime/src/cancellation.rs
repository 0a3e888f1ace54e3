//! Registry of running cancellable effects.
//!
//! Each [`EffectId`] maps to at most one live task. Registering a new task
//! under an id that is already taken aborts the previous holder first, which
//! is what gives `Effect::Cancellable` its cancel-in-flight behaviour.

use cinelog_core::effect::EffectId;
use futures::future::AbortHandle;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ticket returned by [`Cancellations::register`].
///
/// Used to deregister only if the slot still belongs to the same task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ticket(u64);

/// Shared map of id → abort handle.
#[derive(Debug, Clone, Default)]
pub(crate) struct Cancellations {
    slots: Arc<Mutex<HashMap<EffectId, (Ticket, AbortHandle)>>>,
    next_ticket: Arc<AtomicU64>,
}

impl Cancellations {
    fn slots(&self) -> MutexGuard<'_, HashMap<EffectId, (Ticket, AbortHandle)>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handle` under `id`, aborting whatever held the id before.
    ///
    /// Returns the ticket for the new registration and whether a previous
    /// task was aborted.
    pub(crate) fn register(&self, id: EffectId, handle: AbortHandle) -> (Ticket, bool) {
        let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::Relaxed));
        let previous = self.slots().insert(id, (ticket, handle));
        if let Some((_, old)) = &previous {
            old.abort();
        }
        (ticket, previous.is_some())
    }

    /// Abort and remove the task registered under `id`.
    ///
    /// Returns `false` if nothing was registered.
    pub(crate) fn cancel(&self, id: &EffectId) -> bool {
        let removed = self.slots().remove(id);
        match removed {
            Some((_, handle)) => {
                handle.abort();
                true
            },
            None => false,
        }
    }

    /// Remove the registration for `id` if it still carries `ticket`.
    pub(crate) fn release(&self, id: &EffectId, ticket: Ticket) {
        let mut slots = self.slots();
        if slots.get(id).is_some_and(|(current, _)| *current == ticket) {
            slots.remove(id);
        }
    }

    /// Abort every registered task.
    pub(crate) fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.slots().drain().collect();
        for (_, (_, handle)) in &drained {
            handle.abort();
        }
        drained.len()
    }

    /// Number of live registrations.
    pub(crate) fn len(&self) -> usize {
        self.slots().len()
    }
}
