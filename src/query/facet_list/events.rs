//! Change notifications for [`FacetList`](super::FacetList).
//!
//! Observers are plain callbacks registered on one list. Every notification
//! carries a snapshot of the list taken after the mutation finished, so an
//! observer never sees a half-applied change and never needs to borrow the
//! list itself.

use super::FacetId;
use crate::query::facet::Facet;

/// What happened to the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The whole contents were replaced.
    Reset,
    /// A facet was inserted at `index`.
    Added { id: FacetId, index: usize },
    /// A facet was removed from `index`.
    Removed {
        id: FacetId,
        index: usize,
        facet: Facet,
    },
    /// A facet's value or label changed in place.
    Changed { id: FacetId, index: usize },
}

/// A single notification delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacetListEvent {
    pub kind: EventKind,
    /// The list contents after the mutation, in order.
    pub snapshot: Vec<Facet>,
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub(crate) type Observer = Box<dyn FnMut(&FacetListEvent) + Send>;

/// Registered callbacks, in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    entries: Vec<(SubscriptionId, Observer)>,
    next_id: u64,
}

impl Observers {
    pub(crate) fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Deliver `kind` to every observer. The snapshot is only built when
    /// someone is listening.
    pub(crate) fn notify<F>(&mut self, kind: EventKind, snapshot: F)
    where
        F: FnOnce() -> Vec<Facet>,
    {
        if self.entries.is_empty() {
            return;
        }
        let event = FacetListEvent {
            kind,
            snapshot: snapshot(),
        };
        for (_, observer) in self.entries.iter_mut() {
            observer(&event);
        }
    }
}
