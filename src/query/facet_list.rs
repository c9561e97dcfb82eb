//! Ordered, mutable collection of facets
//!
//! Insertion order is the left-to-right order of the query string and is never
//! changed implicitly. Duplicate categories are allowed; each one is a separate
//! constraint. Every inserted facet gets a [`FacetId`] so it can be removed or
//! edited by identity, even when another facet has the same category and value.
//!
//! Lookups by category ignore case and are linear scans: a list holds as many
//! facets as a user can see in a search box.

pub mod events;

use std::slice;

use tracing::debug;

pub use self::events::{EventKind, FacetListEvent, SubscriptionId};
use self::events::Observers;
use super::config::QueryConfig;
use super::facet::Facet;
use super::serializing;

/// Identity of a facet within one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FacetId(u64);

#[derive(Debug, Clone)]
struct Entry {
    id: FacetId,
    facet: Facet,
}

/// Ordered sequence of [`Facet`]s with change notifications.
#[derive(Default)]
pub struct FacetList {
    entries: Vec<Entry>,
    next_id: u64,
    observers: Observers,
}

fn snapshot_of(entries: &[Entry]) -> Vec<Facet> {
    entries.iter().map(|entry| entry.facet.clone()).collect()
}

impl FacetList {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> FacetId {
        let id = FacetId(self.next_id);
        self.next_id += 1;
        id
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Replace the entire contents, keeping the given order.
    pub fn reset<I>(&mut self, facets: I)
    where
        I: IntoIterator<Item = Facet>,
    {
        let facets: Vec<Facet> = facets.into_iter().collect();
        let mut entries = Vec::with_capacity(facets.len());
        for facet in facets {
            entries.push(Entry {
                id: self.next_id(),
                facet,
            });
        }
        self.entries = entries;
        debug!(facets = self.entries.len(), "facet list reset");
        self.observers
            .notify(EventKind::Reset, || snapshot_of(&self.entries));
    }

    /// Append a facet.
    pub fn add(&mut self, facet: Facet) -> FacetId {
        self.insert(self.entries.len(), facet)
    }

    /// Insert a facet at `position`. Positions past the end append.
    pub fn insert(&mut self, position: usize, facet: Facet) -> FacetId {
        let index = position.min(self.entries.len());
        let id = self.next_id();
        debug!(category = %facet.category, index, "facet added");
        self.entries.insert(index, Entry { id, facet });
        self.observers
            .notify(EventKind::Added { id, index }, || snapshot_of(&self.entries));
        id
    }

    /// Remove a facet by identity. Absent ids are ignored.
    pub fn remove(&mut self, id: FacetId) -> Option<Facet> {
        let index = self.position(id)?;
        let facet = self.entries.remove(index).facet;
        debug!(category = %facet.category, index, "facet removed");
        self.observers.notify(
            EventKind::Removed {
                id,
                index,
                facet: facet.clone(),
            },
            || snapshot_of(&self.entries),
        );
        Some(facet)
    }

    /// Set a facet's value in place (trimmed). Returns false for unknown ids.
    ///
    /// An empty value is stored as-is; call [`prune_empty`](Self::prune_empty)
    /// to drop such facets.
    pub fn update_value(&mut self, id: FacetId, value: impl AsRef<str>) -> bool {
        self.change(id, |facet| facet.set_value(value))
    }

    /// Set or clear a facet's display label.
    pub fn set_label(&mut self, id: FacetId, label: Option<String>) -> bool {
        self.change(id, |facet| facet.label = label)
    }

    fn change<F>(&mut self, id: FacetId, edit: F) -> bool
    where
        F: FnOnce(&mut Facet),
    {
        let Some(index) = self.position(id) else {
            return false;
        };
        edit(&mut self.entries[index].facet);
        self.observers
            .notify(EventKind::Changed { id, index }, || snapshot_of(&self.entries));
        true
    }

    /// Remove every facet whose value is empty. Returns how many were removed.
    pub fn prune_empty(&mut self) -> usize {
        let empty: Vec<FacetId> = self
            .entries
            .iter()
            .filter(|entry| entry.facet.is_empty())
            .map(|entry| entry.id)
            .collect();
        for id in &empty {
            self.remove(*id);
        }
        empty.len()
    }

    // ------------------------------------------------------------------
    // Observers
    // ------------------------------------------------------------------

    /// Register a callback for every mutation of this list.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&FacetListEvent) + Send + 'static,
    {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Access
    // ------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: FacetId) -> Option<&Facet> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| &entry.facet)
    }

    pub fn position(&self, id: FacetId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.id == id)
    }

    /// Id of the facet at `index`.
    pub fn id_at(&self, index: usize) -> Option<FacetId> {
        self.entries.get(index).map(|entry| entry.id)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    pub fn iter_with_ids(&self) -> impl Iterator<Item = (FacetId, &Facet)> + '_ {
        self.entries.iter().map(|entry| (entry.id, &entry.facet))
    }

    /// Clone the current contents, in order.
    pub fn to_vec(&self) -> Vec<Facet> {
        snapshot_of(&self.entries)
    }

    /// Ordered `(category, value)` pairs.
    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.iter()
            .map(|facet| (facet.category.as_str(), facet.value()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Lookup by category (case-insensitive)
    // ------------------------------------------------------------------

    /// Value of the first facet with this category.
    pub fn find(&self, category: &str) -> Option<&str> {
        self.iter()
            .find(|facet| facet.is_category(category))
            .map(Facet::value)
    }

    pub fn count(&self, category: &str) -> usize {
        self.iter().filter(|facet| facet.is_category(category)).count()
    }

    /// All values for a category, in list order.
    pub fn values(&self, category: &str) -> Vec<&str> {
        self.iter()
            .filter(|facet| facet.is_category(category))
            .map(Facet::value)
            .collect()
    }

    /// Whether any facet has this category, and this exact value if given.
    pub fn has(&self, category: &str, value: Option<&str>) -> bool {
        self.iter().any(|facet| {
            facet.is_category(category) && value.map_or(true, |value| facet.value() == value)
        })
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    pub fn serialize(&self, config: &QueryConfig) -> String {
        serializing::serialize(self, config)
    }

    /// Serialize everything except facets in `categories` (case-insensitive).
    pub fn serialize_excluding(&self, config: &QueryConfig, categories: &[&str]) -> String {
        serializing::serialize(
            self.iter()
                .filter(|facet| !categories.iter().any(|category| facet.is_category(category))),
            config,
        )
    }
}

impl std::fmt::Debug for FacetList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacetList")
            .field("facets", &self.entries)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl From<Vec<Facet>> for FacetList {
    fn from(facets: Vec<Facet>) -> Self {
        let mut list = FacetList::new();
        list.reset(facets);
        list
    }
}

impl FromIterator<Facet> for FacetList {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        let mut list = FacetList::new();
        list.reset(iter);
        list
    }
}

/// Iterator over the facets of a [`FacetList`], in order.
pub struct Iter<'a> {
    inner: slice::Iter<'a, Entry>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Facet;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|entry| &entry.facet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a FacetList {
    type Item = &'a Facet;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::testing::assert_facets;
    use std::sync::{Arc, Mutex};

    fn sample() -> FacetList {
        FacetList::from(vec![
            Facet::new("tag", "a"),
            Facet::new("Status", "open"),
            Facet::new("tag", "b"),
            Facet::new("text", "free words"),
        ])
    }

    #[test]
    fn lookups_ignore_category_case() {
        let list = sample();
        assert_eq!(list.find("status"), Some("open"));
        assert_eq!(list.find("TAG"), Some("a"));
        assert_eq!(list.find("missing"), None);
        assert_eq!(list.count("tag"), 2);
        assert_eq!(list.values("Tag"), vec!["a", "b"]);
        assert!(list.has("tag", None));
        assert!(list.has("tag", Some("b")));
        assert!(!list.has("tag", Some("B")));
        assert!(!list.has("owner", None));
    }

    #[test]
    fn insert_respects_position_and_clamps() {
        let mut list = sample();
        list.insert(1, Facet::new("owner", "me"));
        list.insert(99, Facet::new("last", "x"));
        assert_facets(&list)
            .count(6)
            .categories(&["tag", "owner", "Status", "tag", "text", "last"]);
    }

    #[test]
    fn remove_is_by_identity() {
        let mut list = FacetList::new();
        let first = list.add(Facet::new("tag", "a"));
        let second = list.add(Facet::new("tag", "a"));
        assert_eq!(list.remove(second), Some(Facet::new("tag", "a")));
        assert_eq!(list.len(), 1);
        assert_eq!(list.id_at(0), Some(first));
        assert_eq!(list.remove(second), None);
    }

    #[test]
    fn update_in_place_and_prune() {
        let mut list = sample();
        let id = list.id_at(1).expect("second facet");
        assert!(list.update_value(id, "  closed "));
        assert_eq!(list.find("status"), Some("closed"));

        assert!(list.update_value(id, "   "));
        assert_eq!(list.prune_empty(), 1);
        assert_facets(&list).values(&["a", "b", "free words"]);
    }

    #[test]
    fn set_label_does_not_change_value() {
        let mut list = sample();
        let id = list.id_at(0).expect("first facet");
        assert!(list.set_label(id, Some("Tag A".into())));
        assert_facets(&list).facet_with(0, |f| {
            f.value("a").label("Tag A");
        });
    }

    #[test]
    fn pairs_keep_order() {
        assert_eq!(
            sample().pairs(),
            vec![
                ("tag", "a"),
                ("Status", "open"),
                ("tag", "b"),
                ("text", "free words")
            ]
        );
    }

    #[test]
    fn serialize_excluding_skips_categories() {
        let config = QueryConfig::default();
        let list = sample();
        assert_eq!(
            list.serialize(&config),
            "tag: a Status: open tag: b free words"
        );
        assert_eq!(
            list.serialize_excluding(&config, &["TAG"]),
            "Status: open free words"
        );
    }

    #[test]
    fn observers_receive_post_mutation_snapshots() {
        let seen: Arc<Mutex<Vec<(EventKind, usize)>>> = Arc::default();
        let sink = Arc::clone(&seen);
        let mut list = FacetList::new();
        let subscription = list.subscribe(move |event| {
            if let Ok(mut seen) = sink.lock() {
                seen.push((event.kind.clone(), event.snapshot.len()));
            }
        });

        let id = list.add(Facet::new("tag", "a"));
        list.update_value(id, "b");
        list.remove(id);
        list.reset(vec![Facet::new("x", "1"), Facet::new("y", "2")]);
        assert!(list.unsubscribe(subscription));
        list.add(Facet::new("ignored", "z"));

        let seen = seen.lock().expect("observer log");
        assert_eq!(
            *seen,
            vec![
                (EventKind::Added { id, index: 0 }, 1),
                (EventKind::Changed { id, index: 0 }, 1),
                (
                    EventKind::Removed {
                        id,
                        index: 0,
                        facet: Facet::new("tag", "b")
                    },
                    0
                ),
                (EventKind::Reset, 2),
            ]
        );
    }

    #[test]
    fn ids_are_never_reused() {
        let mut list = FacetList::new();
        let a = list.add(Facet::new("tag", "a"));
        list.remove(a);
        let b = list.add(Facet::new("tag", "a"));
        assert_ne!(a, b);
        list.reset(vec![Facet::new("tag", "a")]);
        assert_ne!(list.id_at(0), Some(b));
    }
}
