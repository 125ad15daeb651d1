// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Canonical in-memory annotation set.
//!
//! This module holds the authoritative mapping from annotation identifier to
//! annotation, and answers temporal "active set" queries against it. The
//! store itself is not thread-safe; all access is funnelled through the
//! controller's single event queue.

use crate::models::annotation::Annotation;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// The canonical set of all known annotations, keyed by identifier.
///
/// Malformed geometry is rejected at the translation boundaries before it
/// reaches the store, so none of these operations are fallible.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    annotations: HashMap<Uuid, Annotation>,
}

impl AnnotationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a batch of annotations.
    ///
    /// Existing entries with the same identifier are replaced, so applying
    /// the same batch twice yields the same state as applying it once.
    pub fn upsert<I>(&mut self, annotations: I)
    where
        I: IntoIterator<Item = Annotation>,
    {
        for annotation in annotations {
            self.annotations.insert(annotation.id, annotation);
        }
    }

    /// Remove the annotations with the given identifiers.
    ///
    /// Removing an absent identifier is a no-op, not an error.
    pub fn remove(&mut self, ids: &HashSet<Uuid>) {
        for id in ids {
            self.annotations.remove(id);
        }
    }

    /// Get the annotations active at the given playback time.
    ///
    /// An annotation is active when `start_time <= time < start_time +
    /// duration`. The result is ordered by start time ascending, with ties
    /// broken by identifier so the order is total and deterministic.
    pub fn active_at(&self, time: u64) -> Vec<Annotation> {
        let mut active: Vec<Annotation> = self
            .annotations
            .values()
            .filter(|annotation| annotation.active_at(time))
            .cloned()
            .collect();
        active.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        active
    }

    /// Look up a single annotation by identifier.
    pub fn get(&self, id: &Uuid) -> Option<&Annotation> {
        self.annotations.get(id)
    }

    /// Check whether an annotation with the given identifier is present.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.annotations.contains_key(id)
    }

    /// Number of annotations in the store.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Remove all annotations.
    pub fn reset(&mut self) {
        self.annotations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::geometry::Rect;

    fn annotation(start_time: u64, duration: u64) -> Annotation {
        let mut annotation = Annotation::new(start_time, Rect::new(0.0, 0.0, 10.0, 10.0));
        annotation.duration = duration;
        annotation
    }

    #[test]
    fn test_upsert_is_idempotent() {
        let mut store = AnnotationStore::new();
        let a = annotation(1000, 2000);

        store.upsert([a.clone()]);
        store.upsert([a.clone()]);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&a.id), Some(&a));
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut store = AnnotationStore::new();
        let mut a = annotation(1000, 2000);
        store.upsert([a.clone()]);

        a.caption = Some("updated".to_string());
        store.upsert([a.clone()]);

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.get(&a.id).and_then(|s| s.caption.clone()),
            Some("updated".to_string())
        );
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut store = AnnotationStore::new();
        let a = annotation(1000, 2000);
        store.upsert([a.clone()]);

        let mut ids = HashSet::new();
        ids.insert(Uuid::new_v4());
        store.remove(&ids);

        assert_eq!(store.len(), 1);

        ids.insert(a.id);
        store.remove(&ids);

        assert!(store.is_empty());
    }

    #[test]
    fn test_active_at_interval_bounds() {
        let mut store = AnnotationStore::new();
        let a = annotation(1000, 2000);
        let b = annotation(4000, 1000);
        store.upsert([a.clone(), b.clone()]);

        let at = |t: u64| -> Vec<Uuid> { store.active_at(t).iter().map(|x| x.id).collect() };

        assert_eq!(at(2000), vec![a.id]);
        assert_eq!(at(4500), vec![b.id]);
        assert_eq!(at(3500), Vec::<Uuid>::new());
        // Interval is half-open: end time is exclusive
        assert_eq!(at(2999), vec![a.id]);
        assert_eq!(at(3000), Vec::<Uuid>::new());
    }

    #[test]
    fn test_active_at_ordering_is_deterministic() {
        let mut store = AnnotationStore::new();
        let mut annotations = vec![
            annotation(2000, 5000),
            annotation(1000, 5000),
            annotation(1000, 5000),
            annotation(3000, 5000),
        ];
        store.upsert(annotations.clone());

        let active = store.active_at(4000);

        annotations.sort_by(|a, b| {
            a.start_time
                .cmp(&b.start_time)
                .then_with(|| a.id.cmp(&b.id))
        });
        let expected: Vec<Uuid> = annotations.iter().map(|a| a.id).collect();
        let actual: Vec<Uuid> = active.iter().map(|a| a.id).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_reset_clears_all() {
        let mut store = AnnotationStore::new();
        store.upsert([annotation(0, 1000), annotation(500, 1000)]);

        store.reset();

        assert!(store.is_empty());
        assert!(store.active_at(500).is_empty());
    }
}
