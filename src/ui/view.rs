// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Presentation surface contract.
//!
//! This module defines the interface the controller drives to keep the
//! on-screen annotation overlay in step with the canonical store, plus a
//! helper index surfaces use to map annotation identifiers to their visual
//! handles. The surface owns only transient display state rebuilt from
//! controller pushes; it is never a source of truth.

use crate::models::annotation::Annotation;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Receives annotation display instructions from the controller.
///
/// All calls are instructions, not queries; a surface has no feedback
/// channel into the core other than emitting gesture events.
pub trait AnnotationView {
    /// Show a single annotation.
    ///
    /// Adding an identifier that is already shown must leave the existing
    /// visual in place.
    fn add(&mut self, annotation: &Annotation);

    /// Show a batch of annotations.
    fn add_all(&mut self, annotations: &[Annotation]) {
        for annotation in annotations {
            self.add(annotation);
        }
    }

    /// Drop the visuals for the given identifiers. Absent identifiers are
    /// ignored.
    fn remove(&mut self, ids: &HashSet<Uuid>);

    /// Mark the given annotations as selected.
    fn select(&mut self, ids: &[Uuid]);

    /// Clear the selection mark from the given annotations.
    fn deselect(&mut self, ids: &[Uuid]);

    /// Reconcile the visible set to exactly the given sequence.
    ///
    /// Stale visuals are removed, existing ones updated in place, missing
    /// ones added. Delivering the same sequence twice must produce no
    /// visible change the second time.
    fn set_active(&mut self, annotations: &[Annotation]);

    /// Remove every annotation visual.
    fn reset(&mut self);
}

/// Mapping from annotation identifier to a surface-owned visual handle.
///
/// Surfaces keep one of these instead of inspecting their scene graph for
/// annotation visuals by type. It also supplies the symmetric-difference
/// computation that `set_active` reconciliation needs.
#[derive(Debug, Default)]
pub struct VisualIndex<H> {
    handles: HashMap<Uuid, H>,
}

impl<H> VisualIndex<H> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
        }
    }

    /// Associate a visual handle with an annotation identifier, replacing
    /// any previous handle.
    pub fn insert(&mut self, id: Uuid, handle: H) -> Option<H> {
        self.handles.insert(id, handle)
    }

    /// Remove and return the handle for an identifier, if present.
    pub fn remove(&mut self, id: &Uuid) -> Option<H> {
        self.handles.remove(id)
    }

    /// Look up the handle for an identifier.
    pub fn get(&self, id: &Uuid) -> Option<&H> {
        self.handles.get(id)
    }

    /// Mutable handle lookup.
    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut H> {
        self.handles.get_mut(id)
    }

    /// Check whether an identifier has a visual.
    pub fn contains(&self, id: &Uuid) -> bool {
        self.handles.contains_key(id)
    }

    /// Iterate over the identifiers currently shown.
    pub fn ids(&self) -> impl Iterator<Item = &Uuid> {
        self.handles.keys()
    }

    /// Number of visuals in the index.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Check whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// The identifiers shown but absent from the given active set.
    ///
    /// These are the visuals a `set_active` reconciliation must remove.
    pub fn stale_ids(&self, active: &[Annotation]) -> HashSet<Uuid> {
        let active_ids: HashSet<Uuid> = active.iter().map(|a| a.id).collect();
        self.handles
            .keys()
            .filter(|id| !active_ids.contains(id))
            .copied()
            .collect()
    }

    /// Drop all handles.
    pub fn clear(&mut self) {
        self.handles.clear();
    }
}
