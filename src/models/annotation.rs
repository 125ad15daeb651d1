// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation data structures.
//!
//! This module defines the core data structure for a timed, spatially
//! bounded, captioned region associated with a video.

use crate::util::geometry::Rect;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A timed region annotation.
///
/// `bounds` is always in absolute video pixel coordinates, independent of any
/// current view scale. The `id` is assigned once at creation and is the sole
/// key for identity-based operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: Uuid,
    /// Elapsed time in the video, in milliseconds, when the annotation starts.
    pub start_time: u64,
    /// How long the annotation remains active, in milliseconds.
    pub duration: u64,
    /// Bounding rectangle in absolute video pixel coordinates.
    pub bounds: Rect,
    pub caption: Option<String>,
    /// Classification label, populated only from remote records.
    pub concept: Option<String>,
    /// UI-only selection flag, never forwarded to the remote store.
    #[serde(default)]
    pub selected: bool,
}

impl Annotation {
    /// Create a new annotation with a freshly generated identifier.
    pub fn new(start_time: u64, bounds: Rect) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            duration: 0,
            bounds,
            caption: None,
            concept: None,
            selected: false,
        }
    }

    /// The time, in milliseconds, at which the annotation stops being active.
    pub fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Check whether the annotation is active at the given playback time.
    pub fn active_at(&self, time: u64) -> bool {
        self.start_time <= time && time < self.end_time()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_annotation_defaults() {
        let annotation = Annotation::new(5000, Rect::new(10.0, 10.0, 50.0, 30.0));

        assert_eq!(annotation.start_time, 5000);
        assert_eq!(annotation.duration, 0);
        assert_eq!(annotation.caption, None);
        assert_eq!(annotation.concept, None);
        assert!(!annotation.selected);
    }

    #[test]
    fn test_fresh_identifiers_are_unique() {
        let bounds = Rect::new(0.0, 0.0, 1.0, 1.0);
        let a = Annotation::new(0, bounds);
        let b = Annotation::new(0, bounds);

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_active_interval_is_half_open() {
        let mut annotation = Annotation::new(1000, Rect::new(0.0, 0.0, 1.0, 1.0));
        annotation.duration = 2000;

        assert!(!annotation.active_at(999));
        assert!(annotation.active_at(1000));
        assert!(annotation.active_at(2999));
        assert!(!annotation.active_at(3000));
    }

    #[test]
    fn test_zero_duration_is_never_active() {
        let annotation = Annotation::new(1000, Rect::new(0.0, 0.0, 1.0, 1.0));

        assert!(!annotation.active_at(1000));
    }
}
