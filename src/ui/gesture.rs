// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Drag-to-create gesture state machine.
//!
//! This module tracks pointer press/drag/release and the cancel key over the
//! video surface, producing a candidate rectangle in display coordinates
//! plus the playback time captured at press. It performs no rendering; the
//! caller shows the current candidate however it sees fit.

use crate::util::geometry::Rect;

/// Output of a completed drag: the candidate rectangle in display
/// coordinates and the playback time when the drag started.
#[derive(Debug, Clone, PartialEq)]
pub struct DragCandidate {
    pub bounds: Rect,
    pub press_time: u64,
}

#[derive(Debug)]
enum DragState {
    Idle,
    Dragging {
        anchor_x: f64,
        anchor_y: f64,
        press_time: u64,
        candidate: Rect,
    },
}

/// Tracks an in-progress drag over the video surface.
///
/// The pointer is clamped during the drag, not after release, so the
/// candidate rectangle is always valid to show and can never extend past the
/// border inset band of the video image.
#[derive(Debug)]
pub struct DragGesture {
    border_inset: f64,
    state: DragState,
}

impl DragGesture {
    /// Create a gesture tracker with the given border inset, in display
    /// pixels.
    pub fn new(border_inset: f64) -> Self {
        Self {
            border_inset,
            state: DragState::Idle,
        }
    }

    /// Start a drag at the given display position.
    ///
    /// `playback_time` is the elapsed video time in milliseconds at the
    /// moment of the press; it becomes the start time of any annotation
    /// created from this drag. A press during an active drag restarts it.
    pub fn press(&mut self, x: f64, y: f64, view_width: f64, view_height: f64, playback_time: u64) {
        let x = self.clamp(x, view_width);
        let y = self.clamp(y, view_height);
        log::debug!("press x={} y={} time={}", x, y, playback_time);

        self.state = DragState::Dragging {
            anchor_x: x,
            anchor_y: y,
            press_time: playback_time,
            candidate: Rect::new(x, y, 0.0, 0.0),
        };
    }

    /// Update the drag with a new pointer position.
    ///
    /// The candidate becomes the axis-aligned box between the anchor and the
    /// pointer, with the pointer clamped inside the video's display bounds
    /// minus the border inset. A move while idle is ignored.
    pub fn drag(&mut self, x: f64, y: f64, view_width: f64, view_height: f64) {
        let x = self.clamp(x, view_width);
        let y = self.clamp(y, view_height);

        if let DragState::Dragging {
            anchor_x,
            anchor_y,
            candidate,
            ..
        } = &mut self.state
        {
            *candidate = Rect::from_corners(*anchor_x, *anchor_y, x, y);
        }
    }

    /// Finish the drag.
    ///
    /// Emits the candidate only when it has positive width and height; a
    /// zero-area drag is silently discarded. A release while idle is ignored.
    pub fn release(&mut self) -> Option<DragCandidate> {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => None,
            DragState::Dragging {
                press_time,
                candidate,
                ..
            } => {
                log::debug!("release candidate: w={} h={}", candidate.width, candidate.height);
                if candidate.width > 0.0 && candidate.height > 0.0 {
                    Some(DragCandidate {
                        bounds: candidate,
                        press_time,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// Abort any in-progress drag without emitting a candidate.
    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }

    /// Check whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The current candidate rectangle, for the caller to show.
    pub fn candidate(&self) -> Option<Rect> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { candidate, .. } => Some(*candidate),
        }
    }

    fn clamp(&self, value: f64, extent: f64) -> f64 {
        let high = (extent - self.border_inset).max(self.border_inset);
        value.clamp(self.border_inset, high)
    }
}
