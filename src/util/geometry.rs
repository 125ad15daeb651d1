// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module provides utilities for coordinate transformations between
//! display coordinates (the rendered, possibly scaled and letterboxed video
//! view) and absolute coordinates (the original video frame).

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle with position and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create the axis-aligned rectangle spanned by two corner points.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x: ax.min(bx),
            y: ay.min(by),
            width: (ax - bx).abs(),
            height: (ay - by).abs(),
        }
    }

    /// Check whether the rectangle has no usable area.
    ///
    /// A rectangle is degenerate when either dimension is not strictly
    /// positive, or when any component is not a finite number.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite())
            || !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// The placement of the rendered video image within its container.
///
/// Captures the current scale factor and top-left offset of the video image.
/// Both change whenever the view is resized or the image is letterboxed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl ViewState {
    /// Create a view state from an explicit scale and offset.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Compute the scale and offset for a video frame fitted into a view.
    ///
    /// The image keeps its aspect ratio and is centered, leaving letterbox
    /// bars on whichever axis has spare room.
    pub fn fit(video_width: f64, video_height: f64, view_width: f64, view_height: f64) -> Self {
        if video_width <= 0.0 || video_height <= 0.0 {
            return Self::new(0.0, 0.0, 0.0);
        }

        let video_aspect = video_width / video_height;
        let view_aspect = view_width / view_height;

        let (display_width, display_height) = if video_aspect > view_aspect {
            // Video is wider - fit to width
            let width = view_width;
            let height = width / video_aspect;
            (width, height)
        } else {
            // Video is taller - fit to height
            let height = view_height;
            let width = height * video_aspect;
            (width, height)
        };

        Self {
            scale: display_width / video_width,
            offset_x: (view_width - display_width) / 2.0,
            offset_y: (view_height - display_height) / 2.0,
        }
    }

    /// Check whether the view has a usable scale factor.
    ///
    /// The scale is zero before the video surface has been sized.
    pub fn has_scale(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }
}

/// Convert a display-space rectangle to absolute video pixel coordinates.
///
/// A view state without a usable scale is treated as the identity transform.
pub fn to_absolute(display: Rect, view: &ViewState) -> Rect {
    if !view.has_scale() {
        return display;
    }
    Rect {
        x: (display.x - view.offset_x) / view.scale,
        y: (display.y - view.offset_y) / view.scale,
        width: display.width / view.scale,
        height: display.height / view.scale,
    }
}

/// Convert an absolute video pixel rectangle to display coordinates.
///
/// A view state without a usable scale is treated as the identity transform.
pub fn to_display(absolute: Rect, view: &ViewState) -> Rect {
    if !view.has_scale() {
        return absolute;
    }
    Rect {
        x: absolute.x * view.scale + view.offset_x,
        y: absolute.y * view.scale + view.offset_y,
        width: absolute.width * view.scale,
        height: absolute.height * view.scale,
    }
}
