// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation behaviour settings.
//!
//! This module defines the settings consumed by the annotation controller
//! and the drag gesture. Settings are injected at construction; the core
//! never reaches into ambient global state for them.

use serde::{Deserialize, Serialize};

/// Settings controlling annotation creation and display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Caption assigned to newly created local annotations.
    #[serde(default = "default_caption")]
    pub default_caption: String,
    /// Display window, in seconds, substituted when a remote record carries
    /// no duration, and used as the lifetime of new local annotations.
    #[serde(default = "default_display_window_seconds")]
    pub display_window_seconds: u64,
    /// Inset, in display pixels, keeping drag rectangles inside the video
    /// image so their border is never drawn outside it.
    #[serde(default = "default_border_inset")]
    pub border_inset: f64,
}

fn default_caption() -> String {
    "new annotation".to_string()
}

fn default_display_window_seconds() -> u64 {
    3
}

fn default_border_inset() -> f64 {
    2.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_caption: default_caption(),
            display_window_seconds: default_display_window_seconds(),
            border_inset: default_border_inset(),
        }
    }
}

impl Settings {
    /// The display window expressed in milliseconds.
    pub fn display_window_millis(&self) -> u64 {
        self.display_window_seconds * 1000
    }
}
