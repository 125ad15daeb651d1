// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! TARO - Timed Annotation Region Overlay
//!
//! A library for overlaying timed, spatially bounded annotations on a video
//! being played, creating new annotations with a drag gesture, and keeping
//! the local annotation set synchronized with a remote annotation store.
//!
//! Video playback, widget rendering and the remote transport stay outside
//! this crate; they plug in through the [`ui::view::AnnotationView`] and
//! [`io::remote::RemoteStore`] traits and the [`controller::ControllerHandle`]
//! event queue.

pub mod config;
pub mod controller;
pub mod io;
pub mod models;
pub mod store;
pub mod ui;
pub mod util;

pub use config::Settings;
pub use controller::{AnnotationController, ControllerEvent, ControllerHandle};
pub use io::remote::{RecordError, RemoteDelta, RemoteRecord, RemoteStore};
pub use models::annotation::Annotation;
pub use store::AnnotationStore;
pub use ui::gesture::{DragCandidate, DragGesture};
pub use ui::view::{AnnotationView, VisualIndex};
pub use util::geometry::{Rect, ViewState};
