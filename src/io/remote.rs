// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Remote annotation store boundary.
//!
//! This module defines the record shape exchanged with the external
//! annotation store, the change notifications it delivers, and the
//! translation between records and local annotations. Malformed records are
//! filtered out here, before they can reach the store.

use crate::models::annotation::Annotation;
use crate::util::geometry::Rect;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The payload exchanged with the remote annotation store.
///
/// Field meanings must be preserved exactly for interoperability. Geometry
/// is in absolute video pixel coordinates. A missing duration means the
/// remote side did not supply one; the local default display window is
/// substituted during translation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRecord {
    pub id: Uuid,
    pub caption: String,
    /// Start offset from the beginning of the video, in milliseconds.
    pub elapsed_millis: u64,
    pub duration_millis: Option<u64>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub concept: Option<String>,
    /// Identifier of the video this record is scoped to.
    pub video_ref: Uuid,
}

/// A batch of changes delivered by the remote change feed.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteDelta {
    Added(Vec<RemoteRecord>),
    Updated(Vec<RemoteRecord>),
    Removed(Vec<RemoteRecord>),
}

/// The bidirectional remote annotation store collaborator.
///
/// Outbound adds are fire-and-forget; a failure is advisory and never rolls
/// back local state. Inbound changes arrive separately, as [`RemoteDelta`]
/// batches posted to the controller by the transport. Connection lifecycle
/// (connect, disconnect, retry) is entirely the collaborator's concern.
pub trait RemoteStore {
    /// Forward a newly created annotation record to the remote store.
    fn add_record(&mut self, record: RemoteRecord) -> anyhow::Result<()>;

    /// Scope the inbound change feed to the given video.
    fn subscribe(&mut self, video_ref: Uuid);
}

/// A remote record that cannot be translated into an annotation.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record {id} has non-finite geometry")]
    NonFiniteGeometry { id: Uuid },
    #[error("record {id} has empty bounds ({width}x{height})")]
    EmptyBounds { id: Uuid, width: f64, height: f64 },
}

/// Translate an inbound remote record into a local annotation.
///
/// `default_window_millis` is substituted when the record carries no
/// duration, or a zero duration. Records with malformed geometry are
/// rejected so the store only ever holds non-degenerate bounds.
pub fn record_to_annotation(
    record: &RemoteRecord,
    default_window_millis: u64,
) -> Result<Annotation, RecordError> {
    let bounds = Rect::new(record.x, record.y, record.width, record.height);
    if ![record.x, record.y, record.width, record.height]
        .iter()
        .all(|v| v.is_finite())
    {
        return Err(RecordError::NonFiniteGeometry { id: record.id });
    }
    if bounds.is_degenerate() {
        return Err(RecordError::EmptyBounds {
            id: record.id,
            width: record.width,
            height: record.height,
        });
    }

    let duration = match record.duration_millis {
        Some(duration) if duration > 0 => duration,
        _ => default_window_millis,
    };

    Ok(Annotation {
        id: record.id,
        start_time: record.elapsed_millis,
        duration,
        bounds,
        caption: if record.caption.is_empty() {
            None
        } else {
            Some(record.caption.clone())
        },
        concept: record.concept.clone(),
        selected: false,
    })
}

/// Translate a local annotation into an outbound remote record.
///
/// The UI-only selection flag is not carried, and no duration is sent; the
/// receiving side applies its own display window.
pub fn annotation_to_record(annotation: &Annotation, video_ref: Uuid) -> RemoteRecord {
    RemoteRecord {
        id: annotation.id,
        caption: annotation.caption.clone().unwrap_or_default(),
        elapsed_millis: annotation.start_time,
        duration_millis: None,
        x: annotation.bounds.x,
        y: annotation.bounds.y,
        width: annotation.bounds.width,
        height: annotation.bounds.height,
        concept: annotation.concept.clone(),
        video_ref,
    }
}
