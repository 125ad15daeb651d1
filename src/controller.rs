// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation lifecycle controller.
//!
//! This module coordinates the three change streams that feed the canonical
//! annotation set: local drag-to-create gestures, the remote store's change
//! feed, and the advancing playback clock. The controller and store are
//! single-threaded by design; sources running on other threads post events
//! through a [`ControllerHandle`] and the owning thread drains them with
//! [`AnnotationController::pump`], so no two streams ever interleave
//! mid-mutation.

use crate::config::Settings;
use crate::io::remote::{
    annotation_to_record, record_to_annotation, RemoteDelta, RemoteRecord, RemoteStore,
};
use crate::models::annotation::Annotation;
use crate::store::AnnotationStore;
use crate::ui::gesture::DragCandidate;
use crate::ui::view::AnnotationView;
use crate::util::geometry::{to_absolute, ViewState};
use std::collections::HashSet;
use std::sync::mpsc::{channel, Receiver, Sender};
use uuid::Uuid;

/// An input from one of the controller's three change streams.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The playback clock advanced to the given elapsed time, in
    /// milliseconds.
    TimeChanged(u64),
    /// The remote change feed delivered a batch.
    RemoteChanged(RemoteDelta),
    /// The drag gesture completed with a candidate rectangle in display
    /// coordinates, paired with the view placement needed to convert it.
    DragCompleted {
        candidate: DragCandidate,
        view: ViewState,
    },
    /// The given annotations were selected.
    Selected(Vec<Uuid>),
    /// The given annotations were deselected.
    Deselected(Vec<Uuid>),
    /// The caption of an annotation was edited locally.
    CaptionEdited {
        id: Uuid,
        caption: Option<String>,
    },
    /// A new video was loaded; drop everything and adopt the new scope.
    Reset { video_ref: Uuid },
}

/// Cloneable, thread-safe poster for controller events.
///
/// Playback clock ticks and remote notifications originate off the
/// controller's thread; this is their marshaling point.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    sender: Sender<ControllerEvent>,
}

impl ControllerHandle {
    /// Post an event onto the controller's queue.
    ///
    /// Returns false when the controller has been dropped.
    pub fn post(&self, event: ControllerEvent) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("Controller is gone, dropping event");
                false
            }
        }
    }
}

/// Orchestrates the canonical annotation set and its presentation.
///
/// Owns the store, the presentation surface, and the remote collaborator.
/// New local creations and remote removals are pushed to the surface
/// immediately; everything else becomes visible through the clock-driven
/// refresh, which reconciles the surface to the store's active set at the
/// latest observed playback time.
pub struct AnnotationController<V, R> {
    settings: Settings,
    store: AnnotationStore,
    view: V,
    remote: R,
    video_ref: Uuid,
    sender: Sender<ControllerEvent>,
    receiver: Receiver<ControllerEvent>,
}

impl<V: AnnotationView, R: RemoteStore> AnnotationController<V, R> {
    /// Create a controller scoped to the given video, subscribing the
    /// remote collaborator to that scope.
    pub fn new(settings: Settings, view: V, mut remote: R, video_ref: Uuid) -> Self {
        remote.subscribe(video_ref);
        let (sender, receiver) = channel();
        Self {
            settings,
            store: AnnotationStore::new(),
            view,
            remote,
            video_ref,
            sender,
            receiver,
        }
    }

    /// A handle for posting events from other threads.
    pub fn handle(&self) -> ControllerHandle {
        ControllerHandle {
            sender: self.sender.clone(),
        }
    }

    /// Drain and apply all queued events.
    ///
    /// Must be called from the thread that owns the controller, typically
    /// once per UI frame or whenever the event loop wakes.
    pub fn pump(&mut self) {
        while let Ok(event) = self.receiver.try_recv() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::TimeChanged(time) => self.time_changed(time),
            ControllerEvent::RemoteChanged(delta) => self.remote_changed(delta),
            ControllerEvent::DragCompleted { candidate, view } => {
                self.drag_completed(candidate, &view)
            }
            ControllerEvent::Selected(ids) => self.select(&ids),
            ControllerEvent::Deselected(ids) => self.deselect(&ids),
            ControllerEvent::CaptionEdited { id, caption } => self.update_caption(id, caption),
            ControllerEvent::Reset { video_ref } => self.reset(video_ref),
        }
    }

    /// Refresh the surface from the store for a new playback time.
    pub fn time_changed(&mut self, time: u64) {
        log::trace!("time_changed(time={})", time);
        let active = self.store.active_at(time);
        self.view.set_active(&active);
    }

    /// Apply a batch of changes from the remote change feed.
    ///
    /// Added and updated records both go through the store's upsert, so a
    /// re-delivered add is a harmless no-op. Removals are pushed to the
    /// surface immediately; adds and updates wait for the next clock tick.
    pub fn remote_changed(&mut self, delta: RemoteDelta) {
        log::debug!("remote_changed(delta={:?})", delta);
        match delta {
            RemoteDelta::Added(records) | RemoteDelta::Updated(records) => {
                let annotations = self.translate_records(&records);
                self.store.upsert(annotations);
            }
            RemoteDelta::Removed(records) => {
                let ids: HashSet<Uuid> = records
                    .iter()
                    .filter(|record| self.in_scope(record))
                    .map(|record| record.id)
                    .collect();
                self.view.remove(&ids);
                self.store.remove(&ids);
            }
        }
    }

    /// Create an annotation from a completed drag gesture.
    ///
    /// The candidate rectangle is converted from display to absolute
    /// coordinates using the view placement current at release time. The
    /// new annotation is shown immediately, committed to the store, and
    /// forwarded to the remote store. A forward failure keeps the local
    /// copy; the user's action is never rolled back.
    pub fn drag_completed(&mut self, candidate: DragCandidate, view: &ViewState) {
        if candidate.bounds.is_degenerate() {
            log::debug!("Discarding zero-area drag candidate");
            return;
        }

        let bounds = to_absolute(candidate.bounds, view);
        let mut annotation = Annotation::new(candidate.press_time, bounds);
        annotation.duration = self.settings.display_window_millis();
        annotation.caption = Some(self.settings.default_caption.clone());
        log::info!("annotation created id={} start={}", annotation.id, annotation.start_time);

        self.view.add(&annotation);
        let record = annotation_to_record(&annotation, self.video_ref);
        self.store.upsert([annotation]);
        if let Err(error) = self.remote.add_record(record) {
            log::warn!("Remote forward failed, keeping local copy: {:#}", error);
        }
    }

    /// Mark annotations as selected, in the store and on the surface.
    pub fn select(&mut self, ids: &[Uuid]) {
        log::debug!("select(ids={:?})", ids);
        self.set_selected(ids, true);
        self.view.select(ids);
    }

    /// Clear the selection mark, in the store and on the surface.
    pub fn deselect(&mut self, ids: &[Uuid]) {
        log::debug!("deselect(ids={:?})", ids);
        self.set_selected(ids, false);
        self.view.deselect(ids);
    }

    /// Apply a local caption edit.
    ///
    /// Goes through the same upsert path as remote updates; the surface
    /// picks the new caption up at the next clock tick.
    pub fn update_caption(&mut self, id: Uuid, caption: Option<String>) {
        if let Some(annotation) = self.store.get(&id) {
            let mut annotation = annotation.clone();
            annotation.caption = caption;
            self.store.upsert([annotation]);
        }
    }

    /// Drop all annotations and adopt a new video scope.
    ///
    /// Runs as one step on the controller's queue, so no event from the
    /// previous video can land between clearing the store and the surface.
    pub fn reset(&mut self, video_ref: Uuid) {
        log::info!("reset(video_ref={})", video_ref);
        self.store.reset();
        self.view.reset();
        self.video_ref = video_ref;
        self.remote.subscribe(video_ref);
    }

    /// The canonical annotation set.
    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    /// The presentation surface being driven.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the presentation surface, for rendering.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// The video identity the controller is currently scoped to.
    pub fn video_ref(&self) -> Uuid {
        self.video_ref
    }

    fn set_selected(&mut self, ids: &[Uuid], selected: bool) {
        let updated: Vec<Annotation> = ids
            .iter()
            .filter_map(|id| self.store.get(id))
            .map(|annotation| {
                let mut annotation = annotation.clone();
                annotation.selected = selected;
                annotation
            })
            .collect();
        self.store.upsert(updated);
    }

    fn in_scope(&self, record: &RemoteRecord) -> bool {
        if record.video_ref == self.video_ref {
            true
        } else {
            log::debug!(
                "Dropping record {} scoped to video {}",
                record.id,
                record.video_ref
            );
            false
        }
    }

    fn translate_records(&self, records: &[RemoteRecord]) -> Vec<Annotation> {
        records
            .iter()
            .filter(|record| self.in_scope(record))
            .filter_map(
                |record| match record_to_annotation(record, self.settings.display_window_millis()) {
                    Ok(annotation) => Some(annotation),
                    Err(error) => {
                        log::warn!("Dropping malformed remote record: {}", error);
                        None
                    }
                },
            )
            .collect()
    }
}
