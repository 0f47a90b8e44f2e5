use overnote_bridge::{ContentSize, EntryId, EntryPosition};
use parking_lot::Mutex;

use crate::overlay::{EntryHooks, OverlayEntry, OverlaySlot};

/// Card-like layout whose height grows with the text length.
pub(crate) fn card(content: &str) -> ContentSize {
    ContentSize::new(320.0, 40.0 + 8.0 * content.len() as f64)
}

#[derive(Default)]
struct Recording {
    live: Vec<(EntryId, String, EntryHooks)>,
    inserted: Vec<(EntryId, String)>,
    removed: Vec<EntryId>,
    rebuilds: Vec<(EntryId, EntryPosition)>,
    max_live: usize,
}

/// Overlay slot that records every call made by the controller.
#[derive(Default)]
pub(crate) struct RecordingSlot {
    layout: Option<fn(&str) -> ContentSize>,
    recording: Mutex<Recording>,
}

impl RecordingSlot {
    /// A slot that never lays its entries out.
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that lays every entry out as soon as it is inserted.
    pub fn laying_out(layout: fn(&str) -> ContentSize) -> Self {
        Self {
            layout: Some(layout),
            ..Self::default()
        }
    }

    pub fn live_contents(&self) -> Vec<String> {
        let recording = self.recording.lock();
        recording
            .live
            .iter()
            .map(|(_, content, _)| content.clone())
            .collect()
    }

    pub fn live_hooks(&self) -> Option<EntryHooks> {
        let recording = self.recording.lock();
        recording.live.first().map(|(_, _, hooks)| hooks.clone())
    }

    pub fn inserted(&self) -> Vec<(EntryId, String)> {
        self.recording.lock().inserted.clone()
    }

    pub fn removed(&self) -> Vec<EntryId> {
        self.recording.lock().removed.clone()
    }

    pub fn rebuilds(&self) -> Vec<(EntryId, EntryPosition)> {
        self.recording.lock().rebuilds.clone()
    }

    pub fn max_live(&self) -> usize {
        self.recording.lock().max_live
    }
}

impl OverlaySlot for RecordingSlot {
    type Content = String;

    fn insert(&self, entry: OverlayEntry<String>) {
        let (id, content, hooks) = entry.into_parts();
        let size = self.layout.map(|layout| layout(&content));
        {
            let mut recording = self.recording.lock();
            recording.inserted.push((id, content.clone()));
            recording.live.push((id, content, hooks.clone()));
            recording.max_live = recording.max_live.max(recording.live.len());
        }
        if let Some(size) = size {
            hooks.report_layout(size);
        }
    }

    fn remove(&self, id: EntryId) {
        let mut recording = self.recording.lock();
        let before = recording.live.len();
        recording.live.retain(|(live, _, _)| *live != id);
        if recording.live.len() != before {
            recording.removed.push(id);
        }
    }

    fn mark_needs_rebuild(&self, id: EntryId) {
        let hooks = {
            let recording = self.recording.lock();
            recording
                .live
                .iter()
                .find(|(live, _, _)| *live == id)
                .map(|(_, _, hooks)| hooks.clone())
        };
        if let Some(position) = hooks.and_then(|hooks| hooks.position()) {
            self.recording.lock().rebuilds.push((id, position));
        }
    }
}
