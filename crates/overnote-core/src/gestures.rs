//! Hooks wired around every inserted entry.
//!
//! Taps dismiss, pointer-down pauses auto-dismissal and drags are accepted
//! but leave the entry where it is.

use overnote_bridge::{ContentSize, EntryId, EntryPosition, Gesture};
use tokio::task::JoinHandle;

use crate::{
    controller::Inner,
    overlay::{EntryHost, OverlaySlot},
};

impl<S: OverlaySlot> EntryHost for Inner<S> {
    fn position(&self, id: EntryId) -> Option<EntryPosition> {
        let height = {
            let state = self.state.lock();
            if !state.owns(id) {
                return None;
            }
            state.content_size.height
        };
        let sample = self.animation_state();
        Some(EntryPosition {
            top: sample.top(height),
        })
    }

    fn report_layout(&self, id: EntryId, size: ContentSize) -> bool {
        let mut state = self.state.lock();
        if !state.owns(id) {
            log::debug!("Ignoring layout of stale entry {id}");
            return false;
        }
        state.size.report(size)
    }

    fn gesture(&self, id: EntryId, gesture: Gesture) -> Option<JoinHandle<()>> {
        match gesture {
            Gesture::Tap => self.tap(id),
            Gesture::TapDown => {
                self.tap_down(id);
                None
            }
            Gesture::DragStart | Gesture::DragUpdate { .. } | Gesture::DragEnd { .. } => {
                log::trace!("Entry {id} does not follow drags, ignoring {gesture:?}");
                None
            }
        }
    }
}

impl<S: OverlaySlot> Inner<S> {
    fn tap(&self, id: EntryId) -> Option<JoinHandle<()>> {
        let on_tap = {
            let mut state = self.state.lock();
            if !state.owns(id) {
                log::debug!("Ignoring tap on stale entry {id}");
                return None;
            }
            state.cancel_timer();
            state.on_tap.take()
        };
        if let Some(callback) = on_tap {
            callback();
        }

        let this = self.this.upgrade()?;
        Some(self.runtime.spawn(async move { this.dismiss_entry(id).await }))
    }

    fn tap_down(&self, id: EntryId) {
        let mut state = self.state.lock();
        if state.owns(id) && state.cancel_timer() {
            log::debug!("Auto-dismiss of entry {id} cancelled by interaction");
        }
    }
}
