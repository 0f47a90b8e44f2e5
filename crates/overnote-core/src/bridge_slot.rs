//! Overlay slot speaking the bridge protocol.
//!
//! [`ChannelSlot`] turns overlay calls into [`SlotCommand`]s for a host
//! surface living on the other side of a [`overnote_bridge::BridgeChannels`]
//! pair, and routes the host's [`HostEvent`]s back into the hooks of the
//! entry they concern.

use std::collections::HashMap;

use overnote_bridge::{EntryId, HostEvent, SlotCommand};
use parking_lot::Mutex;
use tokio::{
    sync::mpsc::{UnboundedReceiver, UnboundedSender},
    task::JoinHandle,
};

use crate::overlay::{EntryHooks, OverlayEntry, OverlaySlot};

pub struct ChannelSlot<C> {
    tx: UnboundedSender<SlotCommand<C>>,
    entries: Mutex<HashMap<EntryId, EntryHooks>>,
}

impl<C: Send + 'static> ChannelSlot<C> {
    /// Creates a slot emitting commands on `tx` (the controller side of the
    /// bridge).
    pub fn new(tx: UnboundedSender<SlotCommand<C>>) -> Self {
        Self {
            tx,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Read and dispatch events from the host until it closes the channel.
    pub async fn consume_host_events(&self, mut rx: UnboundedReceiver<HostEvent>) {
        while let Some(event) = rx.recv().await {
            log::trace!("Got a host event: {event:?}");
            // tap dismissals run on their own; the pump keeps draining events
            drop(self.dispatch(event));
        }
        log::debug!("Host event channel closed");
    }

    /// Routes a single host event to its entry. Returns the dismissal started
    /// by a tap, if any.
    pub fn dispatch(&self, event: HostEvent) -> Option<JoinHandle<()>> {
        let id = match event {
            HostEvent::Layout { id, .. } | HostEvent::Gesture { id, .. } => id,
        };
        let Some(hooks) = self.entries.lock().get(&id).cloned() else {
            log::debug!("Dropping host event for unknown entry {id}");
            return None;
        };

        match event {
            HostEvent::Layout { size, .. } => {
                hooks.report_layout(size);
                None
            }
            HostEvent::Gesture { gesture, .. } => hooks.dispatch(gesture),
        }
    }

    fn send(&self, command: SlotCommand<C>) {
        if self.tx.send(command).is_err() {
            log::warn!("Host surface is gone, dropping overlay command");
        }
    }
}

impl<C: Send + 'static> OverlaySlot for ChannelSlot<C> {
    type Content = C;

    fn insert(&self, entry: OverlayEntry<C>) {
        let (id, content, hooks) = entry.into_parts();
        let position = hooks.position().unwrap_or_default();
        self.entries.lock().insert(id, hooks);
        self.send(SlotCommand::Insert {
            id,
            content,
            position,
        });
    }

    fn remove(&self, id: EntryId) {
        let removed = self.entries.lock().remove(&id).is_some();
        if removed {
            self.send(SlotCommand::Remove { id });
        }
    }

    fn mark_needs_rebuild(&self, id: EntryId) {
        let hooks = self.entries.lock().get(&id).cloned();
        if let Some(position) = hooks.and_then(|hooks| hooks.position()) {
            self.send(SlotCommand::Rebuild { id, position });
        }
    }
}
