//! Communication bridge between a host overlay surface and the notification
//! controller.
//!
//! This crate defines the plain data exchanged across the boundary between
//! the application's compositing layer and the controller that animates
//! in-app notifications over it.
//!
//! The protocol is small and unidirectional in each direction:
//! - The controller sends overlay commands (insert an entry, remove it,
//!   reposition it on every animation frame).
//! - The host pushes surface events (the first layout of an entry, pointer
//!   gestures on it).
//!
//! Communication happens over unbounded [`tokio::sync::mpsc`] channels
//! wrapped in [`BridgeChannels`]. The controller emits commands from
//! synchronous animation ticks, so its side must never wait for capacity.

pub mod entry;
pub mod lifecycle;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

pub use entry::{ContentSize, EntryId, EntryPosition};
pub use lifecycle::{Gesture, LifecyclePhase};

/// Commands emitted by the controller to drive the host's overlay.
#[derive(Debug, Clone)]
pub enum SlotCommand<C> {
    /// Insert a new entry displaying `content` at `position`.
    Insert {
        id: EntryId,
        content: C,
        position: EntryPosition,
    },
    /// Move an inserted entry to a new position and rebuild it.
    Rebuild { id: EntryId, position: EntryPosition },
    /// Remove the entry. Removing an unknown entry must be a no-op.
    Remove { id: EntryId },
}

/// Events reported by the host about entries it displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The entry's content has been laid out with the given size.
    Layout { id: EntryId, size: ContentSize },
    /// The user interacted with the entry.
    Gesture { id: EntryId, gesture: Gesture },
}

/// Paired `tokio::mpsc` channels connecting a host surface and the
/// controller.
pub struct BridgeChannels<C> {
    /// Receiver used by the host to get overlay commands.
    pub host_rx: UnboundedReceiver<SlotCommand<C>>,
    /// Sender used by the host to report layouts and gestures.
    pub host_tx: UnboundedSender<HostEvent>,

    /// Receiver used by the controller side to get host events.
    pub slot_rx: UnboundedReceiver<HostEvent>,
    /// Sender used by the controller side to emit overlay commands.
    pub slot_tx: UnboundedSender<SlotCommand<C>>,
}

impl<C> BridgeChannels<C> {
    /// Creates a new pair of bridged channels.
    pub fn new() -> Self {
        let (to_host_tx, to_host_rx) = mpsc::unbounded_channel();
        let (to_slot_tx, to_slot_rx) = mpsc::unbounded_channel();
        Self {
            host_rx: to_host_rx,
            host_tx: to_slot_tx,
            slot_rx: to_slot_rx,
            slot_tx: to_host_tx,
        }
    }
}

impl<C> Default for BridgeChannels<C> {
    fn default() -> Self {
        Self::new()
    }
}
