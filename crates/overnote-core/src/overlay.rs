//! Contract between the controller and the host's overlay surface.
//!
//! The controller never renders. It hands the host an [`OverlayEntry`]
//! carrying the opaque content and a set of [`EntryHooks`]; the host places
//! the content wherever [`EntryHooks::position`] says, reports the content's
//! first layout and forwards pointer gestures through the same hooks.

use std::sync::{Arc, Weak};

use overnote_bridge::{ContentSize, EntryId, EntryPosition, Gesture};
use tokio::task::JoinHandle;

/// Insertion point on the host surface above all regular content.
pub trait OverlaySlot: Send + Sync + 'static {
    /// Opaque content the host knows how to display.
    type Content: Send + 'static;

    /// Inserts a new entry. The host should position it via its hooks and
    /// report its size once laid out.
    fn insert(&self, entry: OverlayEntry<Self::Content>);

    /// Removes an entry. Must be a no-op for entries that are not present.
    fn remove(&self, id: EntryId);

    /// Requests the entry to be rebuilt at its current
    /// [`EntryHooks::position`]. Called on every animation frame.
    fn mark_needs_rebuild(&self, id: EntryId);
}

impl<T: OverlaySlot> OverlaySlot for Arc<T> {
    type Content = T::Content;

    fn insert(&self, entry: OverlayEntry<Self::Content>) {
        (**self).insert(entry);
    }

    fn remove(&self, id: EntryId) {
        (**self).remove(id);
    }

    fn mark_needs_rebuild(&self, id: EntryId) {
        (**self).mark_needs_rebuild(id);
    }
}

/// Callbacks from an inserted entry back into the controller that owns it.
pub(crate) trait EntryHost: Send + Sync {
    fn position(&self, id: EntryId) -> Option<EntryPosition>;
    fn report_layout(&self, id: EntryId, size: ContentSize) -> bool;
    fn gesture(&self, id: EntryId, gesture: Gesture) -> Option<JoinHandle<()>>;
}

/// Handle an overlay entry uses to talk to its controller.
///
/// Hooks stay bound to the entry they were created for. Once that entry is
/// removed (or the controller is gone) every call is ignored.
#[derive(Clone)]
pub struct EntryHooks {
    id: EntryId,
    host: Weak<dyn EntryHost>,
}

impl EntryHooks {
    pub(crate) fn new(id: EntryId, host: Weak<dyn EntryHost>) -> Self {
        Self { id, host }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// Where the entry should currently be placed, or `None` when the entry
    /// is no longer managed by a controller.
    pub fn position(&self) -> Option<EntryPosition> {
        self.host.upgrade()?.position(self.id)
    }

    /// Reports a layout pass of the entry's content. Only the first
    /// non-empty layout after insertion is used; returns `true` for that one.
    pub fn report_layout(&self, size: ContentSize) -> bool {
        self.host
            .upgrade()
            .is_some_and(|host| host.report_layout(self.id, size))
    }

    /// Forwards a pointer gesture. Returns the spawned dismissal when the
    /// gesture starts one.
    pub fn dispatch(&self, gesture: Gesture) -> Option<JoinHandle<()>> {
        self.host.upgrade()?.gesture(self.id, gesture)
    }

    /// A completed tap: runs the tap callback, then dismisses the entry.
    pub fn tap(&self) -> Option<JoinHandle<()>> {
        self.dispatch(Gesture::Tap)
    }

    /// Pointer down: cancels auto-dismissal while the user interacts.
    pub fn tap_down(&self) {
        self.dispatch(Gesture::TapDown);
    }

    pub fn drag_start(&self) {
        self.dispatch(Gesture::DragStart);
    }

    pub fn drag_update(&self, delta: f64) {
        self.dispatch(Gesture::DragUpdate { delta });
    }

    pub fn drag_end(&self, velocity: f64) {
        self.dispatch(Gesture::DragEnd { velocity });
    }
}

impl std::fmt::Debug for EntryHooks {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("EntryHooks")
            .field("id", &self.id)
            .field("attached", &(self.host.strong_count() > 0))
            .finish()
    }
}

/// A notification handed to the overlay: content plus the hooks wired
/// around it.
#[derive(Debug)]
pub struct OverlayEntry<C> {
    id: EntryId,
    content: C,
    hooks: EntryHooks,
}

impl<C> OverlayEntry<C> {
    pub(crate) fn new(id: EntryId, content: C, hooks: EntryHooks) -> Self {
        Self { id, content, hooks }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn hooks(&self) -> &EntryHooks {
        &self.hooks
    }

    pub fn into_parts(self) -> (EntryId, C, EntryHooks) {
        (self.id, self.content, self.hooks)
    }
}
