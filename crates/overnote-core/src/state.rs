use overnote_bridge::{ContentSize, EntryId, LifecyclePhase};
use overnote_motion::Curve;
use tokio::task::JoinHandle;

use crate::{request::TapCallback, size::SizeResolver};

/// Mutable lifecycle state of a notification controller.
///
/// Owned exclusively by its controller and guarded by a synchronous mutex.
/// The guard is never held across an await point, nor while calling into
/// the overlay slot or the animation driver (both may call back into the
/// controller synchronously).
pub(crate) struct State {
    pub phase: LifecyclePhase,
    /// The single inserted entry, if any.
    pub entry: Option<EntryId>,
    /// The single armed auto-dismiss timer, if any.
    pub timer: Option<JoinHandle<()>>,
    pub size: SizeResolver,
    /// Size of the current entry's content; zero until its first layout.
    pub content_size: ContentSize,
    pub curve: Curve,
    /// Always zero: drag hooks exist but do not move the entry.
    pub drag_offset: f64,
    pub on_tap: Option<TapCallback>,
}

impl State {
    pub fn new(curve: Curve) -> Self {
        Self {
            phase: LifecyclePhase::Idle,
            entry: None,
            timer: None,
            size: SizeResolver::new(),
            content_size: ContentSize::ZERO,
            curve,
            drag_offset: 0.0,
            on_tap: None,
        }
    }

    /// Returns `true` when `id` is the entry currently inserted.
    pub fn owns(&self, id: EntryId) -> bool {
        self.entry == Some(id)
    }

    /// Cancels the armed timer. Returns `true` when one was armed.
    pub fn cancel_timer(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.abort();
                true
            }
            None => false,
        }
    }
}
