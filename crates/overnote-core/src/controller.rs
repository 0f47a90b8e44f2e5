//! The notification controller.
//!
//! A [`Notifier`] owns one overlay slot and shows at most one notification
//! on it at a time. Showing inserts the content, waits for its first layout,
//! slides it in and arms the auto-dismiss timer; dismissing cancels the
//! timer, slides the entry back out and removes it.
//!
//! Show and dismiss cycles are serialized through a FIFO async lock, so
//! overlay insertions and removals never interleave. A `show` that finds a
//! newer request queued behind it steps aside without inserting anything.
//!
//! Every cycle runs on a task of the runtime the controller was created on,
//! so hooks may be called from a host thread outside of that runtime and a
//! caller that stops awaiting `show` does not strand its entry.

use std::{
    sync::{
        Arc, Weak,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use futures_util::future::BoxFuture;
use overnote_bridge::{ContentSize, EntryId, LifecyclePhase};
use overnote_motion::{AnimationDriver, AnimationState};
use parking_lot::Mutex;
use tokio::{runtime::Handle, time::sleep};

use crate::{
    TRANSITION_DURATION,
    config::NotifierConfig,
    overlay::{EntryHooks, OverlayEntry, OverlaySlot},
    request::NotificationRequest,
    size::SizeReport,
    state::State,
};

/// Cheaply cloneable handle to a notification controller.
///
/// All clones drive the same overlay entry. Dropping the last handle tears
/// the controller down: the timer is cancelled, the driver stopped and any
/// visible entry removed.
pub struct Notifier<S: OverlaySlot> {
    pub(crate) inner: Arc<Inner<S>>,
}

pub(crate) struct Inner<S: OverlaySlot> {
    pub(crate) this: Weak<Inner<S>>,
    pub(crate) overlay: S,
    pub(crate) config: NotifierConfig,
    pub(crate) driver: AnimationDriver,
    /// Runtime every cycle, timer and tap dismissal is spawned on.
    pub(crate) runtime: Handle,
    pub(crate) state: Mutex<State>,
    /// Held for the dismiss-and-insert part of `show` and for every dismissal.
    cycle: tokio::sync::Mutex<()>,
    /// Ticket of the most recent `show` call.
    tickets: AtomicU64,
}

impl<S: OverlaySlot> Clone for Notifier<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: OverlaySlot> Notifier<S> {
    /// Creates a controller over `overlay` with the default configuration.
    pub fn new(overlay: S) -> Self {
        Self::with_config(overlay, NotifierConfig::default())
    }

    /// Creates a controller over `overlay` bound to the current tokio
    /// runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn with_config(overlay: S, config: NotifierConfig) -> Self {
        let runtime = Handle::current();
        let inner = Arc::new_cyclic(|this: &Weak<Inner<S>>| {
            let driver = AnimationDriver::with_runtime(
                TRANSITION_DURATION,
                config.frame_interval(),
                runtime.clone(),
            );
            let listener = this.clone();
            driver.add_listener(move |_| {
                if let Some(inner) = listener.upgrade() {
                    inner.on_tick();
                }
            });

            Inner {
                this: this.clone(),
                overlay,
                state: Mutex::new(State::new(config.curve)),
                config,
                driver,
                runtime,
                cycle: tokio::sync::Mutex::new(()),
                tickets: AtomicU64::new(0),
            }
        });
        Self { inner }
    }

    /// Starts a request pre-filled with the configured hold duration and
    /// curve.
    pub fn notification(&self, content: S::Content) -> NotificationRequest<S::Content> {
        NotificationRequest::new(content)
            .duration(self.inner.config.hold_duration())
            .curve(self.inner.config.curve)
    }

    /// Shows a notification, replacing the current one.
    ///
    /// The cycle starts when this method is called and runs on its own task:
    /// the returned future only reports its completion. Dropping the future,
    /// polled or not, neither cancels the notification nor keeps it from
    /// appearing. Of several calls made back to back only the last one is
    /// inserted.
    ///
    /// The future resolves once the entry has been laid out, the slide-in has
    /// started and the auto-dismiss timer is armed (or immediately, when
    /// superseded). Content the host never lays out keeps it pending until
    /// the entry is dismissed or replaced.
    pub fn show(&self, request: NotificationRequest<S::Content>) -> BoxFuture<'static, ()> {
        let ticket = self.inner.tickets.fetch_add(1, Ordering::SeqCst) + 1;
        let cycle = self
            .inner
            .runtime
            .spawn(Arc::clone(&self.inner).show(ticket, request));
        Box::pin(async move {
            match cycle.await {
                Err(error) if error.is_panic() => {
                    log::error!("Notification request {ticket} panicked: {error}");
                }
                _ => {}
            }
        })
    }

    /// Slides the current notification out and removes it. Waits for a
    /// dismissal already in progress; resolves immediately when idle.
    pub async fn dismiss(&self) {
        let _cycle = self.inner.cycle.lock().await;
        self.inner.dismiss_locked().await;
    }

    /// Releases everything immediately: cancels the timer, stops the driver
    /// and removes the entry without animating. A mounted controller is
    /// unmounted as well.
    pub fn dispose(&self) {
        crate::registry::unmount(self);
        self.inner.teardown();
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.inner.state.lock().phase
    }

    pub fn current_entry(&self) -> Option<EntryId> {
        self.inner.state.lock().entry
    }

    /// Size reported by the current entry's first layout, zero before that.
    pub fn content_size(&self) -> ContentSize {
        self.inner.state.lock().content_size
    }

    pub fn is_timer_armed(&self) -> bool {
        self.inner.state.lock().timer.is_some()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.inner.animation_state()
    }

    pub fn overlay(&self) -> &S {
        &self.inner.overlay
    }

    pub fn config(&self) -> &NotifierConfig {
        &self.inner.config
    }
}

impl<S: OverlaySlot> Inner<S> {
    async fn show(self: Arc<Self>, ticket: u64, request: NotificationRequest<S::Content>) {
        let Some((id, duration, report)) = self.insert(ticket, request).await else {
            return;
        };

        // the last handle may go away while the host lays the entry out;
        // teardown then renews the resolver and the report resolves to `None`
        let this = Arc::downgrade(&self);
        drop(self);

        let Some(size) = report.await else {
            log::debug!("Entry {id} was removed before its first layout");
            return;
        };
        if let Some(this) = this.upgrade() {
            this.slide_in(id, size, duration).await;
        }
    }

    /// Replaces the current entry with the requested one, unless a newer
    /// request is already waiting.
    async fn insert(
        &self,
        ticket: u64,
        request: NotificationRequest<S::Content>,
    ) -> Option<(EntryId, Duration, SizeReport)> {
        let _cycle = self.cycle.lock().await;
        if self.tickets.load(Ordering::SeqCst) != ticket {
            log::debug!("Notification request {ticket} superseded before insertion");
            return None;
        }
        self.dismiss_locked().await;

        let NotificationRequest {
            content,
            on_tap,
            duration,
            curve,
        } = request;
        let id = EntryId::next();
        let report = {
            let mut state = self.state.lock();
            state.phase = LifecyclePhase::Inserting;
            state.entry = Some(id);
            state.content_size = ContentSize::ZERO;
            state.drag_offset = 0.0;
            state.curve = curve;
            state.on_tap = on_tap;
            state.size.wait()
        };
        log::info!("Inserting notification entry {id}");
        self.overlay.insert(OverlayEntry::new(id, content, self.hooks(id)));
        Some((id, duration, report))
    }

    async fn slide_in(&self, id: EntryId, size: ContentSize, duration: Duration) {
        let _cycle = self.cycle.lock().await;
        {
            let mut state = self.state.lock();
            if !state.owns(id) {
                return;
            }
            state.content_size = size;
            state.phase = LifecyclePhase::Shown;
        }

        log::debug!("Entry {id} laid out at {}x{}, sliding in", size.width, size.height);
        drop(self.driver.forward_from(0.0));
        if duration.is_zero() {
            log::info!("Entry {id} is sticky, waiting for an explicit dismissal");
        } else {
            self.arm_timer(id, duration);
        }
    }

    fn hooks(&self, id: EntryId) -> EntryHooks {
        let host: Weak<dyn crate::overlay::EntryHost> = self.this.clone();
        EntryHooks::new(id, host)
    }

    fn arm_timer(&self, id: EntryId, duration: Duration) {
        let this = self.this.clone();
        let mut state = self.state.lock();
        state.cancel_timer();
        state.timer = Some(self.runtime.spawn(async move {
            sleep(duration).await;
            let Some(inner) = this.upgrade() else {
                return;
            };
            {
                let mut state = inner.state.lock();
                if !state.owns(id) {
                    return;
                }
                // the timer is finishing on its own; nothing may abort it now
                state.timer = None;
            }
            log::info!("Hold duration of entry {id} elapsed");
            inner.dismiss_entry(id).await;
        }));
        log::debug!("Auto-dismiss of entry {id} armed for {duration:?}");
    }

    /// Dismisses `id` if it is still the current entry once the cycle lock
    /// is acquired.
    pub(crate) async fn dismiss_entry(&self, id: EntryId) {
        let _cycle = self.cycle.lock().await;
        let owned = self.state.lock().owns(id);
        if owned {
            self.dismiss_locked().await;
        }
    }

    /// Runs a dismissal. The caller holds the cycle lock.
    async fn dismiss_locked(&self) {
        let reverse = {
            let mut state = self.state.lock();
            state.cancel_timer();
            let reverse = state.entry.is_some() && self.driver.is_completed();
            if reverse {
                state.phase = LifecyclePhase::Dismissing;
            }
            reverse
        };

        if reverse {
            self.driver.reverse().await;
        } else {
            self.driver.stop();
        }

        let removed = {
            let mut state = self.state.lock();
            state.phase = LifecyclePhase::Idle;
            state.on_tap = None;
            state.size = state.size.renewed();
            state.entry.take()
        };
        if let Some(id) = removed {
            self.overlay.remove(id);
            log::info!("Removed notification entry {id}");
        }
    }

    fn on_tick(&self) {
        let entry = self.state.lock().entry;
        if let Some(id) = entry {
            self.overlay.mark_needs_rebuild(id);
        }
    }

    pub(crate) fn animation_state(&self) -> AnimationState {
        let (curve, height, drag_offset) = {
            let state = self.state.lock();
            (state.curve, state.content_size.height, state.drag_offset)
        };
        AnimationState::sample(self.driver.value(), curve, height, drag_offset)
    }

    fn teardown(&self) {
        let removed = {
            let mut state = self.state.lock();
            state.cancel_timer();
            state.phase = LifecyclePhase::Idle;
            state.on_tap = None;
            state.size = state.size.renewed();
            state.entry.take()
        };
        self.driver.stop();
        if let Some(id) = removed {
            self.overlay.remove(id);
            log::info!("Removed notification entry {id} on teardown");
        }
    }
}

impl<S: OverlaySlot> Drop for Inner<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
