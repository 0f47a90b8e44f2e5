use std::{
    future::Future,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    task::{Context, Poll},
    time::Duration,
};

use parking_lot::Mutex;
use tokio::{
    runtime::Handle,
    task::{AbortHandle, JoinHandle},
    time::{Instant, sleep},
};

/// Direction and completion state of an [`AnimationDriver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Stopped at the beginning (progress 0).
    #[default]
    Dismissed,
    /// Running towards 1.
    Forward,
    /// Running towards 0.
    Reverse,
    /// Stopped at the end (progress 1).
    Completed,
}

type Listener = Box<dyn Fn(f64) + Send + Sync>;

struct Shared {
    value: Mutex<f64>,
    status: Mutex<AnimationStatus>,
    /// Bumped whenever a run starts or is stopped; a ticker whose run is no
    /// longer current must not publish.
    run: AtomicU64,
    listeners: Mutex<Vec<Listener>>,
}

impl Shared {
    fn publish(&self, value: f64) {
        *self.value.lock() = value;
        self.notify(value);
    }

    /// Publishes `value` unless `run` has been stopped. The run check and the
    /// write happen under the value lock, which `stop` also takes.
    fn publish_current(&self, run: u64, value: f64, finished: Option<AnimationStatus>) -> bool {
        {
            let mut current = self.value.lock();
            if self.run.load(Ordering::SeqCst) != run {
                return false;
            }
            *current = value;
            if let Some(status) = finished {
                *self.status.lock() = status;
            }
        }
        self.notify(value);
        true
    }

    fn notify(&self, value: f64) {
        for listener in self.listeners.lock().iter() {
            listener(value);
        }
    }

    async fn drive(self: Arc<Self>, run: u64, from: f64, target: f64, span: Duration, frame: Duration) {
        let started = Instant::now();
        loop {
            let t = if span.is_zero() {
                1.0
            } else {
                (started.elapsed().as_secs_f64() / span.as_secs_f64()).min(1.0)
            };

            if t >= 1.0 {
                let status = if target >= 1.0 {
                    AnimationStatus::Completed
                } else {
                    AnimationStatus::Dismissed
                };
                self.publish_current(run, target, Some(status));
                return;
            }

            if !self.publish_current(run, from + (target - from) * t, None) {
                return;
            }
            sleep(frame).await;
        }
    }
}

/// Time-based controller producing linear progress in `[0, 1]`.
///
/// Each run is driven by a ticker task spawned on the runtime the driver was
/// created with, so runs may be started from any thread. The task publishes a new value every frame. Listeners are invoked synchronously
/// from that task for every published value and must not block; they may
/// read [`AnimationDriver::value`] but must not register further listeners.
///
/// Dropping the driver stops any running ticker.
pub struct AnimationDriver {
    duration: Duration,
    frame_interval: Duration,
    shared: Arc<Shared>,
    runtime: Handle,
    ticker: Mutex<Option<AbortHandle>>,
}

impl AnimationDriver {
    /// Creates a driver whose full 0→1 run takes `duration`, ticking every
    /// `frame_interval` (at least one millisecond), on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn new(duration: Duration, frame_interval: Duration) -> Self {
        Self::with_runtime(duration, frame_interval, Handle::current())
    }

    /// Like [`AnimationDriver::new`], ticking on `runtime`.
    pub fn with_runtime(duration: Duration, frame_interval: Duration, runtime: Handle) -> Self {
        Self {
            duration,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            shared: Arc::new(Shared {
                value: Mutex::new(0.0),
                status: Mutex::new(AnimationStatus::Dismissed),
                run: AtomicU64::new(0),
                listeners: Mutex::new(Vec::new()),
            }),
            runtime,
            ticker: Mutex::new(None),
        }
    }

    /// Duration of a full run between both ends.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Current linear progress.
    pub fn value(&self) -> f64 {
        *self.shared.value.lock()
    }

    pub fn status(&self) -> AnimationStatus {
        *self.shared.status.lock()
    }

    /// Returns `true` when the driver rests at progress 1.
    pub fn is_completed(&self) -> bool {
        self.status() == AnimationStatus::Completed
    }

    /// Returns `true` while a ticker is running.
    pub fn is_animating(&self) -> bool {
        self.ticker
            .lock()
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// Registers a callback invoked with every published progress value.
    pub fn add_listener(&self, listener: impl Fn(f64) + Send + Sync + 'static) {
        self.shared.listeners.lock().push(Box::new(listener));
    }

    /// Jumps to `from` and runs towards 1.
    pub fn forward_from(&self, from: f64) -> AnimationRun {
        self.stop();
        self.shared.publish(crate::clamp_unit(from));
        self.animate_to(1.0)
    }

    /// Runs from the current value back towards 0.
    pub fn reverse(&self) -> AnimationRun {
        self.animate_to(0.0)
    }

    /// Stops the running ticker, leaving value and status where they are.
    pub fn stop(&self) {
        {
            let _value = self.shared.value.lock();
            self.shared.run.fetch_add(1, Ordering::SeqCst);
        }
        if let Some(ticker) = self.ticker.lock().take() {
            ticker.abort();
        }
    }

    fn animate_to(&self, target: f64) -> AnimationRun {
        self.stop();
        let run = self.shared.run.load(Ordering::SeqCst);
        let from = self.value();
        *self.shared.status.lock() = if target >= 1.0 {
            AnimationStatus::Forward
        } else {
            AnimationStatus::Reverse
        };

        // a partial run only covers the remaining distance
        let span = self.duration.mul_f64((target - from).abs());
        log::trace!("Animating {from:.3} -> {target:.3} over {span:?}");

        let handle = self.runtime.spawn(Arc::clone(&self.shared).drive(
            run,
            from,
            target,
            span,
            self.frame_interval,
        ));
        *self.ticker.lock() = Some(handle.abort_handle());
        AnimationRun(handle)
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Completion of a single driver run.
///
/// Resolves once the run reaches its target or is stopped. Dropping it
/// detaches from the run without affecting it.
#[must_use = "dropping an AnimationRun detaches from the run; await it to wait for completion"]
pub struct AnimationRun(JoinHandle<()>);

impl AnimationRun {
    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }
}

impl Future for AnimationRun {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        Pin::new(&mut self.0).poll(cx).map(|_| ())
    }
}
