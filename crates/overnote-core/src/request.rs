use std::time::Duration;

use overnote_motion::Curve;

/// Callback run once when the user taps a notification.
pub type TapCallback = Box<dyn FnOnce() + Send + 'static>;

/// Everything a single `show` call needs.
///
/// The request is consumed by the call; only the tap callback outlives it,
/// for as long as its notification is on screen.
pub struct NotificationRequest<C> {
    pub(crate) content: C,
    pub(crate) on_tap: Option<TapCallback>,
    pub(crate) duration: Duration,
    pub(crate) curve: Curve,
}

impl<C> NotificationRequest<C> {
    /// A request held for [`crate::DEFAULT_HOLD_DURATION`] with the `ease`
    /// curve.
    pub fn new(content: C) -> Self {
        Self {
            content,
            on_tap: None,
            duration: crate::DEFAULT_HOLD_DURATION,
            curve: Curve::Ease,
        }
    }

    /// Runs `callback` when the notification is tapped, right before it is
    /// dismissed.
    #[must_use]
    pub fn on_tap(mut self, callback: impl FnOnce() + Send + 'static) -> Self {
        self.on_tap = Some(Box::new(callback));
        self
    }

    /// How long the notification stays fully shown. A zero duration makes it
    /// sticky.
    #[must_use]
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Keeps the notification on screen until it is dismissed explicitly.
    #[must_use]
    pub fn sticky(self) -> Self {
        self.duration(Duration::ZERO)
    }

    #[must_use]
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn is_sticky(&self) -> bool {
        self.duration.is_zero()
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for NotificationRequest<C> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("NotificationRequest")
            .field("content", &self.content)
            .field("on_tap", &self.on_tap.is_some())
            .field("duration", &self.duration)
            .field("curve", &self.curve)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_hold_for_ten_seconds() {
        let request = NotificationRequest::new("saved");
        assert_eq!(request.duration, Duration::from_secs(10));
        assert_eq!(request.curve, Curve::Ease);
        assert!(request.on_tap.is_none());
        assert!(!request.is_sticky());
    }

    #[test]
    fn builder_overrides_defaults() {
        let request = NotificationRequest::new("saved")
            .duration(Duration::from_secs(3))
            .curve(Curve::Linear)
            .on_tap(|| {});
        assert_eq!(request.duration, Duration::from_secs(3));
        assert_eq!(request.curve, Curve::Linear);
        assert!(request.on_tap.is_some());
        assert_eq!(*request.content(), "saved");
    }

    #[test]
    fn sticky_means_zero_duration() {
        assert!(NotificationRequest::new(()).sticky().is_sticky());
    }
}
