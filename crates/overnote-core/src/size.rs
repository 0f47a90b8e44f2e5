//! One-shot bridge reporting the size of freshly inserted content.
//!
//! The height of a notification is unknown until the host lays it out for
//! the first time, yet the slide-in distance depends on it. A
//! [`SizeResolver`] resolves exactly once per cycle and is replaced with a
//! fresh one whenever the notification is dismissed, so a later cycle never
//! observes the previous cycle's size.
//!
//! Content that is removed before it is ever laid out leaves its
//! [`SizeReport`] pending until the resolver is replaced; replacing it drops
//! the sender and the report resolves to `None`.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use overnote_bridge::ContentSize;
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct SizeResolver {
    generation: u64,
    sender: Option<oneshot::Sender<ContentSize>>,
    receiver: Option<oneshot::Receiver<ContentSize>>,
    resolved: Option<ContentSize>,
}

impl SizeResolver {
    pub fn new() -> Self {
        Self::with_generation(0)
    }

    fn with_generation(generation: u64) -> Self {
        let (sender, receiver) = oneshot::channel();
        Self {
            generation,
            sender: Some(sender),
            receiver: Some(receiver),
            resolved: None,
        }
    }

    /// Builds the pending resolver for the next cycle.
    pub fn renewed(&self) -> Self {
        Self::with_generation(self.generation + 1)
    }

    /// How many times this resolver has been renewed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The reported size, once resolved.
    pub fn resolved(&self) -> Option<ContentSize> {
        self.resolved
    }

    /// Records a layout pass. Returns `true` only for the one report that
    /// resolves this cycle; empty sizes and later reports are ignored.
    pub fn report(&mut self, size: ContentSize) -> bool {
        if size.is_empty() {
            return false;
        }
        let Some(sender) = self.sender.take() else {
            return false;
        };
        self.resolved = Some(size);
        // a waiter that already gave up does not make the report invalid
        let _ = sender.send(size);
        true
    }

    /// Takes the future waiting for this cycle's report. Only the first call
    /// gets a live report; subsequent ones resolve to `None` immediately.
    pub fn wait(&mut self) -> SizeReport {
        SizeReport(self.receiver.take())
    }
}

impl Default for SizeResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Pending size report of a single cycle. Resolves to `None` when the cycle
/// ends before its content is laid out.
#[derive(Debug)]
pub struct SizeReport(Option<oneshot::Receiver<ContentSize>>);

impl Future for SizeReport {
    type Output = Option<ContentSize>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.get_mut().0.as_mut() {
            Some(receiver) => Pin::new(receiver).poll(cx).map(Result::ok),
            None => Poll::Ready(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: ContentSize = ContentSize::new(360.0, 72.0);

    #[tokio::test]
    async fn first_report_resolves() {
        let mut resolver = SizeResolver::new();
        let report = resolver.wait();

        assert!(resolver.report(CARD));
        assert_eq!(report.await, Some(CARD));
        assert_eq!(resolver.resolved(), Some(CARD));
    }

    #[tokio::test]
    async fn later_reports_are_ignored() {
        let mut resolver = SizeResolver::new();
        let report = resolver.wait();

        assert!(resolver.report(CARD));
        assert!(!resolver.report(ContentSize::new(360.0, 144.0)));
        assert_eq!(report.await, Some(CARD));
        assert_eq!(resolver.resolved(), Some(CARD));
    }

    #[tokio::test]
    async fn report_before_wait_is_kept() {
        let mut resolver = SizeResolver::new();
        resolver.report(CARD);

        assert_eq!(resolver.wait().await, Some(CARD));
    }

    #[test]
    fn empty_layouts_do_not_resolve() {
        let mut resolver = SizeResolver::new();

        assert!(!resolver.report(ContentSize::ZERO));
        assert!(!resolver.report(ContentSize::new(360.0, 0.0)));
        assert_eq!(resolver.resolved(), None);
        assert!(resolver.report(CARD));
    }

    #[tokio::test]
    async fn second_wait_resolves_to_none() {
        let mut resolver = SizeResolver::new();
        let _first = resolver.wait();

        assert_eq!(resolver.wait().await, None);
    }

    #[tokio::test]
    async fn renewal_releases_pending_waiters() {
        let mut resolver = SizeResolver::new();
        resolver.report(CARD);
        let renewed = resolver.renewed();

        let mut stale = SizeResolver::new();
        let pending = stale.wait();
        drop(stale);

        assert_eq!(pending.await, None);
        assert_eq!(renewed.generation(), 1);
        assert_eq!(renewed.resolved(), None);
    }
}
