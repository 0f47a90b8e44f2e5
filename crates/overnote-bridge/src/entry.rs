use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Identifier of a single overlay entry inserted by the controller.
///
/// Every insertion gets a fresh identifier, so an id also tells apart two
/// notifications that happen to show the same content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Allocates a new process-unique entry identifier.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw numeric value of this identifier.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntryId {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "#{}", self.0)
    }
}

/// Measured size of the content inside an overlay entry, in logical pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

impl ContentSize {
    /// Size of content that has not been laid out yet.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns `true` when the content covers no area at all.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Desired placement of an overlay entry on the host surface.
///
/// The entry spans the full surface width; only its vertical placement is
/// animated. `top` is the distance between the surface's top edge and the
/// entry's top edge, negative while the entry is (partly) hidden above the
/// surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct EntryPosition {
    pub top: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_ids_are_unique() {
        let first = EntryId::next();
        let second = EntryId::next();
        assert_ne!(first, second);
        assert!(second.get() > first.get());
    }

    #[test]
    fn zero_area_sizes_are_empty() {
        assert!(ContentSize::ZERO.is_empty());
        assert!(ContentSize::new(320.0, 0.0).is_empty());
        assert!(ContentSize::new(0.0, 64.0).is_empty());
        assert!(!ContentSize::new(320.0, 64.0).is_empty());
    }
}
