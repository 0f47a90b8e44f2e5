use serde::{Deserialize, Serialize};

/// Lifecycle phase of the notification controller.
///
/// Transitions: `Idle` → `Inserting` → `Shown` → `Dismissing` → `Idle`. A new
/// notification requested in any phase other than `Idle` first drives the
/// current one through `Dismissing` back to `Idle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecyclePhase {
    /// Nothing is inserted into the overlay.
    #[default]
    Idle,
    /// The entry is inserted and waits for its first layout.
    Inserting,
    /// The entry is sliding in or held on screen.
    Shown,
    /// The entry is sliding out and will be removed once hidden.
    Dismissing,
}

impl LifecyclePhase {
    /// Returns `true` when an overlay entry exists in this phase.
    pub fn has_entry(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Pointer interaction reported by the host for an overlay entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    /// The pointer went down on the entry. Cancels auto-dismissal.
    TapDown,
    /// A completed tap on the entry. Runs the tap callback and dismisses.
    Tap,
    /// A vertical drag started on the entry.
    DragStart,
    /// The ongoing vertical drag moved by `delta` pixels.
    DragUpdate { delta: f64 },
    /// The vertical drag ended with the given velocity in pixels per second.
    DragEnd { velocity: f64 },
}
