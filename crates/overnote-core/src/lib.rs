//! Transient notifications layered over a host overlay.
//!
//! A [`Notifier`] shows one notification at a time: it inserts the content
//! into an [`OverlaySlot`], waits for the host to report the content's size,
//! slides it in from above the top edge and dismisses it after a hold
//! duration or on tap. Showing a new notification replaces the current one.
//!
//! Hosts either implement [`OverlaySlot`] directly or talk the
//! [`overnote_bridge`] protocol through a [`ChannelSlot`].

use std::time::Duration;

pub mod bridge_slot;
pub mod config;
pub mod controller;
mod gestures;
pub mod overlay;
pub mod registry;
pub mod request;
pub mod runtime;
pub mod size;
mod state;

#[cfg(test)]
mod testing;

pub use bridge_slot::ChannelSlot;
pub use config::{ConfigError, NotifierConfig, load_config, load_config_from, parse_config};
pub use controller::Notifier;
pub use overlay::{EntryHooks, OverlayEntry, OverlaySlot};
pub use registry::{MountGuard, RegistryError};
pub use request::{NotificationRequest, TapCallback};
pub use runtime::BridgeNotifier;
pub use size::{SizeReport, SizeResolver};

pub use overnote_bridge::{
    BridgeChannels, ContentSize, EntryId, EntryPosition, Gesture, HostEvent, LifecyclePhase,
    SlotCommand,
};
pub use overnote_motion::{AnimationState, AnimationStatus, Cubic, Curve};

/// Length of the slide-in and of the slide-out.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(350);

/// How long a notification stays visible when the request does not say.
pub const DEFAULT_HOLD_DURATION: Duration = Duration::from_secs(10);
