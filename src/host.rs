//! Console stand-in for a host surface.
//!
//! Logs the overlay commands it receives, lays banners out from their text
//! and taps the ones that ask for it after a short while.

use std::{thread, time::Duration};

use overnote_bridge::{ContentSize, Gesture, HostEvent, SlotCommand};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

const TAP_AFTER: Duration = Duration::from_millis(1500);

const WIDTH: f64 = 360.0;
const LINE_HEIGHT: f64 = 20.0;
const PADDING: f64 = 24.0;

#[derive(Debug, Clone)]
pub struct Banner {
    pub title: String,
    pub body: String,
    /// The console host taps these after [`TAP_AFTER`].
    pub tap: bool,
}

impl Banner {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tap: false,
        }
    }

    pub fn tapped(self) -> Self {
        Self { tap: true, ..self }
    }

    fn size(&self) -> ContentSize {
        let lines = 1 + self.body.lines().count();
        ContentSize::new(WIDTH, PADDING + LINE_HEIGHT * lines as f64)
    }
}

fn send(tx: &UnboundedSender<HostEvent>, event: HostEvent) {
    if tx.send(event).is_err() {
        log::warn!("Controller is gone, dropping {event:?}");
    }
}

/// Serve overlay commands until the controller closes the channel.
pub fn run(mut rx: UnboundedReceiver<SlotCommand<Banner>>, tx: UnboundedSender<HostEvent>) {
    while let Some(command) = rx.blocking_recv() {
        match command {
            SlotCommand::Insert {
                id,
                content,
                position,
            } => {
                log::info!(
                    "Inserted {id} \"{}: {}\" at top {:.1}",
                    content.title,
                    content.body,
                    position.top
                );
                send(
                    &tx,
                    HostEvent::Layout {
                        id,
                        size: content.size(),
                    },
                );

                if content.tap {
                    let tx = tx.clone();
                    thread::spawn(move || {
                        thread::sleep(TAP_AFTER);
                        send(
                            &tx,
                            HostEvent::Gesture {
                                id,
                                gesture: Gesture::TapDown,
                            },
                        );
                        send(
                            &tx,
                            HostEvent::Gesture {
                                id,
                                gesture: Gesture::Tap,
                            },
                        );
                    });
                }
            }
            SlotCommand::Rebuild { id, position } => {
                log::trace!("Moved {id} to top {:.1}", position.top);
            }
            SlotCommand::Remove { id } => log::info!("Removed {id}"),
        }
    }
    log::debug!("Overlay command channel closed");
}
