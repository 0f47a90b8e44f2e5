//! Runtime setup for notifications shown over the bridge.
//!
//! This module wires configuration, a [`ChannelSlot`] and the host event
//! pump together, and can host the whole thing on a thread of its own.

use std::{future::Future, sync::Arc, thread};

use overnote_bridge::{HostEvent, SlotCommand};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::{bridge_slot::ChannelSlot, config::NotifierConfig, controller::Notifier};

/// A controller whose overlay lives on the other side of the bridge.
pub type BridgeNotifier<C> = Notifier<Arc<ChannelSlot<C>>>;

/// Creates a controller drawing through `tx` and starts routing the host
/// events read from `rx` into it. Must be called within a tokio runtime.
pub fn attach<C: Send + 'static>(
    tx: UnboundedSender<SlotCommand<C>>,
    rx: UnboundedReceiver<HostEvent>,
    config: NotifierConfig,
) -> BridgeNotifier<C> {
    let slot = Arc::new(ChannelSlot::new(tx));
    let notifier = Notifier::with_config(Arc::clone(&slot), config);
    tokio::spawn(async move { slot.consume_host_events(rx).await });
    notifier
}

/// Load the config, attach and mount a controller, then hand it to `app`.
async fn setup<C, F, Fut>(
    tx: UnboundedSender<SlotCommand<C>>,
    rx: UnboundedReceiver<HostEvent>,
    app: F,
) where
    C: Send + 'static,
    F: FnOnce(BridgeNotifier<C>) -> Fut,
    Fut: Future<Output = ()>,
{
    let config = match crate::config::load_config().await {
        Ok(config) => config,
        Err(error) => {
            log::warn!("Failed to load config, falling back to defaults: {error}");
            NotifierConfig::default()
        }
    };

    let notifier = attach(tx, rx, config);
    let guard = match notifier.mount() {
        Ok(guard) => Some(guard),
        Err(error) => {
            log::error!("Notifier stays unmounted: {error}");
            None
        }
    };

    app(notifier).await;
    drop(guard);
}

/// Spawn the notification runtime on its own thread and run `app` against a
/// mounted, bridge-backed controller. The runtime shuts down once `app`
/// returns, which also closes the command channel.
pub fn run<C, F, Fut>(
    tx: UnboundedSender<SlotCommand<C>>,
    rx: UnboundedReceiver<HostEvent>,
    app: F,
) -> thread::JoinHandle<()>
where
    C: Send + 'static,
    F: FnOnce(BridgeNotifier<C>) -> Fut + Send + 'static,
    Fut: Future<Output = ()>,
{
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(error) => {
                log::error!("Failed to build tokio runtime: {error}");
                return;
            }
        };
        runtime.block_on(setup(tx, rx, app));
    })
}
