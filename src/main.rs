mod host;

use std::time::Duration;

use host::Banner;
use overnote_core::{BridgeChannels, BridgeNotifier, runtime};
use overnote_motion::Curve;

async fn scenario(notifier: BridgeNotifier<Banner>) {
    let build = notifier
        .notification(Banner::new("Build finished", "All targets are up to date"))
        .duration(Duration::from_secs(2));
    notifier.show(build).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    // replaces the build banner before its hold runs out
    let sync = notifier
        .notification(Banner::new("Sync", "3 files uploaded\n1 conflict"))
        .duration(Duration::from_secs(1))
        .curve(Curve::FastOutSlowIn);
    notifier.show(sync).await;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let (tapped_tx, tapped_rx) = tokio::sync::oneshot::channel();
    let update = notifier
        .notification(Banner::new("Update ready", "Tap to restart").tapped())
        .sticky()
        .on_tap(move || {
            let _ = tapped_tx.send(());
        });
    notifier.show(update).await;
    if tapped_rx.await.is_ok() {
        log::info!("Update banner tapped");
    }
    notifier.dismiss().await;
}

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()?;

    let channels = BridgeChannels::default();
    let notifications = runtime::run(channels.slot_tx, channels.slot_rx, scenario);
    host::run(channels.host_rx, channels.host_tx);

    notifications
        .join()
        .map_err(|_| anyhow::anyhow!("notification runtime panicked"))
}
