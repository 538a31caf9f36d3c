use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use speakbox_types::AppEvent;

/// Bridge between the async backend and the blocking render thread
pub struct UiBridge {
    to_ui_tx: Sender<AppEvent>,
    from_ui_rx: AsyncReceiver<AppEvent>,
}

pub struct UiBridgeHandle {
    pub to_ui_rx: Receiver<AppEvent>,
    pub from_ui_tx: AsyncSender<AppEvent>,
}

impl UiBridge {
    pub fn new() -> (Self, UiBridgeHandle) {
        let (to_ui_tx, to_ui_rx) = kanal::bounded(128);
        let (from_ui_tx, from_ui_rx) = kanal::bounded_async(64);

        (
            UiBridge { to_ui_tx, from_ui_rx },
            UiBridgeHandle { to_ui_rx, from_ui_tx },
        )
    }

    /// Ends once the backend hangs up or the render thread is gone
    pub async fn forward_from_backend(&self, app_to_ui_rx: AsyncReceiver<AppEvent>) {
        while let Ok(event) = app_to_ui_rx.recv().await {
            let closing = matches!(event, AppEvent::Close);
            if self.to_ui_tx.send(event).is_err() || closing {
                break;
            }
        }
    }

    pub async fn forward_to_backend(&self, ui_to_app_tx: AsyncSender<AppEvent>) {
        while let Ok(event) = self.from_ui_rx.recv().await {
            if ui_to_app_tx.send(event).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_backend_events_reach_blocking_side() {
        let (bridge, handle) = UiBridge::new();
        let (app_tx, app_rx) = kanal::bounded_async(8);

        let forward = tokio::spawn(async move { bridge.forward_from_backend(app_rx).await });
        app_tx.send(AppEvent::BackendReady).await.unwrap();
        app_tx.send(AppEvent::Close).await.unwrap();

        let rx = handle.to_ui_rx;
        let received = tokio::task::spawn_blocking(move || {
            let first = rx.recv().unwrap();
            let second = rx.recv().unwrap();
            (first, second)
        })
        .await
        .unwrap();

        assert!(matches!(received, (AppEvent::BackendReady, AppEvent::Close)));
        timeout(Duration::from_secs(1), forward).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_ui_events_reach_backend() {
        let (bridge, handle) = UiBridge::new();
        let (app_tx, app_rx) = kanal::bounded_async(8);

        tokio::spawn(async move { bridge.forward_to_backend(app_tx).await });
        handle.from_ui_tx.send(AppEvent::ReadBox).await.unwrap();

        let event = timeout(Duration::from_secs(1), app_rx.recv()).await.unwrap().unwrap();
        assert!(matches!(event, AppEvent::ReadBox));
    }
}
