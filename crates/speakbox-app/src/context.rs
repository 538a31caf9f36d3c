use std::sync::Arc;

use kanal::{AsyncSender, Sender};
use speakbox_types::{AppEvent, Notification};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Shared handles every event handler needs
#[derive(Clone)]
pub struct EventContext {
    pub state: Arc<AppState>,
    /// Loops back into the event loop, for results of background work
    pub event_tx: AsyncSender<AppEvent>,
    pub ui_tx: AsyncSender<AppEvent>,
    /// Chords for the hotkey thread to rebind the read-text action to
    pub rebind_tx: Sender<String>,
    pub cancel: CancellationToken,
}

impl EventContext {
    pub fn new(
        state: Arc<AppState>,
        event_tx: AsyncSender<AppEvent>,
        ui_tx: AsyncSender<AppEvent>,
        rebind_tx: Sender<String>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            state,
            event_tx,
            ui_tx,
            rebind_tx,
            cancel,
        }
    }

    /// A closed UI channel is not an error for the backend
    pub async fn to_ui(&self, event: AppEvent) {
        if let Err(e) = self.ui_tx.send(event).await {
            tracing::debug!("UI channel closed: {e}");
        }
    }

    pub async fn status(&self, status: impl Into<String>) {
        self.to_ui(AppEvent::StatusUpdate {
            status: status.into(),
            reading: self.state.reading.is_reading(),
        })
        .await;
    }

    pub async fn notify(&self, notification: Notification) {
        self.to_ui(AppEvent::Notify(notification)).await;
    }
}
