use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncSender, Receiver};
use speakbox_ocr::HotkeyManager;
use speakbox_types::{AppEvent, HotkeyAction, Notification};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

/// Global hotkey listener. Registration failures are reported and the
/// affected actions stay reachable from the panel.
pub async fn hotkey_io(
    state: Arc<AppState>,
    delta_time: Duration,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    ui_tx: AsyncSender<AppEvent>,
    rebind_rx: Receiver<String>,
) -> anyhow::Result<()> {
    let bindings: Vec<(HotkeyAction, String)> = {
        let config = state.config.read().await;
        config
            .hotkeys
            .bindings()
            .into_iter()
            .map(|(action, chord)| (action, chord.to_string()))
            .collect()
    };

    tokio::task::spawn_blocking(move || {
        let mut manager = match HotkeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                tracing::error!("Failed to create hotkey manager: {e:?}");
                notify(&ui_tx, Notification::error("Hotkeys", format!("Global hotkeys unavailable: {e}")));
                rebind_rx.close();
                return;
            }
        };

        let failures = manager.register_all(bindings.iter().map(|(a, c)| (*a, c.as_str())));
        for (action, e) in failures {
            tracing::warn!("Hotkey for {action:?} not registered: {e:?}");
            notify(&ui_tx, Notification::error("Hotkey conflict", format!("{action:?}: {e}")));
        }

        loop {
            if cancel.is_cancelled() {
                break;
            }

            if let Some(action) = manager.poll() {
                tracing::info!("Hotkey pressed: {action:?}");
                match event_tx.try_send(action.event()) {
                    Ok(true) => {}
                    Ok(false) => tracing::warn!("Event queue full, dropped {action:?}"),
                    Err(_) => break,
                }
            }

            if let Ok(Some(chord)) = rebind_rx.try_recv() {
                rebind(&state, &mut manager, &ui_tx, chord);
            }

            std::thread::sleep(delta_time);
        }

        rebind_rx.close();
        tracing::info!("Hotkey listener stopping");
    })
    .await?;

    Ok(())
}

fn rebind(state: &AppState, manager: &mut HotkeyManager, ui_tx: &AsyncSender<AppEvent>, chord: String) {
    match manager.rebind(HotkeyAction::ReadText, &chord) {
        Ok(()) => {
            state.config.blocking_write().hotkeys.read_text = chord.clone();
            notify(ui_tx, Notification::info("Hotkey", format!("Read-text hotkey set to {chord}")));
        }
        Err(e) => {
            tracing::warn!("Error updating hotkey: {e:?}");
            notify(ui_tx, Notification::error("Hotkey", format!("Could not bind {chord}: {e}")));
        }
    }
}

fn notify(ui_tx: &AsyncSender<AppEvent>, notification: Notification) {
    if let Err(e) = ui_tx.try_send(AppEvent::Notify(notification)) {
        tracing::debug!("UI channel closed: {e}");
    }
}
