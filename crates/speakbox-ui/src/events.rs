use std::io::Write;
use std::sync::{Mutex, PoisonError};

use speakbox_types::{AppEvent, NotifyLevel};

use crate::state::UiState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiFlow {
    Continue,
    Quit,
}

/// Apply one backend event to the panel state and print what changed
pub fn handle_events(
    event: AppEvent,
    state: &Mutex<UiState>,
    out: &mut impl Write,
) -> std::io::Result<UiFlow> {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    let compact = state.config.compact_mode;

    match event {
        AppEvent::BackendReady => {
            tracing::debug!("[UI] Backend ready");
            state.ready = true;
            state.status = "Ready".to_string();
            writeln!(out, "Ready. Type 'help' for commands.")?;
        }
        AppEvent::StatusUpdate { status, reading } => {
            tracing::debug!("[UI] Status: {} (reading: {})", status, reading);
            if status != state.status || reading != state.reading {
                writeln!(out, "[status] {status}")?;
            }
            state.status = status;
            state.reading = reading;
        }
        AppEvent::SelectionOverlay(view) => {
            match (&state.selection, &view) {
                (None, Some(view)) => {
                    writeln!(out, "Selection overlay over {}. Use 'select X1 Y1 X2 Y2' or 'escape'.", view.screen)?;
                }
                (Some(_), Some(view)) if !compact => {
                    if let Some(preview) = view.preview {
                        writeln!(out, "  selecting {preview}")?;
                    }
                }
                (Some(_), None) => writeln!(out, "Selection overlay closed")?,
                _ => {}
            }
            state.selection = view;
        }
        AppEvent::BoxChanged(view) => {
            match &view {
                Some(view) if !compact => writeln!(
                    out,
                    "Box {} opacity {:.2} {} cursor {}",
                    view.region,
                    view.opacity,
                    if view.visible { "visible" } else { "hidden" },
                    view.hover.cursor()
                )?,
                None if state.box_view.is_some() => writeln!(out, "Box removed")?,
                _ => {}
            }
            state.box_view = view;
        }
        AppEvent::TextChanged(text) => {
            if !text.is_empty() {
                writeln!(out, "Text: {text}")?;
            }
            state.text = text;
        }
        AppEvent::PanelVisible(visible) => {
            if visible != state.panel_visible && !compact {
                writeln!(out, "Panel {}", if visible { "shown" } else { "hidden" })?;
            }
            state.panel_visible = visible;
        }
        AppEvent::VoiceChanged(voice) => {
            writeln!(out, "Voice: {voice}")?;
            state.voice = voice;
        }
        AppEvent::Notify(notification) => {
            let tag = match notification.level {
                NotifyLevel::Info => "info",
                NotifyLevel::Error => "error",
            };
            writeln!(out, "[{tag}] {}: {}", notification.title, notification.message)?;
            state.push_notification(notification);
        }
        AppEvent::Close => {
            tracing::debug!("[UI] Close");
            state.panel_visible = false;
            return Ok(UiFlow::Quit);
        }
        other => {
            tracing::trace!("[UI] Ignoring {:?}", std::mem::discriminant(&other));
        }
    }

    out.flush()?;
    Ok(UiFlow::Continue)
}
