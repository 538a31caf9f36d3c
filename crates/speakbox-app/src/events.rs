use kanal::AsyncReceiver;
use speakbox_types::AppEvent;

use crate::context::EventContext;
use crate::session::Session;

pub mod capture_region;
pub mod overlay_box;
pub mod read_box;
pub mod reading;
pub mod text_buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// App's main loop; the only owner of the session
pub async fn event_loop(
    ctx: EventContext,
    mut session: Session,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    ctx.to_ui(AppEvent::VoiceChanged(session.voice.clone())).await;
    ctx.to_ui(AppEvent::BackendReady).await;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = ctx.cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                reading::stop_reading(&ctx, &mut session).await;
                break;
            }
        };

        tracing::debug!("[EVENT_LOOP] {:?}", event);
        if handle_events(&ctx, &mut session, event).await? == Flow::Exit {
            break;
        }
    }

    Ok(())
}

pub async fn handle_events(
    ctx: &EventContext,
    session: &mut Session,
    event: AppEvent,
) -> anyhow::Result<Flow> {
    match event {
        // Selection
        AppEvent::StartCapture => capture_region::begin(ctx, session).await?,
        AppEvent::SelectionPointer(pointer) => capture_region::pointer(ctx, session, pointer).await,
        AppEvent::CancelSelection => capture_region::escape(ctx, session).await,
        AppEvent::SelectionTimeout(id) => capture_region::timeout(ctx, session, id).await,

        // Overlay box
        AppEvent::CreateBox(region) => overlay_box::create(ctx, session, region).await,
        AppEvent::BoxPointer(pointer) => overlay_box::pointer(ctx, session, pointer).await,
        AppEvent::ToggleBoxVisibility => overlay_box::toggle_visibility(ctx, session).await,
        AppEvent::SetShowBox(show) => overlay_box::set_show_box(ctx, session, show).await,
        AppEvent::SetAutoHide(hide) => overlay_box::set_auto_hide(ctx, session, hide).await,
        AppEvent::SetBoxOpacity(opacity) => overlay_box::set_opacity(ctx, session, opacity).await,

        // Capture + OCR
        AppEvent::ReadBox => read_box::handle_read_box(ctx, session).await,
        AppEvent::TextRecognized { text, engine } => {
            read_box::text_recognized(ctx, session, text, engine).await
        }
        AppEvent::NoTextFound => read_box::no_text(ctx, session).await,
        AppEvent::CaptureFailed(message) => read_box::capture_failed(ctx, session, message).await,

        // Speech
        AppEvent::ReadText => reading::start_reading(ctx, session).await,
        AppEvent::StopReading => reading::stop_reading(ctx, session).await,
        AppEvent::ReadingFinished => reading::finished(ctx, session).await,
        AppEvent::PlaybackFailed(message) => reading::failed(ctx, session, message).await,
        AppEvent::SelectVoice(voice) => reading::select_voice(ctx, session, voice).await,
        AppEvent::RebindReadHotkey(chord) => reading::rebind_hotkey(ctx, chord).await,

        // Text buffer
        AppEvent::TextEdited(text) => text_buffer::edit(session, text),
        AppEvent::ClearText => text_buffer::clear(ctx, session).await,
        AppEvent::CopyToMain => text_buffer::copy_to_main(ctx, session).await,

        AppEvent::Close => {
            tracing::info!("Close requested");
            reading::stop_reading(ctx, session).await;
            overlay_box::destroy(ctx, session).await;
            ctx.to_ui(AppEvent::Close).await;
            return Ok(Flow::Exit);
        }

        // UI-only events, nothing to do in the backend
        AppEvent::StatusUpdate { .. }
        | AppEvent::SelectionOverlay(_)
        | AppEvent::BoxChanged(_)
        | AppEvent::TextChanged(_)
        | AppEvent::PanelVisible(_)
        | AppEvent::VoiceChanged(_)
        | AppEvent::Notify(_)
        | AppEvent::BackendReady => {}
    }

    Ok(Flow::Continue)
}
