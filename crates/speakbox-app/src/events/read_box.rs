use speakbox_core::pipeline::PipelineOutcome;
use speakbox_types::{AppEvent, Notification};

use crate::context::EventContext;
use crate::events::reading;
use crate::session::Session;

pub const NO_BOX: &str = "Please create a selection box first.";
pub const NO_TEXT: &str =
    "No text found in the selected area. Try adjusting the selection box or check the debug images.";

/// Capture the box's current geometry and OCR it off the event loop. Hidden
/// boxes still capture. An active reading keeps playing; the fresh text only
/// lands in the buffer.
pub async fn handle_read_box(ctx: &EventContext, session: &mut Session) {
    let Some(region) = session.overlay.as_ref().map(|overlay| overlay.region()) else {
        ctx.notify(Notification::info("No Box", NO_BOX)).await;
        return;
    };
    if session.capturing {
        tracing::debug!(">>> [OCR] Capture already running");
        return;
    }

    session.capturing = true;
    if !ctx.state.reading.is_reading() {
        ctx.status("Capturing...").await;
    }
    tracing::debug!(">>> [OCR] Capturing {region}");

    let pipeline = ctx.state.pipeline.clone();
    let event_tx = ctx.event_tx.clone();
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || pipeline.run(region)).await;

        let event = match result {
            Ok(Ok(PipelineOutcome::Text(recognized))) => AppEvent::TextRecognized {
                text: recognized.text,
                engine: recognized.engine,
            },
            Ok(Ok(PipelineOutcome::NoText)) => AppEvent::NoTextFound,
            Ok(Err(e)) => AppEvent::CaptureFailed(e.to_string()),
            Err(e) => AppEvent::CaptureFailed(format!("OCR task failed: {e}")),
        };

        if let Err(e) = event_tx.send(event).await {
            tracing::error!("Failed to report OCR result: {}", e);
        }
    });
}

pub async fn text_recognized(ctx: &EventContext, session: &mut Session, text: String, engine: String) {
    session.capturing = false;
    let text = text.trim().to_string();
    tracing::info!(">>> [OCR] {} chars from {}", text.len(), engine);

    session.text = text.clone();
    ctx.to_ui(AppEvent::TextChanged(text)).await;
    reading::start_reading(ctx, session).await;
}

pub async fn no_text(ctx: &EventContext, session: &mut Session) {
    session.capturing = false;
    ctx.status("No text found").await;
    ctx.notify(Notification::info("No Text", NO_TEXT)).await;
}

pub async fn capture_failed(ctx: &EventContext, session: &mut Session, message: String) {
    session.capturing = false;
    tracing::error!(">>> [OCR] Failed: {}", message);
    if !ctx.state.reading.is_reading() {
        ctx.status("Ready").await;
    }
    ctx.notify(Notification::error(
        "Error",
        format!("Failed to capture or OCR: {message}"),
    ))
    .await;
}
