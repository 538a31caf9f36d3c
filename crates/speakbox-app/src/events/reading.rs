use speakbox_speech::PlaybackOutcome;
use speakbox_types::{AppEvent, Notification};

use crate::context::EventContext;
use crate::session::Session;

pub const SPEECH_STOPPED: &str = "Speech stopped";

/// Speak the text buffer. No-op when empty or already reading.
pub async fn start_reading(ctx: &EventContext, session: &mut Session) {
    let text = session.text.trim().to_string();
    if text.is_empty() {
        tracing::debug!("Nothing to read");
        return;
    }

    let Some(guard) = ctx.state.reading.try_start() else {
        tracing::debug!("Already reading");
        return;
    };
    session.stop_requested = false;
    ctx.status("Reading...").await;

    let speech = ctx.state.speech.clone();
    let voice = session.voice.clone();
    let event_tx = ctx.event_tx.clone();
    tokio::spawn(async move {
        tracing::info!("Reading {} chars with {}", text.len(), voice);
        let result = speech.speak(&text, &voice, guard.token()).await;
        drop(guard);

        let event = match result {
            Ok(PlaybackOutcome::Finished) => AppEvent::ReadingFinished,
            Ok(PlaybackOutcome::Cancelled) => {
                tracing::info!("Reading cancelled");
                AppEvent::ReadingFinished
            }
            Err(e) => AppEvent::PlaybackFailed(e.to_string()),
        };
        if let Err(e) = event_tx.send(event).await {
            tracing::debug!("Playback result dropped: {e}");
        }
    });
}

/// Idempotent, quiet when nothing is playing
pub async fn stop_reading(ctx: &EventContext, session: &mut Session) {
    if ctx.state.reading.stop() {
        tracing::info!("Stopping speech...");
        session.stop_requested = true;
        ctx.state.speech.terminate();
        ctx.to_ui(AppEvent::StatusUpdate {
            status: SPEECH_STOPPED.to_string(),
            reading: false,
        })
        .await;
    }
}

pub async fn finished(ctx: &EventContext, session: &mut Session) {
    if std::mem::take(&mut session.stop_requested) {
        ctx.status(SPEECH_STOPPED).await;
    } else {
        ctx.status("Ready").await;
    }
}

pub async fn failed(ctx: &EventContext, session: &mut Session, message: String) {
    session.stop_requested = false;
    tracing::error!("Playback failed: {message}");
    ctx.status("Ready").await;
    ctx.notify(Notification::error("Error", format!("Failed to read text: {message}")))
        .await;
}

pub async fn select_voice(ctx: &EventContext, session: &mut Session, voice: String) {
    let known = ctx.state.config.read().await.speech.knows_voice(&voice);
    if !known {
        tracing::warn!("Unknown voice {voice}");
        ctx.notify(Notification::error("Voice", format!("Unknown voice '{voice}'")))
            .await;
        return;
    }

    tracing::info!("Voice set to {voice}");
    session.voice = voice.clone();
    ctx.state.config.write().await.speech.voice = voice.clone();
    ctx.to_ui(AppEvent::VoiceChanged(voice)).await;
}

/// Hand the chord to the hotkey thread, which reports back on its own
pub async fn rebind_hotkey(ctx: &EventContext, chord: String) {
    let enabled = ctx.state.config.read().await.hotkeys.enabled;
    if !enabled {
        ctx.state.config.write().await.hotkeys.read_text = chord.clone();
        ctx.notify(Notification::info(
            "Hotkey",
            format!("Read-text hotkey set to {chord} (global hotkeys are disabled)"),
        ))
        .await;
        return;
    }

    match ctx.rebind_tx.try_send(chord.clone()) {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!("Rebind queue full, dropped {chord}");
            ctx.notify(Notification::error(
                "Hotkey",
                format!("Hotkey listener is busy, {chord} was not applied. Try again."),
            ))
            .await;
        }
        Err(e) => {
            tracing::warn!("Hotkey listener unavailable: {e}");
            ctx.notify(Notification::error(
                "Hotkey",
                format!("Global hotkey listener is not running, {chord} was not applied"),
            ))
            .await;
        }
    }
}
