use anyhow::Context;
use speakbox_core::capture::ScreenCapture;
use speakbox_core::selection::{CancelReason, DragOutcome};
use speakbox_types::{AppEvent, Notification, PointerEvent, PointerKind};

use crate::context::EventContext;
use crate::events::overlay_box;
use crate::session::Session;

pub const SELECT_PROMPT: &str = "Click and drag to select text on screen. Press ESC to cancel.";
pub const SELECTION_CANCELLED: &str = "Selection cancelled. Ready.";

/// Hide the panel and open the crosshair overlay over every monitor
pub async fn begin(ctx: &EventContext, session: &mut Session) -> anyhow::Result<()> {
    if session.selection.is_dragging() {
        tracing::debug!("Selection already in progress");
        return Ok(());
    }

    let capture = ctx.state.pipeline.capture().clone();
    let screen = tokio::task::spawn_blocking(move || capture.virtual_screen())
        .await
        .context("Screen query task panicked")?;

    let screen = match screen {
        Ok(screen) => screen,
        Err(e) => {
            tracing::error!("Failed to query screens: {e}");
            ctx.notify(Notification::error("Error", format!("Failed to start selection: {e}")))
                .await;
            return Ok(());
        }
    };

    let Some(id) = session.selection.begin(screen) else {
        return Ok(());
    };
    tracing::info!("Selection {id} started over {screen}");

    session.panel_before_selection = session.panel_visible;
    set_panel(ctx, session, false).await;
    ctx.to_ui(AppEvent::SelectionOverlay(session.selection.view())).await;
    ctx.status(SELECT_PROMPT).await;

    spawn_failsafe(ctx, session, id);
    Ok(())
}

/// Cancels a forgotten overlay; stale ids are ignored by the machine
fn spawn_failsafe(ctx: &EventContext, session: &Session, id: u64) {
    let timeout = session.selection_timeout;
    let event_tx = ctx.event_tx.clone();
    let cancel = ctx.cancel.child_token();

    tokio::spawn(async move {
        tokio::select! {
            _ = tokio::time::sleep(timeout) => {
                if let Err(e) = event_tx.send(AppEvent::SelectionTimeout(id)).await {
                    tracing::debug!("Selection timeout dropped: {e}");
                }
            }
            _ = cancel.cancelled() => {}
        }
    });
}

pub async fn pointer(ctx: &EventContext, session: &mut Session, pointer: PointerEvent) {
    match pointer.kind {
        PointerKind::Down(_) => {
            if session.selection.pointer_down(pointer.position).is_some() {
                ctx.to_ui(AppEvent::SelectionOverlay(session.selection.view())).await;
            }
        }
        PointerKind::Move => {
            if session.selection.pointer_move(pointer.position).is_some() {
                ctx.to_ui(AppEvent::SelectionOverlay(session.selection.view())).await;
            }
        }
        PointerKind::Up(_) => {
            let outcome = session.selection.pointer_up(pointer.position);
            finish(ctx, session, outcome).await;
        }
    }
}

pub async fn escape(ctx: &EventContext, session: &mut Session) {
    let outcome = session.selection.escape();
    finish(ctx, session, outcome).await;
}

pub async fn timeout(ctx: &EventContext, session: &mut Session, id: u64) {
    let outcome = session.selection.expire(id);
    if outcome != DragOutcome::Pending {
        tracing::warn!("Selection {id} timed out");
    }
    finish(ctx, session, outcome).await;
}

async fn finish(ctx: &EventContext, session: &mut Session, outcome: DragOutcome) {
    match outcome {
        DragOutcome::Pending => {}
        DragOutcome::Confirmed(region) => {
            tracing::info!("Selection confirmed: {region}");
            close_overlay(ctx, session).await;
            overlay_box::create(ctx, session, region).await;
        }
        DragOutcome::Cancelled(reason) => {
            if reason == CancelReason::TooSmall {
                tracing::debug!("Selection too small, discarded");
            }
            close_overlay(ctx, session).await;
            ctx.status(SELECTION_CANCELLED).await;
        }
    }
}

async fn close_overlay(ctx: &EventContext, session: &mut Session) {
    ctx.to_ui(AppEvent::SelectionOverlay(None)).await;
    let restore = session.panel_before_selection;
    set_panel(ctx, session, restore).await;
}

async fn set_panel(ctx: &EventContext, session: &mut Session, visible: bool) {
    session.panel_visible = visible;
    ctx.to_ui(AppEvent::PanelVisible(visible)).await;
}
