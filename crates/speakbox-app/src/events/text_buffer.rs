use speakbox_types::{AppEvent, Notification};

use crate::context::EventContext;
use crate::events::overlay_box;
use crate::session::Session;

pub fn edit(session: &mut Session, text: String) {
    tracing::debug!("Text edited: {} chars", text.len());
    session.text = text;
}

/// Empties the buffer and forgets the box with its geometry
pub async fn clear(ctx: &EventContext, session: &mut Session) {
    session.text.clear();
    ctx.to_ui(AppEvent::TextChanged(String::new())).await;
    overlay_box::destroy(ctx, session).await;
    ctx.status("Ready").await;
}

pub async fn copy_to_main(ctx: &EventContext, session: &mut Session) {
    let text = session.text.trim().to_string();
    if text.is_empty() {
        tracing::debug!("Nothing to copy");
        return;
    }

    match speakbox_io::copy_text(ctx.state.clipboard.clone(), text).await {
        Ok(()) => ctx.status("Text copied to clipboard").await,
        Err(e) => {
            tracing::error!("Clipboard copy failed: {e:?}");
            ctx.notify(Notification::error("Error", format!("Failed to copy text: {e}")))
                .await;
        }
    }
}
