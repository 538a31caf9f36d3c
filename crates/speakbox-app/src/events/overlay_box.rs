use speakbox_core::overlay::OverlayBox;
use speakbox_types::{AppEvent, PointerButton, PointerEvent, PointerKind, Region};

use crate::context::EventContext;
use crate::session::Session;

pub const BOX_HIDDEN: &str = "Box hidden but active";

/// Replace any existing box with a fresh one at `region`
pub async fn create(ctx: &EventContext, session: &mut Session, region: Region) {
    if region.is_empty() {
        tracing::warn!("Refusing to create an empty box at {region}");
        return;
    }

    destroy(ctx, session).await;
    session.overlay = Some(OverlayBox::new(region, session.box_opacity, session.limits));
    session.visibility.show_box = true;
    tracing::info!("Selection box created at {region}");

    publish(ctx, session).await;
    ctx.status("Ready").await;
}

pub async fn destroy(ctx: &EventContext, session: &mut Session) {
    if session.overlay.take().is_some() {
        tracing::debug!("Selection box destroyed");
        ctx.to_ui(AppEvent::BoxChanged(None)).await;
    }
}

pub async fn publish(ctx: &EventContext, session: &Session) {
    if session.overlay.is_some() {
        ctx.to_ui(AppEvent::BoxChanged(session.box_view())).await;
    }
}

/// Primary button moves, secondary resizes from the edge under the pointer
pub async fn pointer(ctx: &EventContext, session: &mut Session, pointer: PointerEvent) {
    let Some(overlay) = session.overlay.as_mut() else {
        return;
    };

    let changed = match pointer.kind {
        PointerKind::Down(PointerButton::Primary) => {
            overlay.begin_move(pointer.position);
            false
        }
        PointerKind::Down(PointerButton::Secondary) => {
            let mode = overlay.begin_resize(pointer.position);
            tracing::debug!("Resize gesture {mode:?}");
            true
        }
        PointerKind::Move => match overlay.drag_to(pointer.position) {
            Some(_) => true,
            None => {
                let before = overlay.hover_mode();
                overlay.hover(pointer.position) != before
            }
        },
        PointerKind::Up(_) => {
            if let Some(region) = overlay.end_gesture() {
                tracing::debug!("Box now at {region}");
            }
            true
        }
    };

    if changed {
        publish(ctx, session).await;
    }
}

pub async fn toggle_visibility(ctx: &EventContext, session: &mut Session) {
    let hidden = session.visibility.toggle_auto_hide();
    visibility_changed(ctx, session, hidden).await;
}

pub async fn set_show_box(ctx: &EventContext, session: &mut Session, show: bool) {
    session.visibility.show_box = show;
    publish(ctx, session).await;
}

pub async fn set_auto_hide(ctx: &EventContext, session: &mut Session, hide: bool) {
    session.visibility.auto_hide = hide;
    visibility_changed(ctx, session, hide).await;
}

async fn visibility_changed(ctx: &EventContext, session: &Session, hidden: bool) {
    publish(ctx, session).await;
    if hidden {
        ctx.status(BOX_HIDDEN).await;
    } else if session.box_view().is_some_and(|view| view.visible) {
        ctx.status("Ready").await;
    }
}

/// Applies to the current box and to boxes created later
pub async fn set_opacity(ctx: &EventContext, session: &mut Session, opacity: f32) {
    if opacity.is_nan() {
        return;
    }
    session.box_opacity = opacity.clamp(0.0, 1.0);
    if let Some(overlay) = session.overlay.as_mut() {
        overlay.set_opacity(opacity);
    }
    publish(ctx, session).await;
}
