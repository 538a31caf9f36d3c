//! Crosshair drag -> persistent box, driven through the event loop

use std::time::Duration;

use speakbox_types::{AppEvent, PointerButton, PointerEvent, Region};

use super::support::HarnessBuilder;
use crate::events::capture_region::{SELECT_PROMPT, SELECTION_CANCELLED};

fn drag(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<AppEvent> {
    vec![
        AppEvent::SelectionPointer(PointerEvent::down(PointerButton::Primary, x1, y1)),
        AppEvent::SelectionPointer(PointerEvent::moved(x2, y2)),
        AppEvent::SelectionPointer(PointerEvent::up(PointerButton::Primary, x2, y2)),
    ]
}

#[tokio::test]
async fn test_drag_creates_box() {
    let h = HarnessBuilder::new().start().await;

    h.send(AppEvent::StartCapture).await;
    h.expect(|e| matches!(e, AppEvent::PanelVisible(false))).await;
    h.expect(|e| matches!(e, AppEvent::SelectionOverlay(Some(_)))).await;
    h.expect_status(SELECT_PROMPT).await;

    for event in drag(100, 100, 300, 250) {
        h.send(event).await;
    }

    h.expect(|e| matches!(e, AppEvent::SelectionOverlay(None))).await;
    let AppEvent::BoxChanged(Some(view)) = h.expect(|e| matches!(e, AppEvent::BoxChanged(Some(_)))).await else {
        unreachable!()
    };
    assert_eq!(view.region, Region::new(100, 100, 200, 150));
    assert_eq!(view.opacity, 0.5);
    assert!(view.visible);
    h.expect(|e| matches!(e, AppEvent::PanelVisible(true))).await;
}

#[tokio::test]
async fn test_confirmed_region_is_offset_by_screen_origin() {
    let mut builder = HarnessBuilder::new();
    builder.capture.screen = Region::new(-1920, -200, 3840, 1280);
    let h = builder.start().await;

    h.send(AppEvent::StartCapture).await;
    for event in drag(300, 250, 100, 100) {
        h.send(event).await;
    }

    let AppEvent::BoxChanged(Some(view)) = h.expect(|e| matches!(e, AppEvent::BoxChanged(Some(_)))).await else {
        unreachable!()
    };
    assert_eq!(view.region, Region::new(-1820, -100, 200, 150));
}

#[tokio::test]
async fn test_small_drag_cancels_without_box() {
    let h = HarnessBuilder::new().start().await;

    h.send(AppEvent::StartCapture).await;
    for event in drag(100, 100, 105, 300) {
        h.send(event).await;
    }
    h.expect_status(SELECTION_CANCELLED).await;

    let rest = h.collect_for(Duration::from_millis(100)).await;
    assert!(!rest.iter().any(|e| matches!(e, AppEvent::BoxChanged(Some(_)))));
}

#[tokio::test]
async fn test_escape_restores_panel_and_keeps_old_box() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::CreateBox(Region::new(10, 10, 100, 100))).await;
    h.expect(|e| matches!(e, AppEvent::BoxChanged(Some(_)))).await;

    h.send(AppEvent::StartCapture).await;
    h.expect(|e| matches!(e, AppEvent::PanelVisible(false))).await;
    h.send(AppEvent::CancelSelection).await;
    h.expect(|e| matches!(e, AppEvent::PanelVisible(true))).await;
    h.expect_status(SELECTION_CANCELLED).await;

    h.send(AppEvent::ReadBox).await;
    h.expect(|e| matches!(e, AppEvent::NoTextFound | AppEvent::Notify(_))).await;
    assert_eq!(*h.capture.requested.lock().unwrap(), vec![Region::new(10, 10, 100, 100)]);
}

#[tokio::test]
async fn test_second_capture_request_while_dragging_is_ignored() {
    let h = HarnessBuilder::new().start().await;

    h.send(AppEvent::StartCapture).await;
    h.expect_status(SELECT_PROMPT).await;
    h.send(AppEvent::StartCapture).await;

    let rest = h.collect_for(Duration::from_millis(100)).await;
    assert!(!rest.iter().any(|e| matches!(e, AppEvent::SelectionOverlay(Some(_)))));
}

#[tokio::test]
async fn test_failsafe_timeout_cancels_abandoned_selection() {
    let mut builder = HarnessBuilder::new();
    builder.config.overlay.selection_timeout_ms = 50;
    let h = builder.start().await;

    h.send(AppEvent::StartCapture).await;
    h.send(AppEvent::SelectionPointer(PointerEvent::down(PointerButton::Primary, 10, 10)))
        .await;
    h.expect(|e| matches!(e, AppEvent::SelectionOverlay(None))).await;
    h.expect_status(SELECTION_CANCELLED).await;
}

#[tokio::test]
async fn test_stale_timeout_ignored_by_next_selection() {
    let h = HarnessBuilder::new().start().await;

    h.send(AppEvent::StartCapture).await;
    h.send(AppEvent::CancelSelection).await;
    h.expect_status(SELECTION_CANCELLED).await;

    h.send(AppEvent::StartCapture).await;
    h.expect_status(SELECT_PROMPT).await;
    // Timeout of the first drag arrives late
    h.send(AppEvent::SelectionTimeout(1)).await;

    let rest = h.collect_for(Duration::from_millis(100)).await;
    assert!(!rest.iter().any(|e| matches!(e, AppEvent::SelectionOverlay(None))));

    for event in drag(0, 0, 50, 50) {
        h.send(event).await;
    }
    h.expect(|e| matches!(e, AppEvent::BoxChanged(Some(_)))).await;
}
