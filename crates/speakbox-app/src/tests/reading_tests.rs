//! Read box -> OCR -> speech, stop, voices and close

use std::sync::atomic::Ordering;
use std::time::Duration;

use speakbox_types::{AppEvent, NotifyLevel, Region};
use tokio::time::timeout;

use super::support::{HarnessBuilder, StubSpeech, WAIT, engines};
use crate::events::read_box::{NO_BOX, NO_TEXT};
use crate::events::reading::SPEECH_STOPPED;

#[tokio::test]
async fn test_read_without_box_notifies() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::ReadBox).await;

    let AppEvent::Notify(notification) = h.expect(|e| matches!(e, AppEvent::Notify(_))).await else {
        unreachable!()
    };
    assert_eq!(notification.level, NotifyLevel::Info);
    assert_eq!(notification.message, NO_BOX);
    assert!(h.capture.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_both_engines_empty_means_no_reading() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::CreateBox(Region::new(100, 100, 200, 150))).await;
    h.send(AppEvent::ReadBox).await;

    h.expect_status("No text found").await;
    h.expect(|e| matches!(e, AppEvent::Notify(n) if n.message == NO_TEXT)).await;
    assert_eq!(h.speech.calls(), 0);
}

#[tokio::test]
async fn test_fallback_text_is_read_aloud() {
    let mut builder = HarnessBuilder::new();
    builder.chain = engines("  \n", "Press E to open");
    builder.speech = StubSpeech::finishing_after(Duration::from_millis(20));
    let h = builder.start().await;

    h.send(AppEvent::CreateBox(Region::new(100, 100, 200, 150))).await;
    h.send(AppEvent::ReadBox).await;

    h.expect(|e| matches!(e, AppEvent::TextChanged(t) if t == "Press E to open")).await;
    h.expect(|e| matches!(e, AppEvent::StatusUpdate { status, reading: true } if status == "Reading..."))
        .await;
    h.expect(|e| matches!(e, AppEvent::StatusUpdate { status, reading: false } if status == "Ready"))
        .await;

    let spoken = h.speech.spoken.lock().unwrap().clone();
    assert_eq!(
        spoken,
        vec![("Press E to open".to_string(), "en-US-GuyNeural".to_string())]
    );
}

#[tokio::test]
async fn test_capture_failure_notifies_error() {
    let mut builder = HarnessBuilder::new();
    builder.capture.fail = true;
    let h = builder.start().await;

    h.send(AppEvent::CreateBox(Region::new(0, 0, 100, 100))).await;
    h.send(AppEvent::ReadBox).await;

    let AppEvent::Notify(notification) = h.expect(|e| matches!(e, AppEvent::Notify(_))).await else {
        unreachable!()
    };
    assert_eq!(notification.level, NotifyLevel::Error);
    assert!(notification.message.contains("access denied"));
}

#[tokio::test]
async fn test_second_start_while_reading_is_noop() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::TextEdited("Quest updated".to_string())).await;

    h.send(AppEvent::ReadText).await;
    h.expect_status("Reading...").await;
    h.send(AppEvent::ReadText).await;

    assert!(h.collect_for(Duration::from_millis(100)).await.is_empty());
    assert_eq!(h.speech.calls(), 1);

    h.send(AppEvent::StopReading).await;
    h.expect_status(SPEECH_STOPPED).await;
    assert_eq!(h.speech.terminated.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_read_box_while_reading_refreshes_text_only() {
    let mut builder = HarnessBuilder::new();
    builder.chain = engines("Door is locked", "");
    let h = builder.start().await;
    h.send(AppEvent::CreateBox(Region::new(0, 0, 100, 100))).await;
    h.send(AppEvent::TextEdited("Old line".to_string())).await;
    h.send(AppEvent::ReadText).await;
    h.expect_status("Reading...").await;

    h.send(AppEvent::ReadBox).await;
    h.expect(|e| matches!(e, AppEvent::TextChanged(t) if t == "Door is locked")).await;

    assert_eq!(h.capture.requested.lock().unwrap().len(), 1);
    assert_eq!(h.speech.calls(), 1);
    assert!(h.is_reading());
    let events = h.collect_for(Duration::from_millis(100)).await;
    assert!(!events.iter().any(|e| matches!(e, AppEvent::StatusUpdate { .. })));
}

#[tokio::test]
async fn test_stop_then_read_again() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::TextEdited("Hello".to_string())).await;

    h.send(AppEvent::ReadText).await;
    h.expect_status("Reading...").await;
    h.send(AppEvent::StopReading).await;
    h.expect_status(SPEECH_STOPPED).await;

    // Guard released by the playback task
    timeout(WAIT, async {
        while h.is_reading() {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .unwrap();

    h.send(AppEvent::ReadText).await;
    h.expect_status("Reading...").await;
    assert_eq!(h.speech.calls(), 2);
}

#[tokio::test]
async fn test_stop_while_idle_changes_nothing() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::StopReading).await;
    h.send(AppEvent::StopReading).await;

    assert!(h.collect_for(Duration::from_millis(100)).await.is_empty());
    assert_eq!(h.speech.terminated.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_empty_text_is_not_read() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::TextEdited("   ".to_string())).await;
    h.send(AppEvent::ReadText).await;

    assert!(h.collect_for(Duration::from_millis(100)).await.is_empty());
    assert_eq!(h.speech.calls(), 0);
}

#[tokio::test]
async fn test_voice_selection() {
    let mut builder = HarnessBuilder::new();
    builder.speech = StubSpeech::finishing_after(Duration::from_millis(10));
    let h = builder.start().await;

    h.send(AppEvent::SelectVoice("robot".to_string())).await;
    h.expect(|e| matches!(e, AppEvent::Notify(n) if n.level == NotifyLevel::Error)).await;

    h.send(AppEvent::SelectVoice("en-GB-SoniaNeural".to_string())).await;
    h.expect(|e| matches!(e, AppEvent::VoiceChanged(v) if v == "en-GB-SoniaNeural")).await;

    h.send(AppEvent::TextEdited("Hi".to_string())).await;
    h.send(AppEvent::ReadText).await;
    h.expect_status("Ready").await;
    assert_eq!(h.speech.spoken.lock().unwrap()[0].1, "en-GB-SoniaNeural");
}

#[tokio::test]
async fn test_copy_to_main_uses_clipboard() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::TextEdited(" Loot acquired \n".to_string())).await;
    h.send(AppEvent::CopyToMain).await;

    h.expect_status("Text copied to clipboard").await;
    assert_eq!(*h.clipboard.copied.lock().unwrap(), vec!["Loot acquired".to_string()]);
}

#[tokio::test]
async fn test_rebind_with_hotkeys_disabled_updates_config() {
    let h = HarnessBuilder::new().start().await;
    h.send(AppEvent::RebindReadHotkey("ctrl+alt+r".to_string())).await;
    h.expect(|e| matches!(e, AppEvent::Notify(_))).await;
    assert_eq!(h.config().await.hotkeys.read_text, "ctrl+alt+r");
}

#[tokio::test]
async fn test_rebind_without_listener_notifies() {
    let mut builder = HarnessBuilder::new();
    builder.config.hotkeys.enabled = true;
    let h = builder.start().await;
    h.controller.context().rebind_tx.close();

    h.send(AppEvent::RebindReadHotkey("ctrl+alt+r".to_string())).await;
    let AppEvent::Notify(notification) = h.expect(|e| matches!(e, AppEvent::Notify(_))).await else {
        unreachable!()
    };
    assert_eq!(notification.level, NotifyLevel::Error);
    assert!(notification.message.contains("not running"));
    assert_eq!(h.config().await.hotkeys.read_text, "F1");
}

#[tokio::test]
async fn test_rebind_with_full_queue_notifies() {
    let mut builder = HarnessBuilder::new();
    builder.config.hotkeys.enabled = true;
    let h = builder.start().await;

    // Nobody drains the queue without a listener thread
    for n in 2..=6 {
        h.send(AppEvent::RebindReadHotkey(format!("F{n}"))).await;
    }
    let AppEvent::Notify(notification) = h.expect(|e| matches!(e, AppEvent::Notify(_))).await else {
        unreachable!()
    };
    assert!(notification.message.contains("busy"));
    assert!(notification.message.contains("F6"));
}

#[tokio::test]
async fn test_close_stops_reading_and_ends_loop() {
    let mut h = HarnessBuilder::new().start().await;
    h.send(AppEvent::CreateBox(Region::new(0, 0, 100, 100))).await;
    h.send(AppEvent::TextEdited("Long dialogue".to_string())).await;
    h.send(AppEvent::ReadText).await;
    h.expect_status("Reading...").await;

    h.send(AppEvent::Close).await;
    h.expect_status(SPEECH_STOPPED).await;
    h.expect(|e| matches!(e, AppEvent::BoxChanged(None))).await;
    h.expect(|e| matches!(e, AppEvent::Close)).await;

    let finished = timeout(WAIT, h.tasks.join_next()).await.unwrap().unwrap();
    assert!(finished.unwrap().is_ok());
    assert_eq!(h.speech.terminated.load(Ordering::SeqCst), 1);
    h.controller.shutdown();
}
