//! Console front end for the panel: prints backend state changes and turns
//! typed commands into the same events a graphical panel would send.

use std::io::{BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use speakbox_config::Config;
use speakbox_types::AppEvent;
use tokio::sync::{RwLock, oneshot};

pub mod bridge;
pub mod commands;
pub mod events;
pub mod state;

use self::bridge::{UiBridge, UiBridgeHandle};
use self::commands::{Command, INSTRUCTIONS, describe, parse_command};
use self::events::{UiFlow, handle_events};
use self::state::UiState;

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
) -> anyhow::Result<()> {
    let state = {
        let config = config.read().await;
        UiState::new(
            config.ui.clone(),
            config.speech.voice.clone(),
            config.speech.voices.clone(),
        )
    };
    let state = Arc::new(Mutex::new(state));

    let (bridge, handle) = UiBridge::new();
    let bridge = Arc::new(bridge);
    let UiBridgeHandle {
        to_ui_rx,
        from_ui_tx,
    } = handle;

    // Plain threads: a pending stdin read must not hold up runtime shutdown
    let (done_tx, done_rx) = oneshot::channel();
    let render_state = state.clone();
    std::thread::Builder::new()
        .name("speakbox-render".into())
        .spawn(move || {
            let result = render_loop(to_ui_rx, &render_state);
            done_tx.send(result).ok();
        })
        .context("Failed to spawn render thread")?;

    let from_ui_tx = from_ui_tx.to_sync();
    std::thread::Builder::new()
        .name("speakbox-input".into())
        .spawn(move || {
            if let Err(e) = input_loop(from_ui_tx, &state) {
                tracing::warn!("Console input stopped: {e}");
            }
        })
        .context("Failed to spawn input thread")?;

    let from_backend = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.forward_from_backend(app_to_ui_rx).await })
    };
    let to_backend = {
        let bridge = bridge.clone();
        tokio::spawn(async move { bridge.forward_to_backend(ui_to_app_tx).await })
    };

    let result = done_rx.await.context("Render thread panicked")?;

    from_backend.abort();
    to_backend.abort();
    tracing::info!("UI loop finished");
    result
}

fn render_loop(to_ui_rx: Receiver<AppEvent>, state: &Mutex<UiState>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    while let Ok(event) = to_ui_rx.recv() {
        let mut out = stdout.lock();
        if handle_events(event, state, &mut out)? == UiFlow::Quit {
            writeln!(out, "Bye.")?;
            break;
        }
    }
    Ok(())
}

/// Ends on `quit` or end of input
fn input_loop(from_ui_tx: Sender<AppEvent>, state: &Mutex<UiState>) -> anyhow::Result<()> {
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        let state = state.lock().unwrap_or_else(PoisonError::into_inner);

        match parse_command(&line, &state) {
            Ok(None) => {}
            Ok(Some(Command::Send(events))) => {
                drop(state);
                for event in events {
                    from_ui_tx.send(event)?;
                }
            }
            Ok(Some(Command::Help)) => println!("{INSTRUCTIONS}"),
            Ok(Some(Command::Status)) => println!("{}", describe(&state)),
            Ok(Some(Command::Voices)) => {
                for voice in &state.voices {
                    let marker = if *voice == state.voice { '*' } else { ' ' };
                    println!("{marker} {voice}");
                }
            }
            Ok(Some(Command::Quit)) => {
                from_ui_tx.send(AppEvent::Close)?;
                break;
            }
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}
