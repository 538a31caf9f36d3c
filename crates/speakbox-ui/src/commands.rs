use anyhow::{Context, Result, bail};
use speakbox_types::{AppEvent, Point, PointerButton, PointerEvent, Region, ResizeMode};

use crate::state::UiState;

pub const INSTRUCTIONS: &str = "\
Keyboard shortcuts:
  Ctrl+Shift+C  create selection box
  Ctrl+Shift+R  read selected text
  Ctrl+Shift+S  stop reading
  Ctrl+Shift+H  toggle box visibility
  Ctrl+Shift+G  copy text to clipboard
  F1            read the text buffer (rebind with 'hotkey')

Commands:
  capture                    start a selection (same as Ctrl+Shift+C)
  select X1 Y1 X2 Y2         drag on the selection overlay
  escape                     cancel the selection
  box X Y W H                place the box directly
  move DX DY                 left-drag the box
  resize MODE DX DY          right-drag from an edge or corner (n s e w ne nw se sw)
  read | say | stop          read box, read text buffer, stop reading
  toggle                     hide/unhide the box, it keeps capturing
  show on|off                box visibility
  autohide on|off            temporary hide
  opacity 0.0-1.0            box opacity
  voice NAME | voices        choose or list voices
  hotkey CHORD               rebind the read-text hotkey
  text ...                   replace the text buffer
  copy | clear               copy text, clear text and box
  status | help | quit";

/// One console line, either forwarded to the backend or answered locally
#[derive(Debug, Clone)]
pub enum Command {
    Send(Vec<AppEvent>),
    Help,
    Status,
    Voices,
    Quit,
}

pub fn parse_command(line: &str, state: &UiState) -> Result<Option<Command>> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match word.to_ascii_lowercase().as_str() {
        "" => return Ok(None),
        "capture" => send(AppEvent::StartCapture),
        "select" => {
            let [x1, y1, x2, y2] = numbers::<4>(&args)?;
            Command::Send(vec![
                AppEvent::SelectionPointer(PointerEvent::down(PointerButton::Primary, x1, y1)),
                AppEvent::SelectionPointer(PointerEvent::moved(x2, y2)),
                AppEvent::SelectionPointer(PointerEvent::up(PointerButton::Primary, x2, y2)),
            ])
        }
        "escape" | "esc" => send(AppEvent::CancelSelection),
        "box" => {
            let [x, y, w, h] = numbers::<4>(&args)?;
            if w <= 0 || h <= 0 {
                bail!("Box size must be positive");
            }
            send(AppEvent::CreateBox(Region::new(x, y, w as u32, h as u32)))
        }
        "move" => {
            let [dx, dy] = numbers::<2>(&args)?;
            let region = current_box(state)?;
            let start = Point::new(
                region.x + region.width as i32 / 2,
                region.y + region.height as i32 / 2,
            );
            Command::Send(drag(PointerButton::Primary, start, dx, dy))
        }
        "resize" => {
            let Some((mode, deltas)) = args.split_first() else {
                bail!("Usage: resize MODE DX DY");
            };
            let mode: ResizeMode = mode.parse().map_err(anyhow::Error::msg)?;
            if mode == ResizeMode::None {
                bail!("Pick an edge or corner");
            }
            let [dx, dy] = numbers::<2>(deltas)?;
            let start = grab_point(current_box(state)?, mode);
            let mut events = vec![AppEvent::BoxPointer(PointerEvent::moved(start.x, start.y))];
            events.extend(drag(PointerButton::Secondary, start, dx, dy));
            Command::Send(events)
        }
        "read" => send(AppEvent::ReadBox),
        "say" => send(AppEvent::ReadText),
        "stop" => send(AppEvent::StopReading),
        "toggle" => send(AppEvent::ToggleBoxVisibility),
        "show" => send(AppEvent::SetShowBox(switch(rest)?)),
        "autohide" => send(AppEvent::SetAutoHide(switch(rest)?)),
        "opacity" => {
            let opacity: f32 = rest.parse().context("Opacity must be a number")?;
            send(AppEvent::SetBoxOpacity(opacity))
        }
        "voice" => {
            if rest.is_empty() {
                bail!("Usage: voice NAME");
            }
            send(AppEvent::SelectVoice(rest.to_string()))
        }
        "voices" => Command::Voices,
        "hotkey" => {
            if rest.is_empty() {
                bail!("Usage: hotkey CHORD");
            }
            send(AppEvent::RebindReadHotkey(rest.to_string()))
        }
        "text" => send(AppEvent::TextEdited(rest.to_string())),
        "copy" => send(AppEvent::CopyToMain),
        "clear" => send(AppEvent::ClearText),
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "close" => Command::Quit,
        other => bail!("Unknown command '{other}', try 'help'"),
    };

    Ok(Some(command))
}

fn send(event: AppEvent) -> Command {
    Command::Send(vec![event])
}

fn numbers<const N: usize>(args: &[&str]) -> Result<[i32; N]> {
    if args.len() != N {
        bail!("Expected {N} numbers, got {}", args.len());
    }
    let mut out = [0; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.parse().with_context(|| format!("'{arg}' is not a number"))?;
    }
    Ok(out)
}

fn switch(arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        _ => bail!("Expected on or off"),
    }
}

fn current_box(state: &UiState) -> Result<Region> {
    state
        .box_view
        .map(|view| view.region)
        .context("Please create a selection box first.")
}

fn drag(button: PointerButton, start: Point, dx: i32, dy: i32) -> Vec<AppEvent> {
    let end = Point::new(start.x + dx, start.y + dy);
    vec![
        AppEvent::BoxPointer(PointerEvent::down(button, start.x, start.y)),
        AppEvent::BoxPointer(PointerEvent::moved(end.x, end.y)),
        AppEvent::BoxPointer(PointerEvent::up(button, end.x, end.y)),
    ]
}

/// A pointer position that classifies as `mode` on `region`
fn grab_point(region: Region, mode: ResizeMode) -> Point {
    let x = if mode.moves_left() {
        region.x + 1
    } else if mode.moves_right() {
        region.right() - 2
    } else {
        region.x + region.width as i32 / 2
    };
    let y = if mode.moves_top() {
        region.y + 1
    } else if mode.moves_bottom() {
        region.bottom() - 2
    } else {
        region.y + region.height as i32 / 2
    };
    Point::new(x, y)
}

pub fn describe(state: &UiState) -> String {
    let box_line = match &state.box_view {
        Some(view) => format!(
            "{} opacity {:.2} ({})",
            view.region,
            view.opacity,
            if view.visible { "visible" } else { "hidden but active" }
        ),
        None => "none".to_string(),
    };
    format!(
        "Status: {}\nReading: {}\nBox: {}\nVoice: {}\nText: {}\nPanel: always on top {}, compact {}, high contrast {}, text size {}, opacity {:.2}",
        state.status,
        state.reading,
        box_line,
        state.voice,
        if state.text.is_empty() { "(empty)" } else { &state.text },
        state.config.always_on_top,
        state.config.compact_mode,
        state.config.high_contrast,
        state.config.text_size,
        state.config.panel_opacity,
    )
}
