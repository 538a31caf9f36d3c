use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Region, ResizeMode};

#[derive(Debug, Clone)]
pub enum AppEvent {
    // Panel buttons and hotkeys
    StartCapture,
    ReadBox,
    ReadText,
    StopReading,
    ToggleBoxVisibility,
    CopyToMain,
    ClearText,
    TextEdited(String),
    SetShowBox(bool),
    SetAutoHide(bool),
    SetBoxOpacity(f32),
    SelectVoice(String),
    RebindReadHotkey(String),
    CreateBox(Region),

    // Pointer input. Selection positions are overlay-local, box positions absolute.
    SelectionPointer(PointerEvent),
    CancelSelection,
    SelectionTimeout(u64),
    BoxPointer(PointerEvent),

    // Results from background tasks
    TextRecognized { text: String, engine: String },
    NoTextFound,
    CaptureFailed(String),
    ReadingFinished,
    PlaybackFailed(String),

    // Backend to UI
    StatusUpdate { status: String, reading: bool },
    SelectionOverlay(Option<SelectionView>),
    BoxChanged(Option<BoxView>),
    TextChanged(String),
    PanelVisible(bool),
    VoiceChanged(String),
    Notify(Notification),
    BackendReady,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down(PointerButton),
    Move,
    Up(PointerButton),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn down(button: PointerButton, x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Down(button),
            position: Point::new(x, y),
        }
    }

    pub fn moved(x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Move,
            position: Point::new(x, y),
        }
    }

    pub fn up(button: PointerButton, x: i32, y: i32) -> Self {
        Self {
            kind: PointerKind::Up(button),
            position: Point::new(x, y),
        }
    }
}

/// What the crosshair overlay should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionView {
    /// Virtual screen the overlay covers
    pub screen: Region,
    /// Rubber band in overlay-local coordinates
    pub preview: Option<Region>,
}

/// What the persistent overlay box should draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxView {
    pub region: Region,
    pub opacity: f32,
    pub visible: bool,
    pub hover: ResizeMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotifyLevel,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NotifyLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Actions reachable through global hotkeys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    CaptureRegion,
    ReadBox,
    StopReading,
    ToggleVisibility,
    CopyToMain,
    ReadText,
}

impl HotkeyAction {
    pub fn event(self) -> AppEvent {
        match self {
            HotkeyAction::CaptureRegion => AppEvent::StartCapture,
            HotkeyAction::ReadBox => AppEvent::ReadBox,
            HotkeyAction::StopReading => AppEvent::StopReading,
            HotkeyAction::ToggleVisibility => AppEvent::ToggleBoxVisibility,
            HotkeyAction::CopyToMain => AppEvent::CopyToMain,
            HotkeyAction::ReadText => AppEvent::ReadText,
        }
    }
}
