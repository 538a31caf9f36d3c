mod capture;
#[cfg(windows)]
mod com;
mod hotkey;
mod ocr;

pub use capture::{XcapCapture, compose};
#[cfg(windows)]
pub use com::ComGuard;
pub use hotkey::{HotkeyManager, parse_chord};
#[cfg(windows)]
pub use ocr::WindowsOcrEngine;
pub use ocr::{TesseractEngine, TesseractOptions, locate_tesseract};
