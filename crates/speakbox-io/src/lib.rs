pub mod clipboard;

pub use clipboard::{ClipboardSink, SystemClipboard, copy_text};
