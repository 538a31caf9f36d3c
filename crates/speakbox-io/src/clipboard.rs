use anyhow::{Context, Result};
use arboard::Clipboard;

/// Destination for copy-to-main
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The OS clipboard. A fresh handle per call, arboard handles are not `Sync`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to open clipboard")?;
        clipboard
            .set_text(text.to_owned())
            .context("Failed to write clipboard")?;
        tracing::debug!("Copied {} chars to clipboard", text.len());
        Ok(())
    }
}

/// Copy off the async runtime; clipboard access may block on X11
pub async fn copy_text<C>(sink: std::sync::Arc<C>, text: String) -> Result<()>
where
    C: ClipboardSink + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || sink.set_text(&text))
        .await
        .context("Clipboard task panicked")?
}
