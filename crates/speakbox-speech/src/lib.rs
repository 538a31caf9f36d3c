mod command;

pub use command::CommandSpeech;

use tokio_util::sync::CancellationToken;

/// Text-to-speech provider interface
#[async_trait::async_trait]
pub trait SpeechService: Send + Sync {
    /// Speak `text` with `voice`, returning once playback has ended.
    ///
    /// Implementations must watch `cancel` while playing and return
    /// [`PlaybackOutcome::Cancelled`] promptly once it fires.
    async fn speak(
        &self,
        text: &str,
        voice: &str,
        cancel: CancellationToken,
    ) -> Result<PlaybackOutcome, SpeechError>;

    /// Forcefully end whatever is playing right now
    fn terminate(&self);

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Finished,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub external_process: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Speech player '{program}' is unavailable: {source}")]
    PlayerUnavailable {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Speech player exited with {0}")]
    PlayerExited(std::process::ExitStatus),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
