use std::process::Stdio;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio_util::sync::CancellationToken;

use crate::{PlaybackOutcome, ProviderMetadata, SpeechError, SpeechService};

/// Speaks through an external program, one process per utterance.
///
/// Argument templates may contain `{voice}` and `{text}`. Without a `{text}`
/// placeholder the text is written to the program's stdin instead.
///
/// Players such as `edge-playback` hand the audio to a subprocess of their
/// own, so each player runs as the leader of a fresh process group and
/// termination takes down the whole tree.
pub struct CommandSpeech {
    program: String,
    args: Vec<String>,
    poll_interval: Duration,
    active: Mutex<Option<Child>>,
}

impl CommandSpeech {
    pub fn new(program: impl Into<String>, args: Vec<String>, poll_interval: Duration) -> Self {
        Self {
            program: program.into(),
            args,
            poll_interval,
            active: Mutex::new(None),
        }
    }

    fn text_via_stdin(&self) -> bool {
        !self.args.iter().any(|a| a.contains("{text}"))
    }

    fn spawn(&self, text: &str, voice: &str) -> Result<Child, SpeechError> {
        let args = self
            .args
            .iter()
            .map(|a| a.replace("{voice}", voice).replace("{text}", text));

        let stdin = if self.text_via_stdin() {
            Stdio::piped()
        } else {
            Stdio::null()
        };

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(stdin)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        #[cfg(unix)]
        command.process_group(0);

        command
            .spawn()
            .map_err(|source| SpeechError::PlayerUnavailable {
                program: self.program.clone(),
                source,
            })
    }

    /// One poll of the active player. `Some` once playback is over.
    fn poll_player(&self) -> Option<Result<PlaybackOutcome, SpeechError>> {
        let mut slot = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(child) = slot.as_mut() else {
            // terminate() got there first
            return Some(Ok(PlaybackOutcome::Cancelled));
        };

        match child.try_wait() {
            Ok(None) => None,
            Ok(Some(status)) => {
                slot.take();
                if status.success() {
                    Some(Ok(PlaybackOutcome::Finished))
                } else {
                    Some(Err(SpeechError::PlayerExited(status)))
                }
            }
            Err(e) => {
                slot.take();
                Some(Err(e.into()))
            }
        }
    }
}

#[async_trait::async_trait]
impl SpeechService for CommandSpeech {
    async fn speak(
        &self,
        text: &str,
        voice: &str,
        cancel: CancellationToken,
    ) -> Result<PlaybackOutcome, SpeechError> {
        if cancel.is_cancelled() {
            return Ok(PlaybackOutcome::Cancelled);
        }

        let mut child = self.spawn(text, voice)?;
        tracing::debug!("Started {} (pid {:?})", self.program, child.id());

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            drop(stdin);
        }

        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = Some(child);

        let mut ticker = tokio::time::interval(self.poll_interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    self.terminate();
                    return Ok(PlaybackOutcome::Cancelled);
                }
                _ = ticker.tick() => {
                    if let Some(outcome) = self.poll_player() {
                        return outcome;
                    }
                }
            }
        }
    }

    fn terminate(&self) {
        let child = self
            .active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(mut child) = child {
            tracing::debug!("Terminating {} (pid {:?})", self.program, child.id());
            if let Some(pid) = child.id() {
                kill_tree(pid);
            }
            if let Err(e) = child.start_kill() {
                tracing::debug!("Failed to kill {}: {}", self.program, e);
            }
        }
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: self.program.clone(),
            external_process: true,
        }
    }
}

/// Kill the player's whole process group, audio subprocesses included
#[cfg(unix)]
fn kill_tree(pid: u32) {
    let result = std::process::Command::new("kill")
        .args(["-KILL", "--", &format!("-{pid}")])
        .stderr(Stdio::null())
        .status();
    match result {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::debug!("kill of group {pid} exited with {status}"),
        Err(e) => tracing::warn!("Failed to run kill for group {pid}: {e}"),
    }
}

#[cfg(windows)]
fn kill_tree(pid: u32) {
    let result = std::process::Command::new("taskkill")
        .args(["/T", "/F", "/PID", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
    match result {
        Ok(status) if status.success() => {}
        Ok(status) => tracing::debug!("taskkill of {pid} exited with {status}"),
        Err(e) => tracing::warn!("Failed to run taskkill for {pid}: {e}"),
    }
}

#[cfg(not(any(unix, windows)))]
fn kill_tree(_pid: u32) {}
