use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio_util::sync::CancellationToken;

/// At most one speech playback at a time.
///
/// The controller flips `is_reading` on through [`ReadingSession::try_start`];
/// the playback task flips it off by dropping the returned guard.
#[derive(Debug, Default)]
pub struct ReadingSession {
    is_reading: AtomicBool,
    cancel: Mutex<CancellationToken>,
}

impl ReadingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_reading(&self) -> bool {
        self.is_reading.load(Ordering::SeqCst)
    }

    /// Begin a reading session, or `None` if one is already active
    pub fn try_start(self: &Arc<Self>) -> Option<ReadingGuard> {
        if self
            .is_reading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }

        let token = CancellationToken::new();
        *self.cancel.lock().unwrap_or_else(PoisonError::into_inner) = token.clone();

        Some(ReadingGuard {
            session: Arc::clone(self),
            token,
        })
    }

    /// Signal the active playback to stop. Idempotent; returns whether a
    /// session was actually reading.
    pub fn stop(&self) -> bool {
        let reading = self.is_reading();
        if reading {
            self.cancel
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .cancel();
        }
        reading
    }
}

/// Held by the playback task; dropping it ends the session even on panic
#[derive(Debug)]
pub struct ReadingGuard {
    session: Arc<ReadingSession>,
    token: CancellationToken,
}

impl ReadingGuard {
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

impl Drop for ReadingGuard {
    fn drop(&mut self) {
        self.session.is_reading.store(false, Ordering::SeqCst);
    }
}
