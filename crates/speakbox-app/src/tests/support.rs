//! Stub services and a harness that drives the event loop over kanal

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use image::{DynamicImage, Rgba, RgbaImage};
use kanal::{AsyncReceiver, AsyncSender};
use speakbox_config::Config;
use speakbox_core::capture::ScreenCapture;
use speakbox_core::error::{CaptureError, RecognizeError};
use speakbox_core::pipeline::Pipeline;
use speakbox_core::preprocess::Preprocessor;
use speakbox_core::recognize::{InputKind, Recognizer, RecognizerChain};
use speakbox_io::ClipboardSink;
use speakbox_speech::{PlaybackOutcome, ProviderMetadata, SpeechError, SpeechService};
use speakbox_types::{AppEvent, Region};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::controller::AppController;
use crate::state::AppState;

pub const WAIT: Duration = Duration::from_secs(2);

pub struct StubCapture {
    pub screen: Region,
    pub fail: bool,
    pub requested: Mutex<Vec<Region>>,
}

impl StubCapture {
    pub fn new(screen: Region) -> Self {
        Self {
            screen,
            fail: false,
            requested: Mutex::new(Vec::new()),
        }
    }
}

impl ScreenCapture for StubCapture {
    fn virtual_screen(&self) -> Result<Region, CaptureError> {
        Ok(self.screen)
    }

    fn capture(&self, region: Region) -> Result<RgbaImage, CaptureError> {
        self.requested.lock().unwrap().push(region);
        if self.fail {
            return Err(CaptureError::Device("access denied".to_string()));
        }
        Ok(RgbaImage::from_pixel(region.width, region.height, Rgba([255, 255, 255, 255])))
    }
}

pub struct StubRecognizer {
    pub name: &'static str,
    pub input: InputKind,
    pub text: &'static str,
}

impl Recognizer for StubRecognizer {
    fn name(&self) -> &str {
        self.name
    }

    fn input(&self) -> InputKind {
        self.input
    }

    fn recognize(&self, _image: &DynamicImage) -> Result<String, RecognizeError> {
        Ok(self.text.to_string())
    }
}

/// Engine pair the way the real app orders them: processed first, then scaled
pub fn engines(primary: &'static str, fallback: &'static str) -> RecognizerChain {
    RecognizerChain::new(vec![
        Box::new(StubRecognizer {
            name: "primary",
            input: InputKind::Processed,
            text: primary,
        }),
        Box::new(StubRecognizer {
            name: "fallback",
            input: InputKind::Scaled,
            text: fallback,
        }),
    ])
}

/// Plays until cancelled, or for `duration` when set
#[derive(Default)]
pub struct StubSpeech {
    pub duration: Option<Duration>,
    pub spoken: Mutex<Vec<(String, String)>>,
    pub terminated: AtomicUsize,
}

impl StubSpeech {
    pub fn finishing_after(duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.spoken.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl SpeechService for StubSpeech {
    async fn speak(
        &self,
        text: &str,
        voice: &str,
        cancel: CancellationToken,
    ) -> Result<PlaybackOutcome, SpeechError> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), voice.to_string()));

        match self.duration {
            Some(duration) => tokio::select! {
                _ = tokio::time::sleep(duration) => Ok(PlaybackOutcome::Finished),
                _ = cancel.cancelled() => Ok(PlaybackOutcome::Cancelled),
            },
            None => {
                cancel.cancelled().await;
                Ok(PlaybackOutcome::Cancelled)
            }
        }
    }

    fn terminate(&self) {
        self.terminated.fetch_add(1, Ordering::SeqCst);
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "stub".to_string(),
            external_process: false,
        }
    }
}

#[derive(Default)]
pub struct StubClipboard {
    pub copied: Mutex<Vec<String>>,
}

impl ClipboardSink for StubClipboard {
    fn set_text(&self, text: &str) -> anyhow::Result<()> {
        self.copied.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub controller: AppController,
    pub state: Arc<AppState>,
    pub tasks: JoinSet<anyhow::Result<()>>,
    pub tx: AsyncSender<AppEvent>,
    pub ui: AsyncReceiver<AppEvent>,
    pub capture: Arc<StubCapture>,
    pub speech: Arc<StubSpeech>,
    pub clipboard: Arc<StubClipboard>,
}

pub struct HarnessBuilder {
    pub config: Config,
    pub capture: StubCapture,
    pub chain: RecognizerChain,
    pub speech: StubSpeech,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.hotkeys.enabled = false;
        Self {
            config,
            capture: StubCapture::new(Region::new(0, 0, 1920, 1080)),
            chain: engines("", ""),
            speech: StubSpeech::default(),
        }
    }

    pub async fn start(self) -> Harness {
        let capture = Arc::new(self.capture);
        let speech = Arc::new(self.speech);
        let clipboard = Arc::new(StubClipboard::default());

        let pipeline = Pipeline::new(capture.clone(), Preprocessor::default(), self.chain);
        let state = Arc::new(AppState::with_services(
            self.config,
            pipeline,
            speech.clone(),
            clipboard.clone(),
        ));

        let controller = AppController::new(state.clone());
        let mut tasks = JoinSet::new();
        controller.spawn_backend(&mut tasks).await;

        let harness = Harness {
            tx: controller.event_sender(),
            ui: controller.ui_receiver(),
            controller,
            state,
            tasks,
            capture,
            speech,
            clipboard,
        };
        harness.expect(|e| matches!(e, AppEvent::BackendReady)).await;
        harness
    }
}

impl Harness {
    pub async fn send(&self, event: AppEvent) {
        self.tx.send(event).await.unwrap();
    }

    pub fn is_reading(&self) -> bool {
        self.state.reading.is_reading()
    }

    pub async fn config(&self) -> Config {
        self.state.config.read().await.clone()
    }

    /// Skip UI events until one matches
    pub async fn expect(&self, mut predicate: impl FnMut(&AppEvent) -> bool) -> AppEvent {
        timeout(WAIT, async {
            loop {
                let event = self.ui.recv().await.unwrap();
                if predicate(&event) {
                    return event;
                }
            }
        })
        .await
        .expect("expected UI event never arrived")
    }

    pub async fn expect_status(&self, status: &str) {
        self.expect(|e| matches!(e, AppEvent::StatusUpdate { status: s, .. } if s == status))
            .await;
    }

    /// Everything the UI receives within `window`
    pub async fn collect_for(&self, window: Duration) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(Ok(event)) = timeout(window, self.ui.recv()).await {
            events.push(event);
        }
        events
    }

    /// Last box geometry published within a short window
    pub async fn settled_box(&self) -> Option<Region> {
        self.collect_for(Duration::from_millis(100))
            .await
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::BoxChanged(view) => Some(view.map(|v| v.region)),
                _ => None,
            })
            .last()
            .flatten()
    }
}
