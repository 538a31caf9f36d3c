use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender, Receiver, Sender};
use speakbox_types::AppEvent;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::context::EventContext;
use crate::events::event_loop;
use crate::io::hotkey_io;
use crate::session::Session;
use crate::state::AppState;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub rebind: (Sender<String>, Receiver<String>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // pointer bursts during gestures
            ui_to_app: kanal::bounded_async(64),  // buttons, hotkeys, task results
            rebind: kanal::bounded(4),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn context(&self) -> EventContext {
        EventContext::new(
            self.state.clone(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
            self.channels.rebind.0.clone(),
            self.cancel_token.child_token(),
        )
    }

    /// Sender that feeds the event loop, as panel buttons and hotkeys do
    pub fn event_sender(&self) -> AsyncSender<AppEvent> {
        self.channels.ui_to_app.0.clone()
    }

    /// Receiver of everything the backend tells the UI
    pub fn ui_receiver(&self) -> AsyncReceiver<AppEvent> {
        self.channels.app_to_ui.1.clone()
    }

    /// Only the event loop, for driving the backend without a front end
    pub async fn spawn_backend(&self, tasks: &mut JoinSet<anyhow::Result<()>>) {
        let session = {
            let config = self.state.config.read().await;
            Session::from_config(&config)
        };
        tasks.spawn(event_loop(
            self.context(),
            session,
            self.channels.ui_to_app.1.clone(),
        ));
    }

    pub async fn spawn_tasks(&self, hotkeys: bool) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        self.spawn_backend(&mut tasks).await;

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.state.config.clone(),
        ));

        // Hotkeys
        if hotkeys {
            let delta_time = Duration::from_millis(self.state.config.read().await.delta_time);
            tasks.spawn(hotkey_io(
                self.state.clone(),
                delta_time,
                self.cancel_token.child_token(),
                self.channels.ui_to_app.0.clone(),
                self.channels.app_to_ui.0.clone(),
                self.channels.rebind.1.clone(),
            ));
        } else {
            tracing::info!("Global hotkeys disabled");
        }

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
