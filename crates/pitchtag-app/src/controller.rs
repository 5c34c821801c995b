use std::future::Future;

use kanal::{AsyncReceiver, AsyncSender};
use pitchtag_types::{AppEvent, UiEvent};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::input_loop;
use crate::state::AppState;
use crate::ui::render_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(event_capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256),
            ui_to_app: kanal::bounded_async(event_capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(event_capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(event_capacity),
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, state: AppState) -> JoinSet<anyhow::Result<()>> {
        self.spawn_with_input(state, input_loop)
    }

    /// Spawn the app with `input` as the command source
    pub fn spawn_with_input<I, F>(&self, state: AppState, input: I) -> JoinSet<anyhow::Result<()>>
    where
        I: FnOnce(AsyncSender<AppEvent>, CancellationToken) -> F,
        F: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let mut tasks = JoinSet::new();

        // Event loop, sole owner of the state
        tasks.spawn(event_loop(
            state,
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // Terminal output
        tasks.spawn(render_loop(
            self.channels.app_to_ui.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Command input
        tasks.spawn(input(
            self.channels.ui_to_app.0.clone(),
            self.cancel_token.child_token(),
        ));

        tasks
    }

    /// Run until the first task ends or `stop` resolves, then cancel the
    /// rest and wait for them.
    ///
    /// Only the event loop (on quit) and the renderer (on close) end by
    /// themselves; the input task outlives its input.
    pub async fn supervise<S>(&self, mut tasks: JoinSet<anyhow::Result<()>>, stop: S)
    where
        S: Future<Output = ()>,
    {
        tokio::select! {
            _ = stop => tracing::info!("Shutdown requested"),
            Some(result) = tasks.join_next() => {
                match result {
                    Ok(Ok(())) => tracing::debug!("Task finished"),
                    Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
                    Err(e) => tracing::error!("Task panicked: {e}"),
                }
            }
        }

        self.shutdown();
        while let Some(result) = tasks.join_next().await {
            if let Ok(Err(e)) = result {
                tracing::error!("Task failed during shutdown: {e:#}");
            }
        }
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
