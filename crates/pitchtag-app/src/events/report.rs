use pitchtag_core::summarize;
use pitchtag_types::UiEvent;

use crate::state::AppState;

pub fn handle_show_buttons(state: &mut AppState) -> Vec<UiEvent> {
    vec![UiEvent::Buttons(state.panel.infos())]
}

pub fn handle_show_status(state: &mut AppState) -> Vec<UiEvent> {
    vec![UiEvent::Status(state.recorder.status())]
}

pub fn handle_show_summary(state: &mut AppState) -> Vec<UiEvent> {
    match state.log.read_all() {
        Ok(records) => vec![UiEvent::Summary(summarize(&records))],
        Err(e) => {
            tracing::error!("Failed to read {}: {}", state.log.path().display(), e);
            vec![UiEvent::Error(format!("Could not read log: {e}"))]
        }
    }
}
