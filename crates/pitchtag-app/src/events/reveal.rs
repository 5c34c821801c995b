use std::path::Path;

use pitchtag_types::UiEvent;

use crate::state::AppState;

pub fn handle_open_log_folder(state: &mut AppState) -> Vec<UiEvent> {
    let folder = state.log.folder().to_path_buf();
    reveal(state, &folder)
}

pub fn handle_open_log_file(state: &mut AppState) -> Vec<UiEvent> {
    let path = state.log.path().to_path_buf();
    if !path.exists() {
        return vec![UiEvent::Notice(format!(
            "{} does not exist yet, tag an action first",
            path.display()
        ))];
    }
    reveal(state, &path)
}

fn reveal(state: &AppState, path: &Path) -> Vec<UiEvent> {
    match state.revealer.reveal(path) {
        Ok(()) => {
            tracing::info!("Opened {}", path.display());
            vec![UiEvent::Notice(format!("Opened {}", path.display()))]
        }
        Err(e) => {
            tracing::error!("Failed to open {}: {}", path.display(), e);
            vec![UiEvent::Error(format!("Failed to open {}: {e}", path.display()))]
        }
    }
}
