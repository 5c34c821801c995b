use pitchtag_config::{ConfigEditor, Roster};
use pitchtag_core::ButtonPanel;
use pitchtag_types::{ConfigEdit, UiEvent};

use super::select::PENDING_DISCARDED;
use crate::state::AppState;

pub fn handle_open_editor(state: &mut AppState) -> Vec<UiEvent> {
    let editor = editor_mut(state);
    vec![UiEvent::EditorForm(editor.form())]
}

pub fn handle_config_edit(state: &mut AppState, edit: ConfigEdit) -> Vec<UiEvent> {
    let editor = editor_mut(state);

    match editor.apply(edit) {
        Ok(()) => vec![UiEvent::EditorForm(editor.form())],
        Err(e) => vec![UiEvent::Error(e.to_string())],
    }
}

pub fn handle_discard_edits(state: &mut AppState) -> Vec<UiEvent> {
    match state.editor.take() {
        Some(_) => vec![UiEvent::Notice("Config edits discarded".to_string())],
        None => vec![UiEvent::Notice("Editor is not open".to_string())],
    }
}

/// Write the editor form to the config file, then reload from disk
pub fn handle_save_config(state: &mut AppState) -> Vec<UiEvent> {
    let Some(editor) = &state.editor else {
        return vec![UiEvent::Notice("Editor is not open".to_string())];
    };

    let path = state.settings.paths.config.clone();
    if let Err(e) = editor.save(&path) {
        tracing::error!("Failed to save config to {}: {}", path.display(), e);
        return vec![UiEvent::Error(format!("Config not saved: {e}"))];
    }

    state.editor = None;
    let mut replies = vec![UiEvent::Notice(format!("Saved {}", path.display()))];
    replies.extend(handle_config_changed(state));
    replies
}

/// Reload the roster from disk and rebuild the panel from it.
///
/// A broken file keeps the current roster in place.
pub fn handle_config_changed(state: &mut AppState) -> Vec<UiEvent> {
    let path = &state.settings.paths.config;
    match Roster::load(path) {
        Ok(roster) => apply_roster(state, roster),
        Err(e) => {
            tracing::error!("Failed to reload {}: {}", path.display(), e);
            vec![UiEvent::Error(format!("Config not reloaded: {e}"))]
        }
    }
}

fn editor_mut(state: &mut AppState) -> &mut ConfigEditor {
    let AppState {
        editor, recorder, ..
    } = state;
    editor.get_or_insert_with(|| ConfigEditor::from_roster(recorder.roster()))
}

fn apply_roster(state: &mut AppState, roster: Roster) -> Vec<UiEvent> {
    let outcome = state.recorder.reload(roster);
    state.panel = ButtonPanel::from_roster(state.recorder.roster());

    let mut replies = Vec::new();
    if outcome.changed {
        replies.push(UiEvent::Notice(
            "Selection no longer in config and was cleared".to_string(),
        ));
    }
    if let Some(point) = outcome.discarded {
        tracing::warn!(
            "Config reload discarded pending point ({:.1}, {:.1})",
            point.x,
            point.y
        );
        replies.push(UiEvent::Notice(PENDING_DISCARDED.to_string()));
    }
    replies.push(UiEvent::Buttons(state.panel.infos()));
    replies.push(UiEvent::Status(state.recorder.status()));
    replies
}
