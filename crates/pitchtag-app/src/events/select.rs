use pitchtag_core::{SelectOutcome, SelectionField, TagError};
use pitchtag_types::UiEvent;

use crate::state::AppState;

pub const PENDING_DISCARDED: &str = "Selection changed, pending point discarded";

pub fn handle_select_team(state: &mut AppState, team: &str) -> Vec<UiEvent> {
    let result = state.recorder.set_selection(SelectionField::Team, team);
    replies(state, result)
}

pub fn handle_select_player(state: &mut AppState, team: &str, player: &str) -> Vec<UiEvent> {
    let result = state.recorder.select_player(team, player);
    replies(state, result)
}

pub fn handle_select_action(state: &mut AppState, action: &str) -> Vec<UiEvent> {
    let result = state.recorder.set_selection(SelectionField::Action, action);
    replies(state, result)
}

fn replies(state: &AppState, result: Result<SelectOutcome, TagError>) -> Vec<UiEvent> {
    match result {
        Ok(outcome) => {
            let mut replies = Vec::new();
            if let Some(point) = outcome.discarded {
                tracing::warn!(
                    "Selection changed mid-pair, discarded pending point ({:.1}, {:.1})",
                    point.x,
                    point.y
                );
                replies.push(UiEvent::Notice(PENDING_DISCARDED.to_string()));
            }
            replies.push(UiEvent::Status(state.recorder.status()));
            replies
        }
        Err(e) => {
            tracing::warn!("Rejected selection: {}", e);
            vec![UiEvent::Error(e.to_string())]
        }
    }
}
