use pitchtag_core::UndoOutcome;
use pitchtag_types::UiEvent;

use crate::state::AppState;

pub fn handle_undo(state: &mut AppState) -> Vec<UiEvent> {
    match state.recorder.undo_last() {
        UndoOutcome::Removed { point, pending } => {
            tracing::debug!("Removed point ({}, {})", point.x, point.y);
            vec![UiEvent::PointRemoved { pending }]
        }
        UndoOutcome::Empty => {
            tracing::info!("No points to remove.");
            vec![UiEvent::Notice("No points to remove.".to_string())]
        }
    }
}
