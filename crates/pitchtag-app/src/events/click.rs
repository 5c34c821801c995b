use pitchtag_core::{ClickOutcome, IgnoreReason};
use pitchtag_types::{Point, UiEvent};

use crate::state::AppState;

pub fn handle_click(state: &mut AppState, point: Point) -> Vec<UiEvent> {
    match state.recorder.register_click(point) {
        ClickOutcome::Ignored(reason) => {
            match reason {
                IgnoreReason::IncompleteSelection => {
                    tracing::debug!("Click at ({}, {}) dropped: selection incomplete", point.x, point.y)
                }
                IgnoreReason::OutOfBounds => {
                    tracing::debug!("Click at ({}, {}) dropped: outside image", point.x, point.y)
                }
            }
            Vec::new()
        }
        ClickOutcome::Buffered(point) => vec![UiEvent::PointAdded { point, pending: 1 }],
        ClickOutcome::Completed(record) => {
            // The buffer is already clear; a failed write loses this pair only
            match state.log.append(&record) {
                Ok(()) => {
                    tracing::info!("Saved: {}, {}, {}", record.team, record.player, record.action);
                    vec![
                        UiEvent::PointAdded { point, pending: 2 },
                        UiEvent::RecordSaved(record),
                    ]
                }
                Err(e) => {
                    tracing::error!("Failed to write {}: {}", state.log.path().display(), e);
                    vec![UiEvent::Error(format!(
                        "Could not save to {}: {e}",
                        state.log.path().display()
                    ))]
                }
            }
        }
    }
}
