use kanal::{AsyncReceiver, AsyncSender};
use pitchtag_types::{AppEvent, UiEvent};
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod click;
pub mod edit_config;
pub mod report;
pub mod reveal;
pub mod select;
pub mod undo;

use click::handle_click;
use edit_config::{handle_config_changed, handle_config_edit, handle_discard_edits, handle_open_editor, handle_save_config};
use report::{handle_show_buttons, handle_show_status, handle_show_summary};
use reveal::{handle_open_log_file, handle_open_log_folder};
use select::{handle_select_action, handle_select_player, handle_select_team};
use undo::handle_undo;

/// App's main loop
pub async fn event_loop(
    mut state: AppState,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(UiEvent::BackendReady).await?;
    app_to_ui_tx
        .send(UiEvent::Buttons(state.panel.infos()))
        .await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        // Queued events are handled before cancellation is noticed
        let event = tokio::select! {
            biased;
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
        };

        tracing::debug!("[EVENT_LOOP] Event received: {:?}", event);
        let quit = event == AppEvent::Quit;

        for reply in handle_event(&mut state, event) {
            app_to_ui_tx.send(reply).await?;
        }

        if quit {
            tracing::info!("[EVENT_LOOP] Quit requested");
            break;
        }
    }

    Ok(())
}

/// Apply one event to the state and collect what the front end should show.
///
/// Runs to completion before the next event is looked at, which is what
/// keeps a record emit and the buffer reset indivisible.
pub fn handle_event(state: &mut AppState, event: AppEvent) -> Vec<UiEvent> {
    match event {
        AppEvent::SelectTeam(team) => handle_select_team(state, &team),
        AppEvent::SelectPlayer { team, player } => handle_select_player(state, &team, &player),
        AppEvent::SelectAction(action) => handle_select_action(state, &action),
        AppEvent::Click(point) => handle_click(state, point),
        AppEvent::UndoLast => handle_undo(state),
        AppEvent::PressButton(index) => match state.panel.get(index) {
            Some(button) => {
                tracing::debug!("Button {} pressed: {}", index, button.label);
                let event = button.event.clone();
                handle_event(state, event)
            }
            None => vec![UiEvent::Error(format!("No button {index}"))],
        },
        AppEvent::OpenLogFolder => handle_open_log_folder(state),
        AppEvent::OpenLogFile => handle_open_log_file(state),
        AppEvent::OpenEditor => handle_open_editor(state),
        AppEvent::EditConfig(edit) => handle_config_edit(state, edit),
        AppEvent::SaveConfig => handle_save_config(state),
        AppEvent::DiscardEdits => handle_discard_edits(state),
        AppEvent::ConfigChanged => handle_config_changed(state),
        AppEvent::ShowButtons => handle_show_buttons(state),
        AppEvent::ShowStatus => handle_show_status(state),
        AppEvent::ShowSummary => handle_show_summary(state),
        AppEvent::Quit => vec![UiEvent::Close],
    }
}
