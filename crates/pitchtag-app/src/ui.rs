use std::fmt::Write;

use kanal::AsyncReceiver;
use pitchtag_types::{ButtonGroup, ButtonInfo, EditorForm, StatusReport, SummaryRow, UiEvent};
use tokio_util::sync::CancellationToken;

/// Print app notifications to stdout until the app closes
pub async fn render_loop(
    app_to_ui_rx: AsyncReceiver<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        // Drain pending output before honoring cancellation
        let event = tokio::select! {
            biased;
            event = app_to_ui_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
            _ = cancel.cancelled() => break,
        };

        if event == UiEvent::Close {
            println!("Bye.");
            break;
        }
        println!("{}", render(&event));
    }

    tracing::debug!("Render loop stopping");
    Ok(())
}

pub fn render(event: &UiEvent) -> String {
    match event {
        UiEvent::BackendReady => "Ready. Type 'help' for commands.".to_string(),
        UiEvent::PointAdded { point, pending } => {
            format!("Point {pending}/2 at ({:.1}, {:.1})", point.x, point.y)
        }
        UiEvent::PointRemoved { pending } => format!("Point removed, {pending}/2 pending"),
        UiEvent::RecordSaved(r) => format!(
            "Saved: {}, {}, {} ({},{}) -> ({},{})",
            r.team, r.player, r.action, r.start_x, r.start_y, r.end_x, r.end_y
        ),
        UiEvent::Buttons(buttons) => render_buttons(buttons),
        UiEvent::Status(status) => render_status(status),
        UiEvent::Summary(rows) => render_summary(rows),
        UiEvent::EditorForm(form) => render_form(form),
        UiEvent::Notice(text) => text.clone(),
        UiEvent::Error(text) => format!("error: {text}"),
        UiEvent::Close => String::new(),
    }
}

fn render_buttons(buttons: &[ButtonInfo]) -> String {
    let mut out = String::new();
    let mut current = None;

    for button in buttons {
        if current != Some(button.group) {
            current = Some(button.group);
            let heading = match button.group {
                ButtonGroup::Team(idx) => format!("Team {}", idx + 1),
                ButtonGroup::Actions { row } => format!("Actions (row {})", row + 1),
                ButtonGroup::Utility => "Utilities".to_string(),
            };
            let _ = writeln!(out, "{heading}:");
        }
        let _ = writeln!(out, "  [{}] {}", button.index, button.label);
    }

    out.trim_end().to_string()
}

fn render_status(status: &StatusReport) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let mut out = format!(
        "State: {} | team {} | player {} | action {}",
        status.state,
        show(&status.team),
        show(&status.player),
        show(&status.action)
    );
    for point in &status.pending {
        let _ = write!(out, " | pending ({:.1}, {:.1})", point.x, point.y);
    }
    out
}

fn render_summary(rows: &[SummaryRow]) -> String {
    if rows.is_empty() {
        return "No actions tagged yet.".to_string();
    }

    let total: usize = rows.iter().map(|r| r.count).sum();
    let mut out = format!("{total} tagged actions");
    for row in rows {
        let _ = write!(
            out,
            "\n  {} {} {}: {}",
            row.team, row.player, row.action, row.count
        );
    }
    out
}

fn render_form(form: &EditorForm) -> String {
    let mut out = String::from("Config editor");
    for (idx, name) in form.team_names.iter().enumerate() {
        let _ = write!(out, "\n  Team {}: {}", idx + 1, name);
        for (slot, player) in form.players[idx].iter().enumerate() {
            let _ = write!(out, "\n    {}. {}", slot + 1, player);
        }
    }
    out.push_str("\n  Actions:");
    for (slot, action) in form.actions.iter().enumerate() {
        let _ = write!(out, "\n    {}. {}", slot + 1, action);
    }
    out.push_str("\n  ('edit save' to write, 'edit cancel' to discard)");
    out
}
