use std::path::Path;
use std::time::Duration;

use kanal::AsyncReceiver;
use pitchtag_config::{Roster, Settings, Team};
use pitchtag_core::ImageExtent;
use pitchtag_types::{AppEvent, Point, UiEvent};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::controller::AppController;
use crate::events::event_loop;
use crate::io::feed_commands;
use crate::state::{AppState, Revealer};

struct NoopRevealer;

impl Revealer for NoopRevealer {
    fn reveal(&self, _path: &Path) -> std::io::Result<()> {
        Ok(())
    }
}

fn state(dir: &Path) -> AppState {
    let mut settings = Settings::default().resolve_paths(dir);
    settings.paths.log = dir.join("events.csv");
    settings.paths.config = dir.join("config.json");

    let roster = Roster::new(
        [
            Team::new("Red", vec!["A".into()]),
            Team::new("Blue", vec!["X".into()]),
        ],
        vec!["Shot".into()],
    )
    .unwrap();

    AppState::with_revealer(
        settings,
        roster,
        ImageExtent::new(1000, 500),
        Box::new(NoopRevealer),
    )
}

async fn next(rx: &AsyncReceiver<UiEvent>) -> UiEvent {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(event)) => event,
        Ok(Err(e)) => panic!("Channel error: {}", e),
        Err(_) => panic!("Timeout - no event from the event loop"),
    }
}

#[tokio::test]
async fn test_event_loop_announces_ready_and_buttons() {
    let dir = tempfile::tempdir().unwrap();
    let (ui_tx, ui_rx) = kanal::bounded_async::<AppEvent>(8);
    let (app_tx, app_rx) = kanal::bounded_async::<UiEvent>(32);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(event_loop(state(dir.path()), ui_rx, app_tx, cancel.clone()));

    assert_eq!(next(&app_rx).await, UiEvent::BackendReady);
    match next(&app_rx).await {
        UiEvent::Buttons(buttons) => {
            // 2 players, 1 action, 4 utilities
            assert_eq!(buttons.len(), 7);
        }
        other => panic!("Expected buttons, got {:?}", other),
    }

    cancel.cancel();
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));
    drop(ui_tx);
}

#[tokio::test]
async fn test_event_loop_saves_record_then_quits() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("events.csv");
    let (ui_tx, ui_rx) = kanal::bounded_async::<AppEvent>(8);
    let (app_tx, app_rx) = kanal::bounded_async::<UiEvent>(32);

    let handle = tokio::spawn(event_loop(
        state(dir.path()),
        ui_rx,
        app_tx,
        CancellationToken::new(),
    ));
    next(&app_rx).await;
    next(&app_rx).await;

    let events = [
        AppEvent::SelectPlayer {
            team: "Red".into(),
            player: "A".into(),
        },
        AppEvent::SelectAction("Shot".into()),
        AppEvent::Click(Point::new(500.0, 250.0)),
        AppEvent::Click(Point::new(1000.0, 500.0)),
        AppEvent::Quit,
    ];
    for event in events {
        ui_tx.send(event).await.expect("send failed");
    }

    let mut saved = None;
    loop {
        match next(&app_rx).await {
            UiEvent::RecordSaved(record) => saved = Some(record),
            UiEvent::Close => break,
            _ => {}
        }
    }

    let record = saved.expect("no record saved");
    assert_eq!(
        (record.start_x, record.start_y, record.end_x, record.end_y),
        (50, 50, 100, 100)
    );

    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Ok(())))));

    let contents = std::fs::read_to_string(csv).unwrap();
    assert_eq!(
        contents,
        "team,player,action,start_x,start_y,end_x,end_y\nRed,A,Shot,50,50,100,100\n"
    );
}

#[tokio::test]
async fn test_event_loop_stops_when_front_end_hangs_up() {
    let dir = tempfile::tempdir().unwrap();
    let (ui_tx, ui_rx) = kanal::bounded_async::<AppEvent>(8);
    let (app_tx, app_rx) = kanal::bounded_async::<UiEvent>(32);

    let handle = tokio::spawn(event_loop(
        state(dir.path()),
        ui_rx,
        app_tx,
        CancellationToken::new(),
    ));
    next(&app_rx).await;
    next(&app_rx).await;

    drop(ui_tx);
    let result = timeout(Duration::from_secs(2), handle).await;
    assert!(matches!(result, Ok(Ok(Err(_)))));
}

#[tokio::test]
async fn test_piped_session_is_fully_recorded_before_shutdown() {
    const SESSION: &str = "player Red A\naction Shot\nclick 500 250\nclick 1000 500\n";

    // Input running dry must never cut off events still queued behind it
    for run in 0..50 {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("events.csv");

        let controller = AppController::new(8);
        let tasks = controller.spawn_with_input(state(dir.path()), |tx, cancel| {
            feed_commands(|| SESSION.as_bytes(), false, tx, cancel)
        });

        let finished = timeout(
            Duration::from_secs(5),
            controller.supervise(tasks, std::future::pending()),
        )
        .await;
        assert!(finished.is_ok(), "Timeout - app did not stop after input ended");

        let contents = std::fs::read_to_string(&csv)
            .unwrap_or_else(|e| panic!("Run {run}: no log written: {e}"));
        assert_eq!(
            contents,
            "team,player,action,start_x,start_y,end_x,end_y\nRed,A,Shot,50,50,100,100\n",
            "Run {run}"
        );
    }
}
