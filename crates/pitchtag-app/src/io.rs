use std::io::{BufRead, Write};

use kanal::AsyncSender;
use pitchtag_types::{AppEvent, ConfigEdit, Point};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

pub const HELP: &str = "\
Commands:
  player <team> <name>      select a player (and their team)
  team <name>               select a team
  action <name>             select an action
  click <x> <y>             click on the field image (pixels)
  undo                      remove the last pending point
  press <n> | <n>           press panel button n
  buttons | status | summary
  open folder | open log    reveal the CSV log
  edit                      open the config editor
  edit team <1|2> <name>
  edit player <1|2> <slot> <name>
  edit add-player <1|2> <name>
  edit remove-player <1|2> <slot>
  edit action <slot> <name>
  edit add-action <name>
  edit remove-action <slot>
  edit save | edit cancel
  reload                    re-read the config file
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(AppEvent),
    Help,
    Empty,
}

/// Split a command line on whitespace, keeping "double quoted" words together
pub fn split_args(line: &str) -> Result<Vec<String>, String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err("unterminated quote".to_string());
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

fn parse_number<T: std::str::FromStr>(arg: Option<&String>, what: &str) -> Result<T, String> {
    let arg = arg.ok_or_else(|| format!("missing {what}"))?;
    arg.parse()
        .map_err(|_| format!("invalid {what}: {arg}"))
}

/// 1-based position as typed, to 0-based index
fn parse_position(arg: Option<&String>, what: &str) -> Result<usize, String> {
    match parse_number::<usize>(arg, what)? {
        0 => Err(format!("{what} starts at 1")),
        n => Ok(n - 1),
    }
}

fn parse_team(arg: Option<&String>) -> Result<usize, String> {
    match parse_position(arg, "team number")? {
        team @ (0 | 1) => Ok(team),
        _ => Err("team number must be 1 or 2".to_string()),
    }
}

fn rest(args: &[String], from: usize, what: &str) -> Result<String, String> {
    match args.get(from..) {
        Some(words) if !words.is_empty() => Ok(words.join(" ")),
        _ => Err(format!("missing {what}")),
    }
}

fn parse_edit(args: &[String]) -> Result<AppEvent, String> {
    let Some(sub) = args.first() else {
        return Ok(AppEvent::OpenEditor);
    };

    let edit = match sub.as_str() {
        "save" => return Ok(AppEvent::SaveConfig),
        "cancel" => return Ok(AppEvent::DiscardEdits),
        "team" => ConfigEdit::TeamName {
            team: parse_team(args.get(1))?,
            name: rest(args, 2, "team name")?,
        },
        "player" => ConfigEdit::Player {
            team: parse_team(args.get(1))?,
            slot: parse_position(args.get(2), "slot")?,
            name: rest(args, 3, "player name")?,
        },
        "add-player" => ConfigEdit::AddPlayer {
            team: parse_team(args.get(1))?,
            name: rest(args, 2, "player name")?,
        },
        "remove-player" => ConfigEdit::RemovePlayer {
            team: parse_team(args.get(1))?,
            slot: parse_position(args.get(2), "slot")?,
        },
        "action" => ConfigEdit::Action {
            slot: parse_position(args.get(1), "slot")?,
            name: rest(args, 2, "action name")?,
        },
        "add-action" => ConfigEdit::AddAction(rest(args, 1, "action name")?),
        "remove-action" => ConfigEdit::RemoveAction(parse_position(args.get(1), "slot")?),
        other => return Err(format!("unknown edit command: {other}")),
    };

    Ok(AppEvent::EditConfig(edit))
}

pub fn parse_command(line: &str) -> Result<Command, String> {
    let args = split_args(line)?;
    let Some(cmd) = args.first() else {
        return Ok(Command::Empty);
    };

    let event = match cmd.as_str() {
        "help" | "?" => return Ok(Command::Help),
        "team" => AppEvent::SelectTeam(rest(&args, 1, "team name")?),
        "player" => AppEvent::SelectPlayer {
            team: args.get(1).cloned().ok_or("missing team name")?,
            player: rest(&args, 2, "player name")?,
        },
        "action" => AppEvent::SelectAction(rest(&args, 1, "action name")?),
        "click" => AppEvent::Click(Point::new(
            parse_number(args.get(1), "x")?,
            parse_number(args.get(2), "y")?,
        )),
        "undo" => AppEvent::UndoLast,
        "press" => AppEvent::PressButton(parse_number(args.get(1), "button number")?),
        "buttons" => AppEvent::ShowButtons,
        "status" => AppEvent::ShowStatus,
        "summary" => AppEvent::ShowSummary,
        "open" => match args.get(1).map(String::as_str) {
            Some("folder") => AppEvent::OpenLogFolder,
            Some("log") | Some("file") => AppEvent::OpenLogFile,
            _ => return Err("usage: open folder | open log".to_string()),
        },
        "edit" => parse_edit(&args[1..])?,
        "reload" => AppEvent::ConfigChanged,
        "quit" | "exit" => AppEvent::Quit,
        number if number.chars().all(|c| c.is_ascii_digit()) => {
            AppEvent::PressButton(parse_number(Some(cmd), "button number")?)
        }
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };

    Ok(Command::Event(event))
}

/// Read commands from stdin and forward them to the app
pub async fn input_loop(
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    feed_commands(|| std::io::stdin().lock(), interactive, ui_to_app_tx, cancel).await
}

/// Forward commands read from the reader built by `open` until cancelled.
///
/// Running out of input does not end the task: the events already sent,
/// including the final `quit`, still have to be handled by the event loop,
/// and its exit is what stops the app.
pub async fn feed_commands<F, R>(
    open: F,
    interactive: bool,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    F: FnOnce() -> R + Send + 'static,
    R: BufRead,
{
    let handle = Handle::current();
    let (done_tx, done_rx) = oneshot::channel();

    // Blocking reads get their own thread so shutdown never waits on them
    std::thread::spawn(move || {
        let result = read_commands(open(), interactive, |event| {
            handle.block_on(ui_to_app_tx.send(event)).is_ok()
        });
        let _ = done_tx.send(result);
    });

    tokio::select! {
        _ = cancel.cancelled() => {}
        result = done_rx => {
            result.unwrap_or(Ok(()))?;
            tracing::debug!("Input exhausted, waiting for the event loop");
            cancel.cancelled().await;
        }
    }

    tracing::debug!("Input loop stopping");
    Ok(())
}

/// Parse each line of `reader` and hand the events to `send`, which returns
/// false once the app stopped listening. End of input counts as `quit`.
pub fn read_commands<R, F>(reader: R, interactive: bool, mut send: F) -> anyhow::Result<()>
where
    R: BufRead,
    F: FnMut(AppEvent) -> bool,
{
    let prompt = || {
        if interactive {
            print!("> ");
            let _ = std::io::stdout().flush();
        }
    };

    prompt();
    for line in reader.lines() {
        let line = line?;
        match parse_command(&line) {
            Ok(Command::Event(event)) => {
                if !send(event) {
                    return Ok(());
                }
            }
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Empty) => {}
            Err(e) => println!("error: {e}"),
        }
        prompt();
    }

    send(AppEvent::Quit);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(line: &str) -> AppEvent {
        match parse_command(line) {
            Ok(Command::Event(event)) => event,
            other => panic!("Expected an event for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_split_args_keeps_quoted_words() {
        assert_eq!(
            split_args(r#"player "Red Sox" "J Smith""#).unwrap(),
            vec!["player", "Red Sox", "J Smith"]
        );
        assert_eq!(split_args(r#"team """#).unwrap(), vec!["team", ""]);
        assert!(split_args(r#"team "Red"#).is_err());
    }

    #[test]
    fn test_selection_commands() {
        assert_eq!(
            event("player Red A"),
            AppEvent::SelectPlayer {
                team: "Red".into(),
                player: "A".into(),
            }
        );
        assert_eq!(event("action Long Pass"), AppEvent::SelectAction("Long Pass".into()));
        assert_eq!(event("team Blue"), AppEvent::SelectTeam("Blue".into()));
    }

    #[test]
    fn test_click_parses_coordinates() {
        assert_eq!(event("click 500 250.5"), AppEvent::Click(Point::new(500.0, 250.5)));
        assert!(parse_command("click 500").is_err());
        assert!(parse_command("click a b").is_err());
    }

    #[test]
    fn test_bare_number_presses_button() {
        assert_eq!(event("3"), AppEvent::PressButton(3));
        assert_eq!(event("press 0"), AppEvent::PressButton(0));
    }

    #[test]
    fn test_edit_commands_are_one_based() {
        assert_eq!(event("edit"), AppEvent::OpenEditor);
        assert_eq!(
            event("edit player 2 1 New Name"),
            AppEvent::EditConfig(ConfigEdit::Player {
                team: 1,
                slot: 0,
                name: "New Name".into(),
            })
        );
        assert_eq!(
            event("edit remove-action 4"),
            AppEvent::EditConfig(ConfigEdit::RemoveAction(3))
        );
        assert_eq!(event("edit save"), AppEvent::SaveConfig);
        assert!(parse_command("edit team 3 Green").is_err());
        assert!(parse_command("edit action 0 Shot").is_err());
    }

    #[test]
    fn test_blank_and_unknown_lines() {
        assert_eq!(parse_command("   "), Ok(Command::Empty));
        assert_eq!(parse_command("help"), Ok(Command::Help));
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn test_read_commands_forwards_events_then_quits() {
        let input = "player Red A\nnonsense\n\nclick 1 2\n";
        let mut sent = Vec::new();
        read_commands(input.as_bytes(), false, |event| {
            sent.push(event);
            true
        })
        .unwrap();

        assert_eq!(
            sent,
            vec![
                AppEvent::SelectPlayer {
                    team: "Red".into(),
                    player: "A".into(),
                },
                AppEvent::Click(Point::new(1.0, 2.0)),
                AppEvent::Quit,
            ]
        );
    }

    #[test]
    fn test_read_commands_stops_when_app_is_gone() {
        let mut calls = 0;
        read_commands("undo\nundo\nundo\n".as_bytes(), false, |_| {
            calls += 1;
            false
        })
        .unwrap();
        assert_eq!(calls, 1);
    }
}
