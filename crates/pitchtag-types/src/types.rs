use serde::{Deserialize, Serialize};

/// Events dispatched by the front end to the app loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SelectTeam(String),
    SelectPlayer {
        team: String,
        player: String,
    },
    SelectAction(String),
    Click(Point),
    UndoLast,
    /// Dispatch the button at this index of the current panel
    PressButton(usize),
    OpenLogFolder,
    OpenLogFile,
    OpenEditor,
    EditConfig(ConfigEdit),
    SaveConfig,
    DiscardEdits,
    /// Config file changed on disk; reload it and rebuild the panel
    ConfigChanged,
    ShowButtons,
    ShowStatus,
    ShowSummary,
    Quit,
}

/// Notifications sent from the app loop back to the front end
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    BackendReady,
    PointAdded {
        point: Point,
        pending: usize,
    },
    PointRemoved {
        pending: usize,
    },
    RecordSaved(Record),
    Buttons(Vec<ButtonInfo>),
    Status(StatusReport),
    Summary(Vec<SummaryRow>),
    EditorForm(EditorForm),
    Notice(String),
    Error(String),
    Close,
}

/// Raw click position in image pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One tagged action, as written to the log.
///
/// Field order is the column order of the log file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub team: String,
    pub player: String,
    pub action: String,
    pub start_x: u8,
    pub start_y: u8,
    pub end_x: u8,
    pub end_y: u8,
}

/// A single change made through the config editor
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigEdit {
    TeamName { team: usize, name: String },
    Player { team: usize, slot: usize, name: String },
    AddPlayer { team: usize, name: String },
    RemovePlayer { team: usize, slot: usize },
    Action { slot: usize, name: String },
    AddAction(String),
    RemoveAction(usize),
}

/// Current contents of the config editor fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorForm {
    pub team_names: [String; 2],
    pub players: [Vec<String>; 2],
    pub actions: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonGroup {
    Team(usize),
    Actions { row: usize },
    Utility,
}

/// Flattened view of a panel button for display
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonInfo {
    pub index: usize,
    pub group: ButtonGroup,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusReport {
    pub state: String,
    pub team: Option<String>,
    pub player: Option<String>,
    pub action: Option<String>,
    pub pending: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub team: String,
    pub player: String,
    pub action: String,
    pub count: usize,
}
