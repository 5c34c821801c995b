use pitchtag_config::Roster;
use pitchtag_types::{AppEvent, ButtonGroup, ButtonInfo};

/// Action buttons are laid out in rows of this many
pub const ACTIONS_PER_ROW: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Button {
    pub label: String,
    pub group: ButtonGroup,
    pub event: AppEvent,
}

impl Button {
    fn new(label: impl Into<String>, group: ButtonGroup, event: AppEvent) -> Self {
        Self {
            label: label.into(),
            group,
            event,
        }
    }
}

/// Every selectable button, derived from the roster alone.
///
/// Rebuilt from scratch whenever the config changes; nothing here is
/// patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonPanel {
    pub team_labels: [String; 2],
    buttons: Vec<Button>,
}

impl ButtonPanel {
    pub fn from_roster(roster: &Roster) -> Self {
        let mut buttons = Vec::new();

        for (idx, team) in roster.teams().iter().enumerate() {
            buttons.extend(team.players.iter().map(|player| {
                Button::new(
                    player.clone(),
                    ButtonGroup::Team(idx),
                    AppEvent::SelectPlayer {
                        team: team.name.clone(),
                        player: player.clone(),
                    },
                )
            }));
        }

        for (row, chunk) in roster.actions().chunks(ACTIONS_PER_ROW).enumerate() {
            buttons.extend(chunk.iter().map(|action| {
                Button::new(
                    action.clone(),
                    ButtonGroup::Actions { row },
                    AppEvent::SelectAction(action.clone()),
                )
            }));
        }

        let utilities = [
            ("Edit Config", AppEvent::OpenEditor),
            ("Open CSV Folder", AppEvent::OpenLogFolder),
            ("Open CSV File", AppEvent::OpenLogFile),
            ("Remove Last Tag", AppEvent::UndoLast),
        ];
        buttons.extend(
            utilities
                .into_iter()
                .map(|(label, event)| Button::new(label, ButtonGroup::Utility, event)),
        );

        let [first, second] = roster.teams();
        Self {
            team_labels: [first.name.clone(), second.name.clone()],
            buttons,
        }
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn get(&self, index: usize) -> Option<&Button> {
        self.buttons.get(index)
    }

    pub fn group(&self, group: ButtonGroup) -> impl Iterator<Item = &Button> {
        self.buttons.iter().filter(move |b| b.group == group)
    }

    pub fn infos(&self) -> Vec<ButtonInfo> {
        self.buttons
            .iter()
            .enumerate()
            .map(|(index, b)| ButtonInfo {
                index,
                group: b.group,
                label: b.label.clone(),
            })
            .collect()
    }
}
