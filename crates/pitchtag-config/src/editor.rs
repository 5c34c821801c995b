use std::path::Path;

use pitchtag_types::{ConfigEdit, EditorForm};

use crate::error::ConfigError;
use crate::roster::{Roster, Team};

/// Editable form over a [`Roster`].
///
/// Fields are plain strings, exactly as typed. Nothing is validated until
/// [`ConfigEditor::build`], and players are keyed by the edited team names.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEditor {
    team_names: [String; 2],
    players: [Vec<String>; 2],
    actions: Vec<String>,
}

impl ConfigEditor {
    pub fn from_roster(roster: &Roster) -> Self {
        let [first, second] = roster.teams();
        Self {
            team_names: [first.name.clone(), second.name.clone()],
            players: [first.players.clone(), second.players.clone()],
            actions: roster.actions().to_vec(),
        }
    }

    /// Snapshot of the fields for display
    pub fn form(&self) -> EditorForm {
        EditorForm {
            team_names: self.team_names.clone(),
            players: self.players.clone(),
            actions: self.actions.clone(),
        }
    }

    pub fn set_team_name(&mut self, team: usize, name: impl Into<String>) -> Result<(), ConfigError> {
        let slot = self
            .team_names
            .get_mut(team)
            .ok_or(ConfigError::TeamIndex(team))?;
        *slot = name.into();
        Ok(())
    }

    pub fn set_player(
        &mut self,
        team: usize,
        slot: usize,
        name: impl Into<String>,
    ) -> Result<(), ConfigError> {
        let players = self.team_players_mut(team)?;
        let len = players.len();
        let entry = players
            .get_mut(slot)
            .ok_or(ConfigError::SlotIndex { slot, len })?;
        *entry = name.into();
        Ok(())
    }

    pub fn add_player(&mut self, team: usize, name: impl Into<String>) -> Result<(), ConfigError> {
        self.team_players_mut(team)?.push(name.into());
        Ok(())
    }

    pub fn remove_player(&mut self, team: usize, slot: usize) -> Result<String, ConfigError> {
        let players = self.team_players_mut(team)?;
        if slot >= players.len() {
            return Err(ConfigError::SlotIndex {
                slot,
                len: players.len(),
            });
        }
        Ok(players.remove(slot))
    }

    pub fn set_action(&mut self, slot: usize, name: impl Into<String>) -> Result<(), ConfigError> {
        let len = self.actions.len();
        let entry = self
            .actions
            .get_mut(slot)
            .ok_or(ConfigError::SlotIndex { slot, len })?;
        *entry = name.into();
        Ok(())
    }

    pub fn add_action(&mut self, name: impl Into<String>) {
        self.actions.push(name.into());
    }

    pub fn remove_action(&mut self, slot: usize) -> Result<String, ConfigError> {
        if slot >= self.actions.len() {
            return Err(ConfigError::SlotIndex {
                slot,
                len: self.actions.len(),
            });
        }
        Ok(self.actions.remove(slot))
    }

    /// Apply one edit coming from the front end
    pub fn apply(&mut self, edit: ConfigEdit) -> Result<(), ConfigError> {
        match edit {
            ConfigEdit::TeamName { team, name } => self.set_team_name(team, name),
            ConfigEdit::Player { team, slot, name } => self.set_player(team, slot, name),
            ConfigEdit::AddPlayer { team, name } => self.add_player(team, name),
            ConfigEdit::RemovePlayer { team, slot } => self.remove_player(team, slot).map(|_| ()),
            ConfigEdit::Action { slot, name } => self.set_action(slot, name),
            ConfigEdit::AddAction(name) => {
                self.add_action(name);
                Ok(())
            }
            ConfigEdit::RemoveAction(slot) => self.remove_action(slot).map(|_| ()),
        }
    }

    pub fn build(&self) -> Result<Roster, ConfigError> {
        let [first, second] = &self.team_names;
        let [first_players, second_players] = &self.players;
        Roster::new(
            [
                Team::new(first.clone(), first_players.clone()),
                Team::new(second.clone(), second_players.clone()),
            ],
            self.actions.clone(),
        )
    }

    /// Build the roster and overwrite the config file with it
    pub fn save(&self, path: &Path) -> Result<Roster, ConfigError> {
        let roster = self.build()?;
        roster.save(path)?;
        Ok(roster)
    }

    fn team_players_mut(&mut self, team: usize) -> Result<&mut Vec<String>, ConfigError> {
        self.players.get_mut(team).ok_or(ConfigError::TeamIndex(team))
    }
}
