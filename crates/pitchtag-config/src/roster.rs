use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub players: Vec<String>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<String>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }
}

/// Teams, their players and the taggable actions.
///
/// Loaded wholesale from the config file and saved back with a full
/// overwrite. Exactly two teams, with distinct non-empty names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    teams: [Team; 2],
    actions: Vec<String>,
}

/// On-disk layout: `{"teams": [..], "players": {team: [..]}, "actions": [..]}`
#[derive(Deserialize)]
struct RosterFile {
    teams: [String; 2],
    players: HashMap<String, Vec<String>>,
    actions: Vec<String>,
}

struct PlayersByTeam<'a>(&'a [Team; 2]);

impl Serialize for PlayersByTeam<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for team in self.0 {
            map.serialize_entry(&team.name, &team.players)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct RosterFileRef<'a> {
    teams: [&'a str; 2],
    players: PlayersByTeam<'a>,
    actions: &'a [String],
}

impl Roster {
    pub fn new(teams: [Team; 2], actions: Vec<String>) -> Result<Self, ConfigError> {
        let [first, second] = &teams;
        if first.name.trim().is_empty() || second.name.trim().is_empty() {
            return Err(ConfigError::Invalid("team names must not be empty".into()));
        }
        if first.name == second.name {
            return Err(ConfigError::Invalid(format!(
                "both teams are named '{}'",
                first.name
            )));
        }

        Ok(Self { teams, actions })
    }

    /// Read and validate the config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;

        let roster = Self::from_json(&data)?;
        tracing::info!(
            "Loaded config from {}: {} vs {}, {} actions",
            path.display(),
            roster.teams[0].name,
            roster.teams[1].name,
            roster.actions.len()
        );
        Ok(roster)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let RosterFile {
            teams,
            mut players,
            actions,
        } = serde_json::from_str(data)?;

        let mut take_team = |name: String| -> Result<Team, ConfigError> {
            let list = players
                .remove(&name)
                .ok_or_else(|| ConfigError::Invalid(format!("no players listed for team '{name}'")))?;
            Ok(Team::new(name, list))
        };

        let [first, second] = teams;
        if first == second {
            return Err(ConfigError::Invalid(format!("both teams are named '{first}'")));
        }
        let teams = [take_team(first)?, take_team(second)?];

        for stray in players.keys() {
            tracing::warn!("Ignoring players for unknown team '{}'", stray);
        }

        Self::new(teams, actions)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        let file = RosterFileRef {
            teams: [self.teams[0].name.as_str(), self.teams[1].name.as_str()],
            players: PlayersByTeam(&self.teams),
            actions: &self.actions,
        };

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        file.serialize(&mut ser)?;

        String::from_utf8(buf).map_err(|e| ConfigError::Invalid(e.to_string()))
    }

    /// Overwrite the config file with this roster
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        fs::write(path, self.to_json()?)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn teams(&self) -> &[Team; 2] {
        &self.teams
    }

    pub fn team(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name == name)
    }

    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    pub fn has_team(&self, name: &str) -> bool {
        self.team(name).is_some()
    }

    pub fn has_player(&self, team: &str, player: &str) -> bool {
        self.team(team).is_some_and(|t| t.has_player(player))
    }

    pub fn has_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }
}
