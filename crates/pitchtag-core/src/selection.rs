use pitchtag_config::Roster;

use crate::error::TagError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionField {
    Team,
    Player,
    Action,
}

/// Team, player and action the next pair of clicks is attributed to.
///
/// Every value is checked against the roster when it is set, so a complete
/// selection always names an existing team, one of its players and a known
/// action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    team: Option<String>,
    player: Option<String>,
    action: Option<String>,
}

impl Selection {
    pub fn team(&self) -> Option<&str> {
        self.team.as_deref()
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.team.is_some() && self.player.is_some() && self.action.is_some()
    }

    /// Returns whether the selection changed.
    ///
    /// Switching to another team clears the player.
    pub fn set_team(&mut self, team: &str, roster: &Roster) -> Result<bool, TagError> {
        if !roster.has_team(team) {
            return Err(TagError::UnknownTeam(team.to_string()));
        }
        if self.team.as_deref() == Some(team) {
            return Ok(false);
        }

        self.team = Some(team.to_string());
        self.player = None;
        Ok(true)
    }

    pub fn set_player(&mut self, team: &str, player: &str, roster: &Roster) -> Result<bool, TagError> {
        if !roster.has_team(team) {
            return Err(TagError::UnknownTeam(team.to_string()));
        }
        if !roster.has_player(team, player) {
            return Err(TagError::UnknownPlayer {
                team: team.to_string(),
                player: player.to_string(),
            });
        }
        if self.team.as_deref() == Some(team) && self.player.as_deref() == Some(player) {
            return Ok(false);
        }

        self.team = Some(team.to_string());
        self.player = Some(player.to_string());
        Ok(true)
    }

    pub fn set_action(&mut self, action: &str, roster: &Roster) -> Result<bool, TagError> {
        if !roster.has_action(action) {
            return Err(TagError::UnknownAction(action.to_string()));
        }
        if self.action.as_deref() == Some(action) {
            return Ok(false);
        }

        self.action = Some(action.to_string());
        Ok(true)
    }

    /// Set a single field. A bare player is looked up in the selected team.
    pub fn set(&mut self, field: SelectionField, value: &str, roster: &Roster) -> Result<bool, TagError> {
        match field {
            SelectionField::Team => self.set_team(value, roster),
            SelectionField::Player => {
                let team = self.team.clone().ok_or(TagError::NoTeamSelected)?;
                self.set_player(&team, value, roster)
            }
            SelectionField::Action => self.set_action(value, roster),
        }
    }

    /// Drop whatever the roster no longer knows about. Returns whether
    /// anything was cleared.
    pub fn retain_valid(&mut self, roster: &Roster) -> bool {
        let mut changed = false;

        if let Some(team) = &self.team
            && !roster.has_team(team)
        {
            self.team = None;
            self.player = None;
            changed = true;
        }
        if let (Some(team), Some(player)) = (&self.team, &self.player)
            && !roster.has_player(team, player)
        {
            self.player = None;
            changed = true;
        }
        if let Some(action) = &self.action
            && !roster.has_action(action)
        {
            self.action = None;
            changed = true;
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use pitchtag_config::Team;

    use super::*;

    fn roster() -> Roster {
        Roster::new(
            [
                Team::new("Red", vec!["A".into(), "B".into()]),
                Team::new("Blue", vec!["X".into()]),
            ],
            vec!["Pass".into(), "Shot".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_complete_after_player_and_action() {
        let roster = roster();
        let mut sel = Selection::default();
        assert!(!sel.is_complete());

        assert!(sel.set_player("Red", "A", &roster).unwrap());
        assert!(!sel.is_complete());
        assert!(sel.set_action("Shot", &roster).unwrap());
        assert!(sel.is_complete());
        assert_eq!(sel.team(), Some("Red"));
    }

    #[test]
    fn test_unknown_values_leave_selection_untouched() {
        let roster = roster();
        let mut sel = Selection::default();
        sel.set_player("Red", "A", &roster).unwrap();
        let before = sel.clone();

        assert!(matches!(
            sel.set_player("Blue", "A", &roster),
            Err(TagError::UnknownPlayer { .. })
        ));
        assert!(matches!(
            sel.set_team("Green", &roster),
            Err(TagError::UnknownTeam(_))
        ));
        assert!(matches!(
            sel.set_action("Dribble", &roster),
            Err(TagError::UnknownAction(_))
        ));
        assert_eq!(sel, before);
    }

    #[test]
    fn test_reselecting_same_value_is_not_a_change() {
        let roster = roster();
        let mut sel = Selection::default();
        sel.set_player("Red", "A", &roster).unwrap();
        assert!(!sel.set_player("Red", "A", &roster).unwrap());
        assert!(!sel.set_team("Red", &roster).unwrap());
    }

    #[test]
    fn test_switching_team_clears_player() {
        let roster = roster();
        let mut sel = Selection::default();
        sel.set_player("Red", "A", &roster).unwrap();
        assert!(sel.set_team("Blue", &roster).unwrap());
        assert_eq!(sel.player(), None);
    }

    #[test]
    fn test_bare_player_needs_team() {
        let roster = roster();
        let mut sel = Selection::default();
        assert!(matches!(
            sel.set(SelectionField::Player, "A", &roster),
            Err(TagError::NoTeamSelected)
        ));

        sel.set(SelectionField::Team, "Blue", &roster).unwrap();
        sel.set(SelectionField::Player, "X", &roster).unwrap();
        assert_eq!(sel.player(), Some("X"));
    }

    #[test]
    fn test_retain_valid_clears_removed_entries() {
        let roster = roster();
        let mut sel = Selection::default();
        sel.set_player("Red", "B", &roster).unwrap();
        sel.set_action("Pass", &roster).unwrap();

        let trimmed = Roster::new(
            [
                Team::new("Red", vec!["A".into()]),
                Team::new("Blue", vec!["X".into()]),
            ],
            vec!["Pass".into()],
        )
        .unwrap();

        assert!(sel.retain_valid(&trimmed));
        assert_eq!(sel.team(), Some("Red"));
        assert_eq!(sel.player(), None);
        assert_eq!(sel.action(), Some("Pass"));
        assert!(!sel.retain_valid(&trimmed));
    }
}
