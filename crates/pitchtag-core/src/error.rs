#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Unknown team: {0}")]
    UnknownTeam(String),

    #[error("Unknown player {player} for team {team}")]
    UnknownPlayer { team: String, player: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Select a team before choosing a player")]
    NoTeamSelected,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
