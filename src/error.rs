use thiserror::Error;

/// Seed data and color table disagree in a way that makes rendering unsafe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("no color configured for team `{team}`; color table is out of sync with the dataset")]
    MissingColor { team: String },

    #[error("invalid color `{value}` for team `{team}` (expected #RRGGBB)")]
    InvalidColor { team: String, value: String },

    #[error("duplicate team `{0}` in dataset")]
    DuplicateTeam(String),
}
