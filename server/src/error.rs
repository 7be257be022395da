use shared::StreakId;

#[derive(Debug, thiserror::Error)]
pub enum StreakError {
    #[error("Streak not found")]
    NotFound(StreakId),
    #[error("Streak name must not be empty")]
    InvalidName,
    #[error("Streak was modified concurrently, please retry")]
    Conflict(StreakId),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

pub type Result<T, E = StreakError> = std::result::Result<T, E>;
