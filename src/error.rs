use chrono::NaiveDate;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Could not encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Reasons a session submission is turned down. Nothing is written when
/// one of these comes back.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Finish onboarding before logging sessions")]
    NotOnboarded,

    #[error("Daily limit reached ({0} sessions). Come back tomorrow for a new session.")]
    DailyLimitReached(usize),

    #[error("Pick a session type")]
    MissingKind,

    #[error("Select at least one skill worked")]
    NoSkills,

    #[error("Pick the date the session was played")]
    MissingDate,

    #[error("Session date {0} is in the future")]
    FutureDate(NaiveDate),

    #[error("Duration must be between 20 and 240 minutes (got {0})")]
    DurationOutOfRange(u32),

    #[error("Comment is limited to 180 characters")]
    CommentTooLong,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Already onboarded. Log out first to start over.")]
    AlreadyOnboarded,

    #[error("No player profile yet. Run setup first.")]
    NotOnboarded,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Weekly session target must be at least 1")]
    WeeklyTargetTooLow,

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Could not read {path:?}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} is not a file")]
    NotAFile(PathBuf),

    #[error("{0:?} is empty")]
    Empty(PathBuf),
}
