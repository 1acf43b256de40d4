use thiserror::Error;

/// The result of attempting to perform an invalid operation on a [Game](crate::game::Game).
///
/// None of these are fatal: the match stays in its current phase and waits for a valid command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("there is no game running")]
    NotRunning,
    #[error("a game is already running")]
    AlreadyRunning,
    #[error("no transport has been configured, so the game cannot be started")]
    NoTransport,
    #[error("too few players were found, at least {0} are needed")]
    TooFewPlayers(usize),
    #[error("no player matches \"{0}\"")]
    PlayerNotFound(String),
    #[error("this action cannot be performed during this phase of the game")]
    InvalidAction,
    #[error("it is not your turn to do that")]
    NotYourTurn,
    #[error("{0} is dead")]
    DeadPlayer(String),
    #[error("you cannot choose yourself")]
    CannotTargetSelf,
    #[error("{0} was part of the previous government")]
    TermLimited(String),
    #[error("{0} has already been investigated")]
    AlreadyInvestigated(String),
    #[error("you have already voted")]
    AlreadyVoted,
    #[error("an invalid card was chosen, pick a number from 1 to {0}")]
    InvalidCard(usize),
    #[error("answer with ja or nein")]
    UnrecognizedChoice,
    #[error("a veto cannot be requested right now")]
    VetoUnavailable,
}

/// Failure to read the process configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} is unspecified")]
    Missing(&'static str),
    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Failure to read or write a group's stored settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings store failure: {0}")]
    Store(#[from] sled::Error),
    #[error("stored settings are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
