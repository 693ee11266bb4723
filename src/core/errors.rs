use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that abort a settlement calculation or a game workflow step.
///
/// Everything here is an input problem. Callers are expected to surface
/// these to whoever supplied the data rather than retry.
#[derive(Error, Debug, PartialEq, Eq, Clone, Hash)]
pub enum SettlementError {
    #[error("Negative chip count for color \"{color}\" held by {player}: {count}")]
    NegativeChipCount {
        player: String,
        color: String,
        count: i64,
    },

    #[error("Invalid chip value for color \"{color}\": {value}")]
    InvalidChipValue { color: String, value: Decimal },

    #[error("No players to calculate payouts for")]
    NoPlayers,

    #[error("Invalid total pot amount: {0}")]
    InvalidPot(Decimal),

    #[error("Amount is not a finite number")]
    NonFiniteAmount,

    #[error("Amount is too large to compute")]
    AmountOverflow,

    #[error("No chip configuration found")]
    EmptyChipConfiguration,

    #[error("Duplicate chip denomination \"{0}\"")]
    DuplicateDenomination(String),

    #[error("Invalid settlement configuration: {0}")]
    InvalidConfig(String),

    #[error("Player \"{0}\" is already in this game")]
    DuplicatePlayer(String),

    #[error("Player \"{0}\" not found in this game")]
    UnknownPlayer(String),

    #[error("Invalid rebuy amount: {0}")]
    InvalidRebuyAmount(Decimal),

    #[error("Can only add rebuys to active games")]
    GameNotActive,

    #[error("Game has already been started")]
    GameAlreadyStarted,

    #[error("Game is already completed")]
    GameCompleted,

    #[error("Invalid group code \"{0}\"")]
    InvalidGroupCode(String),

    #[error("Unable to generate a unique group code after {0} attempts")]
    GroupCodeExhausted(usize),
}

/// Result type for settlement operations
pub type Result<T> = std::result::Result<T, SettlementError>;
