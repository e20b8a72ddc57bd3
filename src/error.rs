//! Error types for game operations.

use alloc::string::String;

use thiserror::Error;

/// Errors in table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Deck count is zero.
    #[error("deck count must be at least one")]
    InvalidDeckCount,
    /// Penetration is outside `[0, 1)`.
    #[error("penetration must be in [0, 1)")]
    InvalidPenetration,
    /// Blackjack ratio is negative or not finite.
    #[error("blackjack payout ratio must be a non-negative number")]
    InvalidBlackjackPayout,
    /// History capacity is zero.
    #[error("history capacity must be at least one")]
    InvalidHistoryCapacity,
    /// Options could not be parsed.
    #[error("malformed options")]
    Malformed,
}

/// Errors from the shoe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// Deck count is zero.
    #[error("deck count must be at least one")]
    InvalidDeckCount,
    /// A requested card is not left in the shoe.
    #[error("card is not left in the shoe")]
    CardUnavailable,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Errors that can occur when starting a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No bet has been placed.
    #[error("no bet has been placed")]
    NoBet,
    /// Balance no longer covers the bet.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// No hand is waiting for a decision.
    #[error("no active hand")]
    NoActiveHand,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Maximum splits reached.
    #[error("maximum splits reached")]
    MaxSplitsReached,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors from the pure split transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SplitError {
    /// The hand is not two cards of the same rank.
    #[error("hand is not a pair")]
    NotAPair,
}

/// Errors that can occur during dealer play and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for showdown.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
    /// No scheduled step is waiting.
    #[error("no scheduled step is pending")]
    NothingPending,
}

impl From<ShowdownError> for ActionError {
    fn from(err: ShowdownError) -> Self {
        match err {
            ShowdownError::NoCards => Self::NoCards,
            ShowdownError::InvalidState | ShowdownError::NothingPending => Self::InvalidState,
        }
    }
}

/// Errors that can occur during reshuffling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReshuffleError {
    /// Invalid game state for reshuffling.
    #[error("invalid game state for reshuffling")]
    InvalidState,
    /// Deck count is zero.
    #[error("deck count must be at least one")]
    InvalidDeckCount,
}

/// Errors from the balance collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BankrollError {
    /// Balance does not cover the debit.
    #[error("insufficient funds")]
    InsufficientFunds,
}

/// Errors from the history log and its store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    /// The log could not be serialized.
    #[error("failed to serialize history: {0}")]
    Serialize(String),
    /// Imported or stored data is not a valid history log.
    #[error("malformed history: {0}")]
    Malformed(String),
    /// The store rejected a read or write.
    #[error("history storage failed: {0}")]
    Storage(String),
}
