//! A single-seat blackjack engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs the full round flow: betting,
//! the initial deal, player actions (hit, stand, double down, split), dealer
//! play and settlement. Hand evaluation, dealer policy and payouts are plain
//! functions usable on their own. Completed rounds are kept in a bounded
//! history log with derived statistics.
//!
//! The balance, the history store, the clock and the pacing of dealer steps
//! are collaborators handed to the game, see [`Bankroll`], [`HistoryStore`],
//! [`Clock`] and [`Scheduler`].
//!
//! # Example
//!
//! ```
//! use bjtable::{Game, GameOptions, GameState, Wallet};
//!
//! let game = Game::new(GameOptions::default(), 42, Wallet::new(1_000)).unwrap();
//! game.place_bet(10).unwrap();
//! game.start_round().unwrap();
//!
//! while game.state() == GameState::PlayerTurn {
//!     game.stand().unwrap();
//! }
//!
//! // The default scheduler plays the dealer out and reopens betting.
//! assert_eq!(game.state(), GameState::Betting);
//! assert_eq!(game.history_stats().total_games, 1);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod bank;
pub mod card;
pub mod clock;
pub mod dealer;
pub mod error;
pub mod game;
pub mod hand;
pub mod history;
pub mod options;
pub mod result;
pub mod schedule;
pub mod shoe;
pub mod split;
mod sync;

// Re-export main types
pub use bank::{Bankroll, Wallet};
pub use card::{Card, DECK_SIZE, Rank, Suit};
#[cfg(feature = "std")]
pub use clock::SystemClock;
pub use clock::{Clock, ManualClock};
pub use dealer::{DealerPolicy, should_hit};
pub use error::{
    ActionError, BankrollError, BetError, DealError, HistoryError, OptionsError, ReshuffleError,
    ShoeError, ShowdownError, SplitError,
};
pub use game::{Game, GameState, RoundSnapshot};
pub use hand::{DealerHand, Hand, HandState, PlayerHand, evaluate};
#[cfg(feature = "std")]
pub use history::FileStore;
pub use history::{
    DealerRecord, GameHistoryEntry, HandRecord, HistoryRecorder, HistoryStats, HistoryStore,
    MemoryStore,
};
pub use options::{DoubleOption, GameOptions, RoundingMode};
pub use result::{Outcome, RoundResult, SettledHand, payout, resolve};
pub use schedule::{Deferred, Dispatch, Immediate, PendingStep, Scheduler, Step};
pub use shoe::{DeckStats, RankCounts, Shoe};
pub use split::can_split;
