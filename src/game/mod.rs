//! Round orchestration and state management.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::bank::Bankroll;
use crate::card::Card;
use crate::error::{HistoryError, OptionsError, ReshuffleError};
use crate::hand::{DealerHand, PlayerHand};
use crate::history::{GameHistoryEntry, HistoryRecorder, HistoryStats};
use crate::options::GameOptions;
use crate::result::{Outcome, RoundResult};
use crate::schedule::{Immediate, PendingStep, Scheduler};
use crate::shoe::{DeckStats, Shoe};
use crate::sync::Mutex;

mod actions;
mod bet;
mod dealer;
pub mod state;

pub use state::{GameState, RoundSnapshot};
use state::Round;

/// A single-seat blackjack table.
///
/// The game owns the shoe, the round in progress and the history log, and is
/// handed its balance collaborator at construction. Use [`GameOptions`] to
/// configure rules and [`Game::with_scheduler`] to pace dealer play.
pub struct Game {
    /// Table rules; the deck count follows [`Game::set_deck_count`].
    options: Mutex<GameOptions>,
    /// The shoe cards are dealt from.
    pub shoe: Mutex<Shoe>,
    /// Current game state.
    state: Mutex<GameState>,
    /// Round in progress.
    round: Mutex<Round>,
    /// Balance collaborator.
    bank: Mutex<Box<dyn Bankroll>>,
    /// Completed rounds.
    history: Mutex<HistoryRecorder>,
    /// Decides when follow-up steps run.
    scheduler: Box<dyn Scheduler>,
    /// Step parked by a deferring scheduler.
    pending: Mutex<Option<PendingStep>>,
    /// Random number generator for shuffles.
    rng: Mutex<ChaCha8Rng>,
}

impl core::fmt::Debug for Game {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Game")
            .field("options", &self.options())
            .field("state", &self.state())
            .field("balance", &self.balance())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Creates a game with a freshly shuffled shoe, an in-memory history and
    /// an [`Immediate`] scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`GameOptions::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, GameOptions, Wallet};
    ///
    /// let game = Game::new(GameOptions::default(), 42, Wallet::new(1_000)).unwrap();
    /// assert_eq!(game.balance(), 1_000);
    /// ```
    pub fn new(
        options: GameOptions,
        seed: u64,
        bankroll: impl Bankroll + 'static,
    ) -> Result<Self, OptionsError> {
        options.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut shoe = Shoe::new(options.decks)
            .map_err(|_| OptionsError::InvalidDeckCount)?
            .with_penetration(options.penetration);
        shoe.shuffle(&mut rng);

        let history = HistoryRecorder::in_memory(options.history_capacity);

        Ok(Self {
            options: Mutex::new(options),
            shoe: Mutex::new(shoe),
            state: Mutex::new(GameState::Betting),
            round: Mutex::new(Round::default()),
            bank: Mutex::new(Box::new(bankroll)),
            history: Mutex::new(history),
            scheduler: Box::new(Immediate),
            pending: Mutex::new(None),
            rng: Mutex::new(rng),
        })
    }

    /// Replaces the history recorder.
    #[must_use]
    pub fn with_history(self, history: HistoryRecorder) -> Self {
        *self.history.lock() = history;
        self
    }

    /// Replaces the scheduler.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: impl Scheduler + 'static) -> Self {
        self.scheduler = Box::new(scheduler);
        self
    }

    /// Draws a card from the shoe.
    fn draw(&self) -> Option<Card> {
        let mut rng = self.rng.lock();
        self.shoe.lock().deal(&mut *rng)
    }

    fn ensure_betting(&self) -> Result<(), ReshuffleError> {
        if *self.state.lock() != GameState::Betting {
            return Err(ReshuffleError::InvalidState);
        }
        Ok(())
    }

    /// Collects every card back and reshuffles the shoe.
    ///
    /// # Errors
    ///
    /// Returns an error unless the game is in the betting state.
    pub fn shuffle_deck(&self) -> Result<(), ReshuffleError> {
        self.ensure_betting()?;
        let mut rng = self.rng.lock();
        self.shoe.lock().shuffle(&mut *rng);
        Ok(())
    }

    /// Rebuilds the shoe with `decks` decks and shuffles it. The table
    /// options take the new deck count.
    ///
    /// # Errors
    ///
    /// Returns an error unless the game is in the betting state, or if
    /// `decks` is zero.
    pub fn set_deck_count(&self, decks: u8) -> Result<(), ReshuffleError> {
        self.ensure_betting()?;
        let mut rng = self.rng.lock();
        self.shoe
            .lock()
            .set_deck_count(decks, &mut *rng)
            .map_err(|_| ReshuffleError::InvalidDeckCount)?;
        drop(rng);

        self.options.lock().decks = decks;
        Ok(())
    }

    /// Returns a copy of the table rules.
    pub fn options(&self) -> GameOptions {
        self.options.lock().clone()
    }

    /// Shoe counters, the dealer's hole card included once dealt.
    pub fn deck_stats(&self) -> DeckStats {
        self.shoe.lock().stats()
    }

    /// Shoe counters as the table shows them: while the dealer's hole card
    /// is face down it counts as still in the shoe.
    pub fn visible_deck_stats(&self) -> DeckStats {
        let hidden: Vec<Card> = {
            let round = self.round.lock();
            let dealer = &round.dealer_hand;
            if dealer.is_hole_revealed() {
                Vec::new()
            } else {
                dealer.cards().iter().skip(1).copied().collect()
            }
        };

        self.shoe.lock().stats_hiding(&hidden)
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.lock().remaining()
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns the current balance.
    pub fn balance(&self) -> usize {
        self.bank.lock().balance()
    }

    /// Returns the bet chosen for the initial hand.
    pub fn bet_amount(&self) -> usize {
        self.round.lock().bet_amount
    }

    /// Returns the player's hands.
    pub fn player_hands(&self) -> Vec<PlayerHand> {
        self.round.lock().player_hands.clone()
    }

    /// Returns a clone of the dealer's hand.
    pub fn dealer_hand(&self) -> DealerHand {
        self.round.lock().dealer_hand.clone()
    }

    /// Returns the index of the hand taking actions.
    pub fn active_hand_index(&self) -> Option<usize> {
        self.round.lock().active_hand_index
    }

    /// Overall outcome of the settled round, if any.
    pub fn game_result(&self) -> Option<Outcome> {
        self.round.lock().result.as_ref().map(|result| result.outcome)
    }

    /// The settled round, if any.
    pub fn round_result(&self) -> Option<RoundResult> {
        self.round.lock().result.clone()
    }

    /// Step waiting for [`Game::advance`].
    pub fn pending_step(&self) -> Option<PendingStep> {
        *self.pending.lock()
    }

    /// Everything the UI needs to draw the table.
    pub fn snapshot(&self) -> RoundSnapshot {
        let state = self.state();
        let balance = self.balance();
        let pending = self.pending_step();
        let round = self.round.lock();

        RoundSnapshot {
            state,
            result: round.result.as_ref().map(|result| result.outcome),
            player_hands: round.player_hands.clone(),
            round_result: round.result.clone(),
            dealer_hand: round.dealer_hand.clone(),
            active_hand_index: round.active_hand_index,
            bet_amount: round.bet_amount,
            balance,
            pending,
        }
    }

    /// Totals over the stored history.
    pub fn history_stats(&self) -> HistoryStats {
        self.history.lock().stats()
    }

    /// The `count` most recent completed rounds.
    pub fn recent_games(&self, count: usize) -> Vec<GameHistoryEntry> {
        self.history.lock().recent(count).to_vec()
    }

    /// Empties the history log.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be cleared.
    pub fn clear_history(&self) -> Result<(), HistoryError> {
        self.history.lock().clear()
    }

    /// Serializes the history log.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn export_history(&self) -> Result<String, HistoryError> {
        self.history.lock().export_history()
    }

    /// Replaces the history log with exported data.
    ///
    /// # Errors
    ///
    /// Returns an error if the data is not a valid log or cannot be stored.
    pub fn import_history(&self, data: &str) -> Result<usize, HistoryError> {
        self.history.lock().import_history(data)
    }
}
