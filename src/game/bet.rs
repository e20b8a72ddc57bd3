use crate::error::{BetError, DealError};
use crate::hand::{DealerHand, PlayerHand};
use crate::schedule::Step;

use super::{Game, GameState};

impl Game {
    /// Chooses the bet for the next round. Nothing is debited until
    /// [`Game::start_round`].
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the betting state, the bet is
    /// zero, or it exceeds the balance.
    pub fn place_bet(&self, amount: usize) -> Result<(), BetError> {
        if *self.state.lock() != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        if amount == 0 {
            return Err(BetError::ZeroBet);
        }

        if amount > self.balance() {
            return Err(BetError::InsufficientFunds);
        }

        self.round.lock().bet_amount = amount;
        Ok(())
    }

    /// Debits the bet and deals the initial cards: player, dealer, player,
    /// dealer.
    ///
    /// A blackjack on either side settles the round at once. Otherwise the
    /// game moves to the player turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the betting state, no bet was
    /// placed, the balance does not cover the bet, or the shoe cannot supply
    /// the cards. Nothing changes on error.
    pub fn start_round(&self) -> Result<(), DealError> {
        let mut state = self.state.lock();
        if *state != GameState::Betting {
            return Err(DealError::InvalidState);
        }

        let bet = self.round.lock().bet_amount;
        if bet == 0 {
            return Err(DealError::NoBet);
        }

        self.bank
            .lock()
            .debit(bet)
            .map_err(|_| DealError::InsufficientFunds)?;

        *state = GameState::Dealing;
        drop(state);

        let mut player = PlayerHand::new(0, bet);
        let mut dealer = DealerHand::new();

        for seat in 0..4 {
            let Some(card) = self.draw() else {
                log::error!("shoe ran dry while dealing, round abandoned");
                self.bank.lock().credit(bet);
                *self.state.lock() = GameState::Betting;
                return Err(DealError::NotEnoughCards);
            };

            if seat % 2 == 0 {
                player.hand.add_card(card);
            } else {
                dealer.add_card(card);
            }
        }

        let natural = player.hand.is_blackjack() || dealer.is_blackjack();

        let mut round = self.round.lock();
        round.reset();
        round.next_hand_id = 1;
        round.player_hands.push(player);
        round.dealer_hand = dealer;

        log::info!(
            "round started: bet {bet}, player {} vs dealer up {}",
            round.player_hands[0].state().value,
            round.dealer_hand.up_card().map_or(0, |card| card.value()),
        );

        if natural {
            round.activate(None);
            round.dealer_hand.reveal_hole();
            drop(round);
            *self.state.lock() = GameState::DealerTurn;

            // Settlement needs no cards, so the only possible error is a
            // state mismatch, which cannot happen here.
            if let Err(err) = self.settle_and_schedule() {
                log::error!("settling natural failed: {err}");
            }
            return Ok(());
        }

        round.activate(Some(0));
        drop(round);
        *self.state.lock() = GameState::PlayerTurn;

        Ok(())
    }

    /// Reopens betting after a settled round.
    ///
    /// The settled hands and result stay readable until the next
    /// [`Game::start_round`]. Returns `false` if no settled round is waiting.
    pub fn finish_round(&self) -> bool {
        let mut state = self.state.lock();
        if *state != GameState::GameOver {
            return false;
        }

        let mut pending = self.pending.lock();
        if pending.is_some_and(|p| p.step == Step::ReturnToBetting) {
            *pending = None;
        }
        drop(pending);

        *state = GameState::Betting;
        log::debug!("back to betting");
        true
    }
}
