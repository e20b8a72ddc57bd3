use crate::card::Card;
use crate::error::ActionError;
use crate::hand::{Hand, PlayerHand};
use crate::split;

use super::{Game, GameState};

impl Game {
    /// Returns the index of the hand taking actions.
    fn ensure_player_turn(&self) -> Result<usize, ActionError> {
        if *self.state.lock() != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        self.round
            .lock()
            .active_hand_index
            .ok_or(ActionError::NoActiveHand)
    }

    /// Moves to the next hand needing decisions, or to the dealer once none
    /// is left.
    fn advance_after_hand(&self, index: usize) -> Result<(), ActionError> {
        let mut round = self.round.lock();
        let next = round.next_open_hand(index);
        round.activate(next);
        drop(round);

        match next {
            Some(next) => {
                log::debug!("hand {index} done, playing hand {next}");
                Ok(())
            }
            None => Ok(self.begin_dealer_turn()?),
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A bust finishes the hand. A 21 does not: the hand stays active until
    /// the player stands.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the player turn, no hand is
    /// active, or the shoe is empty.
    pub fn hit(&self) -> Result<Card, ActionError> {
        let index = self.ensure_player_turn()?;
        let card = self.draw().ok_or(ActionError::NoCards)?;

        let mut round = self.round.lock();
        let hand = &mut round.player_hands[index];
        hand.hand.add_card(card);
        let busted = hand.hand.is_bust();
        log::debug!("hand {index} hits {card}, now {}", hand.state().value);
        drop(round);

        if busted {
            self.advance_after_hand(index)?;
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the player turn or no hand is
    /// active.
    pub fn stand(&self) -> Result<(), ActionError> {
        let index = self.ensure_player_turn()?;

        self.round.lock().player_hands[index].stood = true;
        self.advance_after_hand(index)
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the player turn, the hand is
    /// not eligible to double down, the balance does not cover the extra bet,
    /// or the shoe is empty.
    pub fn double_down(&self) -> Result<Card, ActionError> {
        let index = self.ensure_player_turn()?;

        let options = self.options();
        let round = self.round.lock();
        let hand = &round.player_hands[index];

        // Can only double on first two cards
        if hand.hand.len() != 2 {
            return Err(ActionError::CannotDouble);
        }

        if hand.from_split && !options.double_after_split {
            return Err(ActionError::CannotDouble);
        }

        if !options.double.allows(hand.state().value) {
            return Err(ActionError::CannotDouble);
        }

        let bet = hand.bet;
        drop(round);

        self.bank
            .lock()
            .debit(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;

        let Some(card) = self.draw() else {
            self.bank.lock().credit(bet);
            return Err(ActionError::NoCards);
        };

        let mut round = self.round.lock();
        let hand = &mut round.player_hands[index];
        hand.bet += bet;
        hand.doubled = true;
        hand.hand.add_card(card);
        hand.stood = true;
        log::debug!("hand {index} doubles to {}, draws {card}", hand.bet);
        drop(round);

        self.advance_after_hand(index)?;

        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The second hand takes an equal bet from the balance. Each hand
    /// receives one more card and play continues with the first.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the player turn, the hand is
    /// not a pair, the maximum splits are reached, the balance does not cover
    /// the extra bet, or the shoe is empty.
    pub fn split(&self) -> Result<(), ActionError> {
        let index = self.ensure_player_turn()?;

        let max_splits = self.options.lock().max_splits;
        let round = self.round.lock();
        if round.player_hands.len() > max_splits as usize {
            return Err(ActionError::MaxSplitsReached);
        }

        let hand = &round.player_hands[index];
        let (first, second) = split::split(&hand.hand).map_err(|_| ActionError::CannotSplit)?;
        let bet = hand.bet;
        drop(round);

        self.bank
            .lock()
            .debit(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;

        let (Some(card1), Some(card2)) = (self.draw(), self.draw()) else {
            self.bank.lock().credit(bet);
            return Err(ActionError::NoCards);
        };

        let mut round = self.round.lock();
        let first_id = round.player_hands[index].id;
        let second_id = round.allocate_hand_id();

        let first = Self::split_hand(first_id, first, card1, bet);
        let second = Self::split_hand(second_id, second, card2, bet);
        let first_open = !first.is_finished();
        log::debug!(
            "hand {index} split: {} and {}",
            first.state().value,
            second.state().value
        );

        round.player_hands[index] = first;
        round.player_hands.insert(index + 1, second);
        round.activate(Some(index));
        drop(round);

        if !first_open {
            self.advance_after_hand(index)?;
        }

        Ok(())
    }

    fn split_hand(id: u32, mut hand: Hand, card: Card, bet: usize) -> PlayerHand {
        hand.add_card(card);
        PlayerHand {
            hand,
            from_split: true,
            ..PlayerHand::new(id, bet)
        }
    }
}
