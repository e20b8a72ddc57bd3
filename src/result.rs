//! Outcome resolution, payouts and round results.

extern crate alloc;

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::{HandState, PlayerHand};
use crate::options::{GameOptions, RoundingMode};

/// Result of one player hand against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Player has the higher value or the dealer busted.
    PlayerWins,
    /// Player busted or the dealer has the higher value.
    DealerWins,
    /// Equal values, or both blackjack.
    Push,
    /// Player blackjack against a dealer without one.
    PlayerBlackjack,
    /// Dealer blackjack against a player without one.
    DealerBlackjack,
}

impl Outcome {
    /// Returns whether the player takes money from this outcome.
    #[must_use]
    pub const fn is_player_win(self) -> bool {
        matches!(self, Self::PlayerWins | Self::PlayerBlackjack)
    }

    /// Returns whether the player loses the bet.
    #[must_use]
    pub const fn is_player_loss(self) -> bool {
        matches!(self, Self::DealerWins | Self::DealerBlackjack)
    }
}

/// Compares a player hand with the dealer hand.
///
/// Checks in order: both blackjack, player blackjack, dealer blackjack,
/// player bust, dealer bust, then value. A 21 made with three or more cards
/// is an ordinary value and loses to a blackjack.
#[must_use]
pub const fn resolve(player: &HandState, dealer: &HandState) -> Outcome {
    match (player.is_blackjack, dealer.is_blackjack) {
        (true, true) => Outcome::Push,
        (true, false) => Outcome::PlayerBlackjack,
        (false, true) => Outcome::DealerBlackjack,
        (false, false) => {
            if player.is_bust {
                Outcome::DealerWins
            } else if dealer.is_bust || player.value > dealer.value {
                Outcome::PlayerWins
            } else if player.value < dealer.value {
                Outcome::DealerWins
            } else {
                Outcome::Push
            }
        }
    }
}

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

/// Amount credited back for a hand: nothing on a loss, the bet on a push,
/// twice the bet on a win, and the bet plus the rounded bonus on blackjack.
#[must_use]
pub fn payout(outcome: Outcome, bet: usize, options: &GameOptions) -> usize {
    match outcome {
        Outcome::DealerWins | Outcome::DealerBlackjack => 0,
        Outcome::Push => bet,
        Outcome::PlayerWins => bet * 2,
        Outcome::PlayerBlackjack => {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for monetary values"
            )]
            let bonus = (bet as f64) * options.blackjack_pays;
            bet + round_amount(bonus, options.rounding_blackjack)
        }
    }
}

/// A player hand after settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledHand {
    /// The hand as it finished play.
    pub hand: PlayerHand,
    /// The outcome against the dealer.
    pub outcome: Outcome,
    /// The amount credited for this hand.
    pub payout: usize,
}

/// Result of a settled round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResult {
    /// Settled hands, in play order.
    pub hands: Vec<SettledHand>,
    /// Overall outcome of the round.
    pub outcome: Outcome,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Sum of all hand bets, doubles and splits included.
    pub total_bet: usize,
    /// Sum of all payouts credited.
    pub total_payout: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
}

/// Overall outcome of a round: the outcome of a lone hand, otherwise the
/// sign of the net result.
#[must_use]
pub fn overall_outcome(hands: &[SettledHand], net: isize) -> Outcome {
    match hands {
        [only] => only.outcome,
        _ if net > 0 => Outcome::PlayerWins,
        _ if net < 0 => Outcome::DealerWins,
        _ => Outcome::Push,
    }
}
