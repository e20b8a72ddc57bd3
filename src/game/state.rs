//! Game state types.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::hand::{DealerHand, PlayerHand};
use crate::result::{Outcome, RoundResult};
use crate::schedule::PendingStep;

/// Game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameState {
    /// Accepting a bet for the next round.
    Betting,
    /// Initial cards are being dealt.
    Dealing,
    /// Waiting for player actions.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round is settled and waiting to return to betting.
    GameOver,
}

/// Working state of one round.
#[derive(Debug, Clone, Default)]
pub(crate) struct Round {
    /// Bet for the next or current initial hand.
    pub bet_amount: usize,
    pub player_hands: Vec<PlayerHand>,
    pub dealer_hand: DealerHand,
    /// Index of the hand taking actions, `None` outside the player turn.
    pub active_hand_index: Option<usize>,
    pub next_hand_id: u32,
    pub result: Option<RoundResult>,
}

impl Round {
    /// Clears everything except the chosen bet.
    pub fn reset(&mut self) {
        let bet_amount = self.bet_amount;
        *self = Self {
            bet_amount,
            ..Self::default()
        };
    }

    /// Marks `index` as the only active hand.
    pub fn activate(&mut self, index: Option<usize>) {
        self.active_hand_index = index;
        for (position, hand) in self.player_hands.iter_mut().enumerate() {
            hand.is_active = Some(position) == index;
        }
    }

    /// First hand after `after` that still needs decisions.
    pub fn next_open_hand(&self, after: usize) -> Option<usize> {
        self.player_hands
            .iter()
            .enumerate()
            .skip(after + 1)
            .find(|(_, hand)| !hand.is_finished())
            .map(|(index, _)| index)
    }

    pub fn all_bust(&self) -> bool {
        self.player_hands.iter().all(|hand| hand.hand.is_bust())
    }

    pub const fn allocate_hand_id(&mut self) -> u32 {
        let id = self.next_hand_id;
        self.next_hand_id += 1;
        id
    }
}

/// Everything the UI needs to draw the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    /// Current phase.
    pub state: GameState,
    /// Overall outcome once settled.
    pub result: Option<Outcome>,
    /// Player hands in play order.
    pub player_hands: Vec<PlayerHand>,
    /// Settled round, once the dealer is done.
    pub round_result: Option<RoundResult>,
    /// Dealer hand. The hole card is part of it; whether to show it is up to
    /// the UI via [`DealerHand::is_hole_revealed`].
    pub dealer_hand: DealerHand,
    /// Hand taking actions.
    pub active_hand_index: Option<usize>,
    /// Chosen bet for the initial hand.
    pub bet_amount: usize,
    /// Current balance.
    pub balance: usize,
    /// Follow-up step waiting for the host.
    pub pending: Option<PendingStep>,
}
