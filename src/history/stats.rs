//! Aggregates over the history log.

use serde::{Deserialize, Serialize};

use super::GameHistoryEntry;
use crate::result::Outcome;

/// Totals across every stored round.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryStats {
    /// Rounds in the log.
    pub total_games: usize,
    /// Rounds won without a blackjack.
    pub wins: usize,
    /// Rounds lost, dealer blackjacks included.
    pub losses: usize,
    /// Rounds pushed.
    pub pushes: usize,
    /// Rounds won with a player blackjack.
    pub blackjacks: usize,
    /// Sum of all bets.
    pub total_bet: usize,
    /// Sum of all payouts.
    pub total_won: usize,
    /// Sum of net winnings.
    pub net_winnings: isize,
    /// Percentage of rounds won, blackjacks included (0 to 100).
    pub win_rate: f64,
    /// Largest single-round profit.
    pub biggest_win: usize,
    /// Largest single-round loss, as a positive amount.
    pub biggest_loss: usize,
}

impl HistoryStats {
    /// Recomputes the totals from a log.
    #[must_use]
    pub fn from_entries(entries: &[GameHistoryEntry]) -> Self {
        let mut stats = Self {
            total_games: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            match entry.result {
                Outcome::PlayerWins => stats.wins += 1,
                Outcome::PlayerBlackjack => stats.blackjacks += 1,
                Outcome::Push => stats.pushes += 1,
                Outcome::DealerWins | Outcome::DealerBlackjack => stats.losses += 1,
            }

            stats.total_bet += entry.total_bet;
            stats.total_won += entry.total_win;
            stats.net_winnings += entry.net_winnings;

            if entry.net_winnings > 0 {
                stats.biggest_win = stats.biggest_win.max(entry.net_winnings.unsigned_abs());
            } else {
                stats.biggest_loss = stats.biggest_loss.max(entry.net_winnings.unsigned_abs());
            }
        }

        if stats.total_games > 0 {
            #[expect(
                clippy::cast_precision_loss,
                reason = "f64 has sufficient precision for game counts"
            )]
            let rate = (stats.wins + stats.blackjacks) as f64 / stats.total_games as f64;
            stats.win_rate = rate * 100.0;
        }

        stats
    }
}
