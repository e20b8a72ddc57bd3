//! The shoe: one or more decks, dealt from the top and reshuffled by
//! penetration.

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::card::{CARDS_PER_RANK, Card, DECK_SIZE, Rank, Suit};
use crate::error::ShoeError;

/// Per-rank card counts, indexed in [`Rank::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RankCounts([usize; 13]);

impl RankCounts {
    /// Returns the count for a rank.
    #[must_use]
    pub const fn get(&self, rank: Rank) -> usize {
        self.0[rank.index()]
    }

    /// Iterates over `(rank, count)` pairs, ace first.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, usize)> + '_ {
        Rank::ALL.iter().map(|&rank| (rank, self.get(rank)))
    }

    /// Sum over every rank.
    #[must_use]
    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }
}

/// Counters exposed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckStats {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Cards in a full shoe.
    pub total_cards: usize,
    /// Cards left to deal.
    pub remaining_cards: usize,
    /// Cards dealt since the last shuffle.
    pub used_cards: usize,
    /// Remaining cards per rank.
    pub remaining_by_rank: RankCounts,
    /// Dealt cards per rank.
    pub used_by_rank: RankCounts,
}

/// A multi-deck shoe.
///
/// `remaining() + used() == total()` holds after every operation, and per
/// rank `used + remaining == decks * 4`.
#[derive(Debug, Clone, PartialEq)]
pub struct Shoe {
    decks: u8,
    /// Live pool; the top of the shoe is the end of the vector.
    cards: Vec<Card>,
    /// Cards dealt since the last shuffle.
    used: Vec<Card>,
    used_by_rank: [usize; 13],
    /// Fraction of the shoe dealt before the pre-deal reshuffle, 0 disables.
    penetration: f64,
}

impl Shoe {
    /// Default penetration: reshuffle once fewer than a quarter of the cards
    /// remain.
    pub const DEFAULT_PENETRATION: f64 = 0.75;

    /// Builds `decks` full decks in deck order, with nothing dealt.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::InvalidDeckCount`] if `decks` is zero.
    pub fn new(decks: u8) -> Result<Self, ShoeError> {
        if decks == 0 {
            return Err(ShoeError::InvalidDeckCount);
        }

        Ok(Self {
            decks,
            cards: Self::build_cards(decks),
            used: Vec::new(),
            used_by_rank: [0; 13],
            penetration: Self::DEFAULT_PENETRATION,
        })
    }

    /// Sets the penetration used by the pre-deal reshuffle check.
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    fn build_cards(decks: u8) -> Vec<Card> {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards
    }

    /// Merges dealt cards back and shuffles the whole shoe.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.append(&mut self.used);
        self.used_by_rank = [0; 13];
        self.cards.shuffle(rng);
        log::info!("shoe shuffled ({} cards)", self.cards.len());
    }

    /// Rebuilds the shoe with a new number of decks and shuffles it.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::InvalidDeckCount`] if `decks` is zero; the shoe
    /// is left untouched.
    pub fn set_deck_count<R: Rng + ?Sized>(
        &mut self,
        decks: u8,
        rng: &mut R,
    ) -> Result<(), ShoeError> {
        let penetration = self.penetration;
        *self = Self::new(decks)?.with_penetration(penetration);
        self.shuffle(rng);
        log::info!("shoe rebuilt with {decks} deck(s)");
        Ok(())
    }

    /// Returns whether the remaining cards are below the penetration
    /// threshold. Always `false` when penetration is 0.
    #[must_use]
    pub fn needs_reshuffle(&self) -> bool {
        if self.penetration <= 0.0 {
            return false;
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let threshold = self.total() as f64 * (1.0 - self.penetration);
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let remaining = self.remaining() as f64;

        remaining < threshold
    }

    /// Deals the top card, reshuffling first when below the threshold or
    /// empty.
    ///
    /// Returns `None` only if the shoe is still empty after reshuffling.
    pub fn deal<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.needs_reshuffle() || self.cards.is_empty() {
            log::info!(
                "reshuffling before deal ({} of {} cards left)",
                self.remaining(),
                self.total()
            );
            self.shuffle(rng);
        }

        let card = self.cards.pop()?;
        self.used.push(card);
        self.used_by_rank[card.rank.index()] += 1;
        log::debug!("dealt {card}");
        Some(card)
    }

    /// Moves the given cards to the top of the shoe so they are dealt next,
    /// in the given order.
    ///
    /// Every card must be in the live pool; duplicates need as many copies.
    /// Counters are unaffected since only the order changes.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::CardUnavailable`] if a card is not left in the
    /// shoe. The order is unchanged in that case.
    pub fn stack_next(&mut self, draws: &[Card]) -> Result<(), ShoeError> {
        let mut pool = self.cards.clone();
        let mut top = Vec::with_capacity(draws.len());

        for card in draws {
            let position = pool
                .iter()
                .rposition(|c| c == card)
                .ok_or(ShoeError::CardUnavailable)?;
            top.push(pool.remove(position));
        }

        top.reverse();
        pool.extend(top);
        self.cards = pool;
        Ok(())
    }

    /// Number of decks in the shoe.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Cards in a full shoe.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.decks as usize * DECK_SIZE
    }

    /// Cards left to deal.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Cards dealt since the last shuffle.
    #[must_use]
    pub fn used(&self) -> usize {
        self.used.len()
    }

    /// Fraction of the shoe dealt since the last shuffle.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let ratio = self.used() as f64 / self.total() as f64;
        ratio
    }

    /// Dealt cards per rank.
    #[must_use]
    pub const fn used_by_rank(&self) -> RankCounts {
        RankCounts(self.used_by_rank)
    }

    /// Remaining cards per rank.
    #[must_use]
    pub fn remaining_by_rank(&self) -> RankCounts {
        let per_rank = self.decks as usize * CARDS_PER_RANK;
        RankCounts(self.used_by_rank.map(|used| per_rank - used))
    }

    /// Snapshot of all counters.
    #[must_use]
    pub fn stats(&self) -> DeckStats {
        DeckStats {
            decks: self.decks,
            total_cards: self.total(),
            remaining_cards: self.remaining(),
            used_cards: self.used(),
            remaining_by_rank: self.remaining_by_rank(),
            used_by_rank: self.used_by_rank(),
        }
    }

    /// Counters as seen from the table when `hidden` cards were dealt face
    /// down: each one is counted as still in the shoe.
    ///
    /// Hidden cards not dealt since the last shuffle are not in the counters
    /// and are skipped.
    #[must_use]
    pub fn stats_hiding(&self, hidden: &[Card]) -> DeckStats {
        let mut stats = self.stats();
        let mut dealt = self.used.clone();

        for card in hidden {
            let Some(position) = dealt.iter().rposition(|c| c == card) else {
                continue;
            };
            dealt.swap_remove(position);

            let index = card.rank.index();
            stats.used_by_rank.0[index] -= 1;
            stats.remaining_by_rank.0[index] += 1;
            stats.used_cards -= 1;
            stats.remaining_cards += 1;
        }

        stats
    }
}
