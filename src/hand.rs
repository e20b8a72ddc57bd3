//! Hand evaluation plus player and dealer hand representations.

use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// Evaluated state of a list of cards.
///
/// Always derived from the cards by [`evaluate`]; never updated in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HandState {
    /// Effective value: the best total not above 21 if one exists, otherwise
    /// the lowest bust total.
    pub value: u8,
    /// Total with every ace counted as 1.
    pub low_value: u8,
    /// Total with aces counted as 11 wherever that does not bust.
    pub high_value: u8,
    /// At least one ace is counted as 11.
    pub is_soft: bool,
    /// Exactly two cards totalling 21.
    pub is_blackjack: bool,
    /// Value over 21.
    pub is_bust: bool,
}

/// Evaluates a list of cards under blackjack rules.
///
/// Aces are assigned greedily: each counts as 11 while the running total
/// stays at or below 21, otherwise as 1. Total over any number of cards; an
/// empty list evaluates to zero, hard, no blackjack, no bust.
///
/// # Example
///
/// ```
/// use bjtable::{Card, Rank, Suit, evaluate};
///
/// let state = evaluate(&[
///     Card::new(Suit::Hearts, Rank::Ace),
///     Card::new(Suit::Spades, Rank::Nine),
/// ]);
/// assert_eq!(state.value, 20);
/// assert!(state.is_soft);
/// ```
#[must_use]
pub fn evaluate(cards: &[Card]) -> HandState {
    let mut non_ace_sum: u8 = 0;
    let mut aces: u8 = 0;

    for card in cards {
        if card.rank.is_ace() {
            aces = aces.saturating_add(1);
        } else {
            non_ace_sum = non_ace_sum.saturating_add(card.value());
        }
    }

    let low_value = non_ace_sum.saturating_add(aces);

    let mut high_value = non_ace_sum;
    let mut aces_as_eleven: u8 = 0;
    for placed in 0..aces {
        // Remaining aces still need at least 1 each.
        let still_to_place = aces - placed - 1;
        if high_value.saturating_add(11).saturating_add(still_to_place) <= 21 {
            high_value += 11;
            aces_as_eleven += 1;
        } else {
            high_value = high_value.saturating_add(1);
        }
    }

    let value = high_value;

    HandState {
        value,
        low_value,
        high_value,
        is_soft: aces_as_eleven > 0,
        is_blackjack: cards.len() == 2 && value == 21,
        is_bust: value > 21,
    }
}

/// An ordered list of cards with its evaluated state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Hand {
    /// Cards in deal order.
    cards: Vec<Card>,
    /// State recomputed after every change.
    state: HandState,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            state: HandState {
                value: 0,
                low_value: 0,
                high_value: 0,
                is_soft: false,
                is_blackjack: false,
                is_bust: false,
            },
        }
    }

    /// Creates a hand from the given cards.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        let state = evaluate(&cards);
        Self { cards, state }
    }

    /// Adds a card to the hand and re-evaluates it.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.state = evaluate(&self.cards);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the evaluated state.
    #[must_use]
    pub const fn state(&self) -> &HandState {
        &self.state
    }

    /// Effective value of the hand.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.state.value
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.state.is_soft
    }

    /// Returns whether the hand is a two-card 21.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.state.is_blackjack
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.state.is_bust
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Removes every card.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.state = HandState::default();
    }
}

/// A hand played by the seat, with its wager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerHand {
    /// Identifier, stable across split siblings within a round.
    pub id: u32,
    /// Cards and evaluated state.
    pub hand: Hand,
    /// Wager on this hand.
    pub bet: usize,
    /// Whether this hand is the one currently taking actions.
    pub is_active: bool,
    /// Whether the player stood (doubling forces a stand).
    pub stood: bool,
    /// Whether the bet was doubled.
    pub doubled: bool,
    /// Whether this hand came from a split.
    pub from_split: bool,
}

impl PlayerHand {
    /// Creates an empty hand with the given bet.
    #[must_use]
    pub const fn new(id: u32, bet: usize) -> Self {
        Self {
            id,
            hand: Hand::new(),
            bet,
            is_active: false,
            stood: false,
            doubled: false,
            from_split: false,
        }
    }

    /// Returns the evaluated state of the cards.
    #[must_use]
    pub const fn state(&self) -> &HandState {
        self.hand.state()
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// Returns whether the hand may still take actions in the bookkeeping
    /// sense: neither bust nor blackjack.
    ///
    /// A 21 reached by hitting stays playable until the player stands.
    #[must_use]
    pub const fn is_playable(&self) -> bool {
        !self.hand.is_blackjack() && !self.hand.is_bust()
    }

    /// Returns whether the hand needs no further player decisions.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.stood || !self.is_playable()
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DealerHand {
    /// Cards and evaluated state.
    hand: Hand,
    /// Whether the hole card is revealed to the player.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            hand: Hand::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.hand.add_card(card);
    }

    /// Returns all cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    /// Returns the underlying hand.
    #[must_use]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the evaluated state of every card, hole card included.
    #[must_use]
    pub const fn state(&self) -> &HandState {
        self.hand.state()
    }

    /// Returns the visible card (first card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.hand.cards().first()
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        if self.hole_revealed {
            self.value()
        } else {
            self.up_card().map_or(0, Card::value)
        }
    }

    /// Full value of the hand.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.hand.value()
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.hand.is_blackjack()
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.hand.is_bust()
    }

    /// Returns whether the hand is soft.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.hand.is_soft()
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hand.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hand.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.hand.clear();
        self.hole_revealed = false;
    }
}
