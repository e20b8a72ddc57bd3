//! Pair splitting.

use crate::error::SplitError;
use crate::hand::Hand;

/// Returns whether the hand is a pair: exactly two cards of the same rank.
///
/// Ten-valued cards of different ranks (for example `K` and `Q`) are not a
/// pair.
#[must_use]
pub fn can_split(hand: &Hand) -> bool {
    matches!(hand.cards(), [first, second] if first.rank == second.rank)
}

/// Splits a pair into two single-card hands, each re-evaluated.
///
/// No cards are dealt; the caller completes each hand.
///
/// # Errors
///
/// Returns [`SplitError::NotAPair`] if [`can_split`] is false.
pub fn split(hand: &Hand) -> Result<(Hand, Hand), SplitError> {
    match hand.cards() {
        [first, second] if first.rank == second.rank => Ok((
            Hand::from_cards(alloc::vec![*first]),
            Hand::from_cards(alloc::vec![*second]),
        )),
        _ => Err(SplitError::NotAPair),
    }
}
