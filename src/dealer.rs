//! Dealer drawing rules.

use serde::{Deserialize, Serialize};

use crate::hand::HandState;

/// Returns whether the dealer must draw: below 17, or on soft 17.
///
/// Only the dealer's own hand is consulted.
#[must_use]
pub const fn should_hit(dealer: &HandState) -> bool {
    dealer.value < 17 || (dealer.value == 17 && dealer.is_soft)
}

/// How the dealer plays soft 17.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DealerPolicy {
    /// Hit soft 17, stand on hard 17 and above.
    #[default]
    HitSoft17,
    /// Stand on every 17.
    StandSoft17,
}

impl DealerPolicy {
    /// Returns whether the dealer must draw under this policy.
    #[must_use]
    pub const fn should_hit(self, dealer: &HandState) -> bool {
        match self {
            Self::HitSoft17 => should_hit(dealer),
            Self::StandSoft17 => dealer.value < 17,
        }
    }
}
