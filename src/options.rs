//! Game configuration options.

use serde::{Deserialize, Serialize};

use crate::dealer::DealerPolicy;
use crate::error::OptionsError;

/// Conditions under which doubling down is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DoubleOption {
    /// Double down allowed on any two-card hand.
    #[default]
    Any,
    /// Double down allowed only on 9 or 10.
    NineOrTen,
    /// Double down allowed only on 9 through 11.
    NineThrough11,
    /// Double down allowed only on 9 through 15.
    NineThrough15,
    /// Double down not allowed.
    None,
}

impl DoubleOption {
    /// Returns whether a hand of this value may double.
    #[must_use]
    pub const fn allows(self, value: u8) -> bool {
        match self {
            Self::Any => true,
            Self::NineOrTen => value == 9 || value == 10,
            Self::NineThrough11 => value >= 9 && value <= 11,
            Self::NineThrough15 => value >= 9 && value <= 15,
            Self::None => false,
        }
    }
}

/// Rounding mode for payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(8)
///     .with_blackjack_pays(1.5)
///     .with_history_capacity(50);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Number of decks.
    pub decks: u8,
    /// Fraction of the shoe dealt before the pre-deal reshuffle.
    /// 0 disables the threshold; an empty shoe is still reshuffled.
    pub penetration: f64,
    /// Blackjack bonus ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack bonuses.
    pub rounding_blackjack: RoundingMode,
    /// How the dealer plays soft 17.
    pub dealer_policy: DealerPolicy,
    /// Double down conditions.
    pub double: DoubleOption,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Maximum number of splits per round.
    pub max_splits: u8,
    /// Number of completed rounds kept in the history log.
    pub history_capacity: usize,
    /// Delay hint between dealer draws, in milliseconds.
    pub dealer_draw_delay_ms: u32,
    /// Delay hint before returning to betting, in milliseconds.
    pub return_delay_ms: u32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 6,
            penetration: 0.75,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
            dealer_policy: DealerPolicy::HitSoft17,
            double: DoubleOption::Any,
            double_after_split: true,
            max_splits: 3,
            history_capacity: 100,
            dealer_draw_delay_ms: 500,
            return_delay_ms: 2000,
        }
    }
}

impl GameOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the options fail
    /// [`GameOptions::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::from_json(r#"{ "decks": 2 }"#).unwrap();
    /// assert_eq!(options.decks, 2);
    /// assert_eq!(options.history_capacity, 100);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json).map_err(|_| OptionsError::Malformed)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks that the options describe a playable table.
    ///
    /// # Errors
    ///
    /// Returns an error for zero decks, a penetration outside `[0, 1)`, a
    /// negative or non-finite blackjack ratio, or a zero history capacity.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.decks == 0 {
            return Err(OptionsError::InvalidDeckCount);
        }
        if !(0.0..1.0).contains(&self.penetration) {
            return Err(OptionsError::InvalidPenetration);
        }
        if !self.blackjack_pays.is_finite() || self.blackjack_pays < 0.0 {
            return Err(OptionsError::InvalidBlackjackPayout);
        }
        if self.history_capacity == 0 {
            return Err(OptionsError::InvalidHistoryCapacity);
        }
        Ok(())
    }

    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(2);
    /// assert_eq!(options.decks, 2);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the deck penetration.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_penetration(0.80);
    /// assert_eq!(options.penetration, 0.80);
    /// ```
    #[must_use]
    pub const fn with_penetration(mut self, penetration: f64) -> Self {
        self.penetration = penetration;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets how the dealer plays soft 17.
    #[must_use]
    pub const fn with_dealer_policy(mut self, policy: DealerPolicy) -> Self {
        self.dealer_policy = policy;
        self
    }

    /// Sets the double down conditions.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, DoubleOption};
    ///
    /// let options = GameOptions::default().with_double(DoubleOption::NineThrough11);
    /// assert_eq!(options.double, DoubleOption::NineThrough11);
    /// ```
    #[must_use]
    pub const fn with_double(mut self, double: DoubleOption) -> Self {
        self.double = double;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the maximum number of splits per round.
    #[must_use]
    pub const fn with_max_splits(mut self, splits: u8) -> Self {
        self.max_splits = splits;
        self
    }

    /// Sets how many completed rounds the history keeps.
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets the pacing hints handed to the scheduler.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_delays(0, 0);
    /// assert_eq!(options.dealer_draw_delay_ms, 0);
    /// assert_eq!(options.return_delay_ms, 0);
    /// ```
    #[must_use]
    pub const fn with_delays(mut self, dealer_draw_ms: u32, return_ms: u32) -> Self {
        self.dealer_draw_delay_ms = dealer_draw_ms;
        self.return_delay_ms = return_ms;
        self
    }
}
