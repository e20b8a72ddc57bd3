//! The balance the seat plays from.

use crate::error::BankrollError;

/// Balance collaborator.
///
/// The engine debits before dealing any card and credits after settlement.
/// Each call is treated as atomic.
pub trait Bankroll: Send {
    /// Current balance.
    fn balance(&self) -> usize;

    /// Removes `amount` from the balance.
    ///
    /// # Errors
    ///
    /// Returns [`BankrollError::InsufficientFunds`] if the balance does not
    /// cover `amount`; the balance is unchanged.
    fn debit(&mut self, amount: usize) -> Result<(), BankrollError>;

    /// Adds `amount` to the balance.
    fn credit(&mut self, amount: usize);
}

/// In-memory balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wallet {
    balance: usize,
}

impl Wallet {
    /// Creates a wallet holding `balance`.
    #[must_use]
    pub const fn new(balance: usize) -> Self {
        Self { balance }
    }
}

impl Bankroll for Wallet {
    fn balance(&self) -> usize {
        self.balance
    }

    fn debit(&mut self, amount: usize) -> Result<(), BankrollError> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(BankrollError::InsufficientFunds)?;
        Ok(())
    }

    fn credit(&mut self, amount: usize) {
        self.balance = self.balance.saturating_add(amount);
    }
}
