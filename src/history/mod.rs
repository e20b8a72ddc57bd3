//! The bounded log of completed rounds.
//!
//! Entries are immutable snapshots kept most recent first. Statistics are
//! recomputed from whatever the log currently holds, so they stay consistent
//! after imports and clears.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::clock::Clock;
use crate::error::HistoryError;
use crate::hand::{DealerHand, evaluate};
use crate::result::{Outcome, SettledHand};

mod stats;
mod store;

pub use stats::HistoryStats;
#[cfg(feature = "std")]
pub use store::FileStore;
pub use store::{HistoryStore, MemoryStore};

/// Default number of rounds kept.
pub const DEFAULT_CAPACITY: usize = 100;

/// One player hand as it finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandRecord {
    /// Cards in deal order.
    pub cards: Vec<Card>,
    /// Final value.
    pub value: u8,
    /// Final bet, doubles included.
    pub bet: usize,
    /// Outcome against the dealer.
    pub result: Outcome,
}

/// The dealer's final hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealerRecord {
    /// Cards in deal order.
    pub cards: Vec<Card>,
    /// Final value.
    pub value: u8,
}

/// A completed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistoryEntry {
    /// Milliseconds since the Unix epoch when the round was recorded.
    pub timestamp: u64,
    /// Player hands in play order.
    pub hands: Vec<HandRecord>,
    /// Dealer hand.
    pub dealer: DealerRecord,
    /// Overall outcome.
    pub result: Outcome,
    /// Sum of bets.
    pub total_bet: usize,
    /// Sum of payouts.
    pub total_win: usize,
    /// `total_win - total_bet`.
    pub net_winnings: isize,
}

impl GameHistoryEntry {
    fn check(&self) -> Result<(), String> {
        if self.hands.is_empty() {
            return Err("entry has no player hands".to_string());
        }

        for hand in &self.hands {
            if hand.bet == 0 {
                return Err("hand has a zero bet".to_string());
            }
            if hand.cards.is_empty() {
                return Err("hand has no cards".to_string());
            }
            let value = evaluate(&hand.cards).value;
            if value != hand.value {
                return Err(format!(
                    "hand value {} does not match its cards ({value})",
                    hand.value
                ));
            }
        }

        if evaluate(&self.dealer.cards).value != self.dealer.value {
            return Err("dealer value does not match its cards".to_string());
        }

        let total_bet: usize = self.hands.iter().map(|hand| hand.bet).sum();
        if total_bet != self.total_bet {
            return Err("total bet does not match hand bets".to_string());
        }

        #[expect(clippy::cast_possible_wrap, reason = "amounts fit in isize")]
        let net = self.total_win as isize - self.total_bet as isize;
        if net != self.net_winnings {
            return Err("net winnings do not match totals".to_string());
        }

        Ok(())
    }
}

/// Records completed rounds into a bounded, persisted log.
pub struct HistoryRecorder {
    store: Box<dyn HistoryStore>,
    clock: Box<dyn Clock>,
    capacity: usize,
    /// Most recent first.
    entries: Vec<GameHistoryEntry>,
}

impl core::fmt::Debug for HistoryRecorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HistoryRecorder")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl HistoryRecorder {
    /// Creates a recorder and loads whatever the store already holds.
    ///
    /// Stored data that cannot be read or is not a valid log is ignored with
    /// a warning, and the recorder starts empty.
    pub fn new(
        store: impl HistoryStore + 'static,
        clock: impl Clock + 'static,
        capacity: usize,
    ) -> Self {
        let capacity = capacity.max(1);
        let entries = match store.load() {
            Ok(Some(data)) => parse_log(&data).unwrap_or_else(|err| {
                log::warn!("ignoring stored history: {err}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("could not read stored history: {err}");
                Vec::new()
            }
        };

        let mut recorder = Self {
            store: Box::new(store),
            clock: Box::new(clock),
            capacity,
            entries,
        };
        recorder.entries.truncate(capacity);
        recorder
    }

    /// Creates a recorder with an in-memory store and the system clock.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn in_memory(capacity: usize) -> Self {
        Self::new(MemoryStore::new(), crate::clock::SystemClock, capacity)
    }

    /// Creates a recorder with an in-memory store and a clock stuck at 0.
    #[cfg(not(feature = "std"))]
    #[must_use]
    pub fn in_memory(capacity: usize) -> Self {
        Self::new(MemoryStore::new(), crate::clock::ManualClock::new(0), capacity)
    }

    /// Records a settled round and persists the log.
    ///
    /// The entry is kept in memory even if persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be serialized or stored.
    pub fn save_game(
        &mut self,
        hands: &[SettledHand],
        dealer: &DealerHand,
        result: Outcome,
        total_win: usize,
    ) -> Result<&GameHistoryEntry, HistoryError> {
        let records: Vec<HandRecord> = hands
            .iter()
            .map(|settled| HandRecord {
                cards: settled.hand.cards().to_vec(),
                value: settled.hand.state().value,
                bet: settled.hand.bet,
                result: settled.outcome,
            })
            .collect();
        let total_bet: usize = records.iter().map(|record| record.bet).sum();

        #[expect(clippy::cast_possible_wrap, reason = "amounts fit in isize")]
        let net_winnings = total_win as isize - total_bet as isize;

        let entry = GameHistoryEntry {
            timestamp: self.clock.now_millis(),
            hands: records,
            dealer: DealerRecord {
                cards: dealer.cards().to_vec(),
                value: dealer.value(),
            },
            result,
            total_bet,
            total_win,
            net_winnings,
        };

        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
        self.persist()?;

        Ok(&self.entries[0])
    }

    fn persist(&mut self) -> Result<(), HistoryError> {
        let data = serde_json::to_string(&self.entries)
            .map_err(|err| HistoryError::Serialize(err.to_string()))?;
        self.store.save(&data)
    }

    /// All entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[GameHistoryEntry] {
        &self.entries
    }

    /// The `count` most recent entries.
    #[must_use]
    pub fn recent(&self, count: usize) -> &[GameHistoryEntry] {
        &self.entries[..count.min(self.entries.len())]
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Totals recomputed from the current log.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        HistoryStats::from_entries(&self.entries)
    }

    /// Serializes the whole log.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Serialize`] if serialization fails.
    pub fn export_history(&self) -> Result<String, HistoryError> {
        serde_json::to_string_pretty(&self.entries)
            .map_err(|err| HistoryError::Serialize(err.to_string()))
    }

    /// Replaces the log with serialized data from [`export_history`].
    ///
    /// Entries beyond the capacity are dropped, oldest first. Returns the
    /// number of entries kept.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Malformed`] if the data is not a valid log, in
    /// which case the current log is untouched, or a storage error if the
    /// imported log cannot be persisted.
    ///
    /// [`export_history`]: HistoryRecorder::export_history
    pub fn import_history(&mut self, data: &str) -> Result<usize, HistoryError> {
        let mut entries = parse_log(data)?;
        entries.truncate(self.capacity);
        self.entries = entries;
        log::info!("imported {} history entries", self.entries.len());
        self.persist()?;
        Ok(self.entries.len())
    }

    /// Empties the log and the store.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the store cannot be cleared.
    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        log::info!("history cleared");
        self.store.clear()
    }
}

fn parse_log(data: &str) -> Result<Vec<GameHistoryEntry>, HistoryError> {
    let entries: Vec<GameHistoryEntry> =
        serde_json::from_str(data).map_err(|err| HistoryError::Malformed(err.to_string()))?;

    for (index, entry) in entries.iter().enumerate() {
        entry
            .check()
            .map_err(|reason| HistoryError::Malformed(format!("entry {index}: {reason}")))?;
    }

    Ok(entries)
}
