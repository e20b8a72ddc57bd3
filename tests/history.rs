//! History log integration tests.

#![allow(clippy::float_cmp)]

use std::sync::Arc;

use bjtable::{
    Card, DealerHand, FileStore, Game, GameOptions, Hand, HistoryError, HistoryRecorder,
    HistoryStore, ManualClock, MemoryStore, Outcome, PlayerHand, Rank, SettledHand, Suit, Wallet,
};

fn hand_of(ranks: &[Rank]) -> Hand {
    Hand::from_cards(
        ranks
            .iter()
            .zip(Suit::ALL.iter().cycle())
            .map(|(&rank, &suit)| Card::new(suit, rank))
            .collect(),
    )
}

fn settled(ranks: &[Rank], bet: usize, outcome: Outcome, payout: usize) -> SettledHand {
    let mut hand = PlayerHand::new(0, bet);
    hand.hand = hand_of(ranks);
    SettledHand {
        hand,
        outcome,
        payout,
    }
}

fn dealer_of(ranks: &[Rank]) -> DealerHand {
    let mut dealer = DealerHand::new();
    for card in hand_of(ranks).cards() {
        dealer.add_card(*card);
    }
    dealer.reveal_hole();
    dealer
}

fn recorder(capacity: usize) -> (HistoryRecorder, MemoryStore, Arc<ManualClock>) {
    let store = MemoryStore::new();
    let clock = Arc::new(ManualClock::new(1_000));
    let recorder = HistoryRecorder::new(store.clone(), Arc::clone(&clock), capacity);
    (recorder, store, clock)
}

/// Records one round of each kind: win, blackjack, loss, push, dealer
/// blackjack.
fn record_mixed(recorder: &mut HistoryRecorder) {
    let dealer = dealer_of(&[Rank::Ten, Rank::Eight]);

    recorder
        .save_game(
            &[settled(&[Rank::Ten, Rank::Nine], 10, Outcome::PlayerWins, 20)],
            &dealer,
            Outcome::PlayerWins,
            20,
        )
        .unwrap();
    recorder
        .save_game(
            &[settled(&[Rank::Ace, Rank::King], 10, Outcome::PlayerBlackjack, 25)],
            &dealer,
            Outcome::PlayerBlackjack,
            25,
        )
        .unwrap();
    recorder
        .save_game(
            &[settled(&[Rank::Ten, Rank::Six], 10, Outcome::DealerWins, 0)],
            &dealer,
            Outcome::DealerWins,
            0,
        )
        .unwrap();
    recorder
        .save_game(
            &[settled(&[Rank::Ten, Rank::Eight], 10, Outcome::Push, 10)],
            &dealer,
            Outcome::Push,
            10,
        )
        .unwrap();
    recorder
        .save_game(
            &[settled(&[Rank::Nine, Rank::Nine], 20, Outcome::DealerBlackjack, 0)],
            &dealer_of(&[Rank::Ace, Rank::Queen]),
            Outcome::DealerBlackjack,
            0,
        )
        .unwrap();
}

#[test]
fn save_game_records_entry() {
    let (mut recorder, store, _clock) = recorder(100);

    let entry = recorder
        .save_game(
            &[settled(&[Rank::Ten, Rank::Nine], 10, Outcome::DealerWins, 0)],
            &dealer_of(&[Rank::Ten, Rank::Six, Rank::Five]),
            Outcome::DealerWins,
            0,
        )
        .unwrap()
        .clone();

    assert_eq!(entry.timestamp, 1_000);
    assert_eq!(entry.hands[0].value, 19);
    assert_eq!(entry.hands[0].cards.len(), 2);
    assert_eq!(entry.dealer.value, 21);
    assert_eq!(entry.total_bet, 10);
    assert_eq!(entry.total_win, 0);
    assert_eq!(entry.net_winnings, -10);
    assert!(store.contents().is_some());
}

#[test]
fn log_is_capped_most_recent_first() {
    let (mut recorder, _store, clock) = recorder(100);
    let dealer = dealer_of(&[Rank::Ten, Rank::Seven]);

    for round in 0..105 {
        clock.set(round);
        recorder
            .save_game(
                &[settled(&[Rank::Ten, Rank::Eight], 10, Outcome::PlayerWins, 20)],
                &dealer,
                Outcome::PlayerWins,
                20,
            )
            .unwrap();
    }

    assert_eq!(recorder.len(), 100);
    assert_eq!(recorder.entries()[0].timestamp, 104);
    assert_eq!(recorder.entries()[99].timestamp, 5);
    assert_eq!(recorder.recent(3).len(), 3);
    assert_eq!(recorder.recent(3)[0].timestamp, 104);
    assert_eq!(recorder.recent(500).len(), 100);
}

#[test]
fn stats_cover_every_outcome() {
    let (mut recorder, _store, _clock) = recorder(100);
    record_mixed(&mut recorder);

    let stats = recorder.stats();
    assert_eq!(stats.total_games, 5);
    assert_eq!(stats.wins, 1);
    assert_eq!(stats.blackjacks, 1);
    assert_eq!(stats.losses, 2);
    assert_eq!(stats.pushes, 1);
    assert_eq!(stats.total_bet, 60);
    assert_eq!(stats.total_won, 55);
    assert_eq!(stats.net_winnings, -5);
    assert_eq!(stats.win_rate, 40.0);
    assert_eq!(stats.biggest_win, 15);
    assert_eq!(stats.biggest_loss, 20);
}

#[test]
fn empty_log_stats_are_zero() {
    let (recorder, _store, _clock) = recorder(100);
    let stats = recorder.stats();
    assert!(recorder.is_empty());
    assert_eq!(stats.total_games, 0);
    assert_eq!(stats.win_rate, 0.0);
}

#[test]
fn stored_log_is_loaded_on_creation() {
    let (mut recorder, store, clock) = recorder(100);
    record_mixed(&mut recorder);

    let reloaded = HistoryRecorder::new(store, clock, 100);
    assert_eq!(reloaded.entries(), recorder.entries());

    let smaller = HistoryRecorder::new(
        MemoryStore::with_data(recorder.export_history().unwrap()),
        ManualClock::new(0),
        2,
    );
    assert_eq!(smaller.len(), 2);
    assert_eq!(smaller.entries(), &recorder.entries()[..2]);
}

#[test]
fn corrupt_stored_log_starts_empty() {
    let recorder = HistoryRecorder::new(
        MemoryStore::with_data("not json"),
        ManualClock::new(0),
        100,
    );
    assert!(recorder.is_empty());
}

#[test]
fn export_import_round_trip() {
    let (mut recorder, _store, _clock) = recorder(100);
    record_mixed(&mut recorder);
    let exported = recorder.export_history().unwrap();

    let (mut other, other_store, _clock) = self::recorder(100);
    assert_eq!(other.import_history(&exported).unwrap(), 5);
    assert_eq!(other.entries(), recorder.entries());
    assert_eq!(other.stats(), recorder.stats());
    assert!(other_store.contents().is_some());
}

#[test]
fn import_keeps_most_recent_within_capacity() {
    let (mut recorder, _store, _clock) = recorder(100);
    record_mixed(&mut recorder);
    let exported = recorder.export_history().unwrap();

    let (mut small, _store, _clock) = self::recorder(3);
    assert_eq!(small.import_history(&exported).unwrap(), 3);
    assert_eq!(small.entries(), &recorder.entries()[..3]);
}

#[test]
fn malformed_import_leaves_log_untouched() {
    let (mut recorder, _store, _clock) = recorder(100);
    record_mixed(&mut recorder);
    let before = recorder.entries().to_vec();

    assert!(matches!(
        recorder.import_history("{ not a log"),
        Err(HistoryError::Malformed(_))
    ));

    let mut tampered: serde_json::Value =
        serde_json::from_str(&recorder.export_history().unwrap()).unwrap();
    tampered[0]["hands"][0]["value"] = serde_json::json!(5);
    assert!(matches!(
        recorder.import_history(&tampered.to_string()),
        Err(HistoryError::Malformed(_))
    ));

    let mut zero_bet: serde_json::Value =
        serde_json::from_str(&recorder.export_history().unwrap()).unwrap();
    zero_bet[1]["hands"][0]["bet"] = serde_json::json!(0);
    assert!(matches!(
        recorder.import_history(&zero_bet.to_string()),
        Err(HistoryError::Malformed(_))
    ));

    assert_eq!(recorder.entries(), before.as_slice());
}

#[test]
fn clear_empties_log_and_store() {
    let (mut recorder, store, _clock) = recorder(100);
    record_mixed(&mut recorder);

    recorder.clear().unwrap();
    assert!(recorder.is_empty());
    assert_eq!(store.contents(), None);
    assert_eq!(recorder.stats().total_games, 0);
}

#[test]
fn file_store_persists_between_recorders() {
    let path = std::env::temp_dir().join(format!("bjtable-history-{}.json", std::process::id()));
    let mut store = FileStore::new(&path);
    store.clear().unwrap();
    assert_eq!(store.load().unwrap(), None);

    let mut recorder = HistoryRecorder::new(store.clone(), ManualClock::new(0), 100);
    record_mixed(&mut recorder);
    assert!(path.exists());

    let reloaded = HistoryRecorder::new(FileStore::new(&path), ManualClock::new(0), 100);
    assert_eq!(reloaded.entries(), recorder.entries());

    recorder.clear().unwrap();
    assert!(!path.exists());
}

#[test]
fn game_records_settled_rounds() {
    let store = MemoryStore::new();
    let game = Game::new(GameOptions::default(), 9, Wallet::new(100))
        .unwrap()
        .with_history(HistoryRecorder::new(
            store.clone(),
            ManualClock::new(42),
            100,
        ));
    game.shoe
        .lock()
        .stack_next(&[
            Card::new(Suit::Hearts, Rank::Ace),
            Card::new(Suit::Clubs, Rank::Nine),
            Card::new(Suit::Diamonds, Rank::King),
            Card::new(Suit::Spades, Rank::Seven),
        ])
        .unwrap();

    game.place_bet(10).unwrap();
    game.start_round().unwrap();

    let recent = game.recent_games(10);
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].timestamp, 42);
    assert_eq!(recent[0].result, Outcome::PlayerBlackjack);
    assert_eq!(recent[0].total_win, 25);
    assert_eq!(recent[0].dealer.value, 16);
    assert_eq!(game.history_stats().blackjacks, 1);
    assert!(store.contents().is_some());

    let exported = game.export_history().unwrap();
    game.clear_history().unwrap();
    assert_eq!(game.history_stats().total_games, 0);
    assert_eq!(game.import_history(&exported).unwrap(), 1);
    assert_eq!(game.recent_games(1)[0].total_win, 25);
}
