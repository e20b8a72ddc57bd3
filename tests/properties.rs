//! Property-based tests for evaluation, the shoe and round accounting.

use bjtable::{
    Card, Game, GameOptions, GameState, Outcome, Rank, Shoe, Suit, Wallet, evaluate, payout,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn card_strategy() -> impl Strategy<Value = Card> {
    (0usize..13, 0usize..4).prop_map(|(rank, suit)| Card::new(Suit::ALL[suit], Rank::ALL[rank]))
}

fn cards_strategy() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(card_strategy(), 0..=12)
}

proptest! {
    #[test]
    fn evaluation_never_busts_a_standing_hand(cards in cards_strategy()) {
        let state = evaluate(&cards);

        prop_assert!(state.value >= state.low_value);
        prop_assert_eq!((state.value - state.low_value) % 10, 0);
        prop_assert_eq!(state.is_bust, state.value > 21);
        // Aces can always fall back to 1, so only the all-ones total busts.
        prop_assert_eq!(state.is_bust, state.low_value > 21);
        prop_assert_eq!(state.is_soft, state.value > state.low_value);
    }

    #[test]
    fn blackjack_needs_exactly_two_cards(cards in cards_strategy()) {
        let state = evaluate(&cards);
        prop_assert_eq!(state.is_blackjack, cards.len() == 2 && state.value == 21);
    }

    #[test]
    fn evaluation_ignores_order(mut cards in cards_strategy()) {
        let forward = evaluate(&cards);
        cards.reverse();
        let backward = evaluate(&cards);
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn shoe_counters_stay_consistent(seed in any::<u64>(), decks in 1u8..=8, deals in 0usize..600) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut shoe = Shoe::new(decks).unwrap();
        shoe.shuffle(&mut rng);

        for _ in 0..deals {
            prop_assert!(shoe.deal(&mut rng).is_some());
        }

        prop_assert_eq!(shoe.remaining() + shoe.used(), shoe.total());
        let per_rank = decks as usize * 4;
        for rank in Rank::ALL {
            prop_assert_eq!(
                shoe.used_by_rank().get(rank) + shoe.remaining_by_rank().get(rank),
                per_rank
            );
        }
    }

    #[test]
    fn payouts_scale_with_bet(bet in 1usize..10_000) {
        let options = GameOptions::default();
        prop_assert_eq!(payout(Outcome::PlayerWins, bet, &options), bet * 2);
        prop_assert_eq!(payout(Outcome::Push, bet, &options), bet);
        prop_assert_eq!(payout(Outcome::DealerWins, bet, &options), 0);
        let blackjack = payout(Outcome::PlayerBlackjack, bet, &options);
        prop_assert!(blackjack >= bet * 2 && blackjack <= bet * 5 / 2);
    }

    #[test]
    fn rounds_conserve_money(
        seed in any::<u64>(),
        bet in 1usize..=100,
        actions in prop::collection::vec(0u8..4, 0..8),
    ) {
        let game = Game::new(GameOptions::default(), seed, Wallet::new(1_000)).unwrap();
        game.place_bet(bet).unwrap();
        game.start_round().unwrap();

        for action in actions {
            if game.state() != GameState::PlayerTurn {
                break;
            }
            // Rejected actions are fine; only the accounting matters here.
            let _ = match action {
                0 => game.hit().map(|_| ()),
                1 => game.stand(),
                2 => game.double_down().map(|_| ()),
                _ => game.split(),
            };
        }
        while game.state() == GameState::PlayerTurn {
            game.stand().unwrap();
        }

        prop_assert_eq!(game.state(), GameState::Betting);
        let result = game.round_result().unwrap();
        let bets: usize = result.hands.iter().map(|settled| settled.hand.bet).sum();
        prop_assert_eq!(result.total_bet, bets);
        prop_assert_eq!(game.balance(), 1_000 - result.total_bet + result.total_payout);
        prop_assert_eq!(game.history_stats().total_games, 1);

        let on_table: usize = game
            .player_hands()
            .iter()
            .map(|hand| hand.cards().len())
            .sum::<usize>()
            + game.dealer_hand().len();
        prop_assert_eq!(game.deck_stats().used_cards, on_table);
    }

    #[test]
    fn same_seed_deals_same_round(seed in any::<u64>()) {
        let first = Game::new(GameOptions::default(), seed, Wallet::new(100)).unwrap();
        let second = Game::new(GameOptions::default(), seed, Wallet::new(100)).unwrap();

        for game in [&first, &second] {
            game.place_bet(10).unwrap();
            game.start_round().unwrap();
        }

        prop_assert_eq!(first.player_hands(), second.player_hands());
        prop_assert_eq!(first.dealer_hand(), second.dealer_hand());
    }
}
