//! Pure rule tests: evaluation, dealer policy, outcomes, payouts, splitting.

use bjtable::result::overall_outcome;
use bjtable::split::split;
use bjtable::{
    Card, DealerHand, DealerPolicy, DoubleOption, GameOptions, Hand, HandState, OptionsError,
    Outcome, PlayerHand, Rank, RoundingMode, SettledHand, SplitError, Suit, can_split, evaluate,
    payout, resolve, should_hit,
};

fn cards(ranks: &[Rank]) -> Vec<Card> {
    ranks
        .iter()
        .zip(Suit::ALL.iter().cycle())
        .map(|(&rank, &suit)| Card::new(suit, rank))
        .collect()
}

fn state(ranks: &[Rank]) -> HandState {
    evaluate(&cards(ranks))
}

#[test]
fn empty_hand_is_zero() {
    let empty = evaluate(&[]);
    assert_eq!(empty.value, 0);
    assert!(!empty.is_soft);
    assert!(!empty.is_blackjack);
    assert!(!empty.is_bust);
}

#[test]
fn ace_and_king_is_blackjack() {
    let hand = state(&[Rank::Ace, Rank::King]);
    assert_eq!(hand.value, 21);
    assert!(hand.is_soft);
    assert!(hand.is_blackjack);
    assert!(!hand.is_bust);
}

#[test]
fn three_card_21_is_not_blackjack() {
    let hand = state(&[Rank::Seven, Rank::Seven, Rank::Seven]);
    assert_eq!(hand.value, 21);
    assert!(!hand.is_blackjack);
    assert!(!hand.is_soft);
}

#[test]
fn aces_fall_back_to_one() {
    let two_aces = state(&[Rank::Ace, Rank::Ace]);
    assert_eq!(two_aces.value, 12);
    assert_eq!(two_aces.low_value, 2);
    assert!(two_aces.is_soft);

    let soft_18 = state(&[Rank::Ace, Rank::Seven]);
    assert_eq!(soft_18.value, 18);

    let hard_18 = state(&[Rank::Ace, Rank::Seven, Rank::King]);
    assert_eq!(hard_18.value, 18);
    assert!(!hard_18.is_soft);

    let hard_12 = state(&[Rank::Ace, Rank::Six, Rank::Five]);
    assert_eq!(hard_12.value, 12);
    assert_eq!(hard_12.low_value, 12);
    assert!(!hard_12.is_soft);

    let four_aces = state(&[Rank::Ace, Rank::Ace, Rank::Ace, Rank::Ace]);
    assert_eq!(four_aces.value, 14);
    assert!(four_aces.is_soft);
}

#[test]
fn aces_never_bust_a_hand_that_can_stand() {
    // Ten plus ten aces is exactly 20 with every ace as 1.
    let mut ranks = vec![Rank::Ten];
    ranks.extend([Rank::Ace; 10]);
    let hand = state(&ranks);
    assert_eq!(hand.value, 20);
    assert!(!hand.is_bust);
    assert!(!hand.is_soft);

    let soft_21 = state(&[Rank::Ace, Rank::Ace, Rank::Nine]);
    assert_eq!(soft_21.value, 21);
    assert!(soft_21.is_soft);
}

#[test]
fn bust_reports_lowest_total() {
    let hand = state(&[Rank::King, Rank::Queen, Rank::Two]);
    assert_eq!(hand.value, 22);
    assert!(hand.is_bust);

    let with_ace = state(&[Rank::King, Rank::Queen, Rank::Ace, Rank::Five]);
    assert_eq!(with_ace.value, 26);
    assert!(with_ace.is_bust);
    assert!(!with_ace.is_soft);
}

#[test]
fn hand_tracks_cards_and_state() {
    let mut hand = Hand::new();
    assert!(hand.is_empty());

    for card in cards(&[Rank::Five, Rank::Ace]) {
        hand.add_card(card);
    }
    assert_eq!(hand.len(), 2);
    assert_eq!(hand.value(), 16);
    assert!(hand.is_soft());

    hand.add_card(Card::new(Suit::Clubs, Rank::Nine));
    assert_eq!(hand.value(), 15);
    assert!(!hand.is_soft());

    hand.clear();
    assert_eq!(hand.value(), 0);
}

#[test]
fn player_hand_finishing() {
    let mut hand = PlayerHand::new(0, 10);
    hand.hand = Hand::from_cards(cards(&[Rank::King, Rank::Ace]));
    assert!(!hand.is_playable());
    assert!(hand.is_finished());

    let mut hand = PlayerHand::new(1, 10);
    hand.hand = Hand::from_cards(cards(&[Rank::King, Rank::Five, Rank::Six]));
    assert!(hand.is_playable());
    assert!(!hand.is_finished());
    hand.stood = true;
    assert!(hand.is_finished());
}

#[test]
fn dealer_hand_visibility_and_values() {
    let mut dealer = DealerHand::new();
    dealer.add_card(Card::new(Suit::Hearts, Rank::Ace));
    dealer.add_card(Card::new(Suit::Clubs, Rank::Six));

    assert!(!dealer.is_hole_revealed());
    assert_eq!(dealer.visible_value(), 11);
    assert_eq!(dealer.up_card(), Some(&Card::new(Suit::Hearts, Rank::Ace)));

    dealer.reveal_hole();
    assert!(dealer.is_hole_revealed());
    assert_eq!(dealer.visible_value(), 17);
    assert!(dealer.is_soft());
}

#[test]
fn dealer_hits_below_17_and_soft_17() {
    assert!(should_hit(&state(&[Rank::Ten, Rank::Six])));
    assert!(should_hit(&state(&[Rank::Ace, Rank::Six])));
    assert!(!should_hit(&state(&[Rank::Ten, Rank::Seven])));
    assert!(!should_hit(&state(&[Rank::Ace, Rank::Seven])));
    assert!(!should_hit(&state(&[Rank::Ten, Rank::Six, Rank::Ace])));
}

#[test]
fn stand_soft_17_policy() {
    let soft_17 = state(&[Rank::Ace, Rank::Six]);
    assert!(DealerPolicy::HitSoft17.should_hit(&soft_17));
    assert!(!DealerPolicy::StandSoft17.should_hit(&soft_17));
    assert!(DealerPolicy::StandSoft17.should_hit(&state(&[Rank::Ten, Rank::Six])));
}

#[test]
fn resolve_precedence() {
    let blackjack = state(&[Rank::Ace, Rank::King]);
    let three_card_21 = state(&[Rank::Seven, Rank::Seven, Rank::Seven]);
    let twenty = state(&[Rank::King, Rank::Queen]);
    let nineteen = state(&[Rank::King, Rank::Nine]);
    let bust = state(&[Rank::King, Rank::Queen, Rank::Five]);

    assert_eq!(resolve(&blackjack, &blackjack), Outcome::Push);
    assert_eq!(resolve(&blackjack, &three_card_21), Outcome::PlayerBlackjack);
    assert_eq!(resolve(&three_card_21, &blackjack), Outcome::DealerBlackjack);
    assert_eq!(resolve(&bust, &bust), Outcome::DealerWins);
    assert_eq!(resolve(&nineteen, &bust), Outcome::PlayerWins);
    assert_eq!(resolve(&twenty, &nineteen), Outcome::PlayerWins);
    assert_eq!(resolve(&nineteen, &twenty), Outcome::DealerWins);
    assert_eq!(resolve(&twenty, &twenty), Outcome::Push);
}

#[test]
fn payouts_by_outcome() {
    let options = GameOptions::default();

    assert_eq!(payout(Outcome::DealerWins, 10, &options), 0);
    assert_eq!(payout(Outcome::DealerBlackjack, 10, &options), 0);
    assert_eq!(payout(Outcome::Push, 10, &options), 10);
    assert_eq!(payout(Outcome::PlayerWins, 10, &options), 20);
    assert_eq!(payout(Outcome::PlayerBlackjack, 10, &options), 25);
}

#[test]
fn blackjack_rounding_modes() {
    let down = GameOptions::default();
    let up = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    let nearest = GameOptions::default()
        .with_rounding_blackjack(RoundingMode::Nearest)
        .with_blackjack_pays(1.2);

    assert_eq!(payout(Outcome::PlayerBlackjack, 5, &down), 12);
    assert_eq!(payout(Outcome::PlayerBlackjack, 5, &up), 13);
    // 7 * 1.2 = 8.4
    assert_eq!(payout(Outcome::PlayerBlackjack, 7, &nearest), 15);
}

#[test]
fn overall_outcome_uses_net_for_multiple_hands() {
    let settled = |outcome, paid| SettledHand {
        hand: PlayerHand::new(0, 10),
        outcome,
        payout: paid,
    };

    let lone = [settled(Outcome::PlayerBlackjack, 25)];
    assert_eq!(overall_outcome(&lone, 15), Outcome::PlayerBlackjack);

    let split_even = [settled(Outcome::PlayerWins, 20), settled(Outcome::DealerWins, 0)];
    assert_eq!(overall_outcome(&split_even, 0), Outcome::Push);

    let split_up = [settled(Outcome::PlayerWins, 20), settled(Outcome::Push, 10)];
    assert_eq!(overall_outcome(&split_up, 10), Outcome::PlayerWins);

    let split_down = [settled(Outcome::DealerWins, 0), settled(Outcome::Push, 10)];
    assert_eq!(overall_outcome(&split_down, -10), Outcome::DealerWins);
}

#[test]
fn split_requires_same_rank_pair() {
    let pair = Hand::from_cards(cards(&[Rank::Eight, Rank::Eight]));
    assert!(can_split(&pair));

    let (first, second) = split(&pair).unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
    assert_eq!(first.value(), 8);
    assert_eq!(first.cards()[0], pair.cards()[0]);
    assert_eq!(second.cards()[0], pair.cards()[1]);

    let unpaired = Hand::from_cards(cards(&[Rank::Eight, Rank::Seven]));
    assert!(!can_split(&unpaired));
    assert_eq!(split(&unpaired).unwrap_err(), SplitError::NotAPair);

    let tens = Hand::from_cards(cards(&[Rank::King, Rank::Queen]));
    assert!(!can_split(&tens));
    assert_eq!(split(&tens).unwrap_err(), SplitError::NotAPair);

    let three = Hand::from_cards(cards(&[Rank::Eight, Rank::Eight, Rank::Eight]));
    assert!(!can_split(&three));
}

#[test]
fn double_option_ranges() {
    assert!(DoubleOption::Any.allows(4));
    assert!(DoubleOption::NineOrTen.allows(10));
    assert!(!DoubleOption::NineOrTen.allows(11));
    assert!(DoubleOption::NineThrough11.allows(11));
    assert!(DoubleOption::NineThrough15.allows(15));
    assert!(!DoubleOption::NineThrough15.allows(16));
    assert!(!DoubleOption::None.allows(10));
}

#[test]
fn options_from_json_and_validation() {
    let options = GameOptions::from_json(
        r#"{ "decks": 4, "dealer_policy": "stand-soft17", "double": "nine-or-ten" }"#,
    )
    .unwrap();
    assert_eq!(options.decks, 4);
    assert_eq!(options.dealer_policy, DealerPolicy::StandSoft17);
    assert_eq!(options.double, DoubleOption::NineOrTen);
    assert_eq!(options.max_splits, 3);

    assert_eq!(
        GameOptions::from_json("{ decks: ").unwrap_err(),
        OptionsError::Malformed
    );
    assert_eq!(
        GameOptions::from_json(r#"{ "decks": 0 }"#).unwrap_err(),
        OptionsError::InvalidDeckCount
    );
    assert_eq!(
        GameOptions::default()
            .with_blackjack_pays(-1.0)
            .validate()
            .unwrap_err(),
        OptionsError::InvalidBlackjackPayout
    );
    assert_eq!(
        GameOptions::default()
            .with_history_capacity(0)
            .validate()
            .unwrap_err(),
        OptionsError::InvalidHistoryCapacity
    );
}

#[test]
fn cards_display_rank_and_suit() {
    assert_eq!(Card::new(Suit::Hearts, Rank::Ace).to_string(), "A♥");
    assert_eq!(Card::new(Suit::Diamonds, Rank::Ten).to_string(), "10♦");
    assert_eq!(Card::new(Suit::Clubs, Rank::Queen).to_string(), "Q♣");
    assert_eq!(Card::new(Suit::Spades, Rank::Seven).to_string(), "7♠");
    assert_eq!(Rank::King.value(), 10);
    assert_eq!(Rank::Ace.value(), 11);
}
