//! CLI blackjack example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use bjtable::{
    Card, DealerHand, Deferred, FileStore, Game, GameOptions, GameState, HistoryRecorder,
    PlayerHand, Step, Suit, SystemClock, Wallet, can_split,
};

const HISTORY_FILE: &str = "bjtable-history.json";

fn main() {
    println!("Blackjack CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = GameOptions::default();
    let history = HistoryRecorder::new(
        FileStore::new(HISTORY_FILE),
        SystemClock,
        options.history_capacity,
    );
    let game = match Game::new(options, seed, Wallet::new(500)) {
        Ok(game) => game.with_history(history).with_scheduler(Deferred),
        Err(err) => {
            println!("Invalid options: {err}");
            return;
        }
    };

    print_stats(&game);

    loop {
        let balance = game.balance();
        if balance == 0 {
            println!("You are out of money. Game over.");
            break;
        }

        let last_bet = game.bet_amount();
        let Some(bet) = prompt_usize(
            &format!("Bet amount (1-{balance}, Enter for {last_bet}, 0 to quit): "),
            last_bet,
        ) else {
            break;
        };

        if bet == 0 {
            println!("Goodbye.");
            break;
        }

        if bet != last_bet {
            if let Err(err) = game.place_bet(bet) {
                println!("Bet error: {err}");
                continue;
            }
        }

        if let Err(err) = game.start_round() {
            println!("Deal error: {err}");
            continue;
        }

        while game.state() == GameState::PlayerTurn {
            print_table(&game);

            println!("{}", format_actions(&game));
            let action = prompt_line("Action: ");

            let result = match action.as_str() {
                "h" | "hit" => game.hit().map(|_| ()),
                "s" | "stand" => game.stand(),
                "d" | "double" => game.double_down().map(|_| ()),
                "p" | "split" => game.split(),
                "q" | "quit" => return,
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            if let Err(err) = result {
                println!("Action error: {err}");
            }
        }

        play_out(&game);
    }
}

/// Runs parked dealer steps with their delays until betting reopens.
fn play_out(game: &Game) {
    while let Some(pending) = game.pending_step() {
        if pending.step == Step::ReturnToBetting {
            print_result(game);
        }

        thread::sleep(Duration::from_millis(u64::from(pending.delay_ms) / 2));

        match game.advance() {
            Ok(Step::DealerDraw) => print_dealer(&game.dealer_hand()),
            Ok(Step::ReturnToBetting) => {}
            Err(err) => {
                println!("Dealer error: {err}");
                break;
            }
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn prompt_usize(prompt: &str, default: usize) -> Option<usize> {
    loop {
        let input = prompt_line(prompt);
        if input == "q" || input == "quit" {
            return None;
        }
        if input.is_empty() && default > 0 {
            return Some(default);
        }
        match input.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a number."),
        }
    }
}

fn print_table(game: &Game) {
    let stats = game.visible_deck_stats();
    println!(
        "\nShoe: {} of {} cards remaining",
        stats.remaining_cards, stats.total_cards
    );

    print_dealer(&game.dealer_hand());

    let active = game.active_hand_index();
    for (index, hand) in game.player_hands().iter().enumerate() {
        let marker = if Some(index) == active { "*" } else { " " };
        println!(
            "{} Hand {}: {} | value {} | bet {}",
            marker,
            index,
            format_cards(hand.cards()),
            hand.state().value,
            hand.bet,
        );
    }
    println!();
}

fn print_dealer(dealer: &DealerHand) {
    println!(
        "Dealer: {} (value {})",
        format_dealer(dealer),
        dealer.visible_value()
    );
}

fn print_result(game: &Game) {
    let Some(result) = game.round_result() else {
        return;
    };

    println!();
    print_dealer(&game.dealer_hand());
    for (index, settled) in result.hands.iter().enumerate() {
        println!(
            "Hand {}: {} | value {} | bet {} | {:?} | payout {}",
            index,
            format_cards(settled.hand.cards()),
            settled.hand.state().value,
            settled.hand.bet,
            settled.outcome,
            settled.payout,
        );
    }
    println!("Round complete: {:?} (net {})", result.outcome, result.net);
    print_stats(game);
}

fn print_stats(game: &Game) {
    let stats = game.history_stats();
    if stats.total_games == 0 {
        return;
    }
    println!(
        "History: {} games, {:.1}% won, net {}\n",
        stats.total_games, stats.win_rate, stats.net_winnings
    );
}

fn format_actions(game: &Game) -> String {
    let availability = available_actions(game);
    let parts = [
        format_action("hit", "h", availability.hit),
        format_action("stand", "s", availability.stand),
        format_action("double", "d", availability.double),
        format_action("split", "p", availability.split),
    ];
    format!("Actions: {}", parts.join(" "))
}

fn format_action(label: &str, key: &str, allowed: bool) -> String {
    let text = format!("[{key}]{label}");
    if allowed {
        colorize(&text, "32")
    } else {
        colorize(&text, "90")
    }
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

#[derive(Default)]
struct ActionAvailability {
    hit: bool,
    stand: bool,
    double: bool,
    split: bool,
}

fn available_actions(game: &Game) -> ActionAvailability {
    if game.state() != GameState::PlayerTurn {
        return ActionAvailability::default();
    }

    let hands = game.player_hands();
    let Some(hand) = game.active_hand_index().and_then(|index| hands.get(index)) else {
        return ActionAvailability::default();
    };

    ActionAvailability {
        hit: true,
        stand: true,
        double: can_double(game, hand),
        split: can_split(&hand.hand)
            && hands.len() <= game.options().max_splits as usize
            && game.balance() >= hand.bet,
    }
}

fn can_double(game: &Game, hand: &PlayerHand) -> bool {
    let options = game.options();
    hand.cards().len() == 2
        && (!hand.from_split || options.double_after_split)
        && options.double.allows(hand.state().value)
        && game.balance() >= hand.bet
}

fn format_dealer(dealer: &DealerHand) -> String {
    if dealer.is_empty() {
        return "(no cards)".to_string();
    }

    if dealer.is_hole_revealed() {
        format_cards(dealer.cards())
    } else {
        let mut parts = Vec::new();
        if let Some(card) = dealer.up_card() {
            parts.push(format_card(card));
        }
        if dealer.len() > 1 {
            parts.push("??".to_string());
        }
        parts.join(" ")
    }
}

fn format_cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "(empty)".to_string();
    }
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
    };

    colorize(&card.to_string(), color_code)
}
