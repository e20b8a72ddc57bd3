use std::sync::Arc;

use bjtable::{
    Card, DealerHand, Deferred, Game, GameOptions, GameState, HistoryRecorder, ManualClock,
    MemoryStore, Outcome, PlayerHand, RoundResult, Wallet, can_split,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The table as driven from JavaScript.
///
/// Dealer draws and the return to betting are parked; the page calls
/// `advance` after waiting `pending().delay_ms`.
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    clock: Arc<ManualClock>,
    store: MemoryStore,
}

#[wasm_bindgen]
impl WasmGame {
    /// `options` is a JSON object of table options; missing fields take
    /// their defaults. `history` is a log previously read from
    /// `history_data`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: u32,
        balance: u32,
        options: Option<String>,
        history: Option<String>,
    ) -> Result<Self, JsValue> {
        let options = match options {
            Some(json) => GameOptions::from_json(&json).map_err(js_err)?,
            None => GameOptions::default(),
        };

        let clock = Arc::new(ManualClock::new(0));
        let store = history.map_or_else(MemoryStore::new, MemoryStore::with_data);
        let recorder =
            HistoryRecorder::new(store.clone(), Arc::clone(&clock), options.history_capacity);

        let game = Game::new(options, u64::from(seed), Wallet::new(balance as usize))
            .map_err(js_err)?
            .with_history(recorder)
            .with_scheduler(Deferred);

        Ok(Self { game, clock, store })
    }

    /// Feeds the page clock (`Date.now()`) used for history timestamps.
    pub fn set_time(&self, millis: f64) {
        self.clock.set(millis as u64);
    }

    pub fn place_bet(&self, amount: u32) -> Result<(), JsValue> {
        self.game.place_bet(amount as usize).map_err(js_err)
    }

    pub fn start_round(&self) -> Result<(), JsValue> {
        self.game.start_round().map_err(js_err)
    }

    pub fn hit(&self) -> Result<(), JsValue> {
        self.game.hit().map(|_| ()).map_err(js_err)
    }

    pub fn stand(&self) -> Result<(), JsValue> {
        self.game.stand().map_err(js_err)
    }

    pub fn double_down(&self) -> Result<(), JsValue> {
        self.game.double_down().map(|_| ()).map_err(js_err)
    }

    pub fn split(&self) -> Result<(), JsValue> {
        self.game.split().map_err(js_err)
    }

    /// Runs the parked step. Returns its name.
    pub fn advance(&self) -> Result<String, JsValue> {
        let step = self.game.advance().map_err(js_err)?;
        Ok(format!("{step:?}"))
    }

    /// The parked step and its delay, or `undefined`.
    pub fn pending(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.pending_step())
    }

    pub fn shuffle(&self) -> Result<(), JsValue> {
        self.game.shuffle_deck().map_err(js_err)
    }

    pub fn set_deck_count(&self, decks: u8) -> Result<(), JsValue> {
        self.game.set_deck_count(decks).map_err(js_err)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.game.snapshot();
        let active = snapshot.active_hand_index;
        let shoe = self.game.visible_deck_stats();

        let view = Snapshot {
            state: state_to_str(snapshot.state),
            balance: snapshot.balance as u32,
            bet: snapshot.bet_amount as u32,
            hands: snapshot
                .player_hands
                .iter()
                .map(|hand| JsHand::from_hand(hand, snapshot.state))
                .collect(),
            active_hand: active.map(|index| index as u32),
            dealer: JsDealer::from(&snapshot.dealer_hand),
            result: snapshot.round_result.map(JsRoundResult::from),
            cards_remaining: shoe.remaining_cards as u32,
        };

        to_js_value(&view)
    }

    /// Shoe counters with the hole card counted as undealt until it is
    /// turned over.
    pub fn deck_stats(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.visible_deck_stats())
    }

    pub fn history_stats(&self) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.history_stats())
    }

    pub fn recent_games(&self, count: u32) -> Result<JsValue, JsValue> {
        to_js_value(&self.game.recent_games(count as usize))
    }

    /// The stored log, for the page to keep in local storage.
    pub fn history_data(&self) -> Option<String> {
        self.store.contents()
    }

    pub fn export_history(&self) -> Result<String, JsValue> {
        self.game.export_history().map_err(js_err)
    }

    pub fn import_history(&self, data: &str) -> Result<u32, JsValue> {
        self.game
            .import_history(data)
            .map(|count| count as u32)
            .map_err(js_err)
    }

    pub fn clear_history(&self) -> Result<(), JsValue> {
        self.game.clear_history().map_err(js_err)
    }
}

#[derive(Serialize)]
struct Snapshot {
    state: &'static str,
    balance: u32,
    bet: u32,
    hands: Vec<JsHand>,
    active_hand: Option<u32>,
    dealer: JsDealer,
    result: Option<JsRoundResult>,
    cards_remaining: u32,
}

#[derive(Serialize)]
struct JsCard {
    suit: char,
    rank: &'static str,
    label: String,
}

#[derive(Serialize)]
struct JsHand {
    id: u32,
    cards: Vec<JsCard>,
    value: u8,
    is_soft: bool,
    is_blackjack: bool,
    is_bust: bool,
    bet: u32,
    active: bool,
    doubled: bool,
    from_split: bool,
    can_split: bool,
}

impl JsHand {
    fn from_hand(hand: &PlayerHand, state: GameState) -> Self {
        let state_value = hand.state();
        Self {
            id: hand.id,
            cards: hand.cards().iter().copied().map(card_to_js).collect(),
            value: state_value.value,
            is_soft: state_value.is_soft,
            is_blackjack: state_value.is_blackjack,
            is_bust: state_value.is_bust,
            bet: hand.bet as u32,
            active: hand.is_active,
            doubled: hand.doubled,
            from_split: hand.from_split,
            can_split: state == GameState::PlayerTurn && hand.is_active && can_split(&hand.hand),
        }
    }
}

#[derive(Serialize)]
struct JsDealer {
    cards: Vec<Option<JsCard>>,
    visible_value: u8,
    is_blackjack: Option<bool>,
    is_bust: bool,
    hole_revealed: bool,
}

impl From<&DealerHand> for JsDealer {
    fn from(dealer: &DealerHand) -> Self {
        let hole_revealed = dealer.is_hole_revealed();
        let cards = dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| (hole_revealed || index == 0).then(|| card_to_js(*card)))
            .collect();

        Self {
            cards,
            visible_value: dealer.visible_value(),
            is_blackjack: hole_revealed.then(|| dealer.is_blackjack()),
            is_bust: dealer.is_bust(),
            hole_revealed,
        }
    }
}

#[derive(Serialize)]
struct JsRoundResult {
    outcome: &'static str,
    hands: Vec<JsHandResult>,
    dealer_value: u8,
    dealer_bust: bool,
    dealer_blackjack: bool,
    total_bet: u32,
    total_payout: u32,
    net: i32,
}

impl From<RoundResult> for JsRoundResult {
    fn from(result: RoundResult) -> Self {
        Self {
            outcome: outcome_to_str(result.outcome),
            hands: result
                .hands
                .iter()
                .map(|settled| JsHandResult {
                    id: settled.hand.id,
                    outcome: outcome_to_str(settled.outcome),
                    bet: settled.hand.bet as u32,
                    payout: settled.payout as u32,
                    value: settled.hand.state().value,
                })
                .collect(),
            dealer_value: result.dealer_value,
            dealer_bust: result.dealer_bust,
            dealer_blackjack: result.dealer_blackjack,
            total_bet: result.total_bet as u32,
            total_payout: result.total_payout as u32,
            net: result.net as i32,
        }
    }
}

#[derive(Serialize)]
struct JsHandResult {
    id: u32,
    outcome: &'static str,
    bet: u32,
    payout: u32,
    value: u8,
}

fn card_to_js(card: Card) -> JsCard {
    JsCard {
        suit: card.suit.symbol(),
        rank: card.rank.label(),
        label: card.to_string(),
    }
}

fn state_to_str(state: GameState) -> &'static str {
    match state {
        GameState::Betting => "Betting",
        GameState::Dealing => "Dealing",
        GameState::PlayerTurn => "PlayerTurn",
        GameState::DealerTurn => "DealerTurn",
        GameState::GameOver => "GameOver",
    }
}

fn outcome_to_str(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerWins => "PlayerWins",
        Outcome::DealerWins => "DealerWins",
        Outcome::Push => "Push",
        Outcome::PlayerBlackjack => "PlayerBlackjack",
        Outcome::DealerBlackjack => "DealerBlackjack",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
