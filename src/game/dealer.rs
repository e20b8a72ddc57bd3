use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::DealerHand;
use crate::result::{Outcome, RoundResult, SettledHand, overall_outcome, payout, resolve};
use crate::schedule::{Dispatch, PendingStep, Step};

use super::{Game, GameState};

impl Game {
    /// Moves to the dealer turn once no player hand needs decisions.
    ///
    /// The dealer does not draw when every player hand busted, or when its
    /// hand already stands.
    pub(super) fn begin_dealer_turn(&self) -> Result<(), ShowdownError> {
        *self.state.lock() = GameState::DealerTurn;

        let mut round = self.round.lock();
        round.activate(None);
        round.dealer_hand.reveal_hole();
        let skip_draws = round.all_bust() || !self.dealer_should_hit(&round.dealer_hand);
        drop(round);

        if skip_draws {
            self.settle_and_schedule()
        } else {
            self.dispatch(Step::DealerDraw)
        }
    }

    /// Draws one dealer card if the policy says so, settling the round once
    /// the dealer stands. Returns the card drawn, if any.
    ///
    /// This is the manual counterpart of a scheduled
    /// [`Step::DealerDraw`]; the follow-up is not scheduled.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the dealer turn or the shoe is
    /// empty while the dealer must draw.
    pub fn dealer_step(&self) -> Result<Option<Card>, ShowdownError> {
        if *self.state.lock() != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }
        self.clear_pending(Step::DealerDraw);

        let must_draw = {
            let round = self.round.lock();
            !round.all_bust() && self.dealer_should_hit(&round.dealer_hand)
        };

        if !must_draw {
            self.settle()?;
            return Ok(None);
        }

        let card = self.draw().ok_or(ShowdownError::NoCards)?;
        let mut round = self.round.lock();
        round.dealer_hand.add_card(card);
        log::debug!("dealer draws {card}, now {}", round.dealer_hand.value());
        let stands = !self.dealer_should_hit(&round.dealer_hand);
        drop(round);

        if stands {
            self.settle()?;
        }

        Ok(Some(card))
    }

    /// Dealer draws until the policy says stand, then settles.
    ///
    /// Returns the cards drawn by the dealer. A pending return to betting is
    /// still scheduled afterwards.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in the dealer turn state or the
    /// shoe is empty while the dealer must draw.
    pub fn dealer_play(&self) -> Result<Vec<Card>, ShowdownError> {
        if *self.state.lock() != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        let mut drawn_cards = Vec::new();
        while *self.state.lock() == GameState::DealerTurn {
            if let Some(card) = self.dealer_step()? {
                drawn_cards.push(card);
            }
        }

        self.dispatch(Step::ReturnToBetting)?;
        Ok(drawn_cards)
    }

    /// Runs the step parked by a deferring scheduler, then keeps dispatching
    /// whatever follows. Returns the step that ran.
    ///
    /// # Errors
    ///
    /// Returns [`ShowdownError::NothingPending`] if no step is parked, or the
    /// step's own error; a failed step stays parked.
    pub fn advance(&self) -> Result<Step, ShowdownError> {
        let pending = self.pending.lock().take().ok_or(ShowdownError::NothingPending)?;

        match self.run_step(pending.step) {
            Ok(Some(next)) => self.dispatch(next)?,
            Ok(None) => {}
            Err(err) => {
                *self.pending.lock() = Some(pending);
                return Err(err);
            }
        }

        Ok(pending.step)
    }

    /// Offers `step` and its follow-ups to the scheduler, running those it
    /// wants now and parking the first it defers.
    pub(super) fn dispatch(&self, step: Step) -> Result<(), ShowdownError> {
        let mut next = Some(step);

        while let Some(step) = next {
            let delay_ms = {
                let options = self.options.lock();
                match step {
                    Step::DealerDraw => options.dealer_draw_delay_ms,
                    Step::ReturnToBetting => options.return_delay_ms,
                }
            };

            next = match self.scheduler.schedule(step, delay_ms) {
                Dispatch::Now => self.run_step(step)?,
                Dispatch::Later => {
                    *self.pending.lock() = Some(PendingStep { step, delay_ms });
                    None
                }
            };
        }

        Ok(())
    }

    fn run_step(&self, step: Step) -> Result<Option<Step>, ShowdownError> {
        match step {
            Step::DealerDraw => {
                self.dealer_step()?;
                if *self.state.lock() == GameState::DealerTurn {
                    Ok(Some(Step::DealerDraw))
                } else {
                    Ok(Some(Step::ReturnToBetting))
                }
            }
            Step::ReturnToBetting => {
                self.finish_round();
                Ok(None)
            }
        }
    }

    fn dealer_should_hit(&self, dealer: &DealerHand) -> bool {
        self.options.lock().dealer_policy.should_hit(dealer.state())
    }

    fn clear_pending(&self, step: Step) {
        let mut pending = self.pending.lock();
        if pending.is_some_and(|p| p.step == step) {
            *pending = None;
        }
    }

    /// Settles the round and schedules the return to betting.
    pub(super) fn settle_and_schedule(&self) -> Result<(), ShowdownError> {
        self.settle()?;
        self.dispatch(Step::ReturnToBetting)
    }

    /// Resolves every hand against the dealer, credits payouts, records the
    /// round, and moves to [`GameState::GameOver`].
    fn settle(&self) -> Result<RoundResult, ShowdownError> {
        let mut state = self.state.lock();
        if *state != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        let options = self.options();
        let mut round = self.round.lock();
        round.dealer_hand.reveal_hole();
        let dealer = *round.dealer_hand.state();

        let hands: Vec<SettledHand> = round
            .player_hands
            .iter()
            .map(|hand| {
                let outcome = if hand.hand.is_bust() {
                    Outcome::DealerWins
                } else {
                    resolve(hand.state(), &dealer)
                };
                SettledHand {
                    hand: hand.clone(),
                    outcome,
                    payout: payout(outcome, hand.bet, &options),
                }
            })
            .collect();

        let total_bet: usize = hands.iter().map(|settled| settled.hand.bet).sum();
        let total_payout: usize = hands.iter().map(|settled| settled.payout).sum();
        #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
        let net = total_payout as isize - total_bet as isize;
        let outcome = overall_outcome(&hands, net);

        for settled in &hands {
            log::info!(
                "hand {} settled: {:?}, {} vs {}, bet {}, payout {}",
                settled.hand.id,
                settled.outcome,
                settled.hand.state().value,
                dealer.value,
                settled.hand.bet,
                settled.payout
            );
        }

        if total_payout > 0 {
            self.bank.lock().credit(total_payout);
        }

        if let Err(err) =
            self.history
                .lock()
                .save_game(&hands, &round.dealer_hand, outcome, total_payout)
        {
            log::warn!("could not persist round history: {err}");
        }

        let result = RoundResult {
            hands,
            outcome,
            dealer_value: dealer.value,
            dealer_bust: dealer.is_bust,
            dealer_blackjack: dealer.is_blackjack,
            total_bet,
            total_payout,
            net,
        };
        round.result = Some(result.clone());
        drop(round);

        *state = GameState::GameOver;
        log::info!("round over: {outcome:?}, net {net}");

        Ok(result)
    }
}
