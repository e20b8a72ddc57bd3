//! Pacing of the engine's follow-up steps.
//!
//! The engine never waits on real time. When a round needs a follow-up step
//! (the next dealer draw, the return to betting) it asks the [`Scheduler`]
//! whether to run it now or later. [`Immediate`] runs everything inline so
//! one call drives the round to completion; [`Deferred`] parks the step until
//! the host calls [`Game::advance`](crate::Game::advance), typically from a
//! timer set to the suggested delay.

use serde::{Deserialize, Serialize};

/// A follow-up step of the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    /// The dealer draws one card, or settles the round when done drawing.
    DealerDraw,
    /// The settled round is cleared and betting reopens.
    ReturnToBetting,
}

/// What the engine should do with a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// Run the step before returning to the caller.
    Now,
    /// Park the step until [`Game::advance`](crate::Game::advance).
    Later,
}

/// Decides when follow-up steps run.
pub trait Scheduler: Send + Sync {
    /// Called once per step with the configured delay hint.
    fn schedule(&self, step: Step, delay_ms: u32) -> Dispatch;
}

/// Runs every step inline, ignoring delays.
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Scheduler for Immediate {
    fn schedule(&self, _step: Step, _delay_ms: u32) -> Dispatch {
        Dispatch::Now
    }
}

/// Parks every step for the host to run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deferred;

impl Scheduler for Deferred {
    fn schedule(&self, step: Step, delay_ms: u32) -> Dispatch {
        log::debug!("deferring {step:?} by {delay_ms}ms");
        Dispatch::Later
    }
}

/// A parked step with its delay hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingStep {
    /// The step to run.
    pub step: Step,
    /// Suggested wait before running it.
    pub delay_ms: u32,
}
