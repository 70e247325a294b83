//! Per-frame function/transition state machine.
//!
//! The scheduler alternates between a steady phase that shows one function for
//! `function_duration` seconds and a transition phase that blends the previous
//! function into the next one over `transition_duration` seconds. Leftover time
//! carries over into the following phase.

use crate::config::GraphConfig;
use crate::function::FunctionName;
use rand::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct TransitionState {
    /// Seconds spent in the current phase.
    pub duration: f32,
    pub transitioning: bool,
    pub function: FunctionName,
    /// The function being transitioned away from.
    pub transition_function: FunctionName,
}

impl TransitionState {
    pub fn new(function: FunctionName) -> Self {
        Self {
            duration: 0.0,
            transitioning: false,
            function,
            transition_function: function,
        }
    }

    /// The function blended against `function` by the current kernel.
    #[inline]
    pub fn blend_function(&self) -> FunctionName {
        if self.transitioning {
            self.transition_function
        } else {
            self.function
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseChange {
    Started { from: FunctionName, to: FunctionName },
    Finished { function: FunctionName },
}

pub struct TransitionScheduler {
    state: TransitionState,
    rng: StdRng,
}

impl TransitionScheduler {
    pub fn new(function: FunctionName, seed: u64) -> Self {
        Self {
            state: TransitionState::new(function),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &TransitionState {
        &self.state
    }

    /// Advance by `elapsed` seconds. At most one phase change happens per call.
    ///
    /// `config.function` is adopted first, so edits made by the caller between
    /// frames take effect; a newly picked function is written back to it.
    pub fn advance(&mut self, elapsed: f32, config: &mut GraphConfig) -> Option<PhaseChange> {
        if !(elapsed.is_finite() && elapsed > 0.0) {
            return None;
        }
        let state = &mut self.state;
        state.function = config.function;
        state.duration += elapsed;

        if state.transitioning {
            if state.duration >= config.transition_duration {
                state.duration -= config.transition_duration.max(0.0);
                state.transitioning = false;
                return Some(PhaseChange::Finished {
                    function: state.function,
                });
            }
        } else if state.duration >= config.function_duration {
            state.duration -= config.function_duration.max(0.0);
            state.transitioning = true;
            state.transition_function = state.function;
            state.function = config
                .transition_mode
                .pick(state.transition_function, &mut self.rng);
            config.function = state.function;
            return Some(PhaseChange::Started {
                from: state.transition_function,
                to: state.function,
            });
        }
        None
    }
}
