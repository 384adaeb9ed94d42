#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic pacing system that meters carving steps against frame ticks.
//!
//! The pacer decouples the rate at which the carver advances from the
//! external frame cadence: every observed tick increments a counter, and
//! only when the counter fills the configured window does the pacer emit a
//! single step command and reset. Playback speed is therefore a pure
//! function of the window size, independent of the maze's natural step
//! count.

use maze_carve_core::{Command, Event};

/// Configuration parameters required to construct the pacing system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    ticks_per_step: u32,
}

impl Config {
    /// Creates a new configuration emitting one step per `ticks_per_step`
    /// ticks. A zero window is clamped to one so carving always progresses.
    #[must_use]
    pub const fn new(ticks_per_step: u32) -> Self {
        Self {
            ticks_per_step: if ticks_per_step == 0 {
                1
            } else {
                ticks_per_step
            },
        }
    }
}

/// Pure system that converts tick events into metered step commands.
#[derive(Debug)]
pub struct StepPacer {
    ticks_per_step: u32,
    counter: u32,
}

impl StepPacer {
    /// Creates a new pacer using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            ticks_per_step: config.ticks_per_step,
            counter: 0,
        }
    }

    /// Consumes events and emits at most one step command per filled window.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        for event in events {
            if !matches!(event, Event::TimeAdvanced { .. }) {
                continue;
            }

            self.counter += 1;
            if self.counter >= self.ticks_per_step {
                self.counter = 0;
                out.push(Command::Step);
            }
        }
    }
}
