//! Session loop
//!
//! Read input, advance one frame, draw, wait a fixed delay. When a round
//! ends it is thrown away and rebuilt; a quit ends the whole session.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::frame::{DrawSink, RenderFrame};
use crate::input::InputProvider;
use crate::settings::Settings;
use crate::sim::{FrameOutcome, Round, TeamColor};

/// Final score of one controllable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub color: TeamColor,
    pub score: u32,
}

/// How a single round stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEnd {
    /// Frame limit or target score reached; standings best first
    Finished { frames: u64, standings: Vec<Standing> },
    Quit { controller: usize },
}

/// How the session stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    Quit { controller: usize },
    /// `max_rounds` rounds were played
    Completed { rounds: u32 },
}

pub struct Session<I: InputProvider, D: DrawSink> {
    settings: Settings,
    round: Round,
    input: I,
    sink: D,
}

impl<I: InputProvider, D: DrawSink> Session<I, D> {
    /// Validate the round size and set up the first round
    pub fn new(settings: Settings, input: I, sink: D) -> Result<Self, ConfigError> {
        let round = Round::new(settings.round_config())?;
        Ok(Self {
            settings,
            round,
            input,
            sink,
        })
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn into_sink(self) -> D {
        self.sink
    }

    /// Play the current round until it ends or someone quits
    pub fn play_round(&mut self) -> RoundEnd {
        let humans = self.round.config().humans;
        let delay = Duration::from_millis(self.settings.frame_delay_ms);
        let draw_every = self.settings.draw_every.max(1);

        loop {
            let inputs = self.input.poll_all(humans);
            match self.round.step(&inputs) {
                FrameOutcome::Quit { controller } => return RoundEnd::Quit { controller },
                FrameOutcome::Continue(report) => {
                    if report.frame % draw_every == 0 {
                        self.sink
                            .draw(&RenderFrame::capture(self.round.number(), self.round.state()));
                    }
                }
            }

            let state = self.round.state();
            if self.settings.round_over(state.frame, state.top_score()) {
                let standings = state
                    .ranking()
                    .into_iter()
                    .map(|id| {
                        let c = state.controllable(id);
                        Standing {
                            color: c.color,
                            score: c.score,
                        }
                    })
                    .collect();
                return RoundEnd::Finished {
                    frames: state.frame,
                    standings,
                };
            }

            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }

    /// Play rounds back to back until quit or `max_rounds`
    pub fn run(&mut self) -> SessionEnd {
        let mut played = 0;
        loop {
            match self.play_round() {
                RoundEnd::Quit { controller } => {
                    log::info!("session ended by controller {}", controller);
                    return SessionEnd::Quit { controller };
                }
                RoundEnd::Finished { frames, standings } => {
                    played += 1;
                    log::info!("round {} over after {} frames", self.round.number(), frames);
                    for (rank, s) in standings.iter().enumerate() {
                        log::info!("  #{} {:<6} {}", rank + 1, s.color.as_str(), s.score);
                    }
                }
            }

            if self.settings.max_rounds.is_some_and(|max| played >= max) {
                return SessionEnd::Completed { rounds: played };
            }
            self.round.reset();
        }
    }
}
