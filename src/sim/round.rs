//! Round controller
//!
//! Builds a round from the layout tables, advances it frame by frame and
//! rebuilds it from scratch on reset. Nothing carries over between rounds.

use serde::{Deserialize, Serialize};

use super::layout::{Layout, layout_for};
use super::state::{Controllable, ControllableId, Pilot, Post, PostId, RoundState, TeamColor};
use super::tick::{ControlInput, FrameOutcome, tick};
use crate::error::ConfigError;

/// How many humans and bots take part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub humans: usize,
    pub bots: usize,
}

impl RoundConfig {
    pub fn total(&self) -> usize {
        self.humans + self.bots
    }
}

/// Fresh state for a layout: humans take the first slots, bots the rest
fn populate(config: RoundConfig, layout: &Layout) -> RoundState {
    let controllables = layout
        .starts
        .iter()
        .enumerate()
        .map(|(slot, start)| {
            let pilot = if slot < config.humans {
                Pilot::Human { controller: slot }
            } else {
                Pilot::Bot { target: None }
            };
            Controllable::new(ControllableId(slot), pilot, *start, TeamColor::ALL[slot])
        })
        .collect();

    let posts = layout
        .posts
        .iter()
        .enumerate()
        .map(|(i, pos)| Post::new(PostId(i), *pos))
        .collect();

    RoundState {
        size: config.total(),
        frame: 0,
        posts,
        controllables,
    }
}

/// Build the starting state for a round
pub fn build_round(config: RoundConfig) -> Result<RoundState, ConfigError> {
    let layout = layout_for(config.humans, config.bots)?;
    Ok(populate(config, &layout))
}

/// Owns the authoritative state of the current round
#[derive(Debug, Clone)]
pub struct Round {
    config: RoundConfig,
    layout: Layout,
    state: RoundState,
    /// Rounds started so far, including this one
    number: u32,
}

impl Round {
    /// Set up the first round. Fails if no layout exists for the size.
    pub fn new(config: RoundConfig) -> Result<Self, ConfigError> {
        let layout = layout_for(config.humans, config.bots)?;
        let state = populate(config, &layout);
        log::info!(
            "round 1: {} humans, {} bots, {} posts",
            config.humans,
            config.bots,
            state.posts.len()
        );
        Ok(Self {
            config,
            layout,
            state,
            number: 1,
        })
    }

    pub fn config(&self) -> RoundConfig {
        self.config
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Advance one frame
    pub fn step(&mut self, inputs: &[ControlInput]) -> FrameOutcome {
        tick(&mut self.state, inputs)
    }

    /// Throw the current round away and start over from the layout
    pub fn reset(&mut self) {
        self.state = populate(self.config, &self.layout);
        self.number += 1;
        log::info!("round {} starts", self.number);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::START_ENERGY;
    use glam::Vec2;

    #[test]
    fn test_unsupported_size_is_fatal() {
        assert!(matches!(
            Round::new(RoundConfig { humans: 6, bots: 0 }),
            Err(ConfigError::UnsupportedControllerCount { count: 6, .. })
        ));
        assert!(Round::new(RoundConfig { humans: 1, bots: 0 }).is_err());
    }

    #[test]
    fn test_humans_then_bots() {
        let round = Round::new(RoundConfig { humans: 1, bots: 2 }).unwrap();
        let pilots: Vec<Pilot> = round.state().controllables.iter().map(|c| c.pilot).collect();
        assert_eq!(
            pilots,
            vec![
                Pilot::Human { controller: 0 },
                Pilot::Bot { target: None },
                Pilot::Bot { target: None },
            ]
        );
        assert_eq!(round.state().controllables[2].color, TeamColor::Yellow);
    }

    #[test]
    fn test_walk_onto_post_claims_it() {
        let mut round = Round::new(RoundConfig { humans: 2, bots: 0 }).unwrap();
        assert_eq!(round.state().posts[0].pos, Vec2::new(840.0, 50.0));
        assert_eq!(round.state().controllables[0].pos, Vec2::new(100.0, 100.0));

        let right = ControlInput {
            axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        };
        let up = ControlInput {
            axis: Vec2::new(0.0, -1.0),
            ..Default::default()
        };

        // Slide along the post's bottom edge (touching, not overlapping)
        while round.state().controllables[0].pos.x < 850.0 {
            round.step(&[right, ControlInput::default()]);
            assert_eq!(round.state().controllables[0].claimed_post, None);
        }

        // One step up enters the post
        round.step(&[up, ControlInput::default()]);
        let c = &round.state().controllables[0];
        assert!(round.state().posts[0].bounds().overlaps(&c.bounds()));
        assert_eq!(c.claimed_post, Some(PostId(0)));
        assert_eq!(c.score, 100);
        assert!((c.energy - 200.0).abs() < 1e-3);
        assert_eq!(round.state().claimant_of(PostId(0)), Some(ControllableId(0)));
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut round = Round::new(RoundConfig { humans: 2, bots: 1 }).unwrap();
        let fresh = round.state().clone();
        for _ in 0..1500 {
            round.step(&[
                ControlInput {
                    axis: Vec2::new(1.0, -0.2),
                    boost: true,
                    ..Default::default()
                },
                ControlInput {
                    axis: Vec2::new(-1.0, 0.0),
                    ..Default::default()
                },
            ]);
        }
        assert!(round.state().frame > 0);

        round.reset();
        assert_eq!(round.number(), 2);
        let state = round.state();
        assert_eq!(state.frame, 0);
        assert!(state.controllables.iter().all(|c| c.score == 0 && c.claimed_post.is_none()));
        for (now, then) in state.controllables.iter().zip(&fresh.controllables) {
            assert_eq!(now.pos, then.pos);
            assert_eq!(now.energy, START_ENERGY);
            assert_eq!(now.pilot, then.pilot);
        }
        for (now, then) in state.posts.iter().zip(&fresh.posts) {
            assert_eq!(now.pos, then.pos);
        }
    }

    #[test]
    fn test_quit_passes_through() {
        let mut round = Round::new(RoundConfig { humans: 2, bots: 0 }).unwrap();
        let quit = ControlInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(round.step(&[quit]), FrameOutcome::Quit { controller: 0 });
    }
}
