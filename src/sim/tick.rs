//! Fixed-step frame advance
//!
//! One call is one frame: every controllable resolves its intent and moves
//! in storage order, then collisions are resolved once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bot;
use super::collision::{self, CollisionEvent};
use super::movement::{self, human_intent};
use super::state::{ControllableId, Pilot, RoundState};

/// Controller state for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlInput {
    /// Stick axes, each in [-1, 1]
    pub axis: Vec2,
    /// Boost button
    pub boost: bool,
    /// Assist: steer toward the held post
    pub assist_home: bool,
    /// Assist: steer toward the nearest free post
    pub assist_seek: bool,
    /// Quit button
    pub quit: bool,
}

/// What happened during one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    /// Frame number within the round (1-based)
    pub frame: u64,
    pub events: Vec<CollisionEvent>,
}

/// Result of advancing one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Continue(FrameReport),
    /// A human pressed quit; the frame was abandoned
    Quit { controller: usize },
}

/// Advance the round by one frame.
///
/// `inputs` is indexed by controller. A controller without an entry is
/// treated as idle.
pub fn tick(state: &mut RoundState, inputs: &[ControlInput]) -> FrameOutcome {
    // Quit abandons the whole frame, so look before anything moves
    let quitter = state.controllables.iter().find_map(|c| match c.pilot {
        Pilot::Human { controller } if inputs.get(controller).is_some_and(|i| i.quit) => Some(controller),
        _ => None,
    });
    if let Some(controller) = quitter {
        log::info!("controller {} pressed quit", controller);
        return FrameOutcome::Quit { controller };
    }

    for i in 0..state.controllables.len() {
        let id = ControllableId(i);

        let pilot = state.controllable(id).pilot;
        let intent = match pilot {
            Pilot::Human { controller } => {
                let controls = inputs.get(controller).copied().unwrap_or_default();
                human_intent(state, id, &controls)
            }
            Pilot::Bot { .. } => {
                let decision = bot::decide(state, id);
                state.controllable_mut(id).pilot = Pilot::Bot {
                    target: decision.target,
                };
                decision.intent
            }
        };

        let held_post = state
            .controllable(id)
            .claimed_post
            .map(|post| state.post(post).pos);
        movement::advance(state.controllable_mut(id), intent, held_post);
    }

    let events = collision::resolve(state);
    state.frame += 1;

    FrameOutcome::Continue(FrameReport {
        frame: state.frame,
        events,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::round::{RoundConfig, build_round};
    use crate::sim::state::PostId;

    fn right() -> ControlInput {
        ControlInput {
            axis: Vec2::new(1.0, 0.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_humans_move_in_storage_order() {
        let mut state = build_round(RoundConfig { humans: 2, bots: 0 }).unwrap();
        let outcome = tick(&mut state, &[right(), ControlInput::default()]);
        assert!(matches!(outcome, FrameOutcome::Continue(ref r) if r.frame == 1));

        assert!((state.controllables[0].pos.x - 100.2).abs() < 1e-4);
        assert_eq!(state.controllables[1].pos, Vec2::new(1480.0, 900.0));
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_quit_abandons_frame() {
        let mut state = build_round(RoundConfig { humans: 2, bots: 0 }).unwrap();
        let quit = ControlInput {
            quit: true,
            ..Default::default()
        };
        let outcome = tick(&mut state, &[right(), quit]);
        assert_eq!(outcome, FrameOutcome::Quit { controller: 1 });
        assert_eq!(state.frame, 0);
        // Controllables ahead of the quitter did not move either
        assert_eq!(state.controllables[0].pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.controllables[0].speed, 0.0);
    }

    #[test]
    fn test_quit_leaves_bots_untouched() {
        let mut state = build_round(RoundConfig { humans: 1, bots: 1 }).unwrap();
        let before = state.clone();
        let quit = ControlInput {
            quit: true,
            ..Default::default()
        };
        assert_eq!(tick(&mut state, &[quit]), FrameOutcome::Quit { controller: 0 });
        for (now, then) in state.controllables.iter().zip(&before.controllables) {
            assert_eq!(now.pos, then.pos);
            assert_eq!(now.speed, then.speed);
            assert_eq!(now.energy, then.energy);
            assert_eq!(now.pilot, then.pilot);
        }
    }

    #[test]
    fn test_missing_input_is_idle() {
        let mut state = build_round(RoundConfig { humans: 2, bots: 0 }).unwrap();
        tick(&mut state, &[]);
        assert_eq!(state.controllables[0].pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_bots_remember_targets() {
        let mut state = build_round(RoundConfig { humans: 0, bots: 2 }).unwrap();
        tick(&mut state, &[]);
        assert_eq!(state.controllables[0].pilot.target(), Some(PostId(0)));
        assert_eq!(state.controllables[1].pilot.target(), Some(PostId(1)));
        // Bots boost straight away with full energy
        assert!(state.controllables[0].boosting);
        assert_eq!(state.controllables[0].energy, 97.0);
    }

    #[test]
    fn test_bots_reach_and_claim_posts() {
        let mut state = build_round(RoundConfig { humans: 0, bots: 2 }).unwrap();
        for _ in 0..2000 {
            tick(&mut state, &[]);
            assert!(state.claims_are_exclusive());
        }
        assert!(state.controllables.iter().any(|c| c.score > 0));
    }

    #[test]
    fn test_assist_seek_heads_for_free_post() {
        let mut state = build_round(RoundConfig { humans: 2, bots: 0 }).unwrap();
        let seek = ControlInput {
            assist_seek: true,
            ..Default::default()
        };
        tick(&mut state, &[seek, ControlInput::default()]);
        let c = &state.controllables[0];
        // Nearest free post to (100, 100) is (840, 50)
        assert!(c.direction.x > 0.0 && c.direction.y < 0.0);
        assert!(c.pos.x > 100.0);
    }

    #[test]
    fn test_assist_home_without_post_is_idle() {
        let mut state = build_round(RoundConfig { humans: 2, bots: 0 }).unwrap();
        let home = ControlInput {
            assist_home: true,
            ..Default::default()
        };
        tick(&mut state, &[home, ControlInput::default()]);
        assert_eq!(state.controllables[0].pos, Vec2::new(100.0, 100.0));
    }
}
