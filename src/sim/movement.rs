//! Movement and energy engine
//!
//! One step per controllable per frame. Humans and bots share this code;
//! they differ only in how the [`Intent`] is produced.

use glam::Vec2;

use super::state::{Controllable, ControllableId, RoundState};
use super::tick::ControlInput;
use crate::consts::*;
use crate::{magnitude, normalize};

/// What a pilot asks for this frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Intent {
    /// Unit direction, or zero for no input
    pub direction: Vec2,
    /// Boost requested (still subject to the energy check)
    pub boost: bool,
    /// Already on the destination: stop dead this frame
    pub arrived: bool,
}

impl Intent {
    pub fn toward(from: Vec2, to: Vec2) -> Self {
        Self {
            direction: normalize(to - from),
            ..Default::default()
        }
    }
}

/// Snap a stick axis to -1, 0 or 1. Exact halves snap to 0.
fn axis_step(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(-1.0, 1.0).round_ties_even()
    } else {
        0.0
    }
}

/// Stick input reduced to one of eight compass directions (or none)
pub fn stick_direction(axis: Vec2) -> Vec2 {
    normalize(Vec2::new(axis_step(axis.x), axis_step(axis.y)))
}

/// Intent for a human-driven controllable.
///
/// The stick wins. With the stick neutral, the assist buttons steer toward
/// the held post (home) or the nearest free post (seek).
pub fn human_intent(state: &RoundState, who: ControllableId, controls: &ControlInput) -> Intent {
    let me = state.controllable(who);
    let stick = stick_direction(controls.axis);

    let direction = if stick != Vec2::ZERO {
        stick
    } else {
        let destination = if controls.assist_home {
            me.claimed_post
        } else if controls.assist_seek {
            state.nearest_unclaimed_post(me.pos)
        } else {
            None
        };
        match destination {
            Some(post) if !state.post(post).bounds().overlaps(&me.bounds()) => {
                normalize(state.post(post).pos - me.pos)
            }
            _ => Vec2::ZERO,
        }
    };

    Intent {
        direction,
        boost: controls.boost,
        arrived: false,
    }
}

/// Speed change without boosting
fn cruise_speed(speed: f32, moving: bool) -> f32 {
    if !moving {
        (speed - SPEED_DECAY).max(0.0)
    } else if speed < CRUISE_SPEED {
        (speed + SPEED_RAMP).min(CRUISE_SPEED)
    } else {
        // Leftover boost speed coasts back down to cruise
        (speed - SPEED_DECAY).max(CRUISE_SPEED)
    }
}

/// Passive energy drain and regeneration, skipped on boosting frames
fn settle_energy(c: &mut Controllable, held_post: Option<Vec2>) {
    match held_post {
        Some(post_pos) => {
            let distance = magnitude(c.pos - post_pos);
            if distance < CAMPING_RADIUS {
                c.energy = (c.energy - CAMPING_DRAIN).max(0.0);
            } else if distance > FAR_FROM_POST_RADIUS && c.energy <= REGEN_CEILING {
                c.energy += REGEN_FAR_FROM_POST;
            }
        }
        None => {
            if c.energy <= REGEN_CEILING {
                c.energy += REGEN_WITHOUT_POST;
            }
        }
    }
}

/// Advance one controllable by one frame.
///
/// `held_post` is the position of the post it currently claims.
pub fn advance(c: &mut Controllable, intent: Intent, held_post: Option<Vec2>) {
    c.boosting = false;

    if intent.direction != Vec2::ZERO {
        c.direction = intent.direction;
    }

    if intent.arrived {
        c.speed = 0.0;
    } else if intent.boost && c.energy >= BOOST_MIN_ENERGY {
        c.speed = (c.speed + SPEED_RAMP).min(MAX_SPEED);
        c.energy = (c.energy - BOOST_COST).max(0.0);
        c.boosting = true;
    } else {
        c.speed = cruise_speed(c.speed, intent.direction != Vec2::ZERO);
    }
    c.speed = c.speed.clamp(0.0, MAX_SPEED);

    c.pos += c.direction * c.speed;

    if !c.boosting {
        settle_energy(c, held_post);
    }
}
