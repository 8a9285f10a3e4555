//! Controller input
//!
//! The simulation only sees [`ControlInput`] values. Real devices live behind
//! [`InputProvider`]; the scripted provider stands in for them in headless
//! runs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::sim::ControlInput;

/// Source of per-frame controller state
pub trait InputProvider {
    /// Read one controller. Called once per controller per frame; the same
    /// index always refers to the same physical controller.
    fn poll(&mut self, controller: usize) -> ControlInput;

    /// Read `count` controllers in index order
    fn poll_all(&mut self, count: usize) -> Vec<ControlInput> {
        (0..count).map(|controller| self.poll(controller)).collect()
    }
}

/// How long a scripted controller keeps one stick position, in frames
const HOLD_FRAMES: std::ops::Range<u32> = 20..120;

#[derive(Debug, Clone, Default)]
struct Script {
    current: ControlInput,
    frames_left: u32,
}

/// Seeded pseudo-random controllers: wander, boost now and then, and
/// sometimes lean on the assist buttons. Never quits.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    rng: Pcg32,
    scripts: Vec<Script>,
}

impl ScriptedInput {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            scripts: Vec::new(),
        }
    }

    fn next_move(&mut self) -> ControlInput {
        let roll: f32 = self.rng.random();
        let mut input = ControlInput::default();
        if roll < 0.15 {
            input.assist_seek = true;
        } else if roll < 0.25 {
            input.assist_home = true;
        } else if roll < 0.9 {
            input.axis = Vec2::new(
                self.rng.random_range(-1.0..=1.0),
                self.rng.random_range(-1.0..=1.0),
            );
        }
        input.boost = self.rng.random_bool(0.2);
        input
    }
}

impl InputProvider for ScriptedInput {
    fn poll(&mut self, controller: usize) -> ControlInput {
        if self.scripts.len() <= controller {
            self.scripts.resize(controller + 1, Script::default());
        }
        if self.scripts[controller].frames_left == 0 {
            let current = self.next_move();
            let frames_left = self.rng.random_range(HOLD_FRAMES);
            self.scripts[controller] = Script {
                current,
                frames_left,
            };
        }
        let script = &mut self.scripts[controller];
        script.frames_left -= 1;
        script.current
    }
}
