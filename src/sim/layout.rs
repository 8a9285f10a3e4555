//! Fixed per-size layout tables
//!
//! Start positions and post positions are looked up by the number of
//! controllables in the round. There is no fallback layout.

use glam::Vec2;

use crate::consts::{MAX_CONTROLLABLES, MIN_CONTROLLABLES};
use crate::error::ConfigError;

/// Start positions and post positions for one round size
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub starts: Vec<Vec2>,
    pub posts: Vec<Vec2>,
}

const START_POSITIONS: [(f32, f32); MAX_CONTROLLABLES] = [
    (100.0, 100.0),
    (1480.0, 900.0),
    (1480.0, 100.0),
    (100.0, 900.0),
    (790.0, 480.0),
];

/// Post positions, indexed by `count - MIN_CONTROLLABLES`
const POST_POSITIONS: [&[(f32, f32)]; MAX_CONTROLLABLES - MIN_CONTROLLABLES + 1] = [
    &[(840.0, 50.0), (840.0, 908.0)],
    &[(840.0, 50.0), (840.0, 908.0)],
    &[(840.0, 50.0), (840.0, 908.0), (50.0, 500.0)],
    &[(840.0, 50.0), (840.0, 908.0), (50.0, 500.0), (1520.0, 500.0)],
];

/// Layout for `humans + bots` controllables
pub fn layout_for(humans: usize, bots: usize) -> Result<Layout, ConfigError> {
    let count = humans + bots;
    if !(MIN_CONTROLLABLES..=MAX_CONTROLLABLES).contains(&count) {
        return Err(ConfigError::UnsupportedControllerCount {
            count,
            humans,
            bots,
        });
    }

    let to_vec = |(x, y): &(f32, f32)| Vec2::new(*x, *y);
    Ok(Layout {
        starts: START_POSITIONS[..count].iter().map(to_vec).collect(),
        posts: POST_POSITIONS[count - MIN_CONTROLLABLES]
            .iter()
            .map(to_vec)
            .collect(),
    })
}
