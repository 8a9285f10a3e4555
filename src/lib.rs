//! Palenspel - a local multiplayer post-claiming arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, energy, claiming, bots)
//! - `input`: Per-frame controller input contract
//! - `frame`: Render view handed to the draw sink each frame
//! - `session`: Fixed-step loop that drives rounds
//! - `settings`: Session configuration

pub mod error;
pub mod frame;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SettingsError};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field dimensions (no walls, used for layout and scripted input only)
    pub const FIELD_WIDTH: f32 = 1680.0;
    pub const FIELD_HEIGHT: f32 = 1050.0;

    /// Bounding box sizes, anchored at the entity's top-left position
    pub const POST_SIZE: f32 = 50.0;
    pub const CONTROLLABLE_SIZE: f32 = 20.0;

    /// Speed economy
    pub const CRUISE_SPEED: f32 = 4.0;
    pub const MAX_SPEED: f32 = 10.0;
    pub const SPEED_RAMP: f32 = 0.2;
    pub const SPEED_DECAY: f32 = 0.02;

    /// Energy economy
    pub const START_ENERGY: f32 = 100.0;
    pub const BOOST_COST: f32 = 3.0;
    /// Minimum energy for a human boost
    pub const BOOST_MIN_ENERGY: f32 = 3.0;
    /// Bots only boost above this reserve
    pub const BOT_BOOST_MIN_ENERGY: f32 = 20.0;
    /// Energy lost per frame while camping near the held post
    pub const CAMPING_DRAIN: f32 = 0.3;
    pub const CAMPING_RADIUS: f32 = 100.0;
    /// Regeneration only kicks in at or below this level
    pub const REGEN_CEILING: f32 = 50.0;
    pub const FAR_FROM_POST_RADIUS: f32 = 200.0;
    pub const REGEN_FAR_FROM_POST: f32 = 0.5;
    pub const REGEN_WITHOUT_POST: f32 = 0.1;

    /// Awarded to energy and score on every new claim
    pub const CLAIM_AWARD: f32 = 100.0;
    pub const CLAIM_SCORE: u32 = 100;

    /// Knockback distance per unit of bouncer speed
    pub const BOUNCE_FACTOR: f32 = 10.0;

    /// Supported controllable counts per round
    pub const MIN_CONTROLLABLES: usize = 2;
    pub const MAX_CONTROLLABLES: usize = 5;
}

/// Euclidean length of a vector
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Unit vector in the direction of `v`.
///
/// Only the exact zero vector maps to zero; tiny non-zero vectors are
/// normalized like any other.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    if v == Vec2::ZERO {
        return Vec2::ZERO;
    }
    v / magnitude(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_magnitude() {
        assert!((magnitude(Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(magnitude(Vec2::ZERO), 0.0);
    }

    #[test]
    fn test_normalize_diagonal() {
        let n = normalize(Vec2::new(1.0, -1.0));
        assert!((n.x - std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert!((n.y + std::f32::consts::FRAC_1_SQRT_2).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn normalized_has_unit_length(x in -1.0e4f32..1.0e4, y in -1.0e4f32..1.0e4) {
            prop_assume!(x.abs() > 1e-3 || y.abs() > 1e-3);
            let n = normalize(Vec2::new(x, y));
            prop_assert!((magnitude(n) - 1.0).abs() < 1e-4);
        }
    }
}
