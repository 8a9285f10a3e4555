//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call, one frame)
//! - Stable iteration order (storage order of posts and controllables)
//! - No rendering or input-device dependencies

pub mod bot;
pub mod bounds;
pub mod collision;
pub mod layout;
pub mod movement;
pub mod round;
pub mod state;
pub mod tick;

pub use bounds::Bounds;
pub use collision::CollisionEvent;
pub use layout::{Layout, layout_for};
pub use movement::{Intent, stick_direction};
pub use round::{Round, RoundConfig, build_round};
pub use state::{Controllable, ControllableId, Pilot, Post, PostId, RoundState, TeamColor};
pub use tick::{ControlInput, FrameOutcome, FrameReport, tick};
