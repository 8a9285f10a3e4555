//! Render view
//!
//! Once per frame, after collisions, the session hands a [`RenderFrame`] to
//! a [`DrawSink`]. The frame lists controllables in scoreboard order so each
//! rank maps to a fixed on-screen score slot.

use std::io::Write;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{ControllableId, PostId, RoundState, TeamColor};

/// Score panel anchor for each rank, top to bottom
pub const SCORE_SLOTS: [(f32, f32); 5] = [
    (1610.0, 50.0),
    (1610.0, 110.0),
    (1610.0, 170.0),
    (1610.0, 230.0),
    (1610.0, 290.0),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllableView {
    pub id: ControllableId,
    pub color: TeamColor,
    pub bot: bool,
    pub pos: Vec2,
    pub score: u32,
    /// Position of the held post, drawn as a colored marker
    pub claimed_post: Option<Vec2>,
    pub boosting: bool,
    pub direction: Vec2,
    pub energy: f32,
    /// Where this controllable's score panel goes
    pub score_slot: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub pos: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub round: u32,
    pub frame: u64,
    /// Highest score first
    pub controllables: Vec<ControllableView>,
    pub posts: Vec<PostView>,
}

impl RenderFrame {
    /// Snapshot the round for drawing
    pub fn capture(round: u32, state: &RoundState) -> Self {
        let controllables = state
            .ranking()
            .into_iter()
            .zip(SCORE_SLOTS)
            .map(|(id, (sx, sy))| {
                let c = state.controllable(id);
                ControllableView {
                    id,
                    color: c.color,
                    bot: c.pilot.is_bot(),
                    pos: c.pos,
                    score: c.score,
                    claimed_post: c.claimed_post.map(|p| state.post(p).pos),
                    boosting: c.boosting,
                    direction: c.direction,
                    energy: c.energy,
                    score_slot: Vec2::new(sx, sy),
                }
            })
            .collect();

        let posts = state
            .posts
            .iter()
            .map(|p| PostView { id: p.id, pos: p.pos })
            .collect();

        Self {
            round,
            frame: state.frame,
            controllables,
            posts,
        }
    }
}

/// Consumer of render frames
pub trait DrawSink {
    fn draw(&mut self, frame: &RenderFrame);
}

/// Writes each frame as one JSON line
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DrawSink for JsonLinesSink<W> {
    fn draw(&mut self, frame: &RenderFrame) {
        let written = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| self.out.write_all(b"\n"));
        if let Err(e) = written {
            log::warn!("Failed to write frame {}: {}", frame.frame, e);
        }
    }
}

/// Discards frames
#[derive(Debug, Default)]
pub struct NullSink;

impl DrawSink for NullSink {
    fn draw(&mut self, _frame: &RenderFrame) {}
}
