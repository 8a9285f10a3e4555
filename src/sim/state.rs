//! Round state and entity types
//!
//! Entities live in two arenas owned by [`RoundState`]. Cross references
//! (claims, bot targets) are indices into those arenas, never pointers.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Bounds;
use crate::consts::*;
use crate::magnitude;

/// Index of a post in the round's post arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostId(pub usize);

/// Index of a controllable in the round's controllable arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ControllableId(pub usize);

/// Identity color, one per layout slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Blue,
    Green,
    Yellow,
    Red,
    Orange,
}

impl TeamColor {
    /// Colors in slot order
    pub const ALL: [TeamColor; MAX_CONTROLLABLES] = [
        TeamColor::Blue,
        TeamColor::Green,
        TeamColor::Yellow,
        TeamColor::Red,
        TeamColor::Orange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamColor::Blue => "blue",
            TeamColor::Green => "green",
            TeamColor::Yellow => "yellow",
            TeamColor::Red => "red",
            TeamColor::Orange => "orange",
        }
    }
}

/// A capture point. Fixed for the lifetime of a round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// Top-left anchor
    pub pos: Vec2,
}

impl Post {
    pub fn new(id: PostId, pos: Vec2) -> Self {
        Self { id, pos }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.pos, POST_SIZE)
    }
}

/// Who decides where a controllable goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    /// Driven by the controller with this index
    Human { controller: usize },
    /// Driven by the bot decision rules
    Bot {
        /// Post the bot is heading for (not necessarily claimed)
        target: Option<PostId>,
    },
}

impl Pilot {
    pub fn is_bot(&self) -> bool {
        matches!(self, Pilot::Bot { .. })
    }

    /// Bot target, if this is a bot with one
    pub fn target(&self) -> Option<PostId> {
        match self {
            Pilot::Bot { target } => *target,
            Pilot::Human { .. } => None,
        }
    }
}

/// A player or bot on the field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Controllable {
    pub id: ControllableId,
    pub pilot: Pilot,
    /// Top-left anchor
    pub pos: Vec2,
    /// Scalar speed in [0, MAX_SPEED]
    pub speed: f32,
    /// Unit heading, or zero before the first input
    pub direction: Vec2,
    pub energy: f32,
    pub score: u32,
    /// Post this controllable currently holds
    pub claimed_post: Option<PostId>,
    pub color: TeamColor,
    /// Boosted this frame (visual trail only)
    pub boosting: bool,
}

impl Controllable {
    pub fn new(id: ControllableId, pilot: Pilot, pos: Vec2, color: TeamColor) -> Self {
        Self {
            id,
            pilot,
            pos,
            speed: 0.0,
            direction: Vec2::ZERO,
            energy: START_ENERGY,
            score: 0,
            claimed_post: None,
            color,
            boosting: false,
        }
    }

    /// Bounding box for the current position
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.pos, CONTROLLABLE_SIZE)
    }

    pub fn distance_to(&self, post: &Post) -> f32 {
        magnitude(self.pos - post.pos)
    }
}

/// Everything that exists during one round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    /// Layout size (number of controllables)
    pub size: usize,
    /// Frames simulated this round
    pub frame: u64,
    /// Posts in fixed iteration order
    pub posts: Vec<Post>,
    /// Controllables in fixed iteration order (never re-sorted)
    pub controllables: Vec<Controllable>,
}

impl RoundState {
    pub fn post(&self, id: PostId) -> &Post {
        &self.posts[id.0]
    }

    pub fn controllable(&self, id: ControllableId) -> &Controllable {
        &self.controllables[id.0]
    }

    pub fn controllable_mut(&mut self, id: ControllableId) -> &mut Controllable {
        &mut self.controllables[id.0]
    }

    /// The controllable holding `post`, if any
    pub fn claimant_of(&self, post: PostId) -> Option<ControllableId> {
        self.controllables
            .iter()
            .find(|c| c.claimed_post == Some(post))
            .map(|c| c.id)
    }

    pub fn is_claimed(&self, post: PostId) -> bool {
        self.claimant_of(post).is_some()
    }

    /// Number of controllables currently inside the post's box
    pub fn overlap_count(&self, post: PostId) -> usize {
        let zone = self.post(post).bounds();
        self.controllables
            .iter()
            .filter(|c| zone.overlaps(&c.bounds()))
            .count()
    }

    /// Contested posts cannot change hands
    pub fn is_occupied(&self, post: PostId) -> bool {
        self.overlap_count(post) > 1
    }

    /// Distance from a controllable to a post
    pub fn distance(&self, who: ControllableId, post: PostId) -> f32 {
        self.controllable(who).distance_to(self.post(post))
    }

    /// Controllable closest to `post`. Ties go to the earliest in storage order.
    pub fn nearest_controllable(&self, post: PostId) -> Option<ControllableId> {
        let target = self.post(post);
        let mut best: Option<(ControllableId, f32)> = None;
        for c in &self.controllables {
            let d = c.distance_to(target);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((c.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Closest post nobody holds, measured from `from`
    pub fn nearest_unclaimed_post(&self, from: Vec2) -> Option<PostId> {
        let mut best: Option<(PostId, f32)> = None;
        for post in &self.posts {
            if self.is_claimed(post.id) {
                continue;
            }
            let d = magnitude(post.pos - from);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((post.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Controllables ordered by descending score for the scoreboard.
    ///
    /// A derived view: storage order is left untouched. Equal scores keep
    /// storage order.
    pub fn ranking(&self) -> Vec<ControllableId> {
        let mut order: Vec<ControllableId> = self.controllables.iter().map(|c| c.id).collect();
        order.sort_by(|a, b| self.controllable(*b).score.cmp(&self.controllable(*a).score));
        order
    }

    pub fn top_score(&self) -> u32 {
        self.controllables.iter().map(|c| c.score).max().unwrap_or(0)
    }

    /// Every post has at most one claimant
    pub fn claims_are_exclusive(&self) -> bool {
        self.posts.iter().all(|p| {
            self.controllables
                .iter()
                .filter(|c| c.claimed_post == Some(p.id))
                .count()
                <= 1
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player_state() -> RoundState {
        RoundState {
            size: 2,
            frame: 0,
            posts: vec![
                Post::new(PostId(0), Vec2::new(840.0, 50.0)),
                Post::new(PostId(1), Vec2::new(840.0, 908.0)),
            ],
            controllables: vec![
                Controllable::new(
                    ControllableId(0),
                    Pilot::Human { controller: 0 },
                    Vec2::new(100.0, 100.0),
                    TeamColor::Blue,
                ),
                Controllable::new(
                    ControllableId(1),
                    Pilot::Bot { target: None },
                    Vec2::new(1480.0, 900.0),
                    TeamColor::Green,
                ),
            ],
        }
    }

    #[test]
    fn test_occupied_needs_two() {
        let mut state = two_player_state();
        state.controllables[0].pos = Vec2::new(850.0, 60.0);
        assert_eq!(state.overlap_count(PostId(0)), 1);
        assert!(!state.is_occupied(PostId(0)));

        state.controllables[1].pos = Vec2::new(860.0, 70.0);
        assert!(state.is_occupied(PostId(0)));
    }

    #[test]
    fn test_nearest_controllable() {
        let state = two_player_state();
        assert_eq!(state.nearest_controllable(PostId(0)), Some(ControllableId(0)));
        assert_eq!(state.nearest_controllable(PostId(1)), Some(ControllableId(1)));
    }

    #[test]
    fn test_nearest_unclaimed_skips_claimed() {
        let mut state = two_player_state();
        let from = Vec2::new(840.0, 100.0);
        assert_eq!(state.nearest_unclaimed_post(from), Some(PostId(0)));

        state.controllables[1].claimed_post = Some(PostId(0));
        assert_eq!(state.nearest_unclaimed_post(from), Some(PostId(1)));

        state.controllables[0].claimed_post = Some(PostId(1));
        assert_eq!(state.nearest_unclaimed_post(from), None);
    }

    #[test]
    fn test_ranking_is_a_view() {
        let mut state = two_player_state();
        state.controllables[1].score = 300;
        assert_eq!(state.ranking(), vec![ControllableId(1), ControllableId(0)]);
        assert_eq!(state.controllables[0].id, ControllableId(0));
        assert_eq!(state.top_score(), 300);
    }

    #[test]
    fn test_ranking_ties_keep_storage_order() {
        let state = two_player_state();
        assert_eq!(state.ranking(), vec![ControllableId(0), ControllableId(1)]);
    }
}
