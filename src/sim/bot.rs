//! Bot decision rules
//!
//! Bots pick a post to head for, then drive the same movement engine as
//! humans. Targets are re-evaluated every frame.

use super::movement::Intent;
use super::state::{ControllableId, PostId, RoundState};
use crate::consts::BOT_BOOST_MIN_ENERGY;

/// Outcome of one bot evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BotDecision {
    pub target: Option<PostId>,
    pub intent: Intent,
}

/// Re-evaluate a bot's target.
///
/// A contested or already-held target is dropped, and the bot idles for that
/// frame. Otherwise, while the target is unset, the rules apply in order:
/// take a post this bot is closest to, take the nearest free post when
/// holding nothing, and finally go after a post whose holder has wandered
/// further from it than this bot is. Within a rule the last match in
/// iteration order wins.
pub fn choose_target(state: &RoundState, me: ControllableId, current: Option<PostId>) -> Option<PostId> {
    let bot = state.controllable(me);
    if let Some(t) = current {
        if state.is_occupied(t) || bot.claimed_post == Some(t) {
            return None;
        }
        return current;
    }

    let mut target = None;
    for post in &state.posts {
        if bot.claimed_post != Some(post.id) && state.nearest_controllable(post.id) == Some(me) {
            target = Some(post.id);
        }
    }

    if target.is_none() && bot.claimed_post.is_none() {
        target = state.nearest_unclaimed_post(bot.pos);
    }

    if target.is_none() && bot.claimed_post.is_some() {
        for other in &state.controllables {
            if other.id == me {
                continue;
            }
            if let Some(theirs) = other.claimed_post {
                let post = state.post(theirs);
                if other.distance_to(post) > bot.distance_to(post) {
                    target = Some(theirs);
                }
            }
        }
    }

    target
}

/// Pick a target and turn it into movement intent
pub fn decide(state: &RoundState, me: ControllableId) -> BotDecision {
    let bot = state.controllable(me);
    let current = bot.pilot.target();
    let target = choose_target(state, me, current);

    if target != current {
        log::debug!("bot {:?} retargets {:?} -> {:?}", me, current, target);
    }

    let intent = match target {
        Some(post_id) => {
            let post = state.post(post_id);
            let arrived = post.bounds().overlaps(&bot.bounds());
            Intent {
                boost: bot.energy >= BOT_BOOST_MIN_ENERGY,
                arrived,
                ..Intent::toward(bot.pos, post.pos)
            }
        }
        None => Intent::default(),
    };

    BotDecision { target, intent }
}
