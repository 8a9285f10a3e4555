//! Claiming and bumper collisions
//!
//! Runs once per frame after every controllable has moved. Claims are
//! resolved first, then bounces, in a single pass with no re-checking.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{ControllableId, PostId, RoundState};
use crate::consts::*;
use crate::normalize;

/// Something the resolver changed this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CollisionEvent {
    /// `who` took `post`, stripping it from `previous`
    Claimed {
        who: ControllableId,
        post: PostId,
        previous: Option<ControllableId>,
    },
    /// `bounced` was knocked `distance` units away from `bouncer`
    Bounced {
        bouncer: ControllableId,
        bounced: ControllableId,
        distance: f32,
    },
}

/// Hand `post` to `who`.
///
/// The previous holder loses it without penalty; the new holder gets the
/// claim award in both energy and score. Returns the previous holder.
pub fn transfer_claim(state: &mut RoundState, who: ControllableId, post: PostId) -> Option<ControllableId> {
    let previous = state.claimant_of(post);
    if let Some(prev) = previous {
        state.controllable_mut(prev).claimed_post = None;
    }

    let taker = state.controllable_mut(who);
    taker.claimed_post = Some(post);
    taker.energy += CLAIM_AWARD;
    taker.score += CLAIM_SCORE;
    previous
}

/// Post claiming pass.
///
/// Each controllable considers only the first post (in post order) it
/// overlaps. Its own post and contested posts are left alone.
pub fn resolve_claims(state: &mut RoundState) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for i in 0..state.controllables.len() {
        let who = ControllableId(i);
        let body = state.controllable(who).bounds();

        let Some(post) = state
            .posts
            .iter()
            .find(|p| p.bounds().overlaps(&body))
            .map(|p| p.id)
        else {
            continue;
        };

        if state.controllable(who).claimed_post == Some(post) || state.is_occupied(post) {
            continue;
        }

        let previous = transfer_claim(state, who, post);
        log::info!(
            "{} claims post {} (score {})",
            state.controllable(who).color.as_str(),
            post.0,
            state.controllable(who).score
        );
        events.push(CollisionEvent::Claimed {
            who,
            post,
            previous,
        });
    }

    events
}

/// Whether `who` stands on the post it holds
fn guarding_own_post(state: &RoundState, who: ControllableId) -> bool {
    let c = state.controllable(who);
    c.claimed_post
        .is_some_and(|post| state.post(post).bounds().overlaps(&c.bounds()))
}

/// Bumper pass.
///
/// Every ordered pair is scanned, so each overlapping pair is seen from both
/// sides. A moving scanner bounces the other when at least as fast, unless
/// the other is guarding its own post.
pub fn resolve_bounces(state: &mut RoundState) -> Vec<CollisionEvent> {
    let mut events = Vec::new();
    let count = state.controllables.len();

    for i in 0..count {
        for j in 0..count {
            if i == j {
                continue;
            }
            let (bouncer, bounced) = (ControllableId(i), ControllableId(j));
            let (a, b) = (state.controllable(bouncer), state.controllable(bounced));

            if a.speed == 0.0 || a.speed < b.speed || !a.bounds().overlaps(&b.bounds()) {
                continue;
            }
            if guarding_own_post(state, bounced) {
                continue;
            }

            let away: Vec2 = normalize(b.pos - a.pos);
            let distance = a.speed * BOUNCE_FACTOR;

            let target = state.controllable_mut(bounced);
            target.pos += away * distance;
            target.speed = 0.0;

            log::debug!("{:?} bounced {:?} by {:.1}", bouncer, bounced, distance);
            events.push(CollisionEvent::Bounced {
                bouncer,
                bounced,
                distance,
            });
        }
    }

    events
}

/// Full collision pass: claims, then bounces
pub fn resolve(state: &mut RoundState) -> Vec<CollisionEvent> {
    let mut events = resolve_claims(state);
    events.extend(resolve_bounces(state));
    events
}
