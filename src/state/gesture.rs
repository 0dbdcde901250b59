//! Pointer gesture arbitration for the calendar body
//!
//! A pointer down starts an unclaimed track. Movement claims an axis
//! once it crosses the horizontal or vertical threshold; after that the
//! drag belongs to the pager (horizontal) or the grid morph (vertical)
//! until release. A release that never left the tap slop is a tap.
//!
//! Coordinates are pixels, with release velocity estimated from the
//! trailing sample window.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::transition::V_START;

/// Maximum movement for a release to still count as a tap (px)
pub const TAP_SLOP: f32 = 6.0;
/// Horizontal travel that hands the drag to the pager (px)
pub const H_CLAIM: f32 = 16.0;
/// Vertical travel that hands the drag to the grid morph (px)
pub const V_CLAIM: f32 = V_START;
/// Vertical movement must beat horizontal by this factor when both
/// cross their thresholds in the same step
const V_DOMINANCE: f32 = 1.15;
/// Trailing window used for release velocity
const VELOCITY_WINDOW: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragAxis {
    Horizontal,
    Vertical,
}

/// Claimed drag movement, cumulative from the pointer-down point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub axis: DragAxis,
    pub dx: f32,
    pub dy: f32,
    /// Set on the step that claimed the axis
    pub just_claimed: bool,
}

/// How a pointer track resolved at release
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    Tap {
        x: f32,
        y: f32,
    },
    Release {
        axis: DragAxis,
        dx: f32,
        dy: f32,
        vx: f32,
        vy: f32,
    },
}

#[derive(Debug, Clone, Copy)]
struct Sample {
    at: Instant,
    x: f32,
    y: f32,
}

#[derive(Debug)]
struct PointerTrack {
    origin_x: f32,
    origin_y: f32,
    axis: Option<DragAxis>,
    samples: VecDeque<Sample>,
}

/// Tracks at most one pointer from down to up
#[derive(Debug, Default)]
pub struct DragGesture {
    track: Option<PointerTrack>,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tracking(&self) -> bool {
        self.track.is_some()
    }

    pub fn claimed_axis(&self) -> Option<DragAxis> {
        self.track.as_ref().and_then(|t| t.axis)
    }

    pub fn on_down(&mut self, x: f32, y: f32, now: Instant) {
        let mut samples = VecDeque::new();
        samples.push_back(Sample { at: now, x, y });
        self.track = Some(PointerTrack {
            origin_x: x,
            origin_y: y,
            axis: None,
            samples,
        });
    }

    /// Feed pointer movement; yields an update once an axis is claimed
    pub fn on_move(&mut self, x: f32, y: f32, now: Instant) -> Option<DragUpdate> {
        let track = self.track.as_mut()?;
        track.push(x, y, now);

        let dx = x - track.origin_x;
        let dy = y - track.origin_y;
        let mut just_claimed = false;
        if track.axis.is_none() {
            track.axis = claim_axis(dx, dy);
            just_claimed = track.axis.is_some();
        }

        track.axis.map(|axis| DragUpdate {
            axis,
            dx,
            dy,
            just_claimed,
        })
    }

    /// Resolve the track at pointer release. `None` when nothing was
    /// tracked, or when the pointer moved past the tap slop without
    /// ever claiming an axis.
    pub fn on_up(&mut self, x: f32, y: f32, now: Instant) -> Option<DragOutcome> {
        let mut track = self.track.take()?;
        track.push(x, y, now);

        let dx = x - track.origin_x;
        let dy = y - track.origin_y;
        match track.axis {
            Some(axis) => {
                let (vx, vy) = track.velocity();
                Some(DragOutcome::Release {
                    axis,
                    dx,
                    dy,
                    vx,
                    vy,
                })
            }
            None if dx.abs() <= TAP_SLOP && dy.abs() <= TAP_SLOP => {
                Some(DragOutcome::Tap { x, y })
            }
            None => None,
        }
    }
}

fn claim_axis(dx: f32, dy: f32) -> Option<DragAxis> {
    let horizontal = dx.abs() >= H_CLAIM;
    let vertical = dy.abs() >= V_CLAIM;
    match (horizontal, vertical) {
        (true, true) => {
            if dy.abs() > dx.abs() * V_DOMINANCE {
                Some(DragAxis::Vertical)
            } else {
                Some(DragAxis::Horizontal)
            }
        }
        (false, true) => Some(DragAxis::Vertical),
        (true, false) => Some(DragAxis::Horizontal),
        (false, false) => None,
    }
}

impl PointerTrack {
    fn push(&mut self, x: f32, y: f32, now: Instant) {
        self.samples.push_back(Sample { at: now, x, y });
        while self.samples.len() > 1 {
            let front = self.samples[0].at;
            if now.saturating_duration_since(front) > VELOCITY_WINDOW {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity over the retained window (px/s)
    fn velocity(&self) -> (f32, f32) {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return (0.0, 0.0);
        };
        let dt = last.at.saturating_duration_since(first.at).as_secs_f32();
        if dt <= f32::EPSILON {
            return (0.0, 0.0);
        }
        ((last.x - first.x) / dt, (last.y - first.y) / dt)
    }
}
