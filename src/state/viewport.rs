//! Horizontal pager viewport
//!
//! Holds the fractional page position the pager strip is drawn at and
//! runs the settle cycle: programmatic scroll requests, finger drags,
//! and the momentum report once a settle animation lands on a page.
//! Requests are applied at most once, keyed by their sequence number.

use std::time::{Duration, Instant};

use super::animated::AnimatedValue;
use super::pager::ScrollRequest;

/// Release speed that flings to the adjacent page (px/s)
pub const FLING_VELOCITY: f32 = 500.0;
/// Settle animation length
const SETTLE_DUR: Duration = Duration::from_millis(220);

/// Programmatic scroll targeting a page outside the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("scroll index {index} is out of range for {len} pages")]
pub struct ScrollIndexError {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Page position when the drag claimed the pager
    origin: f32,
    /// Pointer travel already spent claiming the axis
    claim_dx: f32,
}

#[derive(Debug)]
pub struct PagerViewport {
    /// Position in page units; page `i` rests at `i.0`
    position: AnimatedValue,
    /// Sequence of the last applied request
    last_seq: u64,
    drag: Option<DragState>,
    /// Index reported when the running settle finishes
    pending_momentum: Option<usize>,
    settle_dur: Duration,
}

impl Default for PagerViewport {
    fn default() -> Self {
        Self::new()
    }
}

impl PagerViewport {
    pub fn new() -> Self {
        Self {
            position: AnimatedValue::new(0.0),
            last_seq: 0,
            drag: None,
            pending_momentum: None,
            settle_dur: SETTLE_DUR,
        }
    }

    /// Override the settle length (zero disables settle animation)
    pub fn set_settle_duration(&mut self, duration: Duration) {
        self.settle_dur = duration;
    }

    pub fn position(&self) -> f32 {
        self.position.value()
    }

    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Serve a scroll request. `Ok(false)` means the request was already
    /// served; an out-of-range index leaves the request unserved so the
    /// caller can retry once the window grows.
    pub fn apply_request(
        &mut self,
        req: ScrollRequest,
        len: usize,
        now: Instant,
    ) -> Result<bool, ScrollIndexError> {
        if req.seq <= self.last_seq {
            return Ok(false);
        }
        if req.index >= len {
            return Err(ScrollIndexError {
                index: req.index,
                len,
            });
        }
        self.last_seq = req.seq;
        if req.animated {
            self.position
                .animate_to(req.index as f32, self.settle_dur, simple_easing::cubic_out, now);
            self.pending_momentum = Some(req.index);
        } else {
            self.position.set(req.index as f32);
            self.pending_momentum = None;
        }
        Ok(true)
    }

    /// A horizontal drag claimed the pager; freezes any running settle
    /// where it is and drops its momentum report
    pub fn begin_drag(&mut self, claim_dx: f32) {
        let origin = self.position.value();
        self.position.set(origin);
        self.pending_momentum = None;
        self.drag = Some(DragState { origin, claim_dx });
    }

    /// Track cumulative pointer travel (px) against the page width
    pub fn drag_to(&mut self, dx: f32, page_w: f32, len: usize) {
        let Some(drag) = self.drag else {
            return;
        };
        if page_w <= 0.0 || len == 0 {
            return;
        }
        let pos = drag.origin - (dx - drag.claim_dx) / page_w;
        self.position.set(pos.clamp(0.0, (len - 1) as f32));
    }

    /// Release the drag and settle on a page chosen from position and
    /// release velocity
    pub fn end_drag(&mut self, vx: f32, len: usize, now: Instant) {
        if self.drag.take().is_none() {
            return;
        }
        let pos = self.position.value();
        let target = if vx <= -FLING_VELOCITY {
            pos.floor() + 1.0
        } else if vx >= FLING_VELOCITY {
            pos.ceil() - 1.0
        } else {
            pos.round()
        };
        let target = target.clamp(0.0, len.saturating_sub(1) as f32);
        self.position
            .animate_to(target, self.settle_dur, simple_easing::cubic_out, now);
        self.pending_momentum = Some(target as usize);
    }

    /// Advance the settle; yields the landed index when it completes
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if self.position.update(now) {
            self.pending_momentum.take()
        } else {
            None
        }
    }
}
