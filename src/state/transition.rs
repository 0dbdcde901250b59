//! Vertical month/week transition state machine
//!
//! A vertical drag morphs the calendar grid between its month and week
//! shapes by writing a progress value and the grid height every frame.
//! Release either commits the transition or snaps back, and the view mode
//! switch lands when the height snap settles. Dragging down from the week
//! shape switches to month immediately so the full grid can expand under
//! the finger; that preview is flagged until the gesture resolves.

use std::time::{Duration, Instant};

use super::animated::AnimatedValue;
use super::grid_layout::{MONTH_GRID_H, WEEK_GRID_H};

/// Drag distance that maps to full transition progress (px)
pub const DRAG_RANGE: f32 = 180.0;
/// Release speed that commits regardless of distance (px/s)
pub const TOGGLE_VELOCITY: f32 = 900.0;
/// Snap animation length
pub const SNAP_DUR: Duration = Duration::from_millis(220);
/// Fraction of the drag range past which a release commits
const COMMIT_FRACTION: f32 = 0.35;
/// Vertical movement must beat horizontal by this factor to open a preview
const V_INTENT_FACTOR: f32 = 1.15;
/// Dead zone before a drag can open a preview (px)
pub const V_START: f32 = 12.0;

/// Which way the grid is currently morphing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPhase {
    #[default]
    Idle,
    ToWeek,
    ToMonth,
}

/// Per-frame result of feeding a drag into the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragUpdateOutcome {
    /// Gesture is outside this controller's interest (wrong direction,
    /// not yet past the dead zone, or grabbed mid-animation)
    Ignored,
    /// Progress and height were updated from the drag
    Tracking,
    /// The drag just crossed into a week-to-month preview; the caller
    /// must switch the view mode to month now
    MonthPreviewBegan,
}

/// Immediate consequence of releasing a vertical drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// A snap started; its outcome arrives from `tick` when it settles
    Settling,
    /// Snap-back from the month shape started; the phase goes idle on the
    /// next tick instead of waiting for the snap to finish
    SettlingIdleQueued,
}

/// What a settled snap asks the application to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleOutcome {
    /// Committed drag into the week shape: switch the view mode to week
    CommitToWeek,
    /// Committed drag into the month shape: the mode already switched
    /// when the preview began, only the preview flag remains to clear
    CommitToMonth,
    /// Cancelled drag settled back to the week shape; `revert_mode` is
    /// set when a preview had switched the mode to month mid-drag
    CancelToWeek { revert_mode: bool },
    /// Programmatic month-to-week toggle finished
    ToggleToWeekDone,
    /// Programmatic week-to-month toggle finished
    ToggleToMonthDone,
}

/// Drives the grid height and transition progress for the month/week morph
#[derive(Debug)]
pub struct TransitionController {
    phase: TransitionPhase,
    progress: AnimatedValue,
    grid_h: AnimatedValue,
    /// Grid height captured when the pointer went down
    drag_start_h: f32,
    /// Whether the current drag has passed its directional gate
    preview_started: bool,
    /// Month grid is being shown as a week-to-month drag preview
    drag_preview: bool,
    /// Outcome to deliver when the running height snap settles
    settle: Option<SettleOutcome>,
    snap_dur: Duration,
}

impl TransitionController {
    pub fn new(initial_height: f32) -> Self {
        Self {
            phase: TransitionPhase::Idle,
            progress: AnimatedValue::new(0.0),
            grid_h: AnimatedValue::new(initial_height),
            drag_start_h: initial_height,
            preview_started: false,
            drag_preview: false,
            settle: None,
            snap_dur: SNAP_DUR,
        }
    }

    /// Override the snap length (zero disables snap animation)
    pub fn set_snap_duration(&mut self, duration: Duration) {
        self.snap_dur = duration;
    }

    pub fn phase(&self) -> TransitionPhase {
        self.phase
    }

    /// Raw transition progress, 0 at the resting shape
    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    /// Current grid height (px)
    pub fn grid_height(&self) -> f32 {
        self.grid_h.value()
    }

    pub fn is_drag_preview(&self) -> bool {
        self.drag_preview
    }

    pub fn is_animating(&self) -> bool {
        self.progress.is_animating() || self.grid_h.is_animating()
    }

    /// A pointer landed on the calendar body.
    ///
    /// Snapshots the height the drag starts from and clears the previous
    /// choreography. A height snap that is still running keeps running;
    /// its settle outcome stays pending until a release replaces it.
    pub fn on_drag_begin(&mut self) {
        self.drag_start_h = self.grid_h.value();
        self.preview_started = false;
        self.phase = TransitionPhase::Idle;
        self.progress.set(0.0);
    }

    /// Feed cumulative drag translation (px from the pointer-down point).
    ///
    /// The shape branch keys on exact equality with the resting heights:
    /// a drag that grabbed the grid mid-animation matches neither branch
    /// and tracks nothing until release.
    pub fn on_drag_update(&mut self, dx: f32, dy: f32) -> DragUpdateOutcome {
        let dominant = dy.abs() > dx.abs() * V_INTENT_FACTOR;
        let to_week_gate = -dy > V_START && dominant;
        let to_month_gate = dy > V_START && dominant;

        if self.drag_start_h == MONTH_GRID_H {
            if !self.preview_started {
                if to_week_gate {
                    self.preview_started = true;
                    self.phase = TransitionPhase::ToWeek;
                } else {
                    return DragUpdateOutcome::Ignored;
                }
            }
            let p = (-dy / DRAG_RANGE).clamp(0.0, 1.0);
            self.set_height(MONTH_GRID_H + (WEEK_GRID_H - MONTH_GRID_H) * p);
            self.progress.set(p);
            return DragUpdateOutcome::Tracking;
        }

        if self.drag_start_h == WEEK_GRID_H {
            let mut began = false;
            if !self.preview_started {
                if to_month_gate {
                    self.preview_started = true;
                    self.drag_preview = true;
                    self.phase = TransitionPhase::ToMonth;
                    began = true;
                } else {
                    return DragUpdateOutcome::Ignored;
                }
            }
            let p = (dy / DRAG_RANGE).clamp(0.0, 1.0);
            self.set_height(WEEK_GRID_H + (MONTH_GRID_H - WEEK_GRID_H) * p);
            self.progress.set(p);
            return if began {
                DragUpdateOutcome::MonthPreviewBegan
            } else {
                DragUpdateOutcome::Tracking
            };
        }

        DragUpdateOutcome::Ignored
    }

    /// Resolve a released drag into a commit or a snap-back.
    ///
    /// A grab that started mid-animation falls through to the week-shape
    /// branch and, never having passed a gate, always snaps to the week
    /// height.
    pub fn on_drag_end(&mut self, dy: f32, vy: f32, now: Instant) -> ReleaseOutcome {
        let started = self.preview_started;

        if self.drag_start_h == MONTH_GRID_H {
            let commit =
                started && (-dy > DRAG_RANGE * COMMIT_FRACTION || vy < -TOGGLE_VELOCITY);
            if commit {
                self.animate_progress(1.0, now);
                self.animate_height(WEEK_GRID_H, Some(SettleOutcome::CommitToWeek), now);
                ReleaseOutcome::Settling
            } else {
                self.animate_progress(0.0, now);
                self.animate_height(MONTH_GRID_H, None, now);
                ReleaseOutcome::SettlingIdleQueued
            }
        } else {
            let commit = started
                && (dy > DRAG_RANGE * COMMIT_FRACTION
                    || vy > TOGGLE_VELOCITY
                    || self.progress.value() > 0.5);
            if commit {
                self.animate_progress(1.0, now);
                self.animate_height(MONTH_GRID_H, Some(SettleOutcome::CommitToMonth), now);
                ReleaseOutcome::Settling
            } else {
                self.animate_progress(0.0, now);
                self.animate_height(
                    WEEK_GRID_H,
                    Some(SettleOutcome::CancelToWeek {
                        revert_mode: started,
                    }),
                    now,
                );
                ReleaseOutcome::Settling
            }
        }
    }

    /// Advance animations; returns the settle outcome when the height
    /// snap reaches its end. Superseded snaps never settle.
    pub fn tick(&mut self, now: Instant) -> Option<SettleOutcome> {
        self.progress.update(now);
        if self.grid_h.update(now) {
            self.settle.take()
        } else {
            None
        }
    }

    /// Begin the programmatic month-to-week toggle
    pub fn begin_toggle_to_week(&mut self, now: Instant) {
        self.progress.set(0.0);
        self.phase = TransitionPhase::ToWeek;
        self.animate_progress(1.0, now);
        self.animate_height(WEEK_GRID_H, Some(SettleOutcome::ToggleToWeekDone), now);
    }

    /// Flag the week-to-month toggle's preview; the caller switches the
    /// view mode next, then starts the animations
    pub fn begin_month_preview_for_toggle(&mut self) {
        self.progress.set(0.0);
        self.drag_preview = true;
        self.phase = TransitionPhase::ToMonth;
    }

    /// Start the week-to-month toggle animations once the mode switched
    pub fn start_toggle_to_month(&mut self, now: Instant) {
        self.animate_progress(1.0, now);
        self.animate_height(MONTH_GRID_H, Some(SettleOutcome::ToggleToMonthDone), now);
    }

    /// Mode-change snap to the month shape
    pub fn animate_height_to_month(&mut self, now: Instant) {
        self.animate_height(MONTH_GRID_H, None, now);
    }

    /// Mode-change snap to the week shape
    pub fn animate_height_to_week(&mut self, now: Instant) {
        self.animate_height(WEEK_GRID_H, None, now);
    }

    pub fn set_idle(&mut self) {
        self.phase = TransitionPhase::Idle;
    }

    pub fn end_drag_preview(&mut self) {
        self.drag_preview = false;
    }

    pub fn reset_progress(&mut self) {
        self.progress.set(0.0);
    }

    fn animate_progress(&mut self, to: f32, now: Instant) {
        self.progress
            .animate_to(to, self.snap_dur, simple_easing::cubic_out, now);
    }

    fn animate_height(&mut self, to: f32, settle: Option<SettleOutcome>, now: Instant) {
        self.grid_h
            .animate_to(to, self.snap_dur, simple_easing::cubic_out, now);
        self.settle = settle;
    }

    fn set_height(&mut self, value: f32) {
        self.grid_h.set(value);
        self.settle = None;
    }
}
