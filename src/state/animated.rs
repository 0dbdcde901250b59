//! Time-driven animated values

use std::time::{Duration, Instant};

/// Easing function applied to normalized animation time
pub type Easing = fn(f32) -> f32;

#[derive(Debug, Clone, Copy)]
struct Segment {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
}

/// A float that can either be written directly or eased toward a target.
///
/// Direct writes and newly started animations cancel whatever segment was
/// running without reporting completion; only a segment that runs to its
/// natural end makes `update` return true.
#[derive(Debug)]
pub struct AnimatedValue {
    value: f32,
    segment: Option<Segment>,
}

impl AnimatedValue {
    pub fn new(value: f32) -> Self {
        Self {
            value,
            segment: None,
        }
    }

    /// Current value
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Animation target while a segment runs, otherwise the current value
    pub fn target(&self) -> f32 {
        self.segment.map_or(self.value, |s| s.to)
    }

    pub fn is_animating(&self) -> bool {
        self.segment.is_some()
    }

    /// Write the value directly, cancelling any running segment
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.segment = None;
    }

    /// Start easing from the current value toward `to`
    pub fn animate_to(&mut self, to: f32, duration: Duration, easing: Easing, now: Instant) {
        self.segment = Some(Segment {
            from: self.value,
            to,
            start: now,
            duration,
            easing,
        });
    }

    /// Advance the running segment. Returns true exactly once, on the
    /// update that reaches the segment's end.
    pub fn update(&mut self, now: Instant) -> bool {
        let Some(segment) = self.segment else {
            return false;
        };

        let t = if segment.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_duration_since(segment.start);
            (elapsed.as_secs_f32() / segment.duration.as_secs_f32()).min(1.0)
        };

        if t >= 1.0 {
            self.value = segment.to;
            self.segment = None;
            true
        } else {
            self.value = segment.from + (segment.to - segment.from) * (segment.easing)(t);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear(t: f32) -> f32 {
        t
    }

    mod animated_value {
        use super::*;

        #[test]
        fn test_new_holds_value_without_segment() {
            let v = AnimatedValue::new(4.0);
            assert_eq!(v.value(), 4.0);
            assert!(!v.is_animating());
            assert_eq!(v.target(), 4.0);
        }

        #[test]
        fn test_update_without_segment_reports_nothing() {
            let mut v = AnimatedValue::new(1.0);
            assert!(!v.update(Instant::now()));
            assert_eq!(v.value(), 1.0);
        }

        #[test]
        fn test_animate_interpolates_midway() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(0.0);
            v.animate_to(10.0, Duration::from_millis(100), linear, t0);

            assert!(!v.update(t0 + Duration::from_millis(50)));
            assert!((v.value() - 5.0).abs() < 0.001);
            assert!(v.is_animating());
            assert_eq!(v.target(), 10.0);
        }

        #[test]
        fn test_update_at_end_finishes_once() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(0.0);
            v.animate_to(10.0, Duration::from_millis(100), linear, t0);

            assert!(v.update(t0 + Duration::from_millis(100)));
            assert_eq!(v.value(), 10.0);
            assert!(!v.is_animating());
            // Already settled, no second completion
            assert!(!v.update(t0 + Duration::from_millis(200)));
        }

        #[test]
        fn test_zero_duration_finishes_immediately() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(3.0);
            v.animate_to(7.0, Duration::ZERO, linear, t0);

            assert!(v.update(t0));
            assert_eq!(v.value(), 7.0);
        }

        #[test]
        fn test_set_cancels_segment_without_completion() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(0.0);
            v.animate_to(10.0, Duration::from_millis(100), linear, t0);

            v.set(2.0);
            assert_eq!(v.value(), 2.0);
            assert!(!v.is_animating());
            assert!(!v.update(t0 + Duration::from_millis(200)));
            assert_eq!(v.value(), 2.0);
        }

        #[test]
        fn test_new_segment_supersedes_old_one() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(0.0);
            v.animate_to(10.0, Duration::from_millis(100), linear, t0);
            v.update(t0 + Duration::from_millis(50));

            // Retarget from the midpoint; the first segment never completes
            v.animate_to(0.0, Duration::from_millis(100), linear, t0 + Duration::from_millis(50));
            assert!(!v.update(t0 + Duration::from_millis(100)));
            assert!(v.is_animating());
            assert_eq!(v.target(), 0.0);

            assert!(v.update(t0 + Duration::from_millis(150)));
            assert_eq!(v.value(), 0.0);
        }

        #[test]
        fn test_easing_shapes_the_curve() {
            let t0 = Instant::now();
            let mut v = AnimatedValue::new(0.0);
            v.animate_to(1.0, Duration::from_millis(100), simple_easing::cubic_out, t0);

            v.update(t0 + Duration::from_millis(50));
            // Cubic ease-out is ahead of linear at the midpoint
            assert!(v.value() > 0.5);
            assert!(v.value() < 1.0);
        }

        #[test]
        fn test_update_before_start_stays_at_origin() {
            let t0 = Instant::now() + Duration::from_millis(100);
            let mut v = AnimatedValue::new(5.0);
            v.animate_to(9.0, Duration::from_millis(100), linear, t0);

            assert!(!v.update(Instant::now()));
            assert_eq!(v.value(), 5.0);
        }
    }
}
