//! Eased gauge animation between level readings

use std::time::{Duration, Instant};

/// How long the gauge takes to reach a new reading
pub const ANIMATION_DURATION: Duration = Duration::from_millis(1500);

/// CSS-style cubic Bézier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// The standard `ease` curve, (0.25, 0.1, 0.25, 1).
    pub const EASE: CubicBezier = CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };

    pub const LINEAR: CubicBezier = CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };

    /// Eased progress for linear time progress `x` in `[0, 1]`.
    pub fn ease(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(x);
        bezier(t, self.y1, self.y2)
    }

    // Find t with x(t) == x: a few Newton steps, then bisection if the slope is flat.
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        let mut t = x;
        for _ in 0..8 {
            let error = bezier(t, self.x1, self.x2) - x;
            if error.abs() < EPSILON {
                return t;
            }
            let slope = bezier_slope(t, self.x1, self.x2);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= error / slope;
        }

        let (mut low, mut high) = (0.0, 1.0);
        t = x;
        while high - low > EPSILON {
            let value = bezier(t, self.x1, self.x2);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                low = t;
            } else {
                high = t;
            }
            t = (low + high) / 2.0;
        }
        t
    }
}

fn bezier(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
}

fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

/// Displayed gauge width (0–100) animating toward the latest reading.
///
/// Starts at 0. Retargeting mid-flight continues from the width currently
/// shown, so the bar never jumps.
#[derive(Debug, Clone)]
pub struct LevelAnimation {
    from: f64,
    to: f64,
    started_at: Option<Instant>,
    duration: Duration,
    easing: CubicBezier,
}

impl Default for LevelAnimation {
    fn default() -> Self {
        Self::new(ANIMATION_DURATION, CubicBezier::EASE)
    }
}

impl LevelAnimation {
    pub fn new(duration: Duration, easing: CubicBezier) -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            started_at: None,
            duration,
            easing,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Start animating toward `level`. A `None` reading leaves the gauge as is.
    pub fn set_target(&mut self, level: Option<f64>, now: Instant) {
        let Some(level) = level else {
            return;
        };
        let level = level.clamp(0.0, 100.0);
        if self.started_at.is_some() && (level - self.to).abs() < f64::EPSILON {
            return;
        }
        self.from = self.value_at(now);
        self.to = level;
        self.started_at = Some(now);
    }

    /// Width to draw at `now`.
    pub fn value_at(&self, now: Instant) -> f64 {
        let Some(started_at) = self.started_at else {
            return self.from;
        };
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        let progress = (elapsed / self.duration.as_secs_f64()).min(1.0);
        self.from + (self.to - self.from) * self.easing.ease(progress)
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        match self.started_at {
            Some(started_at) => now.saturating_duration_since(started_at) >= self.duration,
            None => true,
        }
    }
}
