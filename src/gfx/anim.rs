use anyhow::{ensure, Result};

/// Linear interpolation, `start * (1 - t) + end * t`.
///
/// `t` is not clamped; values outside 0..1 extrapolate along the same line.
/// This form is exact at both ends: `lerp(a, b, 0.0) == a` and
/// `lerp(a, b, 1.0) == b`.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

/// Component-wise [`lerp`] over fixed-length arrays.
pub fn lerp_array<const N: usize>(start: [f32; N], end: [f32; N], t: f32) -> [f32; N] {
    std::array::from_fn(|i| lerp(start[i], end[i], t))
}

/// Component-wise [`lerp`] over slices whose length is only known at runtime.
/// Mismatched lengths are an error, never a truncated result.
pub fn lerp_slice(start: &[f32], end: &[f32], t: f32) -> Result<Vec<f32>> {
    ensure!(
        start.len() == end.len(),
        "lerp length mismatch: start has {} components, end has {}",
        start.len(),
        end.len()
    );

    Ok(start.iter().zip(end).map(|(&a, &b)| lerp(a, b, t)).collect())
}

/// CSS-style cubic bezier easing through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::SNAP
    }
}

impl CubicBezier {
    /// Sharp in-out curve: lingers at both ends and snaps through the middle.
    pub const SNAP: CubicBezier = CubicBezier { x1: 0.85, y1: 0.0, x2: 0.15, y2: 1.0 };

    /// x control points are clamped to 0..1 so the curve stays a function of x.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1: x1.clamp(0.0, 1.0),
            y1,
            x2: x2.clamp(0.0, 1.0),
            y2,
        }
    }

    pub fn control_points(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    pub fn is_linear(&self) -> bool {
        self.x1 == self.y1 && self.x2 == self.y2
    }

    /// Eased progress for `t`. Inputs at or past either end return exactly
    /// 0 or 1, so float drift from the driver never escapes the curve.
    pub fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        if self.is_linear() {
            return t;
        }

        let x = t as f64;
        let (x1, y1, x2, y2) = (self.x1 as f64, self.y1 as f64, self.x2 as f64, self.y2 as f64);
        let p = solve_parameter(x, x1, x2);
        bezier_sample(p, y1, y2) as f32
    }
}

/// Finds `p` in 0..1 with `bezier_x(p) == x`. Newton first, bisection when
/// the slope flattens out or Newton leaves the unit interval.
fn solve_parameter(x: f64, x1: f64, x2: f64) -> f64 {
    let mut p = x;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return p;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
        if !(0.0..=1.0).contains(&p) {
            break;
        }
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..40 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-9 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }
    p
}

// B(t) = 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3, in Horner form
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

/// A looping clock. `playhead` is the position inside the current cycle,
/// always in `0.0..1.0`; `elapsed` keeps growing across cycles.
#[derive(Debug, Clone)]
pub struct Timeline {
    pub duration: f32,
    pub elapsed: f32,
}

impl Timeline {
    pub fn new(duration: f32) -> Self {
        Self { duration, elapsed: 0.0 }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt.max(0.0);
    }

    pub fn playhead(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        let p = (self.elapsed / self.duration).fract();
        // fract() of a value just under an integer can round up to 1.0 in f32
        if p >= 1.0 {
            0.0
        } else {
            p
        }
    }

    /// Number of fully completed cycles.
    pub fn cycle(&self) -> u32 {
        if self.duration <= 0.0 {
            return 0;
        }
        (self.elapsed / self.duration).floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn lerp_reference_values() {
        assert_eq!(lerp(0.0, 100.0, 0.5), 50.0);
        assert_eq!(lerp(20.0, 80.0, 0.0), 20.0);
        assert_eq!(lerp(30.0, 5.0, 1.0), 5.0);
        assert_eq!(lerp(-1.0, 1.0, 0.5), 0.0);
        assert_eq!(lerp(0.5, 1.0, 0.5), 0.75);
    }

    #[test]
    fn lerp_hits_endpoints_exactly() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a: f32 = rng.gen_range(-1.0e4..1.0e4);
            let b: f32 = rng.gen_range(-1.0e4..1.0e4);
            assert_eq!(lerp(a, b, 0.0), a);
            assert_eq!(lerp(a, b, 1.0), b);
            assert!(close(lerp(a, b, 0.5), (a + b) / 2.0, 1e-2));
        }
    }

    #[test]
    fn lerp_is_monotonic_in_t() {
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let a: f32 = rng.gen_range(-100.0..100.0);
            let b = a + rng.gen_range(1.0..100.0);
            let mut prev = lerp(a, b, 0.0);
            for i in 1..=20 {
                let v = lerp(a, b, i as f32 / 20.0);
                assert!(v >= prev);
                prev = v;
            }
        }
    }

    #[test]
    fn lerp_extrapolates_outside_unit_range() {
        assert_eq!(lerp(0.0, 10.0, 2.0), 20.0);
        assert_eq!(lerp(0.0, 10.0, -0.5), -5.0);
    }

    #[test]
    fn lerp_array_is_component_wise() {
        assert_eq!(lerp_array([0.0, 0.0], [10.0, 20.0], 0.5), [5.0, 10.0]);
        assert_eq!(lerp_array([1.0, 2.0, 3.0], [3.0, 2.0, 1.0], 1.0), [3.0, 2.0, 1.0]);
    }

    #[test]
    fn lerp_slice_checks_lengths() {
        assert_eq!(lerp_slice(&[0.0, 0.0], &[10.0, 20.0], 0.5).unwrap(), vec![5.0, 10.0]);

        let err = lerp_slice(&[0.0, 0.0, 0.0], &[1.0, 1.0], 0.5).unwrap_err();
        assert!(err.to_string().contains("length mismatch"));
    }

    #[test]
    fn bezier_endpoints_and_symmetry() {
        let ease = CubicBezier::SNAP;
        assert_eq!(ease.ease(0.0), 0.0);
        assert_eq!(ease.ease(1.0), 1.0);
        assert!(close(ease.ease(0.5), 0.5, 1e-5));

        // point symmetry about (0.5, 0.5)
        for i in 1..10 {
            let t = i as f32 / 10.0;
            assert!(close(ease.ease(t) + ease.ease(1.0 - t), 1.0, 1e-4));
        }
    }

    #[test]
    fn bezier_clamps_drifted_inputs() {
        let ease = CubicBezier::SNAP;
        assert_eq!(ease.ease(-1e-6), 0.0);
        assert_eq!(ease.ease(1.0 + 1e-6), 1.0);
    }

    #[test]
    fn bezier_snap_lingers_then_snaps() {
        let ease = CubicBezier::SNAP;
        assert!(ease.ease(0.2) < 0.05);
        assert!(ease.ease(0.8) > 0.95);

        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease.ease(i as f32 / 100.0);
            assert!(v >= prev - 1e-6);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn linear_bezier_is_identity() {
        let linear = CubicBezier::new(0.25, 0.25, 0.75, 0.75);
        assert!(linear.is_linear());
        assert_eq!(linear.ease(0.3), 0.3);
    }

    #[test]
    fn bezier_matches_css_ease() {
        // cubic-bezier(0.25, 0.1, 0.25, 1.0) at x = 0.5 is about 0.8024
        let css_ease = CubicBezier::new(0.25, 0.1, 0.25, 1.0);
        assert!(close(css_ease.ease(0.5), 0.8024, 1e-3));
    }

    #[test]
    fn timeline_wraps_playhead() {
        let mut tl = Timeline::new(2.0);
        assert_eq!(tl.playhead(), 0.0);

        tl.advance(0.5);
        assert!(close(tl.playhead(), 0.25, 1e-6));

        tl.advance(2.0);
        assert!(close(tl.playhead(), 0.25, 1e-6));
        assert_eq!(tl.cycle(), 1);
        assert!(close(tl.elapsed, 2.5, 1e-6));
    }

    #[test]
    fn timeline_playhead_stays_below_one() {
        let mut tl = Timeline::new(3.0);
        for _ in 0..10_000 {
            tl.advance(1.0 / 60.0);
            let p = tl.playhead();
            assert!((0.0..1.0).contains(&p));
        }
    }

    #[test]
    fn timeline_ignores_negative_dt_and_zero_duration() {
        let mut tl = Timeline::new(0.0);
        tl.advance(-1.0);
        assert_eq!(tl.elapsed, 0.0);
        tl.advance(1.0);
        assert_eq!(tl.playhead(), 0.0);
        assert_eq!(tl.cycle(), 0);
    }
}
