//! A point that chases a moving target by lerping a fixed fraction of the
//! remaining distance every frame.
//!
//! This is exponential decay toward the target, not a spring model: the
//! point slows as it closes in and never overshoots or oscillates. For small
//! per-frame rates it reads as a critically damped spring.

use crate::driver::Frame;
use crate::gfx::{
    anim::lerp_array,
    math::{Color, Rect, Vec2},
};
use crate::scenes::Scene;
use log::{debug, warn};

pub struct Spring {
    targets: Vec<Vec2>,
    point: Vec2,
    step_rate: f32,
    color: Color,
    last_target: Option<usize>,
}

impl Spring {
    pub const DEFAULT_STEP_RATE: f32 = 4.0;
    const TARGET_RADIUS: f32 = 20.0;
    const TARGET_STROKE: f32 = 4.0;

    /// A negative or non-finite `step_rate` would push the point away from
    /// its target, so it is replaced with 0 (the point stays put).
    pub fn new(width: f32, height: f32, step_rate: f32, color: Color) -> Self {
        let step_rate = if step_rate.is_finite() && step_rate >= 0.0 {
            step_rate
        } else {
            warn!("spring: step rate {} is invalid, holding the point still", step_rate);
            0.0
        };
        let targets = vec![
            Vec2::new(width * 0.25, height * 0.5),
            Vec2::new(width * 0.25, height * 0.25),
            Vec2::new(width * 0.75, height * 0.75),
            Vec2::new(width * 0.5, height * 0.5),
        ];
        Self {
            targets,
            point: Rect::new(0.0, 0.0, width, height).center(),
            step_rate,
            color,
            last_target: None,
        }
    }

    pub fn point(&self) -> Vec2 {
        self.point
    }

    pub fn targets(&self) -> &[Vec2] {
        &self.targets
    }

    /// `floor(playhead * count)`, clamped so a playhead that drifts to 1.0
    /// (or below 0) still picks a real target.
    pub fn target_index(&self, playhead: f32) -> usize {
        let i = (playhead * self.targets.len() as f32).floor();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(self.targets.len() - 1)
        }
    }

    /// Moves the point toward the target for `playhead` and returns that target.
    pub fn step(&mut self, playhead: f32, delta_time: f32) -> Vec2 {
        let index = self.target_index(playhead);
        let target = self.targets[index];
        if self.last_target != Some(index) {
            debug!("spring: heading to target {} at ({:.1}, {:.1})", index, target.x, target.y);
            self.last_target = Some(index);
        }

        let rate = self.step_rate * delta_time;
        self.point = if rate >= 1.0 {
            // a long frame lands exactly on the target instead of overshooting
            target
        } else {
            lerp_array(self.point.to_array(), target.to_array(), rate).into()
        };
        target
    }
}

impl Scene for Spring {
    fn name(&self) -> &'static str {
        "spring"
    }

    fn draw(&mut self, frame: &mut Frame) {
        let target = self.step(frame.playhead, frame.delta_time);

        frame.surface.circle(
            target.x,
            target.y,
            Self::TARGET_RADIUS,
            self.color,
            Some(Self::TARGET_STROKE),
        );
        frame
            .surface
            .circle(self.point.x, self.point.y, Self::TARGET_RADIUS / 2.0, self.color, None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{Driver, Settings};
    use crate::gfx::draw::{CommandList, DrawCommand};
    use rand::Rng;

    fn spring() -> Spring {
        Spring::new(512.0, 512.0, Spring::DEFAULT_STEP_RATE, Color::WHITE)
    }

    #[test]
    fn starts_at_center() {
        assert_eq!(spring().point(), Vec2::new(256.0, 256.0));
    }

    #[test]
    fn large_delta_snaps_to_target() {
        let mut s = spring();
        let target = s.step(0.3, 0.25);
        assert_eq!(target, Vec2::new(128.0, 128.0));
        assert_eq!(s.point(), target);

        let target = s.step(0.6, 10.0);
        assert_eq!(s.point(), target);
    }

    #[test]
    fn small_steps_close_in_without_overshoot() {
        let mut s = spring();
        let target = s.targets()[0];
        let mut prev = s.point().distance(target);

        for _ in 0..120 {
            s.step(0.0, 1.0 / 60.0);
            let d = s.point().distance(target);
            assert!(d < prev, "distance went from {} to {}", prev, d);
            // approaching from the right, so x never passes the target
            assert!(s.point().x >= target.x);
            prev = d;
        }
        assert!(prev < 1.0);
    }

    #[test]
    fn zero_delta_leaves_point_in_place() {
        let mut s = spring();
        s.step(0.0, 0.0);
        assert_eq!(s.point(), Vec2::new(256.0, 256.0));
    }

    #[test]
    fn target_index_stays_in_bounds() {
        let s = spring();
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            let playhead: f32 = rng.gen_range(0.0..1.0);
            assert!(s.target_index(playhead) < s.targets().len());
        }
        assert_eq!(s.target_index(0.0), 0);
        assert_eq!(s.target_index(0.2499), 0);
        assert_eq!(s.target_index(0.25), 1);
        assert_eq!(s.target_index(0.999_999), 3);
        assert_eq!(s.target_index(1.0), 3);
        assert_eq!(s.target_index(-0.1), 0);
    }

    #[test]
    fn negative_step_rate_never_moves_away() {
        for rate in [-4.0, f32::NAN, f32::NEG_INFINITY] {
            let mut s = Spring::new(512.0, 512.0, rate, Color::WHITE);
            let target = s.targets()[0];
            let start = s.point().distance(target);
            for _ in 0..60 {
                s.step(0.0, 1.0 / 60.0);
                assert!(s.point().distance(target) <= start);
                assert!(s.point().x.is_finite() && s.point().y.is_finite());
            }
        }
    }

    #[test]
    fn draws_target_ring_and_point() {
        let mut s = spring();
        let mut surface = CommandList::new();
        let mut driver = Driver::new(Settings::default());
        driver.tick(&mut s, &mut surface, 0.0);

        match surface.commands() {
            [
                DrawCommand::Circle { radius: r0, stroke: s0, .. },
                DrawCommand::Circle { x, y, radius: r1, stroke: s1, .. },
            ] => {
                assert_eq!((*r0, *s0), (20.0, Some(4.0)));
                assert_eq!((*r1, *s1), (10.0, None));
                // first frame has no delta, so the point is still centered
                assert_eq!((*x, *y), (256.0, 256.0));
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }
}
