//! Maps the 0..1 playhead onto other ranges: a circle that grows while its
//! stroke thins out.

use crate::driver::Frame;
use crate::gfx::{anim::lerp, math::Color};
use crate::scenes::Scene;

pub struct MapRange {
    color: Color,
    radius: (f32, f32),
    stroke: (f32, f32),
}

impl MapRange {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            radius: (20.0, 50.0),
            stroke: (20.0, 10.0),
        }
    }

    /// Radius and stroke width at `t`.
    pub fn shape_at(&self, t: f32) -> (f32, f32) {
        (
            lerp(self.radius.0, self.radius.1, t),
            lerp(self.stroke.0, self.stroke.1, t),
        )
    }
}

impl Scene for MapRange {
    fn name(&self) -> &'static str {
        "map-range"
    }

    fn draw(&mut self, frame: &mut Frame) {
        let (radius, stroke) = self.shape_at(frame.playhead);
        frame
            .surface
            .circle(frame.width / 2.0, frame.height / 2.0, radius, self.color, Some(stroke));
    }
}
