//! Blends between two HSL colors inside a perceptual space, with a bezier
//! ease so the in-between colors only flash by.

use crate::driver::Frame;
use crate::gfx::{
    anim::{lerp_array, CubicBezier},
    color::{convert, ColorSpace},
    math::Color,
};
use crate::scenes::Scene;
use log::debug;

pub struct ColorBlend {
    space: ColorSpace,
    ease: CubicBezier,
    // endpoints already converted into `space`
    from: [f32; 3],
    to: [f32; 3],
    radius: f32,
}

impl ColorBlend {
    pub fn new(from_hsl: [f32; 3], to_hsl: [f32; 3], space: ColorSpace, ease: CubicBezier) -> Self {
        let from = convert(ColorSpace::Hsl, space, from_hsl);
        let to = convert(ColorSpace::Hsl, space, to_hsl);
        debug!("color blend in {:?}: {:?} -> {:?}", space, from, to);
        Self {
            space,
            ease,
            from,
            to,
            radius: 80.0,
        }
    }

    /// Unclamped RGB (0..255) at playhead `t`.
    pub fn rgb_at(&self, t: f32) -> [f32; 3] {
        let t = self.ease.ease(t);
        let blended = lerp_array(self.from, self.to, t);
        convert(self.space, ColorSpace::Rgb, blended)
    }

    pub fn color_at(&self, t: f32) -> Color {
        Color::from_rgb255(self.rgb_at(t))
    }

    pub fn css_at(&self, t: f32) -> String {
        self.color_at(t).to_css()
    }
}

impl Scene for ColorBlend {
    fn name(&self) -> &'static str {
        "color-blend"
    }

    fn draw(&mut self, frame: &mut Frame) {
        let color = self.color_at(frame.playhead);
        frame
            .surface
            .circle(frame.width / 2.0, frame.height / 2.0, self.radius, color, None);
    }
}
