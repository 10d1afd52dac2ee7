pub mod color_blend;
pub mod map_range;
pub mod spring;

use crate::driver::{Frame, Settings};
use crate::gfx::{
    anim::CubicBezier,
    color::ColorSpace,
    draw::{backdrop, progress_bar, Palette},
    math::Rect,
};
use serde::{Deserialize, Serialize};

pub use color_blend::ColorBlend;
pub use map_range::MapRange;
pub use spring::Spring;

/// A sketch. Construction is setup and runs once; `draw` runs every frame.
pub trait Scene {
    fn name(&self) -> &'static str;
    fn draw(&mut self, frame: &mut Frame);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    MapRange,
    Spring,
    ColorBlend,
}

impl SceneKind {
    /// Cycle length used when the config does not override it.
    pub fn default_duration(self) -> f32 {
        match self {
            SceneKind::MapRange | SceneKind::Spring => 5.0,
            SceneKind::ColorBlend => 3.0,
        }
    }
}

/// Per-scene tuning knobs, all with sketch defaults.
#[derive(Debug, Clone)]
pub struct SceneParams {
    pub step_rate: f32,
    pub easing: CubicBezier,
    pub from_hsl: [f32; 3],
    pub to_hsl: [f32; 3],
    pub space: ColorSpace,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            step_rate: Spring::DEFAULT_STEP_RATE,
            easing: CubicBezier::SNAP,
            from_hsl: [0.0, 50.0, 50.0],
            to_hsl: [200.0, 30.0, 40.0],
            space: ColorSpace::Lab,
        }
    }
}

/// Sets up the requested sketch for a surface of the given size.
pub fn build(
    kind: SceneKind,
    settings: &Settings,
    params: &SceneParams,
    palette: Palette,
) -> Box<dyn Scene> {
    let (width, height) = (settings.width as f32, settings.height as f32);
    match kind {
        SceneKind::MapRange => Box::new(MapRange::new(palette.foreground)),
        SceneKind::Spring => Box::new(Spring::new(
            width,
            height,
            params.step_rate,
            palette.foreground,
        )),
        SceneKind::ColorBlend => Box::new(ColorBlend::new(
            params.from_hsl,
            params.to_hsl,
            params.space,
            params.easing,
        )),
    }
}

/// Wraps a scene with the shared background, panel and timeline bar.
pub struct Framed {
    inner: Box<dyn Scene>,
    palette: Palette,
    margin: f32,
}

impl Framed {
    pub fn new(inner: Box<dyn Scene>, palette: Palette, margin: f32) -> Self {
        Self { inner, palette, margin }
    }
}

impl Scene for Framed {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn draw(&mut self, frame: &mut Frame) {
        let viewport = Rect::new(0.0, 0.0, frame.width, frame.height);
        backdrop(frame.surface, viewport, self.margin, &self.palette);
        self.inner.draw(frame);
        progress_bar(frame.surface, viewport, frame.playhead, self.margin, self.palette.foreground);
    }
}
