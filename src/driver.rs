use crate::gfx::{anim::Timeline, draw::Surface};
use crate::scenes::Scene;
use log::{debug, warn};

/// Static playback settings, read once when a scene is set up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub width: u32,
    pub height: u32,
    /// Seconds per cycle.
    pub duration: f32,
    /// When false only a single frame is rendered.
    pub animate: bool,
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            duration: 5.0,
            animate: true,
            fps: 60,
        }
    }
}

/// Everything a scene gets for one frame.
pub struct Frame<'a> {
    pub surface: &'a mut dyn Surface,
    pub width: f32,
    pub height: f32,
    /// Position inside the current cycle, `0.0..1.0`.
    pub playhead: f32,
    /// Seconds since the first frame, never wraps.
    pub time: f32,
    /// Seconds since the previous frame; 0 on the first frame.
    pub delta_time: f32,
    pub frame: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub frame: u64,
    pub playhead: f32,
    pub time: f32,
    pub delta_time: f32,
    /// Completed cycles after this frame.
    pub cycle: u32,
}

/// Owns the clock and calls the scene once per frame. Never re-entrant:
/// a scene sees one `draw` call at a time, in order.
#[derive(Debug, Clone)]
pub struct Driver {
    settings: Settings,
    timeline: Timeline,
    frame: u64,
}

impl Driver {
    pub fn new(settings: Settings) -> Self {
        Self {
            timeline: Timeline::new(settings.duration),
            settings,
            frame: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn cycle(&self) -> u32 {
        self.timeline.cycle()
    }

    /// Advances the clock by `dt` seconds and draws one frame. The very
    /// first call always draws at time 0 with a zero delta, and a still
    /// sketch (`animate == false`) always sees a zero delta.
    pub fn tick(&mut self, scene: &mut dyn Scene, surface: &mut dyn Surface, dt: f32) -> Tick {
        let delta_time = if self.frame == 0 || !self.settings.animate {
            0.0
        } else if dt < 0.0 || !dt.is_finite() {
            warn!("Ignoring invalid frame delta {}", dt);
            0.0
        } else {
            dt
        };

        if self.settings.animate {
            self.timeline.advance(delta_time);
        }

        let mut frame = Frame {
            surface,
            width: self.settings.width as f32,
            height: self.settings.height as f32,
            playhead: self.timeline.playhead(),
            time: self.timeline.elapsed,
            delta_time,
            frame: self.frame,
        };
        scene.draw(&mut frame);

        let tick = Tick {
            frame: self.frame,
            playhead: frame.playhead,
            time: frame.time,
            delta_time,
            cycle: self.timeline.cycle(),
        };
        self.frame += 1;
        tick
    }

    /// Fixed-step playback of `frames` frames.
    pub fn run_frames(
        &mut self,
        scene: &mut dyn Scene,
        surface: &mut dyn Surface,
        frames: u64,
        dt: f32,
    ) -> Option<Tick> {
        let mut last = None;
        for _ in 0..frames {
            last = Some(self.tick(scene, surface, dt));
        }
        if let Some(t) = last {
            debug!(
                "{}: ran {} frames, playhead {:.3}, time {:.3}s",
                scene.name(),
                frames,
                t.playhead,
                t.time
            );
        }
        last
    }
}
