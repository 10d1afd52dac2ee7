use crate::config::Config;
use crate::driver::{Driver, Tick};
use crate::gfx::draw::CommandList;
use crate::scenes::{self, Framed, Scene};
use anyhow::Result;
use log::{debug, info};
use std::time::{Duration, Instant};

pub struct App {
    pub config: Config,
    driver: Driver,
    scene: Framed,
    surface: CommandList,
    last_tick: Option<Tick>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let settings = config.settings();
        let palette = config.palette();
        let inner = scenes::build(config.scene, &settings, &config.scene_params(), palette);
        let scene = Framed::new(inner, palette, config.margin);

        info!(
            "Scene {} at {}x{}, {:.1}s per cycle{}",
            scene.name(),
            settings.width,
            settings.height,
            settings.duration,
            if settings.animate { "" } else { " (still)" }
        );

        Self {
            config,
            driver: Driver::new(settings),
            scene,
            surface: CommandList::new(),
            last_tick: None,
        }
    }

    /// Draws one frame `dt` seconds after the previous one.
    pub fn update(&mut self, dt: f32) -> Tick {
        let settings = self.driver.settings();
        self.surface
            .begin([settings.width as f32, settings.height as f32]);

        let tick = self.driver.tick(&mut self.scene, &mut self.surface, dt);

        if let Some(prev) = self.last_tick {
            if tick.cycle != prev.cycle {
                debug!("Cycle {} finished after frame {}", prev.cycle, prev.frame);
            }
        }
        self.last_tick = Some(tick);
        tick
    }

    pub fn surface(&self) -> &CommandList {
        &self.surface
    }

    /// True once the configured number of cycles has played, or after the
    /// single frame of a still sketch.
    pub fn is_finished(&self) -> bool {
        match self.last_tick {
            None => false,
            Some(_) if !self.driver.settings().animate => true,
            Some(tick) => tick.cycle >= self.config.loops.max(1),
        }
    }

    /// Plays in wall-clock time, sleeping between frames to hold the fps cap.
    pub fn run(&mut self) -> Result<()> {
        let frame_budget = Duration::from_secs_f32(1.0 / self.driver.settings().fps as f32);
        let mut last_frame = Instant::now();

        while !self.is_finished() {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            let tick = self.update(dt);
            debug!(
                "frame {} playhead {:.3} dt {:.4}s: {} draw commands",
                tick.frame,
                tick.playhead,
                tick.delta_time,
                self.surface.len()
            );

            let spent = now.elapsed();
            if spent < frame_budget {
                std::thread::sleep(frame_budget - spent);
            }
        }

        info!(
            "Finished {} after {} frames",
            self.scene.name(),
            self.driver.frame_count()
        );
        Ok(())
    }
}
