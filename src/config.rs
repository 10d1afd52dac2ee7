use crate::driver::Settings;
use crate::gfx::{anim::CubicBezier, color::ColorSpace, draw::Palette, math::Color};
use crate::scenes::{SceneKind, SceneParams, Spring};
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_scene")]
    pub scene: SceneKind,

    /// Seconds per cycle; each scene has its own default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f32>,

    #[serde(default = "default_true")]
    pub animate: bool,

    #[serde(default = "default_fps_cap")]
    pub fps_cap: u32,

    /// Cycles to play before exiting.
    #[serde(default = "default_loops")]
    pub loops: u32,

    #[serde(default = "default_margin")]
    pub margin: f32,

    #[serde(default = "default_size")]
    pub size: Size,

    #[serde(default = "default_theme")]
    pub theme: Theme,

    #[serde(default)]
    pub spring: SpringConfig,

    #[serde(default)]
    pub easing: EasingConfig,

    #[serde(default)]
    pub color_blend: ColorBlendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub background: String,
    pub panel: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Fraction of the remaining distance covered per second of frame time.
    pub step_rate: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            step_rate: Spring::DEFAULT_STEP_RATE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EasingConfig {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Default for EasingConfig {
    fn default() -> Self {
        let [x1, y1, x2, y2] = CubicBezier::SNAP.control_points();
        Self { x1, y1, x2, y2 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorBlendConfig {
    pub from: [f32; 3],
    pub to: [f32; 3],
    pub space: ColorSpace,
}

impl Default for ColorBlendConfig {
    fn default() -> Self {
        Self {
            from: [0.0, 50.0, 50.0],
            to: [200.0, 30.0, 40.0],
            space: ColorSpace::Lab,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scene: default_scene(),
            duration: None,
            animate: true,
            fps_cap: default_fps_cap(),
            loops: default_loops(),
            margin: default_margin(),
            size: default_size(),
            theme: default_theme(),
            spring: SpringConfig::default(),
            easing: EasingConfig::default(),
            color_blend: ColorBlendConfig::default(),
        }
    }
}

fn default_scene() -> SceneKind {
    SceneKind::Spring
}

fn default_size() -> Size {
    Size {
        width: 512,
        height: 512,
    }
}

fn default_true() -> bool {
    true
}

fn default_fps_cap() -> u32 {
    60
}

fn default_loops() -> u32 {
    1
}

fn default_margin() -> f32 {
    25.0
}

fn default_theme() -> Theme {
    Theme {
        background: "#fafafa".to_string(),
        panel: "#e5b5b5".to_string(),
        foreground: "#ffffff".to_string(),
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        let config_path = config_dir.join("lerp-sketches").join("config.toml");

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// A duration that is not a positive number would never complete a cycle;
    /// it is replaced by the scene's default.
    pub fn settings(&self) -> Settings {
        let duration = match self.duration {
            Some(d) if d.is_finite() && d > 0.0 => d,
            Some(d) => {
                let fallback = self.scene.default_duration();
                warn!("duration {} is not a positive number of seconds, using {}", d, fallback);
                fallback
            }
            None => self.scene.default_duration(),
        };

        Settings {
            width: self.size.width,
            height: self.size.height,
            duration,
            animate: self.animate,
            fps: self.fps_cap.max(1),
        }
    }

    pub fn scene_params(&self) -> SceneParams {
        let e = &self.easing;
        let step_rate = match self.spring.step_rate {
            r if r.is_finite() && r >= 0.0 => r,
            r => {
                warn!(
                    "spring.step_rate {} must be zero or more, using {}",
                    r,
                    Spring::DEFAULT_STEP_RATE
                );
                Spring::DEFAULT_STEP_RATE
            }
        };

        SceneParams {
            step_rate,
            easing: CubicBezier::new(e.x1, e.y1, e.x2, e.y2),
            from_hsl: self.color_blend.from,
            to_hsl: self.color_blend.to,
            space: self.color_blend.space,
        }
    }

    /// Theme colors; any entry that fails to parse keeps its default.
    pub fn palette(&self) -> Palette {
        let fallback = Palette::default();
        let pick = |name: &str, hex: &str, default: Color| match Color::from_hex(hex) {
            Ok(c) => c,
            Err(e) => {
                warn!("theme.{}: {:#}, using default", name, e);
                default
            }
        };

        Palette {
            background: pick("background", &self.theme.background, fallback.background),
            panel: pick("panel", &self.theme.panel, fallback.panel),
            foreground: pick("foreground", &self.theme.foreground, fallback.foreground),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.scene, SceneKind::Spring);
        assert_eq!(config.size.width, 512);
        assert_eq!(config.loops, 1);
        assert_eq!(config.spring.step_rate, 4.0);
        assert_eq!(config.easing.x1, 0.85);
        assert_eq!(config.color_blend.space, ColorSpace::Lab);
        assert!(config.animate);
    }

    #[test]
    fn overrides_are_applied() {
        let config = Config::parse(
            r#"
            scene = "ColorBlend"
            duration = 4.5
            animate = false

            [size]
            width = 800
            height = 600

            [spring]
            step_rate = 8.0

            [color_blend]
            from = [10.0, 60.0, 50.0]
            to = [300.0, 60.0, 50.0]
            space = "lch"
            "#,
        )
        .unwrap();

        let settings = config.settings();
        assert_eq!(settings.width, 800);
        assert_eq!(settings.duration, 4.5);
        assert!(!settings.animate);

        let params = config.scene_params();
        assert_eq!(params.step_rate, 8.0);
        assert_eq!(params.space, ColorSpace::Lch);
        assert_eq!(params.from_hsl, [10.0, 60.0, 50.0]);
    }

    #[test]
    fn duration_defaults_per_scene() {
        let mut config = Config::default();
        config.scene = SceneKind::ColorBlend;
        assert_eq!(config.settings().duration, 3.0);
        config.scene = SceneKind::MapRange;
        assert_eq!(config.settings().duration, 5.0);
    }

    #[test]
    fn invalid_duration_falls_back() {
        let mut config = Config::default();
        config.scene = SceneKind::MapRange;
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            config.duration = Some(bad);
            assert_eq!(config.settings().duration, 5.0, "duration {}", bad);
        }
    }

    #[test]
    fn invalid_step_rate_falls_back() {
        let mut config = Config::parse("[spring]\nstep_rate = -2.0").unwrap();
        assert_eq!(config.scene_params().step_rate, Spring::DEFAULT_STEP_RATE);

        config.spring.step_rate = f32::NAN;
        assert_eq!(config.scene_params().step_rate, Spring::DEFAULT_STEP_RATE);

        config.spring.step_rate = 0.0;
        assert_eq!(config.scene_params().step_rate, 0.0);
    }

    #[test]
    fn bad_theme_color_falls_back() {
        let mut config = Config::default();
        config.theme.panel = "pink".to_string();
        let palette = config.palette();
        assert_eq!(palette.panel, Palette::default().panel);
        assert_eq!(palette.foreground, Color::WHITE);
    }

    #[test]
    fn unknown_scene_is_an_error() {
        assert!(Config::parse("scene = \"Fireworks\"").is_err());
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let back = Config::parse(&text).unwrap();
        assert_eq!(back.scene, config.scene);
        assert_eq!(back.margin, config.margin);
        assert_eq!(back.theme.panel, config.theme.panel);
    }
}
