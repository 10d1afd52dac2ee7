//! Linear interpolation sketches: scalar and array lerp, cubic bezier
//! easing, color space conversion, and a small frame driver that plays
//! scenes built on them.

pub mod app;
pub mod config;
pub mod driver;
pub mod gfx;
pub mod scenes;
