pub mod anim;
pub mod color;
pub mod draw;
pub mod math;
