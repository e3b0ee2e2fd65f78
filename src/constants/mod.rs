//! Tuning constants organized by domain.
//!
//! Centralizing magic numbers makes tuning easier and documents intent.
//! These are the defaults; most of them can be overridden from the config file.

mod camera;
mod input;
mod window;

pub use camera::*;
pub use input::*;
pub use window::*;
