//! Window and background defaults.

/// Default window title
pub const WINDOW_DEFAULT_TITLE: &str = "Infinite background shader";
/// Default window width
pub const WINDOW_DEFAULT_WIDTH: u32 = 1280;
/// Default window height
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;

/// Background image loaded at startup
pub const BACKGROUND_DEFAULT_PATH: &str = "assets/background.png";
/// Side length of the generated fallback background
pub const BACKGROUND_FALLBACK_SIZE: u32 = 256;
/// Checker cell size of the fallback background
pub const BACKGROUND_FALLBACK_CELL: u32 = 32;

/// Config file read when no path is given on the command line
pub const CONFIG_DEFAULT_PATH: &str = "infinite.json";
