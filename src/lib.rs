// Library surface for the terminal host, headless drivers and tests.
// The game loop and rendering live in main.rs / ui.rs.
pub mod app_dirs;
pub mod celebration;
pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod world;

pub use error::{DingError, Result};
pub use game::Game;
pub use session::{DisplayState, EndReason, Phase, Session};
