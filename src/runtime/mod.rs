//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler and window management
//! - `input` - winit event to [`stat_tables::event::InputEvent`] mapping
//! - `renderer` - softbuffer surface and back buffer

pub mod app;
pub mod input;
pub mod renderer;

pub use app::App;
