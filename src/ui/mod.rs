//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `render` - Screen layout dispatch
//! - `helpers` - Background load spawning and link opening
//! - `tabs` - Category tab bar widget
//! - `cards` - News card list widget
//! - `status` - Status bar widget

mod cards;
mod helpers;
mod input;
mod loop_runner;
mod render;
mod status;
mod tabs;

pub use loop_runner::{run, Action};
