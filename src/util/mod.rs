//! Utility functions for common operations.
//!
//! - **Link validation**: only http(s) links reach the system browser
//! - **Text processing**: terminal-safe sanitizing and width-aware truncation

mod text;
mod url_validator;

pub use text::{strip_control_chars, truncate_to_width};
pub use url_validator::{is_displayable_image, validate_url_for_open, LinkError};
