//! # User Interface
//!
//! Colored terminal output with clickable file links.

pub mod log;

pub use log::{debug, error, format_size, header, info, path_link, print_logo, shorten, success, warn, Log};
