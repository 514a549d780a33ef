//! mainframe: a terminal learning environment, starting with its menus
//! and persisted settings.

pub mod config;
pub mod logging;
pub mod tui;
