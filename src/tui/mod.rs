//! TUI module for the interactive menu interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (App, Screen, Action, Transition)
//! - `input`: Single-line text capture used by the modal dialogs
//! - `keymap`: Raw keys to semantic actions
//! - `update`: Pure transitions plus the navigation controller
//! - `theme`: Colors and styles
//! - `view`: Pure rendering
//! - `run`: Effects (terminal lifecycle, event loop)

pub mod input;
pub mod keymap;
pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
