//! TUI module for the study client.

mod app;
pub mod theme;
mod widgets;

pub use app::App;
