//! # Brandcast Desktop
//!
//! Keyboard-driven terminal dashboard: pick a target brand, optionally a
//! competitor to compare against, and run the next-day forecast. Cards show
//! the forecast, best posting day and sentiment mix beside a live chart.

pub mod app;
pub mod event;
pub mod ui;

pub use app::{App, Command, Focus};
pub use event::{handle_key_event, poll_event};
pub use ui::draw_ui;
