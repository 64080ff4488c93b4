//! Test and section countdown for the exam item page.
//!
//! Ticks once a second, keeps the on-page clocks current, raises the
//! five-minute warning and auto-submits the answer form when time runs out.

pub mod components;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod page;
pub mod state;
pub mod util;

pub use config::TimerConfig;
pub use error::TimerError;
pub use model::{CountdownState, TickEffect, TimerFlag, TimerKind};
pub use util::format_duration;
