pub mod inputs;
pub mod scheduler;

pub use inputs::PageInputs;
pub use scheduler::{IntervalScheduler, Scheduler};
