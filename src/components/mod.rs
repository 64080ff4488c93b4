pub mod countdown_host;

pub use countdown_host::{CountdownHost, CountdownHostProps};
