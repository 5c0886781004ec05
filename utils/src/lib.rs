//! Shared utilities for the price oracle.

pub mod logging;
pub mod period;

pub use logging::{init_logging, LogFormat};
pub use period::{is_period_last_block, window_progress};
