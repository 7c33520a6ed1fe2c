//! Recent files domain module

mod duration;

pub use duration::{Duration, DEFAULT_LOOKBACK_MINUTES};
