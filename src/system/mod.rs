pub mod collector;
pub mod metrics;
pub mod process;
pub mod snapshot;
pub mod source;
