//! Progress reporter adapters.

pub mod hub;
pub mod log;

pub use hub::EventHub;
pub use log::LogReporter;
