//! Domain types: payments, windows, and limit configurations.

pub mod limit;
pub mod payment;
pub mod ports;
pub mod presets;
pub mod window;
