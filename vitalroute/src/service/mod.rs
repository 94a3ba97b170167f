//! High-level dispatch service assembly.
//!
//! [`DispatchService`] wires the location sampler to the facility refresh
//! controller and runs both as background tasks. Callers interact through
//! the shared status views and the refresh handle rather than with the
//! components directly.

mod config;
mod facade;

pub use config::ServiceConfig;
pub use facade::DispatchService;
