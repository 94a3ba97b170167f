//! Location sampling: turning a noisy position stream into significant movement events.
//!
//! A continuous position source (GPS adapter, simulator, replay) pushes raw
//! fixes and failures into the [`LocationSampler`], which applies a geodesic
//! significance gate and re-broadcasts only the fixes that represent real
//! movement. Downstream consumers (the facility refresh controller, UIs,
//! tests) subscribe to the accepted stream and never see jitter-level
//! updates.
//!
//! # Architecture
//!
//! ```text
//! PositionSource ──mpsc PositionEvent──> LocationSampler ──broadcast──> subscribers
//!                                             │
//!                                             └──> SharedPositionStatus (snapshots)
//! ```
//!
//! The sampler owns `last_accepted` exclusively; everyone else reads it
//! through [`SharedPositionStatus`] snapshots. Source failures are classified
//! into [`PositionError`] and recorded without disturbing the last-known-good
//! fix.

mod error;
mod filter;
mod sample;
mod sampler;
mod source;
mod status;

pub use error::PositionError;
pub use filter::{Significance, SignificanceFilter};
pub use sample::LocationSample;
pub use sampler::{LocationSampler, SamplerConfig, SamplerStats, SamplerStatsSnapshot};
pub use source::{PositionEvent, PositionSource, WatchOptions};
pub use status::{PositionStatusSnapshot, SharedPositionStatus};
