//! Route targeting and navigation handoff.
//!
//! Tracks which facility, if any, is the current destination and hands
//! confirmed routes to an external navigation app. The refresh controller
//! owns a [`RouteSelection`] and keeps it consistent with the facility list;
//! this module defines the state machine and the handoff seam.

mod handoff;
mod selection;

pub use handoff::{directions_url, DeepLinkHandoff, NavigationHandoff};
pub use selection::{RouteSelection, SelectError};
