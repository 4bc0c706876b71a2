//! Core domain types
//!
//! Typed views of the entities the discovery controller exposes: hosts,
//! subsystems, controller instances, and the zoning hierarchy.

pub mod types;

pub use types::*;
