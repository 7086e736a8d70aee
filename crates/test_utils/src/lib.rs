//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! HubSpot connector test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built request payloads and remote-object snapshots
//! - `stub_hubspot`: In-memory HubSpot API emulation on a local port

pub mod fixtures;
pub mod stub_hubspot;

pub use fixtures::*;
pub use stub_hubspot::*;
