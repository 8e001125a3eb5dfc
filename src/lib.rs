//! Matching exercise backend.
//!
//! The session model (`exercise`, `domain`, `gesture`, `connectors`) has no
//! I/O and no rendering; the rest is the host service that drives it.

pub mod config;
pub mod connectors;
pub mod domain;
pub mod error;
pub mod exercise;
pub mod gesture;
pub mod logic;
pub mod protocol;
pub mod routes;
pub mod seeds;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod util;
