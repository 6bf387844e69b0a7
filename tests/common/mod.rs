#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! - `fixtures`: In-memory and on-disk unit fixtures
//! - `probe`: A fallback loader that records the ownership slot on every call

pub mod fixtures;
pub mod probe;

pub use fixtures::{memory_fixture, unit, write_config, write_unit, Fixture};
pub use probe::OwnershipProbe;
