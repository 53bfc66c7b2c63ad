//! # Punchclock Server Library
//!
//! Wiring of configuration, storage and services into the HTTP application,
//! shared by the binary and its tests.

pub mod startup;
pub mod wiring;
