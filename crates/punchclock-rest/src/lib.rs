//! # Punchclock REST
//!
//! HTTP surface of the attendance service: users, sessions, punches,
//! records, login and health checks, plus the OpenAPI document.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
