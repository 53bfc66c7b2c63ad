//! # Punchclock Core
//!
//! Core types, traits, and error definitions for the Punchclock attendance
//! service. Every other crate in the workspace builds on the error type, ids,
//! pagination, JST clock, and domain entities defined here.

pub mod clock;
pub mod domain;
pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod traits;
pub mod validation;

pub use clock::*;
pub use domain::*;
pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;
