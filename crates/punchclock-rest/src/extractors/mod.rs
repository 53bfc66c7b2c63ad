//! Custom Axum extractors.

mod bearer;
mod optional_json;
mod validated;

pub use bearer::*;
pub use optional_json::*;
pub use validated::*;
