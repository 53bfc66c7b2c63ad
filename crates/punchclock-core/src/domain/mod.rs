//! Domain entities and value objects for attendance tracking.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
