//! Data Transfer Objects (DTOs).

mod attendance_dto;
mod auth_dto;
mod session_dto;
mod user_dto;

pub use attendance_dto::*;
pub use auth_dto::*;
pub use session_dto::*;
pub use user_dto::*;
