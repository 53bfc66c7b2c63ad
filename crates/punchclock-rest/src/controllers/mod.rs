//! REST API controllers.

pub mod attendance_controller;
pub mod auth_controller;
pub mod health_controller;
pub mod session_controller;
pub mod user_controller;

pub use health_controller::*;
