//! # Punchclock Service
//!
//! Application services for the attendance API and the key-value session
//! store they share.
//!
//! ```text
//! AuthService ───────┬─> SessionService ─> SessionStore (Redis)
//! AttendanceService ─┤
//! UserService ───────┴─> repositories (MySQL)
//! ```

pub mod attendance_service;
pub mod auth_service;
pub mod dto;
pub mod session;
pub mod session_service;
pub mod user_service;

pub use attendance_service::*;
pub use auth_service::*;
pub use dto::*;
pub use session::*;
pub use session_service::*;
pub use user_service::*;
