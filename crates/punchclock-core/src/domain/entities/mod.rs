//! Domain entities.

mod attendance_record;
mod session;
mod user;
mod work_time;

pub use attendance_record::AttendanceRecord;
pub use session::Session;
pub use user::User;
pub use work_time::WorkTime;
