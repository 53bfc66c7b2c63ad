//! Value objects.

mod email;
mod profile;
mod punch_kind;
mod role;

pub use email::{Email, EmailError};
pub use profile::UserProfile;
pub use punch_kind::PunchKind;
pub use role::{minutes_to_hours, salary_for_minutes, HourlyRates, Role};
