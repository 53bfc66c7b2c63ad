//! # Punchclock Repository
//!
//! Data access for users, the punch log and work intervals.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository> / Arc<dyn WorkTimeRepository> / ...
//! MySql*Repository          (SQLx, parameterized queries)
//!   ↓
//! MySQL  (users, AttendanceRecords, WorkTimeManagement)
//! ```
//!
//! With the `testing` feature, `InMemory*Repository` implementations of the
//! same traits are available for service and REST tests.

pub mod mysql;
pub mod pool;
pub mod traits;

#[cfg(any(test, feature = "testing"))]
pub mod memory;

pub use mysql::*;
pub use pool::*;
pub use traits::*;

#[cfg(any(test, feature = "testing"))]
pub use memory::*;
