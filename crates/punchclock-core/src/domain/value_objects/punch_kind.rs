//! Punch direction.

use crate::PunchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a punch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PunchKind {
    /// Clock in: opens a work interval.
    In,
    /// Clock out: closes the open work interval.
    Out,
}

impl PunchKind {
    /// Returns the value stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

impl fmt::Display for PunchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PunchKind {
    type Err = PunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in" | "clock_in" => Ok(Self::In),
            "out" | "clock_out" => Ok(Self::Out),
            other => Err(PunchError::validation(format!("Unknown punch kind: {other}"))),
        }
    }
}
