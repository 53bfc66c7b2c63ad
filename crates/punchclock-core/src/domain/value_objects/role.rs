//! User role value object and the hourly rates attached to roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A user's role. The role decides the hourly rate used for salaries.
///
/// Role strings that are not recognized are kept verbatim so that they
/// survive a database round trip; they are paid the default rate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    /// Business owner.
    Owner,
    /// Shop manager.
    Manager,
    /// Regular staff.
    #[default]
    Staff,
    /// Hourly part-time staff.
    PartTime,
    /// Any role string this service does not know about.
    Other(String),
}

impl Role {
    /// Parses a role string. Never fails; see [`Role::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "owner" => Self::Owner,
            "manager" => Self::Manager,
            "staff" | "employee" => Self::Staff,
            "parttime" | "part_time" | "part-time" => Self::PartTime,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    /// Returns the canonical string stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Owner => "owner",
            Self::Manager => "manager",
            Self::Staff => "staff",
            Self::PartTime => "parttime",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Hourly rates in JPY per role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HourlyRates {
    pub owner: i64,
    pub manager: i64,
    pub staff: i64,
    pub part_time: i64,
    /// Rate for roles without an entry of their own.
    pub default: i64,
}

impl Default for HourlyRates {
    fn default() -> Self {
        Self {
            owner: 3000,
            manager: 2000,
            staff: 1500,
            part_time: 1200,
            default: 1000,
        }
    }
}

impl HourlyRates {
    /// Returns the hourly rate for a role.
    #[must_use]
    pub const fn rate_for(&self, role: &Role) -> i64 {
        match role {
            Role::Owner => self.owner,
            Role::Manager => self.manager,
            Role::Staff => self.staff,
            Role::PartTime => self.part_time,
            Role::Other(_) => self.default,
        }
    }

    /// Iterates over every configured rate with its name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, i64)> {
        [
            ("owner", self.owner),
            ("manager", self.manager),
            ("staff", self.staff),
            ("part_time", self.part_time),
            ("default", self.default),
        ]
        .into_iter()
    }
}

/// Salary in whole JPY for `minutes` worked at `hourly_rate`, rounded half up.
#[must_use]
pub const fn salary_for_minutes(minutes: i64, hourly_rate: i64) -> i64 {
    if minutes <= 0 {
        return 0;
    }
    (minutes * hourly_rate + 30) / 60
}

/// Minutes expressed as hours, rounded to two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn minutes_to_hours(minutes: i64) -> f64 {
    (minutes as f64 / 60.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::parse("Owner"), Role::Owner);
        assert_eq!(Role::parse("PART-TIME"), Role::PartTime);
        assert_eq!(Role::parse("parttime"), Role::PartTime);
        assert_eq!(Role::parse("Employee"), Role::Staff);
        assert_eq!(Role::parse(" manager "), Role::Manager);
        assert_eq!(Role::parse("Intern"), Role::Other("Intern".to_string()));
    }

    #[test]
    fn test_role_round_trips_through_string() {
        let role: Role = String::from("Contractor").into();
        let stored: String = role.into();
        assert_eq!(stored, "Contractor");
        assert_eq!(Role::PartTime.to_string(), "parttime");
    }

    #[test]
    fn test_role_serde() {
        let role: Role = serde_json::from_str("\"manager\"").unwrap();
        assert_eq!(role, Role::Manager);
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"owner\"");
    }

    #[test]
    fn test_rate_lookup_by_stored_role() {
        let rates = HourlyRates::default();
        let paid: Vec<(&str, i64)> = ["owner", "manager", "staff", "parttime", "other"]
            .into_iter()
            .map(|s| (s, rates.rate_for(&Role::parse(s))))
            .collect();
        assert_eq!(
            paid,
            vec![
                ("owner", 3000),
                ("manager", 2000),
                ("staff", 1500),
                ("parttime", 1200),
                ("other", 1000),
            ]
        );
    }

    #[test]
    fn test_salary_rounding() {
        assert_eq!(salary_for_minutes(60, 1500), 1500);
        assert_eq!(salary_for_minutes(480, 1000), 8000);
        // 7 minutes at 1000/h is 116.67
        assert_eq!(salary_for_minutes(7, 1000), 117);
        // 1 minute at 1000/h is 16.67
        assert_eq!(salary_for_minutes(1, 1000), 17);
        assert_eq!(salary_for_minutes(0, 3000), 0);
        assert_eq!(salary_for_minutes(-5, 3000), 0);
    }

    #[test]
    fn test_minutes_to_hours() {
        assert!((minutes_to_hours(90) - 1.5).abs() < f64::EPSILON);
        assert!((minutes_to_hours(100) - 1.67).abs() < f64::EPSILON);
        assert!((minutes_to_hours(0)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rates_deserialize_with_defaults() {
        let rates: HourlyRates = serde_json::from_str(r#"{"manager": 2200}"#).unwrap();
        assert_eq!(rates.manager, 2200);
        assert_eq!(rates.staff, 1500);
        assert_eq!(rates.owner, 3000);
    }
}
