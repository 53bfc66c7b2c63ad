//! Identity token claims.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// The `aud` claim, which OpenID providers send as a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

impl Audience {
    /// Returns true if `expected` is among the audiences.
    #[must_use]
    pub fn contains(&self, expected: &str) -> bool {
        match self {
            Self::One(aud) => aud == expected,
            Self::Many(auds) => auds.iter().any(|a| a == expected),
        }
    }
}

/// Claims carried by an identity token.
///
/// Only `email` is needed to identify a user; everything else is optional
/// so tokens from different providers decode alike.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Subject: the provider's user identifier.
    #[serde(default)]
    pub sub: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,

    /// Expiration, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl IdentityClaims {
    /// Creates claims for `email` that expire after `ttl`.
    #[must_use]
    pub fn new(sub: impl Into<String>, email: impl Into<String>, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            email: Some(email.into()),
            iat: Some(now.timestamp()),
            exp: Some((now + ttl).timestamp()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the issuer.
    #[must_use]
    pub fn with_issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = Some(iss.into());
        self
    }

    /// Sets a single audience.
    #[must_use]
    pub fn with_audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = Some(Audience::One(aud.into()));
        self
    }

    /// Returns the email claim, or an empty string.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    /// Returns the expiration as a timestamp.
    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audience_forms() {
        let one: Audience = serde_json::from_str("\"punchclock\"").unwrap();
        assert!(one.contains("punchclock"));

        let many: Audience = serde_json::from_str(r#"["web", "punchclock"]"#).unwrap();
        assert!(many.contains("punchclock"));
        assert!(!many.contains("mobile"));
    }

    #[test]
    fn test_claims_decode_with_missing_fields() {
        let claims: IdentityClaims = serde_json::from_str(r#"{"email": "a@example.com"}"#).unwrap();
        assert_eq!(claims.email(), "a@example.com");
        assert!(claims.exp.is_none());
        assert!(claims.sub.is_empty());
    }

    #[test]
    fn test_claims_builder() {
        let claims = IdentityClaims::new("123", "a@example.com", Duration::hours(1))
            .with_name("Aiko")
            .with_issuer("https://accounts.example.com")
            .with_audience("punchclock");
        assert_eq!(claims.name.as_deref(), Some("Aiko"));
        assert!(claims.expires_at().unwrap() > Utc::now());
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("email_verified").is_none());
    }
}
