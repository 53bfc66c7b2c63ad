//! Client-side account profile carried by a session.

use serde::{Deserialize, Serialize};

/// Profile the client's identity provider reports for the signed-in account.
///
/// Every field is optional on the wire; `null` and missing are the same.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// E.164 phone number, e.g. `+16505550101`.
    #[serde(default)]
    pub phone_number: Option<String>,

    #[serde(default, rename = "photoURL", alias = "photoUrl")]
    pub photo_url: Option<String>,

    /// Provider used to authenticate, e.g. `google.com`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub provider_id: String,

    /// The provider's user id.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub uid: String,
}

impl UserProfile {
    /// Returns the email, ignoring blanks.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref().map(str::trim).filter(|e| !e.is_empty())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
