//! Decoder for identity tokens presented at login.

use super::IdentityClaims;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use punchclock_config::SecurityConfig;
use punchclock_core::{PunchError, PunchResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// Decodes identity tokens and extracts the caller's claims.
///
/// With `verify_signature` on, tokens must carry a valid HS256 signature made
/// with the configured secret and an `exp` claim. With it off, the payload is
/// decoded as-is; `exp` is still enforced when present.
#[derive(Clone)]
pub struct IdentityTokenDecoder {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl IdentityTokenDecoder {
    /// Creates a new decoder.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.token_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.token_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;

        if config.verify_signature {
            validation.set_required_spec_claims(&["exp"]);
        } else {
            validation.insecure_disable_signature_validation();
            validation.set_required_spec_claims::<&str>(&[]);
        }

        match &config.issuer {
            Some(issuer) => validation.set_issuer(&[issuer]),
            None => validation.iss = None,
        }
        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Decodes `token` and returns its claims.
    pub fn decode(&self, token: &str) -> PunchResult<IdentityClaims> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PunchError::InvalidToken("Token is empty".to_string()));
        }

        let data = decode::<IdentityClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Identity token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => PunchError::TokenExpired,
                    ErrorKind::InvalidSignature => {
                        PunchError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        PunchError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        PunchError::InvalidToken("Invalid token audience".to_string())
                    }
                    ErrorKind::MissingRequiredClaim(claim) => {
                        PunchError::InvalidToken(format!("Missing required claim: {claim}"))
                    }
                    _ => PunchError::InvalidToken(e.to_string()),
                }
            })?;

        let claims = data.claims;
        if claims.email().trim().is_empty() {
            return Err(PunchError::InvalidToken(
                "Token carries no email claim".to_string(),
            ));
        }

        debug!(sub = %claims.sub, "Decoded identity token");
        Ok(claims)
    }

    /// Signs `claims` with the configured secret (HS256).
    pub fn issue(&self, claims: &IdentityClaims) -> PunchResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| PunchError::Internal(format!("Failed to sign identity token: {e}")))
    }

    /// Returns true when signatures are checked.
    #[must_use]
    pub fn verifies_signature(&self) -> bool {
        self.config.verify_signature
    }
}

impl std::fmt::Debug for IdentityTokenDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityTokenDecoder")
            .field("verify_signature", &self.config.verify_signature)
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}
