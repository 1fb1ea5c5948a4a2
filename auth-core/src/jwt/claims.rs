use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim names with a standardized meaning.
///
/// Private payloads must never overwrite these; the codec rejects a sign
/// request whose private claim map collides with any of them.
pub const RESERVED_CLAIMS: [&str; 7] = ["sub", "exp", "iat", "nbf", "iss", "aud", "jti"];

/// Token claims: reserved RFC 7519 fields plus arbitrary private claims.
///
/// Reserved timing and policy fields (`iss`, `aud`, `iat`, `exp`) are stamped
/// by the codec from the signing options at sign time; callers populate the
/// subject, optional token id, and private claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (user/entity identifier)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Not before (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Intended recipients
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aud: Option<Vec<String>>,

    /// Token ID (unique per issued token)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,

    /// Private claims (flattened into the token payload)
    #[serde(flatten)]
    pub private: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set token ID.
    pub fn with_token_id(mut self, jti: impl ToString) -> Self {
        self.jti = Some(jti.to_string());
        self
    }

    /// Add a private claim.
    ///
    /// Reserved names are not checked here; the codec rejects them when the
    /// claims are signed.
    pub fn with_claim(mut self, name: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.private.insert(name.to_string(), json_value);
        }
        self
    }

    /// Subject, if set.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    /// Look up a private claim by name.
    pub fn claim(&self, name: &str) -> Option<&serde_json::Value> {
        self.private.get(name)
    }

    /// First reserved name found in the private claim map, if any.
    pub(crate) fn reserved_collision(&self) -> Option<&str> {
        RESERVED_CLAIMS
            .iter()
            .copied()
            .find(|name| self.private.contains_key(*name))
    }

    /// Check if the claims are expired at the given Unix timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(false, |exp| exp < current_timestamp)
    }
}

impl Default for Claims {
    fn default() -> Self {
        Self {
            sub: None,
            exp: None,
            iat: None,
            nbf: None,
            iss: None,
            aud: None,
            jti: None,
            private: HashMap::new(),
        }
    }
}
