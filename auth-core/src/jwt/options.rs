use chrono::Duration;
use jsonwebtoken::Algorithm;

/// Options applied when signing a token.
///
/// Bound once per service instance; call sites override individual fields
/// through [`SigningOverrides`] without mutating the defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct SigningOptions {
    /// Identifier of the entity creating the token.
    pub issuer: String,
    /// Intended recipients of the token.
    pub audience: Vec<String>,
    /// Token lifetime; `exp` is derived as `iat + expires_in`.
    pub expires_in: Duration,
    /// Signature algorithm. Asymmetric signing only.
    pub algorithm: Algorithm,
}

impl SigningOptions {
    /// Signing options with the RS256 algorithm.
    pub fn new(
        issuer: impl Into<String>,
        audience: Vec<String>,
        expires_in: Duration,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience,
            expires_in,
            algorithm: Algorithm::RS256,
        }
    }

    /// Merge caller overrides into these defaults, field by field.
    ///
    /// Override wins; `self` is left untouched.
    pub fn merge(&self, overrides: &SigningOverrides) -> SigningOptions {
        SigningOptions {
            issuer: overrides.issuer.clone().unwrap_or_else(|| self.issuer.clone()),
            audience: overrides
                .audience
                .clone()
                .unwrap_or_else(|| self.audience.clone()),
            expires_in: overrides.expires_in.unwrap_or(self.expires_in),
            algorithm: overrides.algorithm.unwrap_or(self.algorithm),
        }
    }

    /// Verification options accepting exactly the tokens these signing
    /// options produce.
    pub fn verification(&self) -> VerificationOptions {
        VerificationOptions {
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
            algorithms: vec![self.algorithm],
        }
    }
}

/// Per-call overrides for [`SigningOptions`]. Unset fields keep the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SigningOverrides {
    pub issuer: Option<String>,
    pub audience: Option<Vec<String>>,
    pub expires_in: Option<Duration>,
    pub algorithm: Option<Algorithm>,
}

impl SigningOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn audience(mut self, audience: Vec<String>) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn expires_in(mut self, expires_in: Duration) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }
}

/// Options applied when verifying a token.
///
/// Unlike [`SigningOptions`], the algorithm field is an allow-list: a token
/// whose header names any other algorithm is rejected outright.
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationOptions {
    /// Issuer the token must carry.
    pub issuer: String,
    /// Expected audiences; the token's audience set must intersect these.
    pub audience: Vec<String>,
    /// Accepted signature algorithms.
    pub algorithms: Vec<Algorithm>,
}

impl VerificationOptions {
    /// Verification options accepting RS256 only.
    pub fn new(issuer: impl Into<String>, audience: Vec<String>) -> Self {
        Self {
            issuer: issuer.into(),
            audience,
            algorithms: vec![Algorithm::RS256],
        }
    }

    /// Merge caller overrides into these defaults, field by field.
    ///
    /// Override wins; `self` is left untouched.
    pub fn merge(&self, overrides: &VerificationOverrides) -> VerificationOptions {
        VerificationOptions {
            issuer: overrides.issuer.clone().unwrap_or_else(|| self.issuer.clone()),
            audience: overrides
                .audience
                .clone()
                .unwrap_or_else(|| self.audience.clone()),
            algorithms: overrides
                .algorithms
                .clone()
                .unwrap_or_else(|| self.algorithms.clone()),
        }
    }
}

/// Per-call overrides for [`VerificationOptions`]. Unset fields keep the
/// default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationOverrides {
    pub issuer: Option<String>,
    pub audience: Option<Vec<String>>,
    pub algorithms: Option<Vec<Algorithm>>,
}

impl VerificationOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    pub fn audience(mut self, audience: Vec<String>) -> Self {
        self.audience = Some(audience);
        self
    }

    pub fn algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = Some(algorithms);
        self
    }
}
