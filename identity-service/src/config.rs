use std::env;

use auth_core::keys::DEFAULT_MODULUS_BITS;
use auth_core::HashingParams;
use auth_core::SigningOptions;
use auth_core::VerificationOptions;
use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub token: TokenConfig,
    pub keys: KeyConfig,
    pub password: PasswordConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TokenConfig {
    /// Issuer stamped into every signed token.
    pub issuer: String,
    /// Audiences tokens are issued for and accepted from.
    pub audience: Vec<String>,
    /// Access token lifetime in minutes.
    pub expiry_minutes: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct KeyConfig {
    /// RSA modulus length for the process key pair.
    pub modulus_bits: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            keys: KeyConfig::default(),
            password: PasswordConfig::default(),
        }
    }
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: "identity-service".to_string(),
            audience: vec!["identity-service".to_string()],
            expiry_minutes: 10,
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            modulus_bits: DEFAULT_MODULUS_BITS,
        }
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        let params = HashingParams::standard();
        Self {
            memory_kib: params.memory_kib,
            iterations: params.iterations,
            parallelism: params.parallelism,
        }
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (TOKEN__ISSUER, KEYS__MODULUS_BITS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: TOKEN__ISSUER=my-service overrides token.issuer
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }

    /// Default signing options derived from the token section.
    pub fn signing_options(&self) -> SigningOptions {
        SigningOptions::new(
            self.token.issuer.as_str(),
            self.token.audience.clone(),
            Duration::minutes(self.token.expiry_minutes),
        )
    }

    /// Default verification options derived from the token section.
    pub fn verification_options(&self) -> VerificationOptions {
        VerificationOptions::new(self.token.issuer.as_str(), self.token.audience.clone())
    }

    /// Password hashing cost parameters from the password section.
    pub fn hashing_params(&self) -> HashingParams {
        HashingParams {
            memory_kib: self.password.memory_kib,
            iterations: self.password.iterations,
            parallelism: self.password.parallelism,
        }
    }
}
