use std::env;

pub const API_KEY_VAR: &str = "AMADEUS_API_KEY";
pub const API_SECRET_VAR: &str = "AMADEUS_API_SECRET";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

/// Where the client gets its API key pair. Consulted on every token
/// exchange, so a fixed environment is picked up without a restart.
pub trait CredentialSource: Send + Sync {
    fn credentials(&self) -> Option<Credentials>;
}

/// Reads the key pair from environment variables.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    key_var: String,
    secret_var: String,
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self::with_vars(API_KEY_VAR, API_SECRET_VAR)
    }

    pub fn with_vars(key_var: &str, secret_var: &str) -> Self {
        Self {
            key_var: key_var.to_string(),
            secret_var: secret_var.to_string(),
        }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for EnvCredentials {
    fn credentials(&self) -> Option<Credentials> {
        // Set-but-empty counts as missing
        let api_key = env::var(&self.key_var).ok().filter(|v| !v.is_empty())?;
        let api_secret = env::var(&self.secret_var).ok().filter(|v| !v.is_empty())?;
        Some(Credentials { api_key, api_secret })
    }
}

/// Fixed key pair, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<Credentials>);

impl StaticCredentials {
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        Self(Some(Credentials {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        }))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredentials {
    fn credentials(&self) -> Option<Credentials> {
        self.0.clone()
    }
}
