//! The four OAuth secrets issued by BrickLink for a registered consumer.

use crate::error::{BricklinkError, Result};
use std::fmt;

/// Consumer and access-token credentials.
///
/// Only constructible through [`Credentials::new`], so a value of this type always
/// carries four non-empty secrets.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    consumer_key: String,
    consumer_secret: String,
    token_value: String,
    token_secret: String,
}

impl Credentials {
    /// Validates and bundles the four secrets.
    pub fn new(
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
        token_value: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Result<Self> {
        let credentials = Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token_value: token_value.into(),
            token_secret: token_secret.into(),
        };

        for (name, value) in [
            ("consumer_key", &credentials.consumer_key),
            ("consumer_secret", &credentials.consumer_secret),
            ("token_value", &credentials.token_value),
            ("token_secret", &credentials.token_secret),
        ] {
            if value.trim().is_empty() {
                return Err(BricklinkError::configuration(format!("{} is missing or empty", name)));
            }
        }

        Ok(credentials)
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }

    pub fn consumer_secret(&self) -> &str {
        &self.consumer_secret
    }

    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    pub fn token_secret(&self) -> &str {
        &self.token_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token_value", &self.token_value)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}
