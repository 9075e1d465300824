//! Issuer configuration.

use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::error::CredentialError;

/// Configuration of an issuing service, read from JSON such as
/// `{"attributeCount": 6, "keyFile": "issuer-keys.json", "issuerAttributes": ["bahhh", "yeah"]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuerConfig {
    /// Number of attributes of every issued credential, the user's and the issuer's together.
    pub attribute_count: usize,
    /// Where the key pair is persisted. Keys are generated per process when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    /// Attributes the issuer adds to every credential, taking its trailing slots.
    #[serde(default)]
    pub issuer_attributes: Vec<String>,
}

impl IssuerConfig {
    pub fn new(attribute_count: usize) -> Self {
        Self {
            attribute_count,
            key_file: None,
            issuer_attributes: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CredentialError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| CredentialError::InvalidConfig(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CredentialError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), CredentialError> {
        if self.attribute_count == 0 {
            return Err(CredentialError::InvalidConfig(
                "attributeCount must be positive".into(),
            ));
        }
        if self.issuer_attributes.len() > self.attribute_count {
            return Err(CredentialError::InvalidConfig(format!(
                "{} issuer attributes don't fit in {} attributes",
                self.issuer_attributes.len(),
                self.attribute_count
            )));
        }

        Ok(())
    }
}
