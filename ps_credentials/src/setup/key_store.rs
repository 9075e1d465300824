//! Persistence of issuer key pairs.

use ark_ec::pairing::Pairing;
use ark_std::rand::RngCore;
use log::{debug, info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{KeyPair, SetupParams};
use crate::{error::CredentialError, serialization::JsonWire};

/// Storage for a single issuer key pair.
pub trait KeyStore<E: Pairing> {
    /// Returns the stored key pair or `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<KeyPair<E>>, CredentialError>;

    fn store(&self, key_pair: &KeyPair<E>) -> Result<(), CredentialError>;

    /// Loads the stored key pair, generating and storing a fresh one if absent. A stored key pair
    /// for a different number of attributes is an error.
    fn load_or_create<R: RngCore>(
        &self,
        rng: &mut R,
        attribute_count: usize,
        params: &SetupParams<E>,
    ) -> Result<KeyPair<E>, CredentialError> {
        match self.load()? {
            Some(key_pair) if key_pair.r == attribute_count && key_pair.is_consistent() => {
                debug!("loaded issuer key pair for {} attributes", attribute_count);
                Ok(key_pair)
            }
            Some(key_pair) => {
                let found = if key_pair.r == attribute_count {
                    key_pair.public_key.attribute_count()
                } else {
                    key_pair.r
                };
                warn!(
                    "stored key pair supports {} attributes, {} requested",
                    found, attribute_count
                );
                Err(CredentialError::KeyPairCapacityMismatch {
                    expected: attribute_count,
                    found,
                })
            }
            None => {
                let key_pair = KeyPair::generate(rng, attribute_count, params);
                self.store(&key_pair)?;
                Ok(key_pair)
            }
        }
    }
}

/// Keeps the key pair as a JSON document in a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<E: Pairing> KeyStore<E> for FileKeyStore {
    fn load(&self) -> Result<Option<KeyPair<E>>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path)?;

        KeyPair::from_json(&json).map(Some)
    }

    fn store(&self, key_pair: &KeyPair<E>) -> Result<(), CredentialError> {
        fs::write(&self.path, key_pair.to_json()?)?;
        info!("stored issuer key pair in {}", self.path.display());

        Ok(())
    }
}
