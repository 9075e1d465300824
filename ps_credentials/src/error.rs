use alloc::string::{String, ToString};
use ark_serialize::SerializationError;
use core::fmt;
use schnorr_pok::error::SchnorrError;

use crate::signature::PSError;

/// An error originated from the credential protocol: issuance, showing, verification, key storage or
/// the transport boundary.
#[derive(Debug)]
pub enum CredentialError {
    /// A stored key pair supports a different number of attributes than requested.
    KeyPairCapacityMismatch {
        expected: usize,
        found: usize,
    },
    /// The index of the pseudonym key isn't among the hidden attributes.
    InvalidKeyIndex(usize),
    /// The commitment proves knowledge of a number of attributes that doesn't add up with the issuer's attributes.
    AttributeCountMismatch {
        received: usize,
        expected: usize,
    },
    InvalidAttributeCount {
        received: usize,
        expected: usize,
    },
    AttributeIndexOutOfBounds {
        index: usize,
        count: usize,
    },
    IssuerAttributesExceedCapacity {
        received: usize,
        capacity: usize,
    },
    /// Unblinding was requested but no commitment is waiting for a blind signature.
    NoPendingCommitment,
    InvalidConfig(String),
    /// The proof of knowledge attached to a commitment didn't verify.
    InvalidCommitment,
    /// An unblinded signature doesn't verify over the credential's attributes.
    InvalidCredential,
    MalformedPayload(String),
    PSError(PSError),
    Schnorr(SchnorrError),
    Serialization(SerializationError),
    Io(String),
}

impl fmt::Display for CredentialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyPairCapacityMismatch { expected, found } => write!(
                f,
                "stored key pair supports {} attributes but {} were requested",
                found, expected
            ),
            Self::InvalidKeyIndex(idx) => write!(f, "invalid key index {}", idx),
            Self::AttributeCountMismatch { received, expected } => write!(
                f,
                "attribute count mismatch: commitment covers {} attributes, expected {}",
                received, expected
            ),
            Self::InvalidAttributeCount { received, expected } => write!(
                f,
                "invalid attribute count: received {}, expected {}",
                received, expected
            ),
            Self::AttributeIndexOutOfBounds { index, count } => write!(
                f,
                "attribute index {} is out of bounds for {} attributes",
                index, count
            ),
            Self::IssuerAttributesExceedCapacity { received, capacity } => write!(
                f,
                "{} issuer attributes exceed the key capacity of {}",
                received, capacity
            ),
            Self::NoPendingCommitment => write!(f, "no pending commitment to unblind"),
            Self::InvalidConfig(msg) => write!(f, "invalid configuration: {}", msg),
            Self::InvalidCommitment => write!(f, "invalid commitment"),
            Self::InvalidCredential => write!(f, "invalid credential"),
            Self::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            Self::PSError(e) => write!(f, "signature error: {:?}", e),
            Self::Schnorr(e) => write!(f, "schnorr proof error: {}", e),
            Self::Serialization(e) => write!(f, "serialization error: {}", e),
            Self::Io(msg) => write!(f, "i/o error: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CredentialError {}

impl From<PSError> for CredentialError {
    fn from(e: PSError) -> Self {
        Self::PSError(e)
    }
}

impl From<SchnorrError> for CredentialError {
    fn from(e: SchnorrError) -> Self {
        Self::Schnorr(e)
    }
}

impl From<SerializationError> for CredentialError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}

impl From<serde_json::Error> for CredentialError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedPayload(e.to_string())
    }
}

impl From<std::io::Error> for CredentialError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
