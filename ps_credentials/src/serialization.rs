//! JSON wire format. Group elements and scalars are lowercase hex strings of their compressed encoding,
//! nested objects are embedded as JSON objects.

use alloc::string::String;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    api::{IssueResponse, NymShowResponse, ShowResponse},
    error::CredentialError,
    Commitment, Credential, KeyPair, ProofOfKnowledge, Pseudonym, PublicKey, SecretKey, Signature,
    SignatureProof,
};

/// Conversion between protocol objects and their JSON wire form. Decoding either yields a complete,
/// validated object or fails with [`CredentialError::MalformedPayload`].
pub trait JsonWire: Serialize + DeserializeOwned {
    fn to_json(&self) -> Result<String, CredentialError> {
        Ok(serde_json::to_string(self)?)
    }

    fn from_json(json: &str) -> Result<Self, CredentialError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Implements [`JsonWire`] for protocol objects generic over the pairing.
#[macro_export]
macro_rules! impl_json_wire {
    ($($obj: ident),+) => {
        $(
            impl<E: ark_ec::pairing::Pairing> $crate::serialization::JsonWire for $obj<E> {}
        )+
    };
}

impl_json_wire!(
    Signature,
    PublicKey,
    SecretKey,
    KeyPair,
    ProofOfKnowledge,
    Commitment,
    SignatureProof,
    Pseudonym,
    Credential,
    IssueResponse,
    ShowResponse,
    NymShowResponse
);
