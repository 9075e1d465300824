//! Transport boundary: JSON payloads exchanged with issuing and verifying services, and the
//! `command;payload` messages carrying them.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};
use ark_ec::pairing::Pairing;
use ark_std::rand::RngCore;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    config::IssuerConfig,
    error::CredentialError,
    issuer::Issuer,
    proof::{Attribute, Commitment, Pseudonym, SignatureProof},
    serialization::JsonWire,
    setup::{PublicKey, SetupParams},
    signature::Signature,
    verifier::Verifier,
};

/// Blind signature along with the attributes the issuer put in the trailing slots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct IssueResponse<E: Pairing> {
    pub cred: Signature<E>,
    pub attrs: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct ShowResponse<E: Pairing> {
    pub signature_proof: SignatureProof<E>,
    pub show_attributes: Vec<Attribute>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct NymShowResponse<E: Pairing> {
    pub signature_proof: SignatureProof<E>,
    pub show_attributes: Vec<Attribute>,
    pub nym: Pseudonym<E>,
    pub key_idx: usize,
}

/// Issuing side of the transport: turns commitments into blind signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IssuerService<E: Pairing> {
    issuer: Issuer<E>,
    issuer_attributes: Vec<String>,
}

impl<E: Pairing> IssuerService<E> {
    pub fn new(issuer: Issuer<E>, issuer_attributes: Vec<String>) -> Self {
        Self {
            issuer,
            issuer_attributes,
        }
    }

    pub fn from_config<R: RngCore>(
        rng: &mut R,
        config: &IssuerConfig,
        params: &SetupParams<E>,
    ) -> Result<Self, CredentialError> {
        let issuer = Issuer::from_config(rng, config, params)?;

        Ok(Self::new(issuer, config.issuer_attributes.clone()))
    }

    pub fn issuer(&self) -> &Issuer<E> {
        &self.issuer
    }

    /// Blind signs the commitment in `commitment_json` and answers with `{cred, attrs}`.
    pub fn issue<R: RngCore>(
        &self,
        rng: &mut R,
        commitment_json: &str,
    ) -> Result<String, CredentialError> {
        let commitment = Commitment::<E>::from_json(commitment_json)?;
        let cred = self
            .issuer
            .blind_sign(rng, &commitment, &self.issuer_attributes)?;
        debug!("issued a credential");

        IssueResponse {
            cred,
            attrs: self.issuer_attributes.clone(),
        }
        .to_json()
    }

    pub fn public_key(&self) -> Result<String, CredentialError> {
        self.issuer.public_key().to_json()
    }
}

/// Verifying side of the transport, bound to one issuer's public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierService<E: Pairing> {
    public_key: PublicKey<E>,
    verifier: Verifier,
}

impl<E: Pairing> VerifierService<E> {
    pub fn new(public_key: PublicKey<E>) -> Self {
        Self {
            public_key,
            verifier: Verifier::new(),
        }
    }

    pub fn from_public_key_json(json: &str) -> Result<Self, CredentialError> {
        Ok(Self::new(PublicKey::from_json(json)?))
    }

    /// Checks `{signatureProof, showAttributes}`.
    pub fn verify(&self, response_json: &str) -> Result<bool, CredentialError> {
        let response = ShowResponse::<E>::from_json(response_json)?;
        self.verifier.check_signature_proof(
            &response.signature_proof,
            &self.public_key,
            &response.show_attributes,
        )
    }

    /// Checks `{signatureProof, showAttributes, nym, keyIdx}`.
    pub fn check_nym(&self, response_json: &str) -> Result<bool, CredentialError> {
        let response = NymShowResponse::<E>::from_json(response_json)?;
        self.verifier.check_signature_proof_and_nym(
            &response.signature_proof,
            &self.public_key,
            &response.show_attributes,
            &response.nym,
            response.key_idx,
        )
    }
}

/// Commands understood at the messaging boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    StartIssue,
    Issue,
    Show,
    ProveNym,
    Answer,
    Token,
    Unknown(String),
}

impl From<&str> for Command {
    fn from(command: &str) -> Self {
        match command {
            "startissue" => Self::StartIssue,
            "issue" => Self::Issue,
            "show" => Self::Show,
            "provenym" => Self::ProveNym,
            "answer" => Self::Answer,
            "token" => Self::Token,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A `command;payload` message. Only the first `;` separates, the payload may contain more.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    pub command: Command,
    pub payload: String,
}

impl Message {
    pub fn parse(raw: &str) -> Self {
        let (command, payload) = raw.split_once(';').unwrap_or((raw, ""));

        Self {
            command: command.into(),
            payload: payload.to_string(),
        }
    }
}
