use alloc::{string::String, vec::Vec};
use ark_ec::pairing::Pairing;
use ark_std::rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{
    api::{NymShowResponse, ShowResponse},
    error::CredentialError,
    proof::{disclose, Pseudonym},
    setup::PublicKey,
    signature::Signature,
    user::User,
};

/// A verified credential as stored by its holder: the issuer's public key, the unblinded signature and
/// all attributes in slot order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct Credential<E: Pairing> {
    public_key: PublicKey<E>,
    signature: Signature<E>,
    attributes: Vec<String>,
}

impl<E: Pairing> Credential<E> {
    pub(crate) fn new(
        public_key: PublicKey<E>,
        signature: Signature<E>,
        attributes: Vec<String>,
    ) -> Self {
        Self {
            public_key,
            signature,
            attributes,
        }
    }

    /// Takes a credential from untrusted storage, checking the signature over the attributes.
    pub fn from_parts(
        public_key: PublicKey<E>,
        signature: Signature<E>,
        attributes: Vec<String>,
    ) -> Result<Self, CredentialError> {
        if attributes.len() != public_key.attribute_count()
            || !signature.verify_attributes(&attributes, &public_key)?
        {
            return Err(CredentialError::InvalidCredential);
        }

        Ok(Self::new(public_key, signature, attributes))
    }

    pub fn public_key(&self) -> &PublicKey<E> {
        &self.public_key
    }

    pub fn signature(&self) -> &Signature<E> {
        &self.signature
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    /// Proves possession of the credential, disclosing every attribute not in `hidden_indices`.
    pub fn show<R: RngCore>(
        &self,
        rng: &mut R,
        hidden_indices: &[usize],
    ) -> Result<ShowResponse<E>, CredentialError> {
        let show_attributes = disclose(&self.attributes, hidden_indices)?;
        let signature_proof = User::prove_knowledge_of_signature(
            rng,
            &self.signature,
            &self.public_key,
            &self.attributes,
            hidden_indices,
        )?;

        Ok(ShowResponse {
            signature_proof,
            show_attributes,
        })
    }

    /// Like [`Self::show`] and additionally proves that the pseudonym for `domain` is derived from the hidden
    /// attribute at `key_idx`.
    pub fn show_with_nym<R: RngCore>(
        &self,
        rng: &mut R,
        hidden_indices: &[usize],
        domain: &str,
        key_idx: usize,
    ) -> Result<NymShowResponse<E>, CredentialError> {
        let show_attributes = disclose(&self.attributes, hidden_indices)?;
        let key = self
            .attributes
            .get(key_idx)
            .ok_or(CredentialError::InvalidKeyIndex(key_idx))?;
        let nym = Pseudonym::new(domain, key);
        let signature_proof = User::prove_knowledge_of_signature_and_nym(
            rng,
            &self.signature,
            &self.public_key,
            &self.attributes,
            hidden_indices,
            &nym,
            key_idx,
        )?;

        Ok(NymShowResponse {
            signature_proof,
            show_attributes,
            nym,
            key_idx,
        })
    }
}
