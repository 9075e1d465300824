use ark_ec::pairing::Pairing;
use ark_std::{end_timer, start_timer};
use credential_utils::transcript::ChallengeTranscript;
use log::debug;

use crate::{
    error::CredentialError,
    hashing::hash_to_g1,
    proof::{
        toolkit::{
            append_nym, challenge, credential_candidate, credential_transcript, is_well_formed,
            key_position, nym_candidate, Disclosure, SHOW_LABEL, SHOW_NYM_LABEL,
        },
        Attribute, Pseudonym, SignatureProof,
    },
    setup::PublicKey,
};

/// Checks showings of credentials. Holds no state, the issuer's public key comes with every check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verifier;

impl Verifier {
    pub fn new() -> Self {
        Self
    }

    /// Checks the proof of knowledge of a signature against the disclosed attributes. `attributes` has one
    /// slot per attribute of the credential, hidden slots being [`Attribute::Hidden`].
    /// Returns `Ok(false)` for a proof that doesn't verify and an error for a wrong number of slots.
    pub fn check_signature_proof<E: Pairing>(
        &self,
        proof: &SignatureProof<E>,
        pk: &PublicKey<E>,
        attributes: &[Attribute],
    ) -> Result<bool, CredentialError> {
        let timer = start_timer!(|| "Verify signature proof");
        let disclosure = Self::disclosure(pk, attributes)?;
        if !is_well_formed(proof, &disclosure) {
            debug!("rejected malformed signature proof");
            return Ok(false);
        }

        let transcript = Self::credential_transcript(SHOW_LABEL, proof, pk, &disclosure)?;
        end_timer!(timer);

        Ok(challenge(&transcript) == proof.proof.challenge)
    }

    /// Like [`Self::check_signature_proof`] and additionally checks that the hidden attribute at `key_idx` is the
    /// key of `nym`.
    pub fn check_signature_proof_and_nym<E: Pairing>(
        &self,
        proof: &SignatureProof<E>,
        pk: &PublicKey<E>,
        attributes: &[Attribute],
        nym: &Pseudonym<E>,
        key_idx: usize,
    ) -> Result<bool, CredentialError> {
        let timer = start_timer!(|| "Verify signature and pseudonym proof");
        let disclosure = Self::disclosure(pk, attributes)?;
        if key_idx >= attributes.len() {
            return Err(CredentialError::AttributeIndexOutOfBounds {
                index: key_idx,
                count: attributes.len(),
            });
        }
        let position = key_position(&disclosure.hidden, key_idx)?;
        if !is_well_formed(proof, &disclosure) {
            debug!("rejected malformed signature proof");
            return Ok(false);
        }

        let mut transcript = Self::credential_transcript(SHOW_NYM_LABEL, proof, pk, &disclosure)?;
        let domain_base = hash_to_g1::<E>(&nym.domain);
        let nym_commitment = nym_candidate(
            &domain_base,
            &proof.proof.sis[position],
            nym,
            &proof.proof.challenge,
        )?;
        append_nym(&mut transcript, nym, &domain_base, &nym_commitment)?;
        end_timer!(timer);

        Ok(challenge(&transcript) == proof.proof.challenge)
    }

    /// Splits the slots after checking there is one per attribute of the key.
    pub fn disclosure<E: Pairing>(
        pk: &PublicKey<E>,
        attributes: &[Attribute],
    ) -> Result<Disclosure<E::ScalarField>, CredentialError> {
        if attributes.len() != pk.attribute_count() {
            return Err(CredentialError::InvalidAttributeCount {
                received: attributes.len(),
                expected: pk.attribute_count(),
            });
        }

        Ok(Disclosure::new(attributes))
    }

    /// Transcript of a showing with the commitment recomputed from the proof.
    pub fn credential_transcript<E: Pairing>(
        label: &[u8],
        proof: &SignatureProof<E>,
        pk: &PublicKey<E>,
        disclosure: &Disclosure<E::ScalarField>,
    ) -> Result<ChallengeTranscript<E>, CredentialError> {
        let candidate = credential_candidate(&proof.proof, &proof.sigma_prime, pk, disclosure)?;
        credential_transcript(label, pk, &proof.sigma_prime, &candidate)
    }
}
