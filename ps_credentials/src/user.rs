use alloc::vec::Vec;
use ark_ec::{pairing::Pairing, CurveGroup, VariableBaseMSM};
use ark_std::{end_timer, rand::RngCore, start_timer, UniformRand};
use core::iter::once;
use log::{debug, warn};
use schnorr_pok::{generate_randomizers, SchnorrCommitment};
use zeroize::Zeroize;

use crate::{
    credential::Credential,
    error::CredentialError,
    hashing::{hash_attributes, hash_to_fr, hash_to_g1},
    issuer::commitment_transcript,
    proof::{
        toolkit::{
            append_nym, challenge, key_position, normalize_hidden, CredentialProver, SHOW_LABEL,
            SHOW_NYM_LABEL,
        },
        Commitment, ProofOfKnowledge, Pseudonym, SignatureProof,
    },
    setup::PublicKey,
    signature::Signature,
};

/// Credential holder during issuance. Keeps the blinding of its last commitment until the blind signature
/// for it is unblinded.
#[derive(Clone, Debug)]
pub struct User<E: Pairing> {
    blinding: Option<E::ScalarField>,
}

impl<E: Pairing> Default for User<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Pairing> User<E> {
    pub fn new() -> Self {
        Self { blinding: None }
    }

    pub fn has_pending_commitment(&self) -> bool {
        self.blinding.is_some()
    }

    /// Commits to the attributes as `C = g^t * prod(Y_i^{H(a_i)})` and proves knowledge of the opening.
    /// The attributes take the leading slots, the issuer fills the remaining ones. A new commitment
    /// replaces a pending one.
    pub fn create_commitment<R: RngCore, S: AsRef<str>>(
        &mut self,
        rng: &mut R,
        pk: &PublicKey<E>,
        attributes: &[S],
    ) -> Result<Commitment<E>, CredentialError> {
        let timer = start_timer!(|| "Attribute commitment");
        if attributes.len() > pk.attribute_count() {
            return Err(CredentialError::InvalidAttributeCount {
                received: attributes.len(),
                expected: pk.attribute_count(),
            });
        }

        let ys = pk.y.get(..attributes.len()).ok_or_else(|| {
            CredentialError::MalformedPayload(format!(
                "public key has {} Ys for {} attributes",
                pk.y.len(),
                attributes.len()
            ))
        })?;

        let t = E::ScalarField::rand(rng);
        let mut witnesses: Vec<_> = once(t)
            .chain(hash_attributes::<E::ScalarField, _>(attributes))
            .collect();
        let bases: Vec<_> = once(pk.g).chain(ys.iter().copied()).collect();
        let c = E::G1::msm_unchecked(&bases, &witnesses).into_affine();

        let schnorr = SchnorrCommitment::new(&bases, generate_randomizers(rng, bases.len()))?;
        let transcript = commitment_transcript(pk, &c, &schnorr.t)?;
        let challenge = challenge(&transcript);
        let mut responses = schnorr.response(&witnesses, &challenge)?.0;
        witnesses.zeroize();
        let sis = responses.split_off(1);

        if self.blinding.replace(t).is_some() {
            debug!("replaced a pending commitment");
        }
        end_timer!(timer);

        Ok(Commitment {
            c,
            proof: ProofOfKnowledge {
                challenge,
                s: responses[0],
                sis,
            },
        })
    }

    /// Unblinds the issuer's signature with the blinding of the pending commitment, which is consumed.
    /// A blind signature for another commitment unblinds to a signature that doesn't verify.
    pub fn unblind_signature(
        &mut self,
        blind_signature: &Signature<E>,
    ) -> Result<Signature<E>, CredentialError> {
        let mut t = self
            .blinding
            .take()
            .ok_or(CredentialError::NoPendingCommitment)?;
        let signature = blind_signature.unblind(&t);
        t.zeroize();

        Ok(signature)
    }

    /// Unblinds the signature and checks it over all attributes of the credential, the user's followed by
    /// the issuer's.
    pub fn unblind_and_verify<S: AsRef<str>>(
        &mut self,
        blind_signature: &Signature<E>,
        pk: &PublicKey<E>,
        attributes: &[S],
    ) -> Result<Credential<E>, CredentialError> {
        let signature = self.unblind_signature(blind_signature)?;
        if attributes.len() != pk.attribute_count()
            || !signature.verify_attributes(attributes, pk)?
        {
            warn!("unblinded signature doesn't verify over the credential attributes");
            return Err(CredentialError::InvalidCredential);
        }

        Ok(Credential::new(
            pk.clone(),
            signature,
            attributes.iter().map(|a| a.as_ref().into()).collect(),
        ))
    }

    /// Proves knowledge of a signature over `attributes`, disclosing all but the ones at `hidden_indices`.
    pub fn prove_knowledge_of_signature<R: RngCore, S: AsRef<str>>(
        rng: &mut R,
        signature: &Signature<E>,
        pk: &PublicKey<E>,
        attributes: &[S],
        hidden_indices: &[usize],
    ) -> Result<SignatureProof<E>, CredentialError> {
        let timer = start_timer!(|| "Signature proof");
        let prover = CredentialProver::init(rng, signature, pk, attributes, hidden_indices)?;
        let transcript = prover.transcript(SHOW_LABEL, pk)?;
        let proof = prover.finish(&challenge(&transcript))?;
        debug!(
            "proved knowledge of a signature hiding {} of {} attributes",
            prover.hidden().len(),
            attributes.len()
        );
        end_timer!(timer);

        Ok(proof)
    }

    /// Like [`Self::prove_knowledge_of_signature`] and additionally proves that the hidden attribute at
    /// `key_idx` is the key of `nym`.
    pub fn prove_knowledge_of_signature_and_nym<R: RngCore, S: AsRef<str>>(
        rng: &mut R,
        signature: &Signature<E>,
        pk: &PublicKey<E>,
        attributes: &[S],
        hidden_indices: &[usize],
        nym: &Pseudonym<E>,
        key_idx: usize,
    ) -> Result<SignatureProof<E>, CredentialError> {
        let timer = start_timer!(|| "Signature and pseudonym proof");
        let position = key_position(
            &normalize_hidden(hidden_indices, pk.attribute_count())?,
            key_idx,
        )?;

        let prover = CredentialProver::init(rng, signature, pk, attributes, hidden_indices)?;
        let domain_base = hash_to_g1::<E>(&nym.domain);
        let nym_commitment = SchnorrCommitment::new(
            &[domain_base],
            vec![prover.hidden_randomizer(position)?],
        )?;

        let mut transcript = prover.transcript(SHOW_NYM_LABEL, pk)?;
        append_nym(&mut transcript, nym, &domain_base, &nym_commitment.t)?;
        let proof = prover.finish(&challenge(&transcript))?;
        end_timer!(timer);

        Ok(proof)
    }

    /// Pseudonym of `key` in `domain`, i.e. `H(domain)^{H(key)}`.
    pub fn create_domain_specific_nym(domain: &str, key: &str) -> Pseudonym<E> {
        Pseudonym::from_secret(domain, &hash_to_fr(key))
    }
}
