//! Building blocks of the credential proofs, shared by [`User`](crate::User), [`Verifier`](crate::Verifier) and
//! protocols extending a showing with further statements.
//!
//! A showing proves knowledge of the secrets `[v, m_h1, m_h2, ...]` where `v` comes from
//! [`Signature::randomize_for_proof`] and `m_hi` are the hashed hidden attributes in ascending index order.
//! Randomizers and responses follow the same order.

use alloc::vec::Vec;
use ark_ec::{
    pairing::{Pairing, PairingOutput},
    AffineRepr, CurveGroup,
};
use ark_ff::{PrimeField, Zero};
use ark_std::rand::RngCore;
use core::iter::once;
use credential_utils::{expect_equality, transcript::ChallengeTranscript};
use schnorr_pok::{compute_responses, error::SchnorrError, generate_randomizers, SchnorrResponse};
use zeroize::Zeroize;

use crate::{
    error::CredentialError,
    hashing::{hash_to_fr, HashDigest},
    proof::{hidden_indices, Attribute, ProofOfKnowledge, Pseudonym, SignatureProof},
    setup::PublicKey,
    signature::Signature,
};

pub const COMMITMENT_LABEL: &[u8] = b"PS-CREDENTIALS-COMMITMENT";
pub const SHOW_LABEL: &[u8] = b"PS-CREDENTIALS-SHOW";
pub const SHOW_NYM_LABEL: &[u8] = b"PS-CREDENTIALS-SHOW-NYM";

/// Sorts and dedups hidden indices, checking each one addresses one of `count` attributes.
pub fn normalize_hidden(hidden: &[usize], count: usize) -> Result<Vec<usize>, CredentialError> {
    if let Some(&index) = hidden.iter().find(|&&i| i >= count) {
        return Err(CredentialError::AttributeIndexOutOfBounds { index, count });
    }
    let mut hidden = hidden.to_vec();
    hidden.sort_unstable();
    hidden.dedup();

    Ok(hidden)
}

/// Position of the attribute `key_idx` among the hidden ones. The key of a pseudonym must stay hidden.
pub fn key_position(hidden: &[usize], key_idx: usize) -> Result<usize, CredentialError> {
    hidden
        .iter()
        .position(|&i| i == key_idx)
        .ok_or(CredentialError::InvalidKeyIndex(key_idx))
}

/// Attribute slots split into hidden indices and hashed disclosed values.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disclosure<F: PrimeField> {
    pub hidden: Vec<usize>,
    pub disclosed: Vec<(usize, F)>,
}

impl<F: PrimeField> Disclosure<F> {
    pub fn new(attributes: &[Attribute]) -> Self {
        let disclosed = attributes
            .iter()
            .enumerate()
            .filter_map(|(i, attribute)| match attribute {
                Attribute::Disclosed(value) => Some((i, hash_to_fr(value))),
                Attribute::Hidden => None,
            })
            .collect();

        Self {
            hidden: hidden_indices(attributes),
            disclosed,
        }
    }

    pub fn all_hidden(count: usize) -> Self {
        Self {
            hidden: (0..count).collect(),
            disclosed: Vec::new(),
        }
    }
}

/// Prover side of a showing: the randomized signature along with the secrets and randomizers of the proof.
pub struct CredentialProver<E: Pairing> {
    sigma_prime: Signature<E>,
    hidden: Vec<usize>,
    secrets: Vec<E::ScalarField>,
    randomizers: Vec<E::ScalarField>,
    commitment: PairingOutput<E>,
}

impl<E: Pairing> CredentialProver<E> {
    /// Randomizes the signature and commits to fresh randomizers as
    /// `W = e(sigma'_1^{w}, g~) * prod_H(e(sigma'_1^{w_i}, Y~_i))`.
    pub fn init<R: RngCore, S: AsRef<str>>(
        rng: &mut R,
        signature: &Signature<E>,
        pk: &PublicKey<E>,
        attributes: &[S],
        hidden: &[usize],
    ) -> Result<Self, CredentialError> {
        let count = pk.attribute_count();
        if attributes.len() != count {
            return Err(CredentialError::InvalidAttributeCount {
                received: attributes.len(),
                expected: count,
            });
        }
        let hidden = normalize_hidden(hidden, count)?;

        let (sigma_prime, v) = signature.randomize_for_proof(rng);
        let secrets: Vec<_> = once(v)
            .chain(hidden.iter().map(|&i| hash_to_fr(attributes[i].as_ref())))
            .collect();
        let randomizers = generate_randomizers(rng, secrets.len());
        let commitment = credential_commitment(&sigma_prime, pk, &hidden, &randomizers);

        Ok(Self {
            sigma_prime,
            hidden,
            secrets,
            randomizers,
            commitment,
        })
    }

    pub fn hidden(&self) -> &[usize] {
        &self.hidden
    }

    pub fn sigma_prime(&self) -> &Signature<E> {
        &self.sigma_prime
    }

    /// Randomizer of the hidden attribute at `position` among the hidden ones.
    pub fn hidden_randomizer(&self, position: usize) -> Result<E::ScalarField, CredentialError> {
        self.randomizers
            .get(position + 1)
            .copied()
            .ok_or(CredentialError::AttributeIndexOutOfBounds {
                index: position,
                count: self.hidden.len(),
            })
    }

    /// Hashed value of the hidden attribute at `position` among the hidden ones.
    pub fn hidden_secret(&self, position: usize) -> Result<E::ScalarField, CredentialError> {
        self.secrets
            .get(position + 1)
            .copied()
            .ok_or(CredentialError::AttributeIndexOutOfBounds {
                index: position,
                count: self.hidden.len(),
            })
    }

    /// Starts the challenge transcript with the public key, the randomized signature and the commitment.
    pub fn transcript(
        &self,
        label: &[u8],
        pk: &PublicKey<E>,
    ) -> Result<ChallengeTranscript<E>, CredentialError> {
        credential_transcript(label, pk, &self.sigma_prime, &self.commitment)
    }

    /// Computes the responses `randomizer + challenge * secret` and wraps them with the randomized signature.
    pub fn finish(&self, challenge: &E::ScalarField) -> Result<SignatureProof<E>, CredentialError> {
        let mut responses = compute_responses(&self.randomizers, &self.secrets, challenge)?;
        let sis = responses.split_off(1);

        Ok(SignatureProof {
            proof: ProofOfKnowledge {
                challenge: *challenge,
                s: responses[0],
                sis,
            },
            sigma_prime: self.sigma_prime.clone(),
        })
    }
}

impl<E: Pairing> Drop for CredentialProver<E> {
    fn drop(&mut self) {
        self.secrets.zeroize();
        self.randomizers.zeroize();
    }
}

/// `W = e(sigma'_1^{w_0}, g~) * prod_j(e(sigma'_1^{w_{j+1}}, Y~_{hidden_j}))`
pub fn credential_commitment<E: Pairing>(
    sigma_prime: &Signature<E>,
    pk: &PublicKey<E>,
    hidden: &[usize],
    randomizers: &[E::ScalarField],
) -> PairingOutput<E> {
    let g1: Vec<E::G1> = randomizers
        .iter()
        .map(|w| sigma_prime.sigma_1.mul_bigint(w.into_bigint()))
        .collect();
    let g2 = once(pk.g_tilde).chain(hidden.iter().map(|&i| pk.y_tilde[i]));

    E::multi_pairing(E::G1::normalize_batch(&g1), g2)
}

/// Recomputes the commitment of a showing from the proof as
/// `W' = e(sigma'_1^s, g~) * prod_H(e(sigma'_1^{s_i}, Y~_i)) / (e(sigma'_2, g~) / (e(sigma'_1, X~) * prod_D(e(sigma'_1^{m_i}, Y~_i))))^c`
/// using a single multi-pairing.
pub fn credential_candidate<E: Pairing>(
    proof: &ProofOfKnowledge<E>,
    sigma_prime: &Signature<E>,
    pk: &PublicKey<E>,
    disclosure: &Disclosure<E::ScalarField>,
) -> Result<PairingOutput<E>, CredentialError> {
    expect_equality!(
        proof.sis.len(),
        disclosure.hidden.len(),
        SchnorrError::ExpectedSameSizeSequences
    );
    let c = proof.challenge;
    let sigma_1 = sigma_prime.sigma_1;
    let mul = |s: &E::ScalarField| sigma_1.mul_bigint(s.into_bigint());

    let mut g1 = Vec::with_capacity(2 + proof.sis.len() + disclosure.disclosed.len());
    let mut g2 = Vec::with_capacity(g1.capacity());
    g1.push(mul(&proof.s) - sigma_prime.sigma_2.mul_bigint(c.into_bigint()));
    g2.push(pk.g_tilde);
    for (s_i, &i) in proof.sis.iter().zip(disclosure.hidden.iter()) {
        g1.push(mul(s_i));
        g2.push(pk.y_tilde[i]);
    }
    g1.push(mul(&c));
    g2.push(pk.x_tilde);
    for (i, m_i) in &disclosure.disclosed {
        g1.push(mul(&(*m_i * c)));
        g2.push(pk.y_tilde[*i]);
    }

    Ok(E::multi_pairing(E::G1::normalize_batch(&g1), g2))
}

/// Transcript `label || g~ || X~ || sigma'_1 || sigma'_2 || Y~_1..Y~_r || W`
pub fn credential_transcript<E: Pairing>(
    label: &[u8],
    pk: &PublicKey<E>,
    sigma_prime: &Signature<E>,
    commitment: &PairingOutput<E>,
) -> Result<ChallengeTranscript<E>, CredentialError> {
    let mut transcript = ChallengeTranscript::new(label);
    transcript.append_g2(&pk.g_tilde)?;
    transcript.append_g2(&pk.x_tilde)?;
    transcript.append_g1(&sigma_prime.sigma_1)?;
    transcript.append_g1(&sigma_prime.sigma_2)?;
    transcript.append_g2s(&pk.y_tilde)?;
    transcript.append_gt(commitment)?;

    Ok(transcript)
}

/// Continues a transcript with `nym || H(domain) || W2`.
pub fn append_nym<E: Pairing>(
    transcript: &mut ChallengeTranscript<E>,
    nym: &Pseudonym<E>,
    domain_base: &E::G1Affine,
    commitment: &E::G1Affine,
) -> Result<(), CredentialError> {
    transcript.append_g1(&nym.nym)?;
    transcript.append_g1(domain_base)?;
    transcript.append_g1(commitment)?;

    Ok(())
}

/// Recomputes the commitment of the pseudonym key `W2' = H(domain)^{s_key} - nym^c`.
pub fn nym_candidate<E: Pairing>(
    domain_base: &E::G1Affine,
    key_response: &E::ScalarField,
    nym: &Pseudonym<E>,
    challenge: &E::ScalarField,
) -> Result<E::G1Affine, CredentialError> {
    Ok(SchnorrResponse(vec![*key_response]).compute_t(&[*domain_base], &nym.nym, challenge)?)
}

pub fn challenge<E: Pairing>(transcript: &ChallengeTranscript<E>) -> E::ScalarField {
    transcript.challenge::<HashDigest>()
}

/// Checks that the signature proof may be verified at all: `sigma'_1` isn't the identity and there is one
/// response per hidden attribute.
pub fn is_well_formed<E: Pairing>(
    proof: &SignatureProof<E>,
    disclosure: &Disclosure<E::ScalarField>,
) -> bool {
    !proof.sigma_prime.sigma_1.is_zero()
        && proof.proof.sis.len() == disclosure.hidden.len()
        && !proof.proof.challenge.is_zero()
}
