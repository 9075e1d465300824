#![cfg_attr(not(feature = "std"), no_std)]

//! Schnorr protocol to prove knowledge of 1 or more discrete logs in zero knowledge. Refer <https://crypto.stanford.edu/cs355/19sp/lec5.pdf>
//!
//! Prover wants to prove knowledge of `x_1, x_2` in `Y = G_1*x_1 + G_2*x_2`:
//!
//! 1. Prover generates randomizers `w_1` and `w_2`, and computes `W = G_1*w_1 + G_2*w_2`
//! 2. Prover computes the challenge as `c = Hash(G_1||G_2||Y||W)`
//! 3. Prover produces `s_1 = w_1 + x_1*c` and `s_2 = w_2 + x_2*c`, and sends `c, s_1, s_2` as proof
//! 4. Verifier computes the candidate `W' = G_1*s_1 + G_2*s_2 - Y*c`, then `c' = Hash(G_1||G_2||Y||W')`
//! 5. Proof is valid if `c == c'`
//!
//! Only the challenge and responses are transmitted, so the commitment `W` is never part of a proof and
//! the verifier works with the candidate computed by [`SchnorrResponse::compute_t`].

use crate::error::SchnorrError;
use ark_ec::{AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_iter, rand::RngCore, vec::Vec};
use core::ops::Add;
use credential_utils::{
    expect_equality, hashing_utils::field_elem_from_try_and_incr, misc::n_rand,
    serde_utils::ArkObjectHex,
};
use digest::Digest;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub mod error;

/// Generates one randomizer per secret the proof is about.
pub fn generate_randomizers<F: PrimeField, R: RngCore>(rng: &mut R, count: usize) -> Vec<F> {
    n_rand(rng, count).collect()
}

/// Computes the responses of a proof as `response[i] = randomizers[i] + (challenge * secrets[i])`.
pub fn compute_responses<F: PrimeField>(
    randomizers: &[F],
    secrets: &[F],
    challenge: &F,
) -> Result<Vec<F>, SchnorrError> {
    expect_equality!(
        randomizers.len(),
        secrets.len(),
        SchnorrError::ExpectedSameSizeSequences
    );
    Ok(cfg_iter!(randomizers)
        .zip(cfg_iter!(secrets))
        .map(|(w, x)| *w + (*challenge * *x))
        .collect())
}

/// Commitment to randomness during step 1 of the Schnorr protocol to prove knowledge of 1 or more discrete logs
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    ZeroizeOnDrop,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
pub struct SchnorrCommitment<G: AffineRepr> {
    /// Randomness. 1 per discrete log
    #[serde_as(as = "Vec<ArkObjectHex>")]
    pub blindings: Vec<G::ScalarField>,
    /// The commitment to all the randomnesses, i.e. `bases[0] * blindings[0] + ... + bases[i] * blindings[i]`
    #[zeroize(skip)]
    #[serde_as(as = "ArkObjectHex")]
    pub t: G,
}

impl<G: AffineRepr> SchnorrCommitment<G> {
    /// Create commitment as `bases[0] * blindings[0] + bases[1] * blindings[1] + ... + bases[i] * blindings[i]`
    /// for step-1 of the protocol.
    pub fn new(bases: &[G], blindings: Vec<G::ScalarField>) -> Result<Self, SchnorrError> {
        expect_equality!(
            bases.len(),
            blindings.len(),
            SchnorrError::ExpectedSameSizeSequences
        );
        let t = G::Group::msm_unchecked(bases, &blindings).into_affine();
        Ok(Self { blindings, t })
    }

    /// Create responses for each witness (discrete log) as `response[i] = self.blindings[i] + (witnesses[i] * challenge)`
    pub fn response(
        &self,
        witnesses: &[G::ScalarField],
        challenge: &G::ScalarField,
    ) -> Result<SchnorrResponse<G>, SchnorrError> {
        compute_responses(&self.blindings, witnesses, challenge).map(SchnorrResponse)
    }
}

/// Response during step 3 of the Schnorr protocol to prove knowledge of 1 or more discrete logs
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct SchnorrResponse<G: AffineRepr>(
    #[serde_as(as = "Vec<ArkObjectHex>")] pub Vec<G::ScalarField>,
);

impl<G: AffineRepr> SchnorrResponse<G> {
    /// Recomputes the prover's commitment from the responses as
    /// `bases[0]*responses[0] + ... + bases[i]*responses[i] - y*challenge`
    pub fn compute_t(
        &self,
        bases: &[G],
        y: &G,
        challenge: &G::ScalarField,
    ) -> Result<G, SchnorrError> {
        expect_equality!(
            self.0.len(),
            bases.len(),
            SchnorrError::ExpectedSameSizeSequences
        );
        Ok(G::Group::msm_unchecked(bases, &self.0)
            .add(y.mul_bigint((-*challenge).into_bigint()))
            .into_affine())
    }

    /// Check if response is valid and thus validity of Schnorr proof
    /// `bases[0]*responses[0] + ... + bases[i]*responses[i] - y*challenge == t`
    pub fn is_valid(
        &self,
        bases: &[G],
        y: &G,
        t: &G,
        challenge: &G::ScalarField,
    ) -> Result<(), SchnorrError> {
        if self.compute_t(bases, y, challenge)? == *t {
            Ok(())
        } else {
            Err(SchnorrError::InvalidResponse)
        }
    }

    /// Get response for the specified discrete log
    pub fn get_response(&self, idx: usize) -> Result<&G::ScalarField, SchnorrError> {
        self.0
            .get(idx)
            .ok_or(SchnorrError::IndexOutOfBounds(idx, self.0.len()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Uses try-and-increment. Vulnerable to side channel attacks. But this is only used when its input
/// is public data.
pub fn compute_random_oracle_challenge<F: PrimeField, D: Digest>(challenge_bytes: &[u8]) -> F {
    field_elem_from_try_and_incr::<F, D>(challenge_bytes)
}
