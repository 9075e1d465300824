//! Proofs of knowledge used by the credential protocol.
//!
//! Each proof is a Schnorr protocol made non-interactive with Fiat-Shamir. Only the challenge and the responses
//! travel, the verifier recomputes the prover's commitment from them and accepts iff hashing the recomputed
//! transcript gives back the challenge.
//!
//! - Opening of an attribute commitment `C = g^t * prod(Y_i^{m_i})` during issuance, see [`Commitment`].
//! - Knowledge of a signature over hidden attributes during showing, see [`SignatureProof`]. The randomized
//!   signature `sigma'` satisfies
//!   `e(sigma'_2, g~) / (e(sigma'_1, X~) * prod_D(e(sigma'_1, Y~_i)^{m_i})) = e(sigma'_1, g~)^v * prod_H(e(sigma'_1, Y~_i)^{m_i})`
//!   and the prover shows knowledge of `v` and the hidden `m_i`.
//! - Optionally, that one hidden attribute is the key of a [`Pseudonym`].

use alloc::{string::String, vec::Vec};
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::*;
use credential_utils::serde_utils::ArkObjectHex;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    hashing::{hash_to_fr, hash_to_g1},
    signature::Signature,
};

mod attribute;
pub mod toolkit;

pub use attribute::*;

/// Challenge and responses of a Schnorr proof. `s` answers for the first secret (the commitment blinding
/// or the signature randomizer `v`), `sis` hold one response per hidden attribute, in ascending index order.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct ProofOfKnowledge<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    pub challenge: E::ScalarField,
    #[serde_as(as = "ArkObjectHex")]
    pub s: E::ScalarField,
    #[serde_as(as = "Vec<ArkObjectHex>")]
    pub sis: Vec<E::ScalarField>,
}

/// Commitment to the user's attributes along with the proof of knowledge of its opening.
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct Commitment<E: Pairing> {
    #[serde(rename = "C")]
    #[serde_as(as = "ArkObjectHex")]
    pub c: E::G1Affine,
    pub proof: ProofOfKnowledge<E>,
}

/// Proof of knowledge of a signature, carried along with the randomized signature it's about.
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct SignatureProof<E: Pairing> {
    pub proof: ProofOfKnowledge<E>,
    #[serde(rename = "sigmaPrime")]
    pub sigma_prime: Signature<E>,
}

/// Domain-specific pseudonym `nym = H(domain)^key`. The same key gives the same pseudonym within a domain and
/// unlinkable pseudonyms across domains.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pseudonym<E: Pairing> {
    pub domain: String,
    #[serde_as(as = "ArkObjectHex")]
    pub nym: E::G1Affine,
}

impl<E: Pairing> Pseudonym<E> {
    /// Derives the pseudonym of the hashed `key` in `domain`.
    pub fn new(domain: impl Into<String>, key: &str) -> Self {
        Self::from_secret(domain, &hash_to_fr(key))
    }

    pub fn from_secret(domain: impl Into<String>, key: &E::ScalarField) -> Self {
        let domain = domain.into();
        let nym = hash_to_g1::<E>(&domain)
            .mul_bigint(key.into_bigint())
            .into_affine();

        Self { domain, nym }
    }
}
