//! Hashing of attributes, domains and generator labels.

use alloc::vec::Vec;
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use blake2::Blake2b512;
use credential_utils::hashing_utils::{affine_group_elem_from_try_and_incr, hash_to_field};

/// Digest used for every hash in the protocol, including Fiat-Shamir challenges.
pub type HashDigest = Blake2b512;

/// Domain separation tag used when hashing attribute values and keys to the scalar field.
pub const ATTRIBUTE_HASH_DST: &[u8] = b"PS-CREDENTIALS-ATTRIBUTE-HASH-TO-FR";

/// Hashes a string to a scalar.
pub fn hash_to_fr<F: PrimeField>(value: &str) -> F {
    hash_to_field::<F, HashDigest>(ATTRIBUTE_HASH_DST, value.as_bytes())
}

/// Hashes a string to a point in G1 with try-and-increment. Only ever used on public inputs.
pub fn hash_to_g1<E: Pairing>(value: &str) -> E::G1Affine {
    affine_group_elem_from_try_and_incr::<E::G1Affine, HashDigest>(value.as_bytes())
}

/// Hashes a string to a point in G2 with try-and-increment. Only ever used on public inputs.
pub fn hash_to_g2<E: Pairing>(value: &str) -> E::G2Affine {
    affine_group_elem_from_try_and_incr::<E::G2Affine, HashDigest>(value.as_bytes())
}

pub fn hash_attributes<F: PrimeField, S: AsRef<str>>(attributes: &[S]) -> Vec<F> {
    attributes.iter().map(|a| hash_to_fr(a.as_ref())).collect()
}
