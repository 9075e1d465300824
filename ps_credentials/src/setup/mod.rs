//! Setup of the Pointcheval-Sanders scheme.
//! Defines the deterministic setup params, signing keys, issuer key pairs and their storage.

use ark_ec::pairing::Pairing;
use ark_serialize::*;
use ark_std::rand::RngCore;

use crate::hashing::{hash_to_g1, hash_to_g2};

pub mod key_store;
pub mod keypair;

pub use key_store::*;
pub use keypair::*;

/// The initialized curve context. Every generator is derived by hashing a fixed label, so all parties
/// derive the same params without communicating.
#[derive(Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize)]
pub struct SetupParams<E: Pairing> {
    pub g: E::G1Affine,
    pub g_tilde: E::G2Affine,
    /// Base used as `sigma_1` by [`crate::Signature::new`].
    pub sign_base: E::G1Affine,
}

impl<E: Pairing> SetupParams<E> {
    pub const G_LABEL: &'static str = "g";
    pub const G_TILDE_LABEL: &'static str = "gtilde";
    pub const SIGN_BASE_LABEL: &'static str = "random";

    pub fn new() -> Self {
        Self {
            g: hash_to_g1::<E>(Self::G_LABEL),
            g_tilde: hash_to_g2::<E>(Self::G_TILDE_LABEL),
            sign_base: hash_to_g1::<E>(Self::SIGN_BASE_LABEL),
        }
    }
}

impl<E: Pairing> Default for SetupParams<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a signing key for `attribute_count` attributes along with its public key.
pub fn keygen<E: Pairing, R: RngCore>(
    rng: &mut R,
    attribute_count: usize,
    params: &SetupParams<E>,
) -> (SigningKey<E::ScalarField>, PublicKey<E>) {
    let signing_key = SigningKey::rand(rng, attribute_count);
    let public_key = PublicKey::new(&signing_key, params);

    (signing_key, public_key)
}
