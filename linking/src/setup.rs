use ark_ec::pairing::Pairing;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ps_credentials::hashing::hash_to_g2;

/// Parameters of the linking protocol.
#[derive(Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize)]
pub struct LinkingParams<E: Pairing> {
    /// Base of `s = h^z` in every link info.
    pub h: E::G2Affine,
}

impl<E: Pairing> LinkingParams<E> {
    pub const H_LABEL: &'static str = "GENERATOR_H";

    pub fn new() -> Self {
        Self {
            h: hash_to_g2::<E>(Self::H_LABEL),
        }
    }
}

impl<E: Pairing> Default for LinkingParams<E> {
    fn default() -> Self {
        Self::new()
    }
}
