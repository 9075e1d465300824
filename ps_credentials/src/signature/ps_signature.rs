use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, Group, VariableBaseMSM};
use ark_ff::{PrimeField, Zero};
use ark_serialize::*;
use ark_std::rand::RngCore;
use credential_utils::{misc::rand_non_trivial, multi_pairing, serde_utils::ArkObjectHex};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::{
    hashing::hash_attributes,
    setup::{PublicKey, SetupParams, SigningKey},
    signature::PSError,
};

type Result<T, E = PSError> = core::result::Result<T, E>;

/// Pointcheval-Sanders signature `(sigma_1, sigma_2)` with `sigma_2 = sigma_1^{x + sum(y_i * m_i)}`.
/// This signature can be obtained in two ways:
///
/// - Signing key's owner signs messages
/// - A blind signature from the [`Issuer`](crate::Issuer) gets unblinded
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
pub struct Signature<E: Pairing> {
    #[serde(rename = "sigma1")]
    #[serde_as(as = "ArkObjectHex")]
    pub sigma_1: E::G1Affine,
    #[serde(rename = "sigma2")]
    #[serde_as(as = "ArkObjectHex")]
    pub sigma_2: E::G1Affine,
}

impl<E: Pairing> Signature<E> {
    /// Signs messages with `sigma_1` set to the fixed signing base of the params. Signing the same
    /// messages twice gives the same signature, [`Self::randomize`] makes it unlinkable.
    /// Fewer messages than the key supports are allowed.
    pub fn new(
        messages: &[E::ScalarField],
        SigningKey { x, y }: &SigningKey<E::ScalarField>,
        SetupParams { sign_base, .. }: &SetupParams<E>,
    ) -> Result<Self> {
        if messages.len() > y.len() {
            return Err(PSError::MessageCountExceedsCapacity {
                received: messages.len(),
                capacity: y.len(),
            });
        }

        let exponent = messages
            .iter()
            .zip(y.iter())
            .fold(*x, |acc, (m, y)| acc + *m * y);

        Ok(Self {
            sigma_1: *sign_base,
            sigma_2: sign_base.mul_bigint(exponent.into_bigint()).into_affine(),
        })
    }

    /// Hashes the attributes and signs them.
    pub fn sign<S: AsRef<str>>(
        attributes: &[S],
        signing_key: &SigningKey<E::ScalarField>,
        params: &SetupParams<E>,
    ) -> Result<Self> {
        Self::new(&hash_attributes(attributes), signing_key, params)
    }

    /// Checks `e(sigma_1, X~ + sum(Y~_i * m_i)) == e(sigma_2, g~)`. A signature with `sigma_1` being the
    /// identity never verifies.
    pub fn verify(&self, messages: &[E::ScalarField], pk: &PublicKey<E>) -> Result<bool> {
        if self.sigma_1.is_zero() {
            return Ok(false);
        }
        if messages.len() != pk.y_tilde.len() {
            return Err(PSError::InvalidMessageCount {
                received: messages.len(),
                expected: pk.y_tilde.len(),
            });
        }

        let x_m = E::G2::msm_unchecked(&pk.y_tilde, messages) + pk.x_tilde;
        let prod = multi_pairing! {
            self.sigma_1, x_m;
            -self.sigma_2.into_group(), pk.g_tilde
        };

        Ok(prod.is_zero())
    }

    pub fn verify_attributes<S: AsRef<str>>(
        &self,
        attributes: &[S],
        pk: &PublicKey<E>,
    ) -> Result<bool> {
        self.verify(&hash_attributes(attributes), pk)
    }

    /// Returns `(sigma_1^t, sigma_2^t)` for a random `t` that is neither 0 nor 1.
    pub fn randomize<R: RngCore>(&self, rng: &mut R) -> Self {
        let t = rand_non_trivial::<E::ScalarField, _>(rng).into_bigint();
        let points = E::G1::normalize_batch(&[
            self.sigma_1.mul_bigint(t),
            self.sigma_2.mul_bigint(t),
        ]);

        Self {
            sigma_1: points[0],
            sigma_2: points[1],
        }
    }

    /// Randomizes the signature for a proof of knowledge as `(sigma_1^u, (sigma_2 * sigma_1^v)^u)`.
    /// The returned `v` becomes one of the prover's secrets since the result only verifies with an
    /// extra `g~^v` term.
    pub fn randomize_for_proof<R: RngCore>(&self, rng: &mut R) -> (Self, E::ScalarField) {
        let u = rand_non_trivial::<E::ScalarField, _>(rng).into_bigint();
        let v = rand_non_trivial::<E::ScalarField, _>(rng);
        let sigma_2 = self.sigma_2 + self.sigma_1.mul_bigint(v.into_bigint());
        let points = E::G1::normalize_batch(&[self.sigma_1.mul_bigint(u), sigma_2.mul_bigint(u)]);

        (
            Self {
                sigma_1: points[0],
                sigma_2: points[1],
            },
            v,
        )
    }

    /// Removes the commitment blinding `t` from a blind signature, giving `(sigma_1, sigma_2 - sigma_1^t)`.
    pub fn unblind(&self, t: &E::ScalarField) -> Self {
        Self {
            sigma_1: self.sigma_1,
            sigma_2: (self.sigma_2.into_group() - self.sigma_1.mul_bigint(t.into_bigint()))
                .into_affine(),
        }
    }

    /// Checks if a signature has zero elements. A valid signature should not have zero elements.
    pub fn is_zero(&self) -> bool {
        self.sigma_1.is_zero() || self.sigma_2.is_zero()
    }
}
