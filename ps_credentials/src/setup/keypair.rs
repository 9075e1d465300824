use alloc::vec::Vec;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::PrimeField;
use ark_serialize::*;
use ark_std::{cfg_iter, rand::RngCore};
use core::iter::once;
use credential_utils::{join, misc::n_rand, misc::rand, serde_utils::ArkObjectHex};
use log::info;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::SetupParams;
use crate::error::CredentialError;

/// Signing key `(x, y_1, ..., y_r)` of the Pointcheval-Sanders scheme.
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Zeroize, ZeroizeOnDrop,
)]
pub struct SigningKey<F: PrimeField> {
    pub(crate) x: F,
    pub(crate) y: Vec<F>,
}

impl<F: PrimeField> SigningKey<F> {
    /// Generates random signing key compatible with `message_count` messages.
    pub fn rand<R: RngCore>(rng: &mut R, message_count: usize) -> Self {
        let x = rand(rng);
        let y = n_rand(rng, message_count).collect();

        Self { x, y }
    }

    /// Returns max amount of messages supported by this signing key.
    pub fn supported_message_count(&self) -> usize {
        self.y.len()
    }
}

/// Issuer's secret key in its reduced form `X = g^x`, the only part blind signing needs.
/// Serialized as the hex string of `X`.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Zeroize,
    ZeroizeOnDrop,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SecretKey<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    pub(crate) x: E::G1Affine,
}

impl<E: Pairing> SecretKey<E> {
    pub fn new(signing_key: &SigningKey<E::ScalarField>, params: &SetupParams<E>) -> Self {
        Self {
            x: params.g.mul_bigint(signing_key.x.into_bigint()).into_affine(),
        }
    }
}

/// Public key `(g, Y_1..Y_r, g~, X~, Y~_1..Y~_r)` where `Y_i = g^{y_i}`, `X~ = g~^x` and `Y~_i = g~^{y_i}`.
/// Decoding from JSON fails for a key that isn't [`valid`](Self::valid).
#[serde_as]
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(try_from = "PublicKeyParts<E>", bound = "")]
pub struct PublicKey<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    pub g: E::G1Affine,
    #[serde(rename = "Ys")]
    #[serde_as(as = "Vec<ArkObjectHex>")]
    pub y: Vec<E::G1Affine>,
    #[serde(rename = "gt")]
    #[serde_as(as = "ArkObjectHex")]
    pub g_tilde: E::G2Affine,
    #[serde(rename = "Xt")]
    #[serde_as(as = "ArkObjectHex")]
    pub x_tilde: E::G2Affine,
    #[serde(rename = "Yts")]
    #[serde_as(as = "Vec<ArkObjectHex>")]
    pub y_tilde: Vec<E::G2Affine>,
}

/// Wire form of a [`PublicKey`] before validation.
#[serde_as]
#[derive(Deserialize)]
#[serde(bound = "")]
struct PublicKeyParts<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    g: E::G1Affine,
    #[serde(rename = "Ys")]
    #[serde_as(as = "Vec<ArkObjectHex>")]
    y: Vec<E::G1Affine>,
    #[serde(rename = "gt")]
    #[serde_as(as = "ArkObjectHex")]
    g_tilde: E::G2Affine,
    #[serde(rename = "Xt")]
    #[serde_as(as = "ArkObjectHex")]
    x_tilde: E::G2Affine,
    #[serde(rename = "Yts")]
    #[serde_as(as = "Vec<ArkObjectHex>")]
    y_tilde: Vec<E::G2Affine>,
}

impl<E: Pairing> TryFrom<PublicKeyParts<E>> for PublicKey<E> {
    type Error = CredentialError;

    fn try_from(parts: PublicKeyParts<E>) -> Result<Self, Self::Error> {
        let pk = Self {
            g: parts.g,
            y: parts.y,
            g_tilde: parts.g_tilde,
            x_tilde: parts.x_tilde,
            y_tilde: parts.y_tilde,
        };
        if !pk.valid() {
            return Err(CredentialError::MalformedPayload(format!(
                "invalid public key with {} Ys and {} Yts",
                pk.y.len(),
                pk.y_tilde.len()
            )));
        }
        Ok(pk)
    }
}

impl<E: Pairing> PublicKey<E> {
    /// Derives `PublicKey` from supplied signing key and params.
    pub fn new(
        SigningKey { x, y }: &SigningKey<E::ScalarField>,
        SetupParams { g, g_tilde, .. }: &SetupParams<E>,
    ) -> Self {
        let (x_tilde, y_g1, y_g2) = join!(
            g_tilde.mul_bigint(x.into_bigint()).into_affine(),
            points(g, y),
            points(g_tilde, y)
        );

        Self {
            g: *g,
            y: y_g1,
            g_tilde: *g_tilde,
            x_tilde,
            y_tilde: y_g2,
        }
    }

    /// Returns the number of attributes a credential under this key carries.
    pub fn attribute_count(&self) -> usize {
        self.y_tilde.len()
    }

    /// Returns `true` if the public key has no zero elements and as many `Ys` as `Yts`.
    pub fn valid(&self) -> bool {
        self.y.len() == self.y_tilde.len()
            && !once(&self.g).chain(&self.y).any(AffineRepr::is_zero)
            && !once(&self.g_tilde)
                .chain(once(&self.x_tilde))
                .chain(&self.y_tilde)
                .any(AffineRepr::is_zero)
    }
}

/// Issuer key material for credentials of `r` attributes. Persisted as JSON by a
/// [`KeyStore`](super::KeyStore).
#[derive(
    Clone, Debug, PartialEq, Eq, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase", bound = "")]
pub struct KeyPair<E: Pairing> {
    pub r: usize,
    pub public_key: PublicKey<E>,
    pub secret_key: SecretKey<E>,
}

impl<E: Pairing> KeyPair<E> {
    pub fn generate<R: RngCore>(rng: &mut R, r: usize, params: &SetupParams<E>) -> Self {
        let (signing_key, public_key) = super::keygen(rng, r, params);
        let secret_key = SecretKey::new(&signing_key, params);
        info!("generated issuer key pair for {} attributes", r);

        Self {
            r,
            public_key,
            secret_key,
        }
    }

    /// A key pair is consistent when its public key is valid and matches the declared attribute count.
    pub fn is_consistent(&self) -> bool {
        self.public_key.valid() && self.public_key.attribute_count() == self.r
    }
}

/// `base * scalar` for each of the scalars.
pub(crate) fn points<G: AffineRepr>(base: &G, scalars: &[G::ScalarField]) -> Vec<G> {
    let projective: Vec<G::Group> = cfg_iter!(scalars)
        .map(|s| base.mul_bigint(s.into_bigint()))
        .collect();

    G::Group::normalize_batch(&projective)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Bn254;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn key_pair_json() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SetupParams::<Bn254>::new();
        let key_pair = KeyPair::generate(&mut rng, 3, &params);
        assert!(key_pair.is_consistent());

        let json = serde_json::to_value(&key_pair).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj["r"], 3);
        assert!(obj["secretKey"].is_string());
        let pk = obj["publicKey"].as_object().unwrap();
        for key in ["g", "Ys", "gt", "Xt", "Yts"] {
            assert!(pk.contains_key(key), "missing {}", key);
        }
        assert_eq!(pk["Ys"].as_array().unwrap().len(), 3);

        let back: KeyPair<Bn254> = serde_json::from_value(json).unwrap();
        assert_eq!(back, key_pair);
    }

    #[test]
    fn detects_inconsistent_public_key() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SetupParams::<Bn254>::new();
        let mut key_pair = KeyPair::generate(&mut rng, 3, &params);
        key_pair.public_key.y.pop();
        assert!(!key_pair.public_key.valid());
        assert!(!key_pair.is_consistent());
    }

    #[test]
    fn rejects_invalid_public_key_json() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SetupParams::<Bn254>::new();
        let key_pair = KeyPair::generate(&mut rng, 3, &params);

        let mut json = serde_json::to_value(&key_pair.public_key).unwrap();
        json["Ys"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<PublicKey<Bn254>>(json.clone()).unwrap_err();
        assert!(err.to_string().contains("2 Ys and 3 Yts"), "{}", err);

        // The key pair embedding it is rejected too.
        let mut stored = serde_json::to_value(&key_pair).unwrap();
        stored["publicKey"] = json;
        assert!(serde_json::from_value::<KeyPair<Bn254>>(stored).is_err());
    }
}
