use alloc::vec::Vec;
use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::PrimeField;
use ark_std::{end_timer, rand::RngCore, start_timer, UniformRand};
use core::iter::once;
use credential_utils::transcript::ChallengeTranscript;
use log::{debug, warn};
use schnorr_pok::SchnorrResponse;

use crate::{
    config::IssuerConfig,
    error::CredentialError,
    hashing::hash_attributes,
    proof::{
        toolkit::{challenge, COMMITMENT_LABEL},
        Commitment,
    },
    setup::{FileKeyStore, KeyPair, KeyStore, PublicKey, SetupParams},
    signature::Signature,
};

/// Holder of the issuer key pair. Signs commitments to user attributes together with its own attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issuer<E: Pairing> {
    key_pair: KeyPair<E>,
}

impl<E: Pairing> Issuer<E> {
    /// Issuer with a freshly generated key pair for credentials of `attribute_count` attributes.
    pub fn new<R: RngCore>(rng: &mut R, attribute_count: usize, params: &SetupParams<E>) -> Self {
        Self {
            key_pair: KeyPair::generate(rng, attribute_count, params),
        }
    }

    pub fn from_key_pair(key_pair: KeyPair<E>) -> Result<Self, CredentialError> {
        if !key_pair.is_consistent() {
            return Err(CredentialError::KeyPairCapacityMismatch {
                expected: key_pair.r,
                found: key_pair.public_key.attribute_count(),
            });
        }

        Ok(Self { key_pair })
    }

    /// Issuer whose key pair is loaded from the store, or generated and stored if the store is empty.
    pub fn with_key_store<R: RngCore, K: KeyStore<E>>(
        rng: &mut R,
        attribute_count: usize,
        params: &SetupParams<E>,
        store: &K,
    ) -> Result<Self, CredentialError> {
        store
            .load_or_create(rng, attribute_count, params)
            .map(|key_pair| Self { key_pair })
    }

    /// Issuer as described by the config, persisting its key pair when a key file is set.
    pub fn from_config<R: RngCore>(
        rng: &mut R,
        config: &IssuerConfig,
        params: &SetupParams<E>,
    ) -> Result<Self, CredentialError> {
        config.validate()?;
        match &config.key_file {
            Some(path) => Self::with_key_store(
                rng,
                config.attribute_count,
                params,
                &FileKeyStore::new(path.clone()),
            ),
            None => Ok(Self::new(rng, config.attribute_count, params)),
        }
    }

    pub fn public_key(&self) -> &PublicKey<E> {
        &self.key_pair.public_key
    }

    pub fn key_pair(&self) -> &KeyPair<E> {
        &self.key_pair
    }

    pub fn attribute_count(&self) -> usize {
        self.key_pair.r
    }

    /// Verifies the proof of knowledge of the commitment's opening by recomputing
    /// `W' = g^s * prod(Y_i^{s_i}) / C^c` and checking that it hashes back to the challenge.
    /// The commitment must cover exactly the slots not taken by the `issuer_attributes_count` trailing attributes.
    pub fn check_commitment(
        &self,
        commitment: &Commitment<E>,
        issuer_attributes_count: usize,
    ) -> Result<bool, CredentialError> {
        let pk = self.public_key();
        let r = self.attribute_count();
        if issuer_attributes_count > r {
            return Err(CredentialError::IssuerAttributesExceedCapacity {
                received: issuer_attributes_count,
                capacity: r,
            });
        }
        let user_count = commitment.proof.sis.len();
        if user_count != r - issuer_attributes_count {
            return Err(CredentialError::AttributeCountMismatch {
                received: user_count,
                expected: r - issuer_attributes_count,
            });
        }

        let bases: Vec<_> = once(pk.g).chain(pk.y[..user_count].iter().copied()).collect();
        let responses = SchnorrResponse::<E::G1Affine>(
            once(commitment.proof.s)
                .chain(commitment.proof.sis.iter().copied())
                .collect(),
        );
        let candidate = responses.compute_t(&bases, &commitment.c, &commitment.proof.challenge)?;
        let transcript = commitment_transcript(pk, &commitment.c, &candidate)?;

        Ok(challenge(&transcript) == commitment.proof.challenge)
    }

    /// Signs the committed attributes followed by the issuer's attributes, which take the trailing slots.
    /// Returns `(g^u, (X * C * prod_j(Y_{r-k+j}^{H(a_j)}))^u)` which the user unblinds with the
    /// commitment's blinding.
    pub fn blind_sign<R: RngCore, S: AsRef<str>>(
        &self,
        rng: &mut R,
        commitment: &Commitment<E>,
        issuer_attributes: &[S],
    ) -> Result<Signature<E>, CredentialError> {
        let timer = start_timer!(|| "Blind signing");
        if !self.check_commitment(commitment, issuer_attributes.len())? {
            warn!("rejected commitment with an invalid proof of knowledge");
            return Err(CredentialError::InvalidCommitment);
        }

        let pk = self.public_key();
        let r = self.attribute_count();
        let k = issuer_attributes.len();
        let messages = hash_attributes::<E::ScalarField, _>(issuer_attributes);
        let base = E::G1::msm_unchecked(&pk.y[r - k..], &messages)
            + self.key_pair.secret_key.x
            + commitment.c;

        let u = E::ScalarField::rand(rng).into_bigint();
        let points =
            E::G1::normalize_batch(&[pk.g.mul_bigint(u), base.into_affine().mul_bigint(u)]);
        debug!("blind signed a commitment with {} issuer attributes", k);
        end_timer!(timer);

        Ok(Signature {
            sigma_1: points[0],
            sigma_2: points[1],
        })
    }
}

/// Transcript `label || C || g || Y_1..Y_r || W` of the commitment proof.
pub(crate) fn commitment_transcript<E: Pairing>(
    pk: &PublicKey<E>,
    c: &E::G1Affine,
    commitment: &E::G1Affine,
) -> Result<ChallengeTranscript<E>, CredentialError> {
    let mut transcript = ChallengeTranscript::new(COMMITMENT_LABEL);
    transcript.append_g1(c)?;
    transcript.append_g1(&pk.g)?;
    transcript.append_g1s(&pk.y)?;
    transcript.append_g1(commitment)?;

    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::User;
    use ark_bn254::Bn254;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn blind_sign_checks() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SetupParams::<Bn254>::new();
        let issuer = Issuer::new(&mut rng, 4, &params);
        let mut user = User::new();
        let commitment = user
            .create_commitment(&mut rng, issuer.public_key(), &["ab", "noooo"])
            .unwrap();

        assert!(issuer.check_commitment(&commitment, 2).unwrap());
        assert!(matches!(
            issuer.blind_sign(&mut rng, &commitment, &["a", "b", "c", "d", "e"]),
            Err(CredentialError::IssuerAttributesExceedCapacity {
                received: 5,
                capacity: 4
            })
        ));
        assert!(matches!(
            issuer.blind_sign(&mut rng, &commitment, &["a"]),
            Err(CredentialError::AttributeCountMismatch {
                received: 2,
                expected: 3
            })
        ));

        let mut forged = commitment.clone();
        forged.proof.s += forged.proof.challenge;
        assert!(matches!(
            issuer.blind_sign(&mut rng, &forged, &["a", "b"]),
            Err(CredentialError::InvalidCommitment)
        ));

        // Proofs are bound to the issuer key.
        let other = Issuer::new(&mut rng, 4, &params);
        assert!(!other.check_commitment(&commitment, 2).unwrap());

        let blind = issuer.blind_sign(&mut rng, &commitment, &["a", "b"]).unwrap();
        let sig = user.unblind_signature(&blind).unwrap();
        assert!(sig
            .verify_attributes(&["ab", "noooo", "a", "b"], issuer.public_key())
            .unwrap());
    }

    #[test]
    fn from_key_pair_rejects_inconsistent() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = SetupParams::<Bn254>::new();
        let mut key_pair = KeyPair::generate(&mut rng, 3, &params);
        assert!(Issuer::from_key_pair(key_pair.clone()).is_ok());
        key_pair.r = 4;
        assert!(matches!(
            Issuer::from_key_pair(key_pair),
            Err(CredentialError::KeyPairCapacityMismatch {
                expected: 4,
                found: 3
            })
        ));
    }
}
