use ark_ec::{
    pairing::{Pairing, PairingOutput},
    AffineRepr, CurveGroup,
};
use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{end_timer, rand::RngCore, start_timer, UniformRand};
use core::iter::once;
use credential_utils::{
    join,
    serde_utils::{from_hex, to_hex, ArkObjectHex},
    transcript::ChallengeTranscript,
};
use ps_credentials::{
    hashing::hash_to_g1,
    impl_json_wire,
    proof::toolkit::{
        append_nym, challenge, key_position, normalize_hidden, nym_candidate, CredentialProver,
    },
    Attribute, ProofOfKnowledge, Pseudonym, PublicKey, Signature, SignatureProof, Verifier,
};
use schnorr_pok::{SchnorrCommitment, SchnorrResponse};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use zeroize::Zeroize;

use crate::{error::LinkingError, setup::LinkingParams};

pub const LINK_INFO_LABEL: &[u8] = b"LINKING-LINK-INFO";

/// Proof that a link info was built from the hidden key attribute of a valid credential, the same key the
/// questionnaire's pseudonym is derived from.
///
/// `exponents` are the responses for `[v, hidden attributes..., z]`.
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct LinkInfoCorrectness<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    pub challenge: E::ScalarField,
    #[serde_as(as = "Vec<ArkObjectHex>")]
    pub exponents: Vec<E::ScalarField>,
    pub signature: Signature<E>,
}

/// `s = h^z` and `t = e(H(study), s)^key` for a fresh `z`, along with the proof of their correctness.
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(bound = "")]
pub struct LinkInfo<E: Pairing> {
    #[serde_as(as = "ArkObjectHex")]
    pub s: E::G2Affine,
    #[serde_as(as = "ArkObjectHex")]
    pub t: PairingOutput<E>,
    pub proof: LinkInfoCorrectness<E>,
}

/// Token `T = H(study)^key` a student releases to let a study link its answers.
#[serde_as]
#[derive(
    Clone, PartialEq, Eq, Debug, CanonicalSerialize, CanonicalDeserialize, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LinkToken<E: Pairing>(#[serde_as(as = "ArkObjectHex")] pub E::G1Affine);

impl_json_wire!(LinkInfoCorrectness, LinkInfo, LinkToken);

impl<E: Pairing> LinkInfo<E> {
    /// Builds the link info of an answer to `questionnaire_id` for `study_id`. The key is the hidden attribute
    /// at `key_idx`.
    #[allow(clippy::too_many_arguments)]
    pub fn new<R: RngCore, S: AsRef<str>>(
        rng: &mut R,
        params: &LinkingParams<E>,
        pk: &PublicKey<E>,
        signature: &Signature<E>,
        attributes: &[S],
        hidden_indices: &[usize],
        key_idx: usize,
        questionnaire_id: &str,
        study_id: &str,
    ) -> Result<Self, LinkingError> {
        let timer = start_timer!(|| "Link info");
        let position = key_position(
            &normalize_hidden(hidden_indices, pk.attribute_count())?,
            key_idx,
        )?;
        let prover = CredentialProver::init(rng, signature, pk, attributes, hidden_indices)?;
        let key_randomizer = prover.hidden_randomizer(position)?;
        let mut key = prover.hidden_secret(position)?;

        let questionnaire_base = hash_to_g1::<E>(questionnaire_id);
        let nym = Pseudonym::from_secret(questionnaire_id, &key);
        let nym_commitment = SchnorrCommitment::new(&[questionnaire_base], vec![key_randomizer])?;

        let mut z = E::ScalarField::rand(rng);
        let s = params.h.mul_bigint(z.into_bigint()).into_affine();
        let z_commitment = SchnorrCommitment::new(&[params.h], vec![E::ScalarField::rand(rng)])?;
        let study_base = hash_to_g1::<E>(study_id);
        let (t, t_commitment) = join!(
            E::pairing(study_base, s.mul_bigint(key.into_bigint())),
            E::pairing(study_base, s.mul_bigint(key_randomizer.into_bigint()))
        );
        key.zeroize();

        let mut transcript = prover.transcript(LINK_INFO_LABEL, pk)?;
        append_nym(&mut transcript, &nym, &questionnaire_base, &nym_commitment.t)?;
        append_link(
            &mut transcript,
            &s,
            &params.h,
            &z_commitment.t,
            &t,
            &study_base,
            &t_commitment,
        )?;
        let challenge = challenge(&transcript);

        let SignatureProof { proof, sigma_prime } = prover.finish(&challenge)?;
        let z_response = *z_commitment.response(&[z], &challenge)?.get_response(0)?;
        z.zeroize();
        end_timer!(timer);

        Ok(Self {
            s,
            t,
            proof: LinkInfoCorrectness {
                challenge,
                exponents: once(proof.s)
                    .chain(proof.sis)
                    .chain(once(z_response))
                    .collect(),
                signature: sigma_prime,
            },
        })
    }

    /// Checks the link info of an answer to `questionnaire_id` for `study_id`, shown along with `nym`.
    /// `attributes` has one slot per credential attribute and the key attribute at `key_idx` must be hidden.
    /// Returns `Ok(false)` for a proof that doesn't verify, including one with the wrong number of exponents.
    #[allow(clippy::too_many_arguments)]
    pub fn verify(
        &self,
        params: &LinkingParams<E>,
        pk: &PublicKey<E>,
        attributes: &[Attribute],
        key_idx: usize,
        nym: &Pseudonym<E>,
        questionnaire_id: &str,
        study_id: &str,
    ) -> Result<bool, LinkingError> {
        let timer = start_timer!(|| "Verify link info");
        let disclosure = Verifier::disclosure(pk, attributes)?;
        if key_idx >= attributes.len() {
            return Err(LinkingError::InvalidKeyIndex(key_idx));
        }
        let position = key_position(&disclosure.hidden, key_idx)?;
        let hidden_count = disclosure.hidden.len();
        let LinkInfoCorrectness {
            challenge: c,
            exponents,
            signature,
        } = &self.proof;
        if exponents.len() != hidden_count + 2 || signature.sigma_1.is_zero() {
            return Ok(false);
        }

        let signature_proof = SignatureProof {
            proof: ProofOfKnowledge {
                challenge: *c,
                s: exponents[0],
                sis: exponents[1..=hidden_count].to_vec(),
            },
            sigma_prime: signature.clone(),
        };
        let key_response = exponents[1 + position];
        let z_response = exponents[hidden_count + 1];

        let mut transcript =
            Verifier::credential_transcript(LINK_INFO_LABEL, &signature_proof, pk, &disclosure)?;
        let questionnaire_base = hash_to_g1::<E>(questionnaire_id);
        let nym_commitment = nym_candidate(&questionnaire_base, &key_response, nym, c)?;
        append_nym(&mut transcript, nym, &questionnaire_base, &nym_commitment)?;

        let z_commitment =
            SchnorrResponse::<E::G2Affine>(vec![z_response]).compute_t(&[params.h], &self.s, c)?;
        let study_base = hash_to_g1::<E>(study_id);
        let t_commitment = E::pairing(study_base, self.s) * key_response - self.t * *c;
        append_link(
            &mut transcript,
            &self.s,
            &params.h,
            &z_commitment,
            &self.t,
            &study_base,
            &t_commitment,
        )?;
        end_timer!(timer);

        Ok(challenge(&transcript) == *c)
    }
}

/// Continues the transcript with `s || h || W3 || t || H(study) || W4`.
fn append_link<E: Pairing>(
    transcript: &mut ChallengeTranscript<E>,
    s: &E::G2Affine,
    h: &E::G2Affine,
    z_commitment: &E::G2Affine,
    t: &PairingOutput<E>,
    study_base: &E::G1Affine,
    t_commitment: &PairingOutput<E>,
) -> Result<(), LinkingError> {
    transcript.append_g2(s)?;
    transcript.append_g2(h)?;
    transcript.append_g2(z_commitment)?;
    transcript.append_gt(t)?;
    transcript.append_g1(study_base)?;
    transcript.append_gt(t_commitment)?;

    Ok(())
}

impl<E: Pairing> LinkToken<E> {
    /// `H(study)^key`
    pub fn new(study_id: &str, key: &E::ScalarField) -> Self {
        Self(
            hash_to_g1::<E>(study_id)
                .mul_bigint(key.into_bigint())
                .into_affine(),
        )
    }

    /// Whether the link info was built with this token's key for this token's study, i.e. `e(T, s) == t`.
    pub fn links(&self, link_info: &LinkInfo<E>) -> bool {
        E::pairing(self.0, link_info.s) == link_info.t
    }

    pub fn to_hex(&self) -> Result<String, LinkingError> {
        Ok(to_hex(&self.0)?)
    }

    pub fn from_hex(hex: &str) -> Result<Self, LinkingError> {
        from_hex(hex)
            .map(Self)
            .map_err(|e| LinkingError::MalformedPayload(format!("invalid link token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Bn254, Fr};
    use ps_credentials::{disclose, JsonWire};
    use test_utils::{
        issue_credential, seeded_rng, test_issuer, test_serialization, ISSUER_ATTRIBUTES,
        USER_ATTRIBUTES,
    };

    const ALL_ATTRIBUTES: [&str; 6] = ["ab", "noooo", "secretKey", "scene", "bahhh", "yeah"];

    #[test]
    fn link_info_proves_the_pseudonym_key() {
        let mut rng = seeded_rng();
        let (_, issuer) = test_issuer(&mut rng, 6);
        let other_issuer = test_issuer(&mut rng, 6).1;
        let credential = issue_credential(&mut rng, &issuer, &USER_ATTRIBUTES, &ISSUER_ATTRIBUTES);
        let params = LinkingParams::<Bn254>::new();
        let pk = issuer.public_key();

        let link_info = LinkInfo::new(
            &mut rng,
            &params,
            pk,
            credential.signature(),
            credential.attributes(),
            &[1, 2],
            2,
            "quest-1",
            "study-a",
        )
        .unwrap();
        assert_eq!(link_info.proof.exponents.len(), 4);

        let attributes = disclose(&ALL_ATTRIBUTES, &[1, 2]).unwrap();
        let nym = Pseudonym::<Bn254>::new("quest-1", "secretKey");
        let check = |link_info: &LinkInfo<Bn254>,
                     pk: &PublicKey<Bn254>,
                     attributes: &[Attribute],
                     key_idx: usize,
                     nym: &Pseudonym<Bn254>,
                     questionnaire_id: &str,
                     study_id: &str| {
            link_info.verify(
                &params,
                pk,
                attributes,
                key_idx,
                nym,
                questionnaire_id,
                study_id,
            )
        };
        assert!(check(&link_info, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());

        // Wrong study, questionnaire, pseudonym or issuer
        assert!(!check(&link_info, pk, &attributes, 2, &nym, "quest-1", "study-b").unwrap());
        assert!(!check(&link_info, pk, &attributes, 2, &nym, "quest-2", "study-a").unwrap());
        let other_nym = Pseudonym::<Bn254>::new("quest-1", "noooo");
        assert!(!check(&link_info, pk, &attributes, 2, &other_nym, "quest-1", "study-a").unwrap());
        assert!(!check(
            &link_info,
            other_issuer.public_key(),
            &attributes,
            2,
            &nym,
            "quest-1",
            "study-a"
        )
        .unwrap());
        // Claiming the other hidden attribute as the key
        assert!(!check(&link_info, pk, &attributes, 1, &nym, "quest-1", "study-a").unwrap());

        // Forged proof parts
        let mut forged = link_info.clone();
        forged.proof.challenge = Fr::rand(&mut rng);
        assert!(!check(&forged, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());
        let mut forged = link_info.clone();
        forged.proof.exponents[3] += Fr::from(1u64);
        assert!(!check(&forged, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());
        let mut forged = link_info.clone();
        forged.t = forged.t + forged.t;
        assert!(!check(&forged, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());
        let mut forged = link_info.clone();
        forged.proof.exponents.pop();
        assert!(!check(&forged, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());
        let mut forged = link_info.clone();
        forged.proof.signature.sigma_1 = Default::default();
        assert!(!check(&forged, pk, &attributes, 2, &nym, "quest-1", "study-a").unwrap());

        // Key slot boundaries
        assert!(matches!(
            check(&link_info, pk, &attributes, 0, &nym, "quest-1", "study-a"),
            Err(LinkingError::InvalidKeyIndex(0))
        ));
        assert!(matches!(
            check(&link_info, pk, &attributes, 6, &nym, "quest-1", "study-a"),
            Err(LinkingError::InvalidKeyIndex(6))
        ));
        assert!(matches!(
            LinkInfo::new(
                &mut rng,
                &params,
                pk,
                credential.signature(),
                credential.attributes(),
                &[1, 2],
                3,
                "quest-1",
                "study-a",
            ),
            Err(LinkingError::InvalidKeyIndex(3))
        ));
    }

    #[test]
    fn token_opens_link_info() {
        let mut rng = seeded_rng();
        let (_, issuer) = test_issuer(&mut rng, 6);
        let credential = issue_credential(&mut rng, &issuer, &USER_ATTRIBUTES, &ISSUER_ATTRIBUTES);
        let params = LinkingParams::<Bn254>::new();
        let link_info = |rng: &mut _, questionnaire_id| {
            LinkInfo::new(
                rng,
                &params,
                issuer.public_key(),
                credential.signature(),
                credential.attributes(),
                &[2],
                2,
                questionnaire_id,
                "study-a",
            )
            .unwrap()
        };
        let first = link_info(&mut rng, "quest-1");
        let second = link_info(&mut rng, "quest-2");
        assert_ne!(first.s, second.s);
        assert_ne!(first.t, second.t);

        let key = ps_credentials::hashing::hash_to_fr::<Fr>("secretKey");
        let token = LinkToken::<Bn254>::new("study-a", &key);
        assert!(token.links(&first));
        assert!(token.links(&second));
        assert!(!LinkToken::<Bn254>::new("study-b", &key).links(&first));
        let other_key = ps_credentials::hashing::hash_to_fr::<Fr>("noooo");
        assert!(!LinkToken::<Bn254>::new("study-a", &other_key).links(&first));

        let hex = token.to_hex().unwrap();
        assert_eq!(LinkToken::<Bn254>::from_hex(&hex).unwrap(), token);
        assert!(matches!(
            LinkToken::<Bn254>::from_hex("zz"),
            Err(LinkingError::MalformedPayload(_))
        ));
        assert!(matches!(
            LinkToken::<Bn254>::from_hex(&hex[2..]),
            Err(LinkingError::MalformedPayload(_))
        ));

        test_serialization!(LinkToken<Bn254>, token, canonical);
        let proof = first.proof.clone();
        test_serialization!(LinkInfoCorrectness<Bn254>, proof, canonical);
        test_serialization!(LinkInfo<Bn254>, first, canonical);

        let json = first.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["s"].is_string());
        assert!(value["t"].is_string());
        assert!(value["proof"]["exponents"].is_array());
        assert!(value["proof"]["signature"]["sigma1"].is_string());
        assert!(matches!(
            LinkInfo::<Bn254>::from_json(r#"{"s": "00"}"#),
            Err(ps_credentials::CredentialError::MalformedPayload(_))
        ));
    }
}
