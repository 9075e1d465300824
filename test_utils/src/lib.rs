use ark_bn254::Bn254;
use ark_ec::pairing::Pairing;
use ark_std::rand::{rngs::StdRng, RngCore, SeedableRng};
use ps_credentials::{setup::SetupParams, Credential, Issuer, User};

pub type Fr = <Bn254 as Pairing>::ScalarField;
pub type G1 = <Bn254 as Pairing>::G1Affine;
pub type G2 = <Bn254 as Pairing>::G2Affine;

#[macro_use]
pub mod serialization;

/// Attributes of the reference credential, the user's followed by the issuer's.
pub const USER_ATTRIBUTES: [&str; 4] = ["ab", "noooo", "secretKey", "scene"];
pub const ISSUER_ATTRIBUTES: [&str; 2] = ["bahhh", "yeah"];

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0u64)
}

/// Setup params along with an issuer for credentials of `attribute_count` attributes.
pub fn test_issuer<R: RngCore>(
    rng: &mut R,
    attribute_count: usize,
) -> (SetupParams<Bn254>, Issuer<Bn254>) {
    let params = SetupParams::new();
    let issuer = Issuer::new(rng, attribute_count, &params);

    (params, issuer)
}

/// Runs blind issuance end to end: commitment, blind signature, unblinding and verification.
pub fn issue_credential<R: RngCore>(
    rng: &mut R,
    issuer: &Issuer<Bn254>,
    user_attributes: &[&str],
    issuer_attributes: &[&str],
) -> Credential<Bn254> {
    let mut user = User::new();
    let commitment = user
        .create_commitment(rng, issuer.public_key(), user_attributes)
        .unwrap();
    let blind_signature = issuer
        .blind_sign(rng, &commitment, issuer_attributes)
        .unwrap();
    let attributes: Vec<&str> = user_attributes
        .iter()
        .chain(issuer_attributes)
        .copied()
        .collect();

    user.unblind_and_verify(&blind_signature, issuer.public_key(), &attributes)
        .unwrap()
}

/// Issues a credential over `attributes`, all of them chosen by the user.
pub fn issue_user_credential<R: RngCore>(
    rng: &mut R,
    issuer: &Issuer<Bn254>,
    attributes: &[&str],
) -> Credential<Bn254> {
    issue_credential(rng, issuer, attributes, &[])
}
