use ark_ec::{AffineRepr, CurveGroup};
use ark_ff::{
    field_hashers::{DefaultFieldHasher, HashToField},
    PrimeField,
};
use digest::{Digest, FixedOutputReset};

/// Hash bytes to a point on the curve. Returns as Projective coordinates. This is vulnerable to timing attack and is only used when input
/// is public anyway like when generating setup parameters or hashing a domain name.
pub fn projective_group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8]) -> G::Group {
    let mut hash = D::digest(bytes);
    let mut j = 1u64;
    loop {
        if let Some(g) = G::from_random_bytes(&hash) {
            return g.mul_by_cofactor_to_group();
        }
        hash = D::digest(concat_slices!(bytes, b"-attempt-", j.to_le_bytes()));
        j += 1;
    }
}

/// Hash bytes to a point on the curve. Returns as Affine coordinates. This is vulnerable to timing attack and is only used when input
/// is public anyway like when generating setup parameters or hashing a domain name.
pub fn affine_group_elem_from_try_and_incr<G: AffineRepr, D: Digest>(bytes: &[u8]) -> G {
    projective_group_elem_from_try_and_incr::<G, D>(bytes).into_affine()
}

/// Hash bytes to a field element. This is vulnerable to timing attack and is only used when input
/// is public anyway like when generating a challenge
pub fn field_elem_from_try_and_incr<F: PrimeField, D: Digest>(bytes: &[u8]) -> F {
    let mut hash = D::digest(bytes);
    let mut j = 1u64;
    loop {
        if let Some(f) = F::from_random_bytes(&hash) {
            return f;
        }
        hash = D::digest(concat_slices!(bytes, b"-attempt-", j.to_le_bytes()));
        j += 1;
    }
}

/// Hash bytes to a field element using the hash-to-field construction with the domain separation tag `dst`.
/// Constant time in the input, unlike `field_elem_from_try_and_incr`.
pub fn hash_to_field<F, D>(dst: &[u8], bytes: &[u8]) -> F
where
    F: PrimeField,
    D: FixedOutputReset + Default + Clone + 'static,
{
    let hasher = <DefaultFieldHasher<D> as HashToField<F>>::new(dst);
    hasher.hash_to_field(bytes, 1)[0]
}
