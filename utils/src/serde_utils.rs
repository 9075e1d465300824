//! Serde serialization for `arkworks-rs` objects. Objects travel as lowercase hex strings of their
//! compressed canonical encoding.

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::{string::String, vec::Vec};
use serde::{Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

pub type ArkObjectHex = AsHexCanonical;

/// Generalization of [`serde_with::serde_conv!`] for any `T: CanonicalSerialize + CanonicalDeserialize`.
pub struct AsHexCanonical;

impl AsHexCanonical {
    pub fn serialize<S, T>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: Serializer,
    {
        let hex = to_hex(x).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl<T> SerializeAs<T> for AsHexCanonical
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(x, serializer)
    }
}

impl<'de, T> DeserializeAs<'de, T> for AsHexCanonical
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer)
    }
}

/// Hex string of the compressed encoding of `x`.
pub fn to_hex<T: CanonicalSerialize>(x: &T) -> Result<String, SerializationError> {
    let mut bytes = Vec::with_capacity(x.compressed_size());
    x.serialize_compressed(&mut bytes)?;
    Ok(hex::encode(bytes))
}

/// Decodes and validates an object from the hex string of its compressed encoding.
pub fn from_hex<T: CanonicalDeserialize>(s: &str) -> Result<T, SerializationError> {
    let bytes = hex::decode(s).map_err(|_| SerializationError::InvalidData)?;
    T::deserialize_compressed(bytes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{Bn254, Fr, G1Affine, G2Affine};
    use ark_ec::{
        pairing::{Pairing, PairingOutput},
        AffineRepr,
    };
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use serde::Serialize;
    use serde_with::serde_as;

    #[serde_as]
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Wrapper {
        #[serde_as(as = "ArkObjectHex")]
        scalar: Fr,
        #[serde_as(as = "Vec<ArkObjectHex>")]
        points: Vec<G1Affine>,
    }

    #[test]
    fn hex_roundtrip() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let s = Fr::rand(&mut rng);
        assert_eq!(from_hex::<Fr>(&to_hex(&s).unwrap()).unwrap(), s);

        let g2 = G2Affine::rand(&mut rng);
        assert_eq!(from_hex::<G2Affine>(&to_hex(&g2).unwrap()).unwrap(), g2);

        let gt = Bn254::pairing(G1Affine::generator(), g2);
        assert_eq!(
            from_hex::<PairingOutput<Bn254>>(&to_hex(&gt).unwrap()).unwrap(),
            gt
        );

        let w = Wrapper {
            scalar: s,
            points: vec![G1Affine::rand(&mut rng), G1Affine::rand(&mut rng)],
        };
        let json = serde_json::to_string(&w).unwrap();
        assert_eq!(serde_json::from_str::<Wrapper>(&json).unwrap(), w);
    }

    #[test]
    fn rejects_bad_hex() {
        assert!(from_hex::<Fr>("zz").is_err());
        assert!(from_hex::<G1Affine>("00").is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"scalar":"0g","points":[]}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"points":[]}"#).is_err());
    }
}
