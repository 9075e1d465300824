//! Byte transcript over which Fiat-Shamir challenges are computed.
//!
//! Every element is written as `kind (1 byte) || length (4 bytes, LE) || compressed encoding` and the
//! transcript starts with a length-prefixed protocol label, so two different sequences of elements can
//! never produce the same bytes and transcripts of different protocols never collide.

use ark_ec::pairing::{Pairing, PairingOutput};
use ark_serialize::{CanonicalSerialize, SerializationError};
use ark_std::{marker::PhantomData, vec::Vec};
use digest::Digest;

use crate::hashing_utils::field_elem_from_try_and_incr;

/// The closed set of element kinds that can be appended to a transcript.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ElementKind {
    Scalar = 1,
    G1 = 2,
    G2 = 3,
    Gt = 4,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeTranscript<E: Pairing> {
    bytes: Vec<u8>,
    _pairing: PhantomData<E>,
}

impl<E: Pairing> ChallengeTranscript<E> {
    pub fn new(label: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(1024);
        bytes.extend_from_slice(&(label.len() as u32).to_le_bytes());
        bytes.extend_from_slice(label);
        Self {
            bytes,
            _pairing: PhantomData,
        }
    }

    pub fn append<T: CanonicalSerialize>(
        &mut self,
        kind: ElementKind,
        element: &T,
    ) -> Result<(), SerializationError> {
        self.bytes.push(kind as u8);
        self.bytes
            .extend_from_slice(&(element.compressed_size() as u32).to_le_bytes());
        element.serialize_compressed(&mut self.bytes)
    }

    pub fn append_scalar(&mut self, s: &E::ScalarField) -> Result<(), SerializationError> {
        self.append(ElementKind::Scalar, s)
    }

    pub fn append_g1(&mut self, g: &E::G1Affine) -> Result<(), SerializationError> {
        self.append(ElementKind::G1, g)
    }

    pub fn append_g2(&mut self, g: &E::G2Affine) -> Result<(), SerializationError> {
        self.append(ElementKind::G2, g)
    }

    pub fn append_gt(&mut self, gt: &PairingOutput<E>) -> Result<(), SerializationError> {
        self.append(ElementKind::Gt, gt)
    }

    pub fn append_g1s<'a>(
        &mut self,
        elements: impl IntoIterator<Item = &'a E::G1Affine>,
    ) -> Result<(), SerializationError> {
        elements.into_iter().try_for_each(|g| self.append_g1(g))
    }

    pub fn append_g2s<'a>(
        &mut self,
        elements: impl IntoIterator<Item = &'a E::G2Affine>,
    ) -> Result<(), SerializationError> {
        elements.into_iter().try_for_each(|g| self.append_g2(g))
    }

    /// Hashes the transcript to a scalar using try-and-increment.
    pub fn challenge<D: Digest>(&self) -> E::ScalarField {
        field_elem_from_try_and_incr::<E::ScalarField, D>(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
