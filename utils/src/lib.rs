#![cfg_attr(not(feature = "std"), no_std)]

//! Helpers shared by the credential and linking crates.
//!
//! - Hashing of byte strings to field elements and to points of `G1`/`G2`
//! - Serde adapters that move arkworks objects across process boundaries as hex strings
//! - A length-prefixed, kind-tagged transcript from which Fiat-Shamir challenges are derived
//! - Pairing and parallelism macros

#[macro_use]
pub mod macros;
pub mod hashing_utils;
pub mod misc;
#[macro_use]
pub mod serde_utils;
pub mod transcript;
