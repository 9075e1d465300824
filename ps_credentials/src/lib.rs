//! # Anonymous credentials from Pointcheval-Sanders signatures
//!
//! - Pointcheval-Sanders (PS) short randomizable signatures as described in [Short Randomizable Signatures](https://eprint.iacr.org/2015/525).
//! - Blind issuance: the [`User`] commits to its attributes and proves knowledge of the opening, the
//!   [`Issuer`] signs the commitment together with issuer-chosen attributes without learning the committed ones.
//! - Showing: the holder re-randomizes the signature and proves knowledge of the hidden attributes with a
//!   Fiat-Shamir transformed Schnorr protocol in the target group, see [`proof`].
//! - Domain-specific pseudonyms `nym = H(domain)^key` that can be bound to a showing.
//!
//! All arithmetic needs an initialized [`SetupParams`] which deterministically derives the group generators.

extern crate alloc;

pub mod api;
pub mod config;
pub mod credential;
pub mod error;
pub mod hashing;
pub mod issuer;
pub mod proof;
pub mod serialization;
pub mod setup;
pub mod signature;
pub mod user;
pub mod verifier;


pub use credential::Credential;
pub use error::CredentialError;
pub use issuer::Issuer;
pub use proof::*;
pub use serialization::JsonWire;
pub use setup::{keygen, KeyPair, PublicKey, SecretKey, SetupParams, SigningKey};
pub use signature::*;
pub use user::User;
pub use verifier::Verifier;
