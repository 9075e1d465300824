//! Pointcheval-Sanders signature engine.

pub mod error;
pub mod ps_signature;

pub use error::*;
pub use ps_signature::*;
