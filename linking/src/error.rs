use ark_serialize::SerializationError;
use core::fmt;
use ps_credentials::CredentialError;
use schnorr_pok::error::SchnorrError;

#[derive(Debug)]
pub enum LinkingError {
    /// The answer carries no link info for the study.
    MissingLinkInfo(String),
    UnknownStudy(String),
    /// The key attribute isn't a hidden attribute of the credential.
    InvalidKeyIndex(usize),
    MalformedPayload(String),
    Credential(CredentialError),
    Schnorr(SchnorrError),
}

impl fmt::Display for LinkingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLinkInfo(study) => write!(f, "answer has no link info for study {}", study),
            Self::UnknownStudy(study) => write!(f, "unknown study {}", study),
            Self::InvalidKeyIndex(idx) => write!(f, "invalid key index {}", idx),
            Self::MalformedPayload(msg) => write!(f, "malformed payload: {}", msg),
            Self::Credential(e) => write!(f, "{}", e),
            Self::Schnorr(e) => write!(f, "schnorr proof error: {}", e),
        }
    }
}

impl std::error::Error for LinkingError {}

impl From<CredentialError> for LinkingError {
    fn from(e: CredentialError) -> Self {
        match e {
            CredentialError::InvalidKeyIndex(idx) => Self::InvalidKeyIndex(idx),
            CredentialError::MalformedPayload(msg) => Self::MalformedPayload(msg),
            e => Self::Credential(e),
        }
    }
}

impl From<SchnorrError> for LinkingError {
    fn from(e: SchnorrError) -> Self {
        Self::Schnorr(e)
    }
}

impl From<SerializationError> for LinkingError {
    fn from(e: SerializationError) -> Self {
        Self::Credential(CredentialError::Serialization(e))
    }
}
