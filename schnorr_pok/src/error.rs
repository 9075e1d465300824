use ark_serialize::SerializationError;
use ark_std::fmt;

#[derive(Debug)]
pub enum SchnorrError {
    /// Sequences that must be of equal length were not. Holds `(left length, right length)`.
    ExpectedSameSizeSequences(usize, usize),
    /// Holds `(index, length)`.
    IndexOutOfBounds(usize, usize),
    InvalidResponse,
    Serialization(SerializationError),
}

impl From<SerializationError> for SchnorrError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}

impl fmt::Display for SchnorrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedSameSizeSequences(left, right) => {
                write!(f, "expected sequences of equal size, got {} and {}", left, right)
            }
            Self::IndexOutOfBounds(idx, len) => {
                write!(f, "index {} is out of bounds for length {}", idx, len)
            }
            Self::InvalidResponse => write!(f, "invalid response"),
            Self::Serialization(e) => write!(f, "serialization error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchnorrError {}
