use ark_serialize::SerializationError;

/// An error originated from `Signature`.
#[derive(Debug)]
pub enum PSError {
    MessageCountExceedsCapacity { received: usize, capacity: usize },
    InvalidMessageCount { received: usize, expected: usize },
    Serialization(SerializationError),
}

impl From<SerializationError> for PSError {
    fn from(e: SerializationError) -> Self {
        Self::Serialization(e)
    }
}
