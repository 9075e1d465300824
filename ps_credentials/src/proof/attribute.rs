use alloc::{string::String, vec::Vec};
use serde::{Deserialize, Serialize};

use crate::error::CredentialError;

/// One attribute slot as seen by a verifier: either its disclosed value or hidden.
/// On the wire a disclosed attribute is a JSON string and a hidden one is `null`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum Attribute {
    Disclosed(String),
    Hidden,
}

impl Attribute {
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub fn disclosed(&self) -> Option<&str> {
        match self {
            Self::Disclosed(value) => Some(value),
            Self::Hidden => None,
        }
    }
}

impl From<Option<String>> for Attribute {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Hidden, Self::Disclosed)
    }
}

impl From<Attribute> for Option<String> {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Disclosed(value) => Some(value),
            Attribute::Hidden => None,
        }
    }
}

/// Hides the attributes at `hidden_indices` and discloses all others.
pub fn disclose<S: AsRef<str>>(
    attributes: &[S],
    hidden_indices: &[usize],
) -> Result<Vec<Attribute>, CredentialError> {
    if let Some(&index) = hidden_indices.iter().find(|&&i| i >= attributes.len()) {
        return Err(CredentialError::AttributeIndexOutOfBounds {
            index,
            count: attributes.len(),
        });
    }

    Ok(attributes
        .iter()
        .enumerate()
        .map(|(i, a)| {
            if hidden_indices.contains(&i) {
                Attribute::Hidden
            } else {
                Attribute::Disclosed(a.as_ref().into())
            }
        })
        .collect())
}

/// Indices of the hidden slots, ascending.
pub fn hidden_indices(attributes: &[Attribute]) -> Vec<usize> {
    attributes
        .iter()
        .enumerate()
        .filter_map(|(i, a)| a.is_hidden().then_some(i))
        .collect()
}
