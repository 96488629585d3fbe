//! Pure functions for serializing/deserializing the vote result to/from
//! cache bytes.
//!
//! JSON serialization keeps cache values human-readable and easy to inspect.

use thiserror::Error;

use crate::lunch::WinningMenu;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a winner list to JSON bytes.
pub fn serialize_winners(winners: &[WinningMenu]) -> Result<Vec<u8>> {
    serde_json::to_vec(winners).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a winner list.
pub fn deserialize_winners(bytes: &[u8]) -> Result<Vec<WinningMenu>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_winners() {
        let winners = vec![
            WinningMenu {
                restaurant: "Soup Palace".to_string(),
                name: "Monday special".to_string(),
                details: "Corn Soup\nSalad with Chicken".to_string(),
            },
            WinningMenu {
                restaurant: "Taco Cart".to_string(),
                name: "Taco Tuesday".to_string(),
                details: "Three tacos".to_string(),
            },
        ];

        let bytes = serialize_winners(&winners).expect("serialize should succeed");
        let deserialized = deserialize_winners(&bytes).expect("deserialize should succeed");

        assert_eq!(winners, deserialized);
    }

    #[test]
    fn test_roundtrip_empty_winners() {
        let bytes = serialize_winners(&[]).expect("serialize should succeed");
        let deserialized = deserialize_winners(&bytes).expect("deserialize should succeed");
        assert!(deserialized.is_empty());
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        let result = deserialize_winners(b"not json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }
}
