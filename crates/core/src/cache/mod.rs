mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::result_key;
pub use serialization::{
    deserialize_winners, serialize_winners, Result as SerializationResult, SerializationError,
};
pub use traits::Cache;
