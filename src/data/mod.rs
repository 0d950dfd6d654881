//! Aggregate data contract consumed by the charts and the conversions that
//! shape it into chart inputs.

pub mod convert;
mod error;
pub mod sample;
pub mod types;

pub use error::DataError;

use serde::de::DeserializeOwned;

/// Decode one of the aggregate payloads from its JSON text.
pub fn decode<T: DeserializeOwned>(json: &str) -> Result<T, DataError> {
	Ok(serde_json::from_str(json)?)
}
