//! Request extractors that reject with the service's error envelope.

pub mod json;
pub use json::JsonBody;
