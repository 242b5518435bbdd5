//! Service configuration: JSON file, environment overrides, validation.

mod loader;
pub mod types;
mod validator;
pub use loader::*;
pub use types::*;
pub use validator::validate;
