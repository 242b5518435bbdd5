//! Request validation applied by the item handlers before touching the store.

mod validation;
pub use validation::RequestValidator;
