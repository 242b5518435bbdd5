//! Item request validation.

use crate::error::AppError;
use crate::models::{Item, ItemRequest};

pub struct RequestValidator;

impl RequestValidator {
    /// Rules checked before create. Name is checked before category; the first failure wins.
    /// No other field is validated.
    pub fn validate_create(req: &ItemRequest) -> Result<(), AppError> {
        if req.name.is_empty() {
            return Err(AppError::Validation("item name is required".into()));
        }
        if req.category_id.is_empty() {
            return Err(AppError::Validation("category ID is required".into()));
        }
        Ok(())
    }

    /// Update and delete are keyed by id, so it must be present.
    pub fn validate_id(item: &Item) -> Result<(), AppError> {
        if item.id.is_empty() {
            return Err(AppError::Validation("item id is required".into()));
        }
        Ok(())
    }
}
