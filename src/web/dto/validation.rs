//! Validation utilities for Web API DTOs.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::web::error::ApiError;

/// A JSON extractor that validates the request body.
///
/// Deserialization failures (bad syntax, missing content type, wrong field
/// types) and validation failures are both reported as 400 Bad Request.
///
/// # Example
///
/// ```ignore
/// use postboard::web::dto::ValidatedJson;
///
/// async fn create_post(
///     ValidatedJson(payload): ValidatedJson<CreatePostRequest>,
/// ) -> Result<Json<Post>, ApiError> {
///     // payload is already validated
///     // ...
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request("Invalid JSON").with_details(e.body_text()))?;

        value.validate().map_err(ApiError::from_validation_errors)?;

        Ok(ValidatedJson(value))
    }
}

/// Validate that a string is not empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_empty_trimmed")
            .with_message("must not be empty".into()));
    }
    Ok(())
}

/// Record an error for a required text field that is absent or blank.
pub fn require_text(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    match value {
        None => errors.add(
            field,
            ValidationError::new("required").with_message("is required".into()),
        ),
        Some(value) => {
            if let Err(e) = not_empty_trimmed(value) {
                errors.add(field, e);
            }
        }
    }
}

/// Turn collected field errors into a validation result.
pub fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.errors().is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
