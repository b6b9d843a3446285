//! Validated JSON extractor.
//!
//! Deserializes the body and runs its `validator` rules. Both a body that
//! does not parse and one that breaks a rule are answered with 400 and the
//! standard error JSON, field errors included for the latter.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use stockroom_core::{field_errors, validation_errors_to_stockroom_error, ErrorResponse, StockroomError};
use validator::{Validate, ValidationErrors};

use crate::responses::AppError;

/// JSON extractor that validates the deserialized value.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

/// Rejection type for validated JSON extraction.
#[derive(Debug)]
pub enum ValidatedJsonRejection {
    /// Missing content type, malformed JSON, or wrong field types.
    JsonError(JsonRejection),
    /// The body parsed but broke a validation rule.
    ValidationError(ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => AppError(StockroomError::validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
            .into_response(),
            Self::ValidationError(errors) => {
                let details = field_errors(&errors);
                let error = validation_errors_to_stockroom_error(errors);
                let body = ErrorResponse::from_error(&error).with_details(details);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}
