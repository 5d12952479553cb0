//! Request body extraction and validation.
//!
//! [`JsonBody`] only deserializes. Handlers take it as
//! `Result<JsonBody<T>, DomainError>` and hand the result to the service,
//! which looks up the target resource and checks the caller's role before
//! it looks at the body. Malformed JSON and field validation through
//! [`validate`] are therefore reported only to callers allowed to write.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use classbook_core::DomainError;

fn format_errors(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().filter_map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .or_else(|| Some(format!("{} is invalid", field)))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Runs the DTO's `validator` rules, reporting failures as `400`.
pub fn validate<T: Validate>(dto: &T) -> Result<(), DomainError> {
    dto.validate().map_err(|errors| {
        let message = format_errors(&errors);
        if message.is_empty() {
            DomainError::validation("Invalid request body")
        } else {
            DomainError::validation(message)
        }
    })
}

/// Body parse or validation outcome handed from a handler to its service.
pub type Payload<T> = Result<T, DomainError>;

/// JSON body extractor with `{"error": ...}` rejections.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    /// Unwraps an optional extraction into the service payload.
    pub fn payload(body: Result<Self, DomainError>) -> Payload<T> {
        body.map(|JsonBody(value)| value)
    }
}

fn rejection_error(rejection: JsonRejection) -> DomainError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return DomainError::validation("Missing 'Content-Type: application/json' header");
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return DomainError::validation(format!("{} is required", field));
    }

    if error_msg.contains("invalid type") || error_msg.contains("UUID") {
        return DomainError::validation("Invalid field type in request");
    }

    DomainError::validation("Invalid request body")
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = DomainError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_error)?;

        Ok(JsonBody(value))
    }
}
