//! Contact form endpoint handler.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_contact_submission;

/// A contact form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(custom(function = "shared::validation::validate_email_address"))]
    pub email: String,
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Message must be between 1 and 10000 characters"
    ))]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: String,
}

/// Accept a contact form submission and notify the site operator.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(payload): Json<ContactRequest>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiError> {
    payload.validate()?;

    state
        .email
        .send_contact_notification(&payload.name, &payload.email, &payload.message)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to deliver contact notification");
            ApiError::ServiceUnavailable("Could not deliver message".into())
        })?;

    record_contact_submission();

    Ok((
        StatusCode::ACCEPTED,
        Json(ContactResponse {
            status: "accepted".to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(request("Ada", "ada@example.com", "Hello").validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        assert!(request("", "ada@example.com", "Hello").validate().is_err());
    }

    #[test]
    fn test_rejects_bad_email() {
        assert!(request("Ada", "not-an-email", "Hello").validate().is_err());
    }

    #[test]
    fn test_rejects_empty_message() {
        assert!(request("Ada", "ada@example.com", "").validate().is_err());
    }
}
