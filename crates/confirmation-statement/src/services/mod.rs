//! Contracts for the remote APIs the journey reads from and writes to.
//!
//! Adapters convert any non-success HTTP status into a [`ServiceError`]; no retries are attempted.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filing::{CompanyProfile, ConfirmationStatementSubmission};

/// Error code the registered email address API returns when a company has no email on file.
pub const REGISTERED_EMAIL_NOT_FOUND_ERROR: &str = "registered-email-address-not-found";

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{service} responded with status {status}")]
    Status { service: &'static str, status: u16 },
    #[error("{service} returned no {resource}")]
    MissingResource {
        service: &'static str,
        resource: &'static str,
    },
    #[error("{service} unavailable: {detail}")]
    Unavailable {
        service: &'static str,
        detail: String,
    },
}

#[async_trait]
pub trait CompanyProfileService: Send + Sync {
    async fn get_company_profile(&self, company_number: &str)
        -> Result<CompanyProfile, ServiceError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextMadeUpToDate {
    #[serde(default)]
    pub current_next_made_up_to_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_due: Option<bool>,
    #[serde(default)]
    pub new_next_made_up_to_date: Option<NaiveDate>,
}

#[async_trait]
pub trait ConfirmationStatementService: Send + Sync {
    /// Raw eligibility status code for the company.
    async fn check_eligibility(&self, company_number: &str) -> Result<String, ServiceError>;

    /// Create the submission inside a transaction, returning its id.
    async fn create_confirmation_statement(
        &self,
        company_number: &str,
        transaction_id: &str,
    ) -> Result<String, ServiceError>;

    async fn get_confirmation_statement(
        &self,
        transaction_id: &str,
        submission_id: &str,
    ) -> Result<ConfirmationStatementSubmission, ServiceError>;

    async fn update_confirmation_statement(
        &self,
        transaction_id: &str,
        submission: &ConfirmationStatementSubmission,
    ) -> Result<(), ServiceError>;

    async fn get_next_made_up_to_date(
        &self,
        company_number: &str,
    ) -> Result<NextMadeUpToDate, ServiceError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub company_number: String,
    pub reference: String,
    pub description: String,
    pub status: String,
}

/// Outcome of closing a transaction; a payment url means the filing fee is still owed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosedTransaction {
    pub payment_url: Option<String>,
}

#[async_trait]
pub trait TransactionService: Send + Sync {
    async fn post_transaction(
        &self,
        company_number: &str,
        description: &str,
        reference: &str,
    ) -> Result<Transaction, ServiceError>;

    async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, ServiceError>;

    async fn close_transaction(
        &self,
        company_number: &str,
        transaction_id: &str,
    ) -> Result<ClosedTransaction, ServiceError>;
}

#[async_trait]
pub trait RegisteredEmailAddressService: Send + Sync {
    /// Registered email address, or an empty string when the company has none.
    async fn get_registered_email_address(
        &self,
        company_number: &str,
    ) -> Result<String, ServiceError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisteredEmailBody {
    registered_email_address: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    error: String,
}

/// Interpret a registered email address API response.
///
/// A 404 carrying the known not-found error is an expected outcome and yields an empty string;
/// any other 404 is a failure like every other non-success status.
pub fn registered_email_from_response(status: u16, body: &str) -> Result<String, ServiceError> {
    const SERVICE: &str = "registered email address api";

    match status {
        200 => serde_json::from_str::<RegisteredEmailBody>(body)
            .map(|parsed| parsed.registered_email_address)
            .map_err(|_| ServiceError::MissingResource {
                service: SERVICE,
                resource: "registered email address",
            }),
        404 => {
            let known_not_found = serde_json::from_str::<ApiErrorBody>(body)
                .map(|parsed| {
                    parsed
                        .errors
                        .iter()
                        .any(|entry| entry.error == REGISTERED_EMAIL_NOT_FOUND_ERROR)
                })
                .unwrap_or(false);
            if known_not_found {
                Ok(String::new())
            } else {
                Err(ServiceError::Status {
                    service: SERVICE,
                    status,
                })
            }
        }
        _ => Err(ServiceError::Status {
            service: SERVICE,
            status,
        }),
    }
}

/// Hosted payment session started for a closed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSession {
    pub journey_url: String,
    pub state: String,
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    async fn start_payment(
        &self,
        payment_url: &str,
        return_url: &str,
        reference: &str,
    ) -> Result<PaymentSession, ServiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_returned_on_success() {
        let body = r#"{"registeredEmailAddress":"info@example.com"}"#;
        assert_eq!(
            registered_email_from_response(200, body).expect("email"),
            "info@example.com"
        );
    }

    #[test]
    fn known_not_found_is_empty_email() {
        let body =
            r#"{"errors":[{"error":"registered-email-address-not-found","type":"ch:service"}]}"#;
        assert_eq!(registered_email_from_response(404, body).expect("empty"), "");
    }

    #[test]
    fn other_not_found_bodies_fail() {
        let body = r#"{"errors":[{"error":"company-profile-not-found"}]}"#;
        assert!(matches!(
            registered_email_from_response(404, body),
            Err(ServiceError::Status { status: 404, .. })
        ));
        assert!(registered_email_from_response(404, "not json").is_err());
        assert!(registered_email_from_response(500, "").is_err());
    }
}
