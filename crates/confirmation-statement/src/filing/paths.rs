//! URL templates for every screen of the filing journey.
//!
//! Templates use axum's `:name` placeholders so the same constants mount the routes and build
//! redirect targets through [`JourneyIds::fill`].

use regex::Regex;
use std::sync::OnceLock;

macro_rules! submission_path {
    ($suffix:literal) => {
        concat!(
            "/confirmation-statement/company/:company_number/transaction/:transaction_id/submission/:submission_id",
            $suffix
        )
    };
}

pub const CONFIRM_COMPANY_PATH: &str = "/confirmation-statement/confirm-company";
pub const CONFIRM_COMPANY_BACK_LINK: &str =
    "/confirmation-statement/confirm-company?companyNumber=:company_number";
pub const CREATE_TRANSACTION_PATH: &str =
    "/confirmation-statement/company/:company_number/transaction";
pub const MUST_BE_AUTHORISED_AGENT_PATH: &str =
    "/confirmation-statement/company/:company_number/acsp/must-be-authorised-agent";
pub const STOP_PAGE_PATH: &str = "/confirmation-statement/stop-page/:stop_type";

pub const TRADING_STATUS_PATH: &str = submission_path!("/trading-status");
pub const TRADING_STOP_PATH: &str = submission_path!("/trading-stop");
pub const TASK_LIST_PATH: &str = submission_path!("/task-list");
pub const REVIEW_PATH: &str = submission_path!("/review");
pub const CONFIRMATION_PATH: &str = submission_path!("/confirmation");
pub const PAYMENT_CALLBACK_PATH: &str = submission_path!("/payment-callback");

pub const ACTIVE_OFFICERS_PATH: &str = submission_path!("/active-officers");
pub const ACTIVE_OFFICERS_DETAILS_PATH: &str = submission_path!("/active-officers-details");
pub const PEOPLE_WITH_SIGNIFICANT_CONTROL_PATH: &str =
    submission_path!("/people-with-significant-control");
pub const ACTIVE_PSC_DETAILS_PATH: &str = submission_path!("/active-psc-details");
pub const SIC_PATH: &str = submission_path!("/sic");
pub const SHAREHOLDERS_PATH: &str = submission_path!("/shareholders");
pub const STATEMENT_OF_CAPITAL_PATH: &str = submission_path!("/statement-of-capital");
pub const REGISTERED_OFFICE_ADDRESS_PATH: &str = submission_path!("/registered-office-address");
pub const REGISTER_LOCATIONS_PATH: &str = submission_path!("/register-locations");
pub const REGISTERED_EMAIL_ADDRESS_PATH: &str = submission_path!("/registered-email-address");
pub const CHECK_EMAIL_ADDRESS_PATH: &str = submission_path!("/check-registered-email-address");
pub const PROVIDE_EMAIL_ADDRESS_PATH: &str = submission_path!("/provide-email-address");

pub const LP_BEFORE_YOU_FILE_PATH: &str = submission_path!("/acsp/before-you-file");
pub const LP_CS_DATE_PATH: &str = submission_path!("/acsp/confirmation-statement-date");
pub const LP_CHECK_YOUR_ANSWER_PATH: &str = submission_path!("/acsp/check-your-answer");
pub const LP_SIC_CODE_SUMMARY_PATH: &str = submission_path!("/acsp/sic-code-summary");
pub const LP_REVIEW_PATH: &str = submission_path!("/acsp/review");
pub const LP_CONFIRMATION_PATH: &str = submission_path!("/acsp/confirmation");
pub const LP_PAYMENT_CALLBACK_PATH: &str = submission_path!("/acsp/payment-callback");

/// Identifier that failed its format check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}")]
pub struct InvalidIdentifier {
    pub field: &'static str,
    pub value: String,
}

fn company_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{8}$").expect("company number regex"))
}

fn transaction_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]{6}-[0-9]{6}-[0-9]{6}$").expect("transaction id regex")
    })
}

fn submission_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-f0-9]{24}$").expect("submission id regex"))
}

fn checked(
    field: &'static str,
    value: &str,
    pattern: &Regex,
) -> Result<String, InvalidIdentifier> {
    if pattern.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(InvalidIdentifier {
            field,
            value: value.to_string(),
        })
    }
}

pub fn validate_company_number(raw: &str) -> Result<String, InvalidIdentifier> {
    checked("company number", raw, company_number_pattern())
}

/// Identifiers that parameterise every screen after the transaction exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyIds {
    pub company_number: String,
    pub transaction_id: String,
    pub submission_id: String,
}

impl JourneyIds {
    pub fn parse(
        company_number: &str,
        transaction_id: &str,
        submission_id: &str,
    ) -> Result<Self, InvalidIdentifier> {
        Ok(Self {
            company_number: validate_company_number(company_number)?,
            transaction_id: checked("transaction id", transaction_id, transaction_id_pattern())?,
            submission_id: checked("submission id", submission_id, submission_id_pattern())?,
        })
    }

    pub fn fill(&self, template: &str) -> String {
        template
            .replace(":company_number", &self.company_number)
            .replace(":transaction_id", &self.transaction_id)
            .replace(":submission_id", &self.submission_id)
    }
}

pub fn with_company_number(template: &str, company_number: &str) -> String {
    template.replace(":company_number", company_number)
}

/// Append the `lang` query parameter so redirects keep the chosen language.
pub fn with_lang(url: String, lang: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}lang={lang}")
}
