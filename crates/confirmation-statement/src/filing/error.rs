/// Fatal conditions raised while deciding a filing path.
#[derive(Debug, thiserror::Error)]
pub enum FilingError {
    #[error("Unknown eligibility status code: {0}")]
    UnknownEligibilityStatus(String),
    #[error("company {company_number} has no confirmation statement dates")]
    MissingConfirmationStatement { company_number: String },
}
