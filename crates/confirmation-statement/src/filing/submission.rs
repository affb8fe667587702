use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-section confirmation state held by the confirmation statement API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SectionStatus {
    Confirmed,
    NotConfirmed,
    RecentFiling,
    InitialFiling,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionData {
    #[serde(default)]
    pub section_status: Option<SectionStatus>,
}

impl SectionData {
    pub fn with_status(status: SectionStatus) -> Self {
        Self {
            section_status: Some(status),
        }
    }
}

/// Email section; carries the new address when the filer supplies one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredEmailAddressData {
    #[serde(default)]
    pub section_status: Option<SectionStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_email_address: Option<String>,
}

impl RegisteredEmailAddressData {
    /// Existing address confirmed as correct.
    pub fn confirmed() -> Self {
        Self {
            section_status: Some(SectionStatus::Confirmed),
            registered_email_address: None,
        }
    }

    pub fn provided(address: impl Into<String>) -> Self {
        Self {
            section_status: Some(SectionStatus::Confirmed),
            registered_email_address: Some(address.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingStatusData {
    #[serde(default)]
    pub trading_status_answer: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionData {
    #[serde(default)]
    pub confirmation_statement_made_up_to_date: Option<NaiveDate>,
    #[serde(default)]
    pub new_confirmation_date: Option<NaiveDate>,
    #[serde(default)]
    pub accept_lawful_purpose_statement: Option<bool>,
    #[serde(default)]
    pub active_officer_details_data: Option<SectionData>,
    #[serde(default)]
    pub persons_significant_control_data: Option<SectionData>,
    #[serde(default)]
    pub sic_code_data: Option<SectionData>,
    #[serde(default)]
    pub shareholder_data: Option<SectionData>,
    #[serde(default)]
    pub statement_of_capital_data: Option<SectionData>,
    #[serde(default)]
    pub registered_email_address_data: Option<RegisteredEmailAddressData>,
    #[serde(default)]
    pub registered_office_address_data: Option<SectionData>,
    #[serde(default)]
    pub register_locations_data: Option<SectionData>,
    #[serde(default)]
    pub trading_status_data: Option<TradingStatusData>,
}

/// Confirmation statement document keyed by transaction and submission id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationStatementSubmission {
    pub submission_id: String,
    #[serde(default)]
    pub data: Option<SubmissionData>,
}

impl ConfirmationStatementSubmission {
    pub fn new(submission_id: impl Into<String>) -> Self {
        Self {
            submission_id: submission_id.into(),
            data: Some(SubmissionData::default()),
        }
    }

    pub fn data_mut(&mut self) -> &mut SubmissionData {
        self.data.get_or_insert_with(SubmissionData::default)
    }
}

fn status_of(section: &Option<SectionData>) -> Option<SectionStatus> {
    section.as_ref().and_then(|data| data.section_status)
}

impl SubmissionData {
    pub fn officers_status(&self) -> Option<SectionStatus> {
        status_of(&self.active_officer_details_data)
    }

    pub fn psc_status(&self) -> Option<SectionStatus> {
        status_of(&self.persons_significant_control_data)
    }

    pub fn sic_code_status(&self) -> Option<SectionStatus> {
        status_of(&self.sic_code_data)
    }

    pub fn shareholders_status(&self) -> Option<SectionStatus> {
        status_of(&self.shareholder_data)
    }

    pub fn statement_of_capital_status(&self) -> Option<SectionStatus> {
        status_of(&self.statement_of_capital_data)
    }

    pub fn registered_email_address_status(&self) -> Option<SectionStatus> {
        self.registered_email_address_data
            .as_ref()
            .and_then(|data| data.section_status)
    }

    pub fn registered_office_address_status(&self) -> Option<SectionStatus> {
        status_of(&self.registered_office_address_data)
    }

    pub fn register_locations_status(&self) -> Option<SectionStatus> {
        status_of(&self.register_locations_data)
    }
}
