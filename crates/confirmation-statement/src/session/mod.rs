//! Strongly typed view over the per-user session held by the external session store.

mod store;

pub use store::{MemorySessionStore, SessionError, SessionStore, SESSION_COOKIE_NAME};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::filing::company::CompanyProfile;

/// Answer to "do you want to change the confirmation statement date?".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "date", rename_all = "snake_case")]
pub enum CsDateDecision {
    #[default]
    Undecided,
    ChangedTo(NaiveDate),
    NotChanged,
}

impl CsDateDecision {
    pub fn new_confirmation_date(self) -> Option<NaiveDate> {
        match self {
            Self::ChangedTo(date) => Some(date),
            Self::Undecided | Self::NotChanged => None,
        }
    }

    pub fn is_decided(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

/// Answers collected on the limited partnership agent journey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcspSessionData {
    pub before_you_file_check: bool,
    pub cs_date: CsDateDecision,
    pub confirm_all_information_check: bool,
    pub confirm_lawful_actions_check: bool,
    pub company_subtype: Option<String>,
}

/// Context handed to the registered email address screens so they can return to the task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredEmailHandoff {
    pub company_number: String,
    pub transaction_id: String,
    pub submission_id: String,
    pub has_existing_email: bool,
    pub return_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    acsp_number: Option<String>,
    user_email: Option<String>,
    company_profile: Option<CompanyProfile>,
    acsp: Option<AcspSessionData>,
    sic_codes: Option<Vec<String>>,
    registered_email_handoff: Option<RegisteredEmailHandoff>,
    payment_state: Option<String>,
}

impl SessionData {
    pub fn signed_in(user_email: impl Into<String>) -> Self {
        Self {
            user_email: Some(user_email.into()),
            ..Self::default()
        }
    }

    pub fn with_acsp_number(mut self, acsp_number: impl Into<String>) -> Self {
        self.acsp_number = Some(acsp_number.into());
        self
    }

    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    pub fn acsp_number(&self) -> Option<&str> {
        self.acsp_number.as_deref()
    }

    /// Signed in as an authorised agent.
    pub fn is_acsp_authorised(&self) -> bool {
        self.acsp_number
            .as_deref()
            .is_some_and(|number| !number.trim().is_empty())
    }

    pub fn company_profile(&self) -> Option<&CompanyProfile> {
        self.company_profile.as_ref()
    }

    pub fn set_company_profile(&mut self, profile: CompanyProfile) {
        self.company_profile = Some(profile);
    }

    pub fn acsp(&self) -> Option<&AcspSessionData> {
        self.acsp.as_ref()
    }

    /// Agent journey answers, created with defaults on first touch.
    pub fn acsp_mut(&mut self) -> &mut AcspSessionData {
        self.acsp.get_or_insert_with(AcspSessionData::default)
    }

    pub fn clear_acsp(&mut self) {
        self.acsp = None;
    }

    pub fn sic_codes(&self) -> Option<&[String]> {
        self.sic_codes.as_deref()
    }

    pub fn set_sic_codes(&mut self, codes: Vec<String>) {
        self.sic_codes = Some(codes);
    }

    pub fn registered_email_handoff(&self) -> Option<&RegisteredEmailHandoff> {
        self.registered_email_handoff.as_ref()
    }

    pub fn set_registered_email_handoff(&mut self, handoff: RegisteredEmailHandoff) {
        self.registered_email_handoff = Some(handoff);
    }

    pub fn take_registered_email_handoff(&mut self) -> Option<RegisteredEmailHandoff> {
        self.registered_email_handoff.take()
    }

    pub fn set_payment_state(&mut self, state: impl Into<String>) {
        self.payment_state = Some(state.into());
    }

    pub fn take_payment_state(&mut self) -> Option<String> {
        self.payment_state.take()
    }
}
