//! Maps the registry's eligibility verdict onto the confirm-company screen's destination.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{error, info};

use super::company::CompanyProfile;
use super::error::FilingError;
use super::limited_partnership::{
    is_limited_partnership_company_type, should_redirect_to_paper_filing_for_invalid_lp,
};
use super::paths::{with_company_number, CREATE_TRANSACTION_PATH, MUST_BE_AUTHORISED_AGENT_PATH};
use crate::config::FeatureFlags;
use crate::telemetry::sanitise_for_log;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EligibilityStatusCode {
    CompanyValidForService,
    InvalidCompanyStatus,
    InvalidCompanyTradedStatusUseWebfiling,
    InvalidCompanyTypeUseWebFiling,
    InvalidCompanyTypePaperFilingOnly,
    InvalidCompanyTypeCs01FilingNotRequired,
    InvalidCompanyAppointmentsInvalidNumberOfOfficers,
    InvalidCompanyAppointmentsMoreThanOnePsc,
    InvalidCompanyAppointmentsMoreThanFivePscs,
    InvalidCompanyAppointmentsMoreThanOneShareholder,
}

impl EligibilityStatusCode {
    pub const fn ordered() -> [Self; 10] {
        [
            Self::CompanyValidForService,
            Self::InvalidCompanyStatus,
            Self::InvalidCompanyTradedStatusUseWebfiling,
            Self::InvalidCompanyTypeUseWebFiling,
            Self::InvalidCompanyTypePaperFilingOnly,
            Self::InvalidCompanyTypeCs01FilingNotRequired,
            Self::InvalidCompanyAppointmentsInvalidNumberOfOfficers,
            Self::InvalidCompanyAppointmentsMoreThanOnePsc,
            Self::InvalidCompanyAppointmentsMoreThanFivePscs,
            Self::InvalidCompanyAppointmentsMoreThanOneShareholder,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CompanyValidForService => "COMPANY_VALID_FOR_SERVICE",
            Self::InvalidCompanyStatus => "INVALID_COMPANY_STATUS",
            Self::InvalidCompanyTradedStatusUseWebfiling => {
                "INVALID_COMPANY_TRADED_STATUS_USE_WEBFILING"
            }
            Self::InvalidCompanyTypeUseWebFiling => "INVALID_COMPANY_TYPE_USE_WEB_FILING",
            Self::InvalidCompanyTypePaperFilingOnly => "INVALID_COMPANY_TYPE_PAPER_FILING_ONLY",
            Self::InvalidCompanyTypeCs01FilingNotRequired => {
                "INVALID_COMPANY_TYPE_CS01_FILING_NOT_REQUIRED"
            }
            Self::InvalidCompanyAppointmentsInvalidNumberOfOfficers => {
                "INVALID_COMPANY_APPOINTMENTS_INVALID_NUMBER_OF_OFFICERS"
            }
            Self::InvalidCompanyAppointmentsMoreThanOnePsc => {
                "INVALID_COMPANY_APPOINTMENTS_MORE_THAN_ONE_PSC"
            }
            Self::InvalidCompanyAppointmentsMoreThanFivePscs => {
                "INVALID_COMPANY_APPOINTMENTS_MORE_THAN_FIVE_PSCS"
            }
            Self::InvalidCompanyAppointmentsMoreThanOneShareholder => {
                "INVALID_COMPANY_APPOINTMENTS_MORE_THAN_ONE_SHAREHOLDER"
            }
        }
    }
}

impl FromStr for EligibilityStatusCode {
    type Err = FilingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|code| code.as_str() == raw)
            .ok_or_else(|| FilingError::UnknownEligibilityStatus(sanitise_for_log(raw)))
    }
}

/// Dead ends a company can be sent to instead of filing online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopPage {
    InvalidCompanyStatus,
    UsePaper,
    UseWebfiling,
    NoFilingRequired,
}

impl StopPage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::InvalidCompanyStatus,
            Self::UsePaper,
            Self::UseWebfiling,
            Self::NoFilingRequired,
        ]
    }

    pub const fn slug(self) -> &'static str {
        match self {
            Self::InvalidCompanyStatus => "invalid-company-status",
            Self::UsePaper => "use-paper",
            Self::UseWebfiling => "use-webfiling",
            Self::NoFilingRequired => "no-filing-required",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|page| page.slug() == slug)
    }

    pub const fn template(self) -> &'static str {
        match self {
            Self::InvalidCompanyStatus => "stop-pages/invalid-company-status",
            Self::UsePaper => "stop-pages/use-paper",
            Self::UseWebfiling => "stop-pages/use-webfiling",
            Self::NoFilingRequired => "stop-pages/no-filing-required",
        }
    }

    pub fn url(self, company_number: &str) -> String {
        format!(
            "/confirmation-statement/stop-page/{}?companyNumber={}",
            self.slug(),
            company_number
        )
    }
}

/// Result of consulting the eligibility table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EligibilityOutcome {
    Proceed,
    Stop(StopPage),
}

pub fn classify_eligibility(code: EligibilityStatusCode) -> EligibilityOutcome {
    use EligibilityStatusCode as Code;

    let stop = match code {
        Code::CompanyValidForService => return EligibilityOutcome::Proceed,
        Code::InvalidCompanyStatus => StopPage::InvalidCompanyStatus,
        Code::InvalidCompanyTypePaperFilingOnly => StopPage::UsePaper,
        Code::InvalidCompanyTypeCs01FilingNotRequired => StopPage::NoFilingRequired,
        Code::InvalidCompanyTradedStatusUseWebfiling
        | Code::InvalidCompanyTypeUseWebFiling
        | Code::InvalidCompanyAppointmentsInvalidNumberOfOfficers
        | Code::InvalidCompanyAppointmentsMoreThanOnePsc
        | Code::InvalidCompanyAppointmentsMoreThanFivePscs
        | Code::InvalidCompanyAppointmentsMoreThanOneShareholder => StopPage::UseWebfiling,
    };
    EligibilityOutcome::Stop(stop)
}

/// Where the confirm-company screen sends the user once the company is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmCompanyDestination {
    Stop(StopPage),
    MustBeAuthorisedAgent,
    CreateTransaction,
}

impl ConfirmCompanyDestination {
    pub fn url(&self, company_number: &str) -> String {
        match self {
            Self::Stop(page) => page.url(company_number),
            Self::MustBeAuthorisedAgent => {
                with_company_number(MUST_BE_AUTHORISED_AGENT_PATH, company_number)
            }
            Self::CreateTransaction => with_company_number(CREATE_TRANSACTION_PATH, company_number),
        }
    }
}

/// Limited partnerships that cannot file online go to the paper stop page whatever the
/// eligibility verdict, so the check runs before the registry is asked.
pub fn paper_filing_override(
    company: &CompanyProfile,
    flags: &FeatureFlags,
    today: NaiveDate,
) -> Option<ConfirmCompanyDestination> {
    should_redirect_to_paper_filing_for_invalid_lp(company, flags, today)
        .then_some(ConfirmCompanyDestination::Stop(StopPage::UsePaper))
}

/// Route a company whose paper-filing precondition has already been cleared.
///
/// `raw_code` is the eligibility verdict as returned by the registry; an unrecognised value is
/// fatal.
pub fn confirm_company_destination(
    company: &CompanyProfile,
    raw_code: &str,
    acsp_authorised: bool,
) -> Result<ConfirmCompanyDestination, FilingError> {
    let code = raw_code.parse::<EligibilityStatusCode>().map_err(|err| {
        error!(
            company_number = %sanitise_for_log(&company.company_number),
            %err,
            "eligibility check returned an unrecognised status"
        );
        err
    })?;

    match classify_eligibility(code) {
        EligibilityOutcome::Stop(page) => {
            info!(
                company_number = %sanitise_for_log(&company.company_number),
                code = code.as_str(),
                stop_page = page.slug(),
                "company is not eligible to file online"
            );
            Ok(ConfirmCompanyDestination::Stop(page))
        }
        EligibilityOutcome::Proceed
            if is_limited_partnership_company_type(company) && !acsp_authorised =>
        {
            Ok(ConfirmCompanyDestination::MustBeAuthorisedAgent)
        }
        EligibilityOutcome::Proceed => Ok(ConfirmCompanyDestination::CreateTransaction),
    }
}
