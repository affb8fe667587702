//! Branching rules for the confirmation statement journey: who may file online, which screens they
//! see, and whether their answers are acceptable.

pub mod company;
pub mod cs_date;
pub mod eligibility;
mod error;
pub mod journey;
pub mod limited_partnership;
pub mod locale;
pub mod paths;
pub mod submission;
pub mod task_list;

#[cfg(test)]
pub(crate) mod fixtures;

pub use company::{CompanyProfile, ConfirmationStatementDates, LimitedPartnershipSubtype};
pub use cs_date::{check_cs_date, validate_date_selector_value, CsDateError, CsDateValue};
pub use eligibility::{
    classify_eligibility, confirm_company_destination, paper_filing_override,
    ConfirmCompanyDestination, EligibilityOutcome, EligibilityStatusCode, StopPage,
};
pub use error::FilingError;
pub use journey::{acsp_back_path, is_acsp_journey, LpJourney, LpScreen, StandardScreen};
pub use locale::Locale;
pub use paths::{InvalidIdentifier, JourneyIds};
pub use submission::{ConfirmationStatementSubmission, SectionStatus, SubmissionData};
pub use task_list::{init_task_list, TaskKind, TaskList, TaskListOptions, TaskState};
