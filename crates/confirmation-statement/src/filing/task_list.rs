use chrono::NaiveDate;
use serde::Serialize;
use tracing::error;

use super::company::CompanyProfile;
use super::error::FilingError;
use super::paths::{
    JourneyIds, ACTIVE_OFFICERS_DETAILS_PATH, ACTIVE_OFFICERS_PATH, ACTIVE_PSC_DETAILS_PATH,
    CHECK_EMAIL_ADDRESS_PATH, PEOPLE_WITH_SIGNIFICANT_CONTROL_PATH, PROVIDE_EMAIL_ADDRESS_PATH,
    REGISTERED_OFFICE_ADDRESS_PATH, REGISTER_LOCATIONS_PATH, SHAREHOLDERS_PATH, SIC_PATH,
    STATEMENT_OF_CAPITAL_PATH,
};
use super::submission::{ConfirmationStatementSubmission, SectionStatus, SubmissionData};
use crate::config::FeatureFlags;
use crate::telemetry::sanitise_for_log;

const RECORD_DATE_FORMAT: &str = "%-d %B %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    NotChecked,
    InProgress,
    Checked,
}

pub fn to_task_state(status: Option<SectionStatus>) -> TaskState {
    match status {
        Some(SectionStatus::Confirmed)
        | Some(SectionStatus::RecentFiling)
        | Some(SectionStatus::InitialFiling) => TaskState::Checked,
        Some(SectionStatus::NotConfirmed) => TaskState::InProgress,
        None => TaskState::NotChecked,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    Officers,
    Psc,
    SicCodes,
    Shareholders,
    StatementOfCapital,
    RegisteredEmailAddress,
    RegisteredOfficeAddress,
    RegisterLocations,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub kind: TaskKind,
    pub state: TaskState,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskList {
    pub tasks: Vec<Task>,
    pub record_date: Option<String>,
    pub tasks_completed_count: usize,
    pub tasks_expected_count: usize,
    pub all_tasks_completed: bool,
}

impl TaskList {
    pub fn task(&self, kind: TaskKind) -> Option<&Task> {
        self.tasks.iter().find(|task| task.kind == kind)
    }
}

/// Switches that change which tasks appear and where they link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskListOptions {
    pub registered_email_address_option_enabled: bool,
    pub company_has_existing_registered_email: bool,
    pub five_or_less_officers_journey: bool,
}

pub fn format_record_date(date: NaiveDate) -> String {
    date.format(RECORD_DATE_FORMAT).to_string()
}

pub fn init_task_list(
    ids: &JourneyIds,
    submission: &ConfirmationStatementSubmission,
    options: TaskListOptions,
) -> TaskList {
    let empty = SubmissionData::default();
    let data = submission.data.as_ref().unwrap_or(&empty);

    let officers_url = if options.five_or_less_officers_journey {
        ACTIVE_OFFICERS_DETAILS_PATH
    } else {
        ACTIVE_OFFICERS_PATH
    };
    let psc_url = if options.five_or_less_officers_journey {
        ACTIVE_PSC_DETAILS_PATH
    } else {
        PEOPLE_WITH_SIGNIFICANT_CONTROL_PATH
    };

    let mut entries = vec![
        (TaskKind::Officers, data.officers_status(), officers_url),
        (TaskKind::Psc, data.psc_status(), psc_url),
        (TaskKind::SicCodes, data.sic_code_status(), SIC_PATH),
        (
            TaskKind::Shareholders,
            data.shareholders_status(),
            SHAREHOLDERS_PATH,
        ),
        (
            TaskKind::StatementOfCapital,
            data.statement_of_capital_status(),
            STATEMENT_OF_CAPITAL_PATH,
        ),
    ];
    if options.registered_email_address_option_enabled {
        let email_url = if options.company_has_existing_registered_email {
            CHECK_EMAIL_ADDRESS_PATH
        } else {
            PROVIDE_EMAIL_ADDRESS_PATH
        };
        entries.push((
            TaskKind::RegisteredEmailAddress,
            data.registered_email_address_status(),
            email_url,
        ));
    }
    entries.push((
        TaskKind::RegisteredOfficeAddress,
        data.registered_office_address_status(),
        REGISTERED_OFFICE_ADDRESS_PATH,
    ));
    entries.push((
        TaskKind::RegisterLocations,
        data.register_locations_status(),
        REGISTER_LOCATIONS_PATH,
    ));

    let tasks: Vec<Task> = entries
        .into_iter()
        .map(|(kind, status, template)| Task {
            kind,
            state: to_task_state(status),
            url: ids.fill(template),
        })
        .collect();

    let tasks_expected_count = tasks.len();
    let tasks_completed_count = tasks
        .iter()
        .filter(|task| task.state == TaskState::Checked)
        .count();

    TaskList {
        tasks,
        record_date: data
            .confirmation_statement_made_up_to_date
            .map(format_record_date),
        tasks_completed_count,
        tasks_expected_count,
        all_tasks_completed: tasks_completed_count == tasks_expected_count,
    }
}

fn next_made_up_to(company: &CompanyProfile) -> Result<NaiveDate, FilingError> {
    company.next_made_up_to().ok_or_else(|| {
        error!(
            company_number = %sanitise_for_log(&company.company_number),
            "company profile has no confirmation statement block"
        );
        FilingError::MissingConfirmationStatement {
            company_number: company.company_number.clone(),
        }
    })
}

/// The email task is offered once the company's next made-up-to date reaches the configured gate.
pub fn registered_email_address_option_enabled(
    company: &CompanyProfile,
    flags: &FeatureFlags,
) -> Result<bool, FilingError> {
    let next_made_up_to = next_made_up_to(company)?;
    Ok(flags
        .registered_email_address_start
        .is_active_on(next_made_up_to))
}

/// Date shown on the task list: today when filing early, otherwise the next made-up-to date.
pub fn task_list_record_date(
    company: &CompanyProfile,
    today: NaiveDate,
) -> Result<String, FilingError> {
    let next_made_up_to = next_made_up_to(company)?;
    let record_date = if next_made_up_to > today {
        today
    } else {
        next_made_up_to
    };
    Ok(format_record_date(record_date))
}
