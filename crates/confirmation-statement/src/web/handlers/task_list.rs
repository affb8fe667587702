use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;

use crate::filing::task_list::{registered_email_address_option_enabled, task_list_record_date};
use crate::filing::{init_task_list, StandardScreen, TaskListOptions};
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::page::PageView;
use crate::web::state::FilingState;

const TEMPLATE: &str = "task-list";

pub(crate) async fn show(
    State(state): State<Arc<FilingState>>,
    _session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let company = state
        .company_profiles
        .get_company_profile(&ids.company_number)
        .await?;
    let submission = state
        .confirmation_statements
        .get_confirmation_statement(&ids.transaction_id, &ids.submission_id)
        .await?;

    let email_option_enabled = registered_email_address_option_enabled(&company, &state.features)?;
    let company_has_existing_registered_email = if email_option_enabled {
        !state
            .registered_emails
            .get_registered_email_address(&ids.company_number)
            .await?
            .is_empty()
    } else {
        false
    };

    let mut task_list = init_task_list(
        &ids,
        &submission,
        TaskListOptions {
            registered_email_address_option_enabled: email_option_enabled,
            company_has_existing_registered_email,
            five_or_less_officers_journey: state.features.five_or_less_officers_journey,
        },
    );
    task_list.record_date = Some(task_list_record_date(&company, state.today())?);

    let mut page = PageView::new(TEMPLATE, lang.locale()).data(json!({
        "company": company,
        "taskList": task_list,
        "reviewUrl": ids.fill(StandardScreen::TaskList.next().path()),
    }));
    if let Some(link) = StandardScreen::TaskList.back() {
        page = page.back_link(ids.fill(link));
    }
    Ok(page.into_response())
}
