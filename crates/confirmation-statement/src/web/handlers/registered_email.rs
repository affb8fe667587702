//! Hand-off into the registered email address screens and the way back to the task list.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::sync::{Arc, OnceLock};

use super::yes_no;
use crate::filing::paths::{CHECK_EMAIL_ADDRESS_PATH, PROVIDE_EMAIL_ADDRESS_PATH, TASK_LIST_PATH};
use crate::filing::submission::RegisteredEmailAddressData;
use crate::filing::{JourneyIds, Locale};
use crate::session::RegisteredEmailHandoff;
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::messages::FormMessage;
use crate::web::page::{redirect, PageView};
use crate::web::state::FilingState;

const CHECK_TEMPLATE: &str = "check-registered-email-address";
const PROVIDE_TEMPLATE: &str = "provide-email-address";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"))
}

fn return_url(session: &UserSession, ids: &JourneyIds) -> String {
    session
        .data
        .registered_email_handoff()
        .filter(|handoff| handoff.submission_id == ids.submission_id)
        .map(|handoff| handoff.return_url.clone())
        .unwrap_or_else(|| ids.fill(TASK_LIST_PATH))
}

/// Record the hand-off and send the user to the check or provide screen.
pub(crate) async fn enter(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let email = state
        .registered_emails
        .get_registered_email_address(&ids.company_number)
        .await?;
    let has_existing_email = !email.is_empty();

    session
        .data
        .set_registered_email_handoff(RegisteredEmailHandoff {
            company_number: ids.company_number.clone(),
            transaction_id: ids.transaction_id.clone(),
            submission_id: ids.submission_id.clone(),
            has_existing_email,
            return_url: ids.fill(TASK_LIST_PATH),
        });
    session.save(&state).await?;

    let target = if has_existing_email {
        CHECK_EMAIL_ADDRESS_PATH
    } else {
        PROVIDE_EMAIL_ADDRESS_PATH
    };
    Ok(redirect(ids.fill(target), lang.locale()))
}

async fn check_page(
    state: &FilingState,
    session: &UserSession,
    ids: &JourneyIds,
    locale: Locale,
) -> Result<PageView, WebError> {
    let email = state
        .registered_emails
        .get_registered_email_address(&ids.company_number)
        .await?;
    Ok(PageView::new(CHECK_TEMPLATE, locale)
        .back_link(return_url(session, ids))
        .data(json!({ "registeredEmailAddress": email })))
}

pub(crate) async fn show_check(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    Ok(check_page(&state, &session, &ids, lang.locale())
        .await?
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CheckEmailForm {
    #[serde(default)]
    registered_email_address_correct: Option<String>,
}

/// Save the email section, then follow the hand-off back to where the user came from.
async fn complete(
    state: &FilingState,
    mut session: UserSession,
    ids: &JourneyIds,
    section: RegisteredEmailAddressData,
    locale: Locale,
) -> Result<Response, WebError> {
    let mut submission = state
        .confirmation_statements
        .get_confirmation_statement(&ids.transaction_id, &ids.submission_id)
        .await?;
    submission.data_mut().registered_email_address_data = Some(section);
    state
        .confirmation_statements
        .update_confirmation_statement(&ids.transaction_id, &submission)
        .await?;

    let target = session
        .data
        .take_registered_email_handoff()
        .filter(|handoff| handoff.submission_id == ids.submission_id)
        .map(|handoff| handoff.return_url)
        .unwrap_or_else(|| ids.fill(TASK_LIST_PATH));
    session.save(state).await?;
    Ok(redirect(target, locale))
}

pub(crate) async fn submit_check(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<CheckEmailForm>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let locale = lang.locale();

    match yes_no(form.registered_email_address_correct.as_deref()) {
        Some(true) => {
            complete(
                &state,
                session,
                &ids,
                RegisteredEmailAddressData::confirmed(),
                locale,
            )
            .await
        }
        Some(false) => Ok(redirect(ids.fill(PROVIDE_EMAIL_ADDRESS_PATH), locale)),
        None => Ok(check_page(&state, &session, &ids, locale)
            .await?
            .error(
                "registeredEmailAddressCorrect",
                FormMessage::RegisteredEmailChoiceMissing.text(locale),
            )
            .into_response()),
    }
}

pub(crate) async fn show_provide(
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    Ok(PageView::new(PROVIDE_TEMPLATE, lang.locale())
        .back_link(return_url(&session, &ids))
        .into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProvideEmailForm {
    #[serde(default)]
    registered_email_address: String,
}

pub(crate) async fn submit_provide(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<ProvideEmailForm>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let locale = lang.locale();

    let address = form.registered_email_address.trim();
    if !email_pattern().is_match(address) {
        return Ok(PageView::new(PROVIDE_TEMPLATE, locale)
            .back_link(return_url(&session, &ids))
            .data(json!({ "registeredEmailAddress": form.registered_email_address }))
            .error(
                "registeredEmailAddress",
                FormMessage::RegisteredEmailInvalid.text(locale),
            )
            .into_response());
    }

    let section = RegisteredEmailAddressData::provided(address);
    complete(&state, session, &ids, section, locale).await
}
