//! Final check before the transaction is closed, shared by the company and agent URLs.

use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use super::{is_ticked, journey_company};
use crate::filing::journey::{confirmation_path, payment_callback_path};
use crate::filing::{is_acsp_journey, JourneyIds, Locale, LpJourney, LpScreen, StandardScreen};
use crate::telemetry::sanitise_for_log;
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::messages::FormMessage;
use crate::web::page::{redirect, PageView};
use crate::web::state::FilingState;

const TEMPLATE: &str = "review";
const ACSP_TEMPLATE: &str = "acsp/review";
pub(crate) const PAYMENT_REFERENCE: &str = "Confirmation statement";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ReviewForm {
    #[serde(default)]
    confirmation_checkbox: Option<String>,
    #[serde(default)]
    confirm_all_information_check: Option<String>,
    #[serde(default)]
    confirm_lawful_actions_check: Option<String>,
}

enum ReviewGate {
    Redirect(Response),
    Page(PageView),
}

async fn review_page(
    state: &FilingState,
    session: &UserSession,
    ids: &JourneyIds,
    acsp_journey: bool,
    locale: Locale,
) -> Result<ReviewGate, WebError> {
    let company = journey_company(state, &session.data, &ids.company_number).await?;

    if !acsp_journey {
        let mut page = PageView::new(TEMPLATE, locale).data(json!({ "company": company }));
        if let Some(link) = StandardScreen::Review.back() {
            page = page.back_link(ids.fill(link));
        }
        return Ok(ReviewGate::Page(page));
    }

    let acsp = session.data.acsp();
    let journey = LpJourney::new(&company, acsp);
    if let Some(screen) = journey.redirect_for(LpScreen::Review) {
        return Ok(ReviewGate::Redirect(redirect(ids.fill(screen.path()), locale)));
    }

    let new_confirmation_date = acsp.and_then(|data| data.cs_date.new_confirmation_date());
    let mut page = PageView::new(ACSP_TEMPLATE, locale).data(json!({
        "company": company,
        "newConfirmationDate": new_confirmation_date,
        "sicCodes": session.data.sic_codes().unwrap_or(company.sic_codes.as_slice()),
        "confirmAllInformationCheck": acsp.is_some_and(|data| data.confirm_all_information_check),
        "confirmLawfulActionsCheck": acsp.is_some_and(|data| data.confirm_lawful_actions_check),
    }));
    if let Some(link) = journey.back(LpScreen::Review) {
        page = page.back_link(ids.fill(link));
    }
    Ok(ReviewGate::Page(page))
}

pub(crate) async fn show(
    State(state): State<Arc<FilingState>>,
    uri: Uri,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let acsp_journey = is_acsp_journey(uri.path());
    match review_page(&state, &session, &ids, acsp_journey, lang.locale()).await? {
        ReviewGate::Redirect(response) => Ok(response),
        ReviewGate::Page(page) => Ok(page.into_response()),
    }
}

pub(crate) async fn submit(
    State(state): State<Arc<FilingState>>,
    uri: Uri,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<ReviewForm>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let locale = lang.locale();
    let acsp_journey = is_acsp_journey(uri.path());

    let mut errors = Vec::new();
    if acsp_journey {
        let all_information = is_ticked(form.confirm_all_information_check.as_deref());
        let lawful_actions = is_ticked(form.confirm_lawful_actions_check.as_deref());
        let acsp = session.data.acsp_mut();
        acsp.confirm_all_information_check = all_information;
        acsp.confirm_lawful_actions_check = lawful_actions;
        if !all_information {
            errors.push((
                "confirmAllInformationCheck",
                FormMessage::ConfirmAllInformationMissing,
            ));
        }
        if !lawful_actions {
            errors.push((
                "confirmLawfulActionsCheck",
                FormMessage::ConfirmLawfulActionsMissing,
            ));
        }
    } else if !is_ticked(form.confirmation_checkbox.as_deref()) {
        errors.push(("confirmationCheckbox", FormMessage::ReviewConfirmationMissing));
    }

    if !errors.is_empty() {
        let gate = review_page(&state, &session, &ids, acsp_journey, locale).await?;
        session.save(&state).await?;
        return Ok(match gate {
            ReviewGate::Redirect(response) => response,
            ReviewGate::Page(page) => errors
                .into_iter()
                .fold(page, |page, (field, message)| {
                    page.error(field, message.text(locale))
                })
                .into_response(),
        });
    }

    if acsp_journey {
        let company = journey_company(&state, &session.data, &ids.company_number).await?;
        let journey = LpJourney::new(&company, session.data.acsp());
        if let Some(screen) = journey.redirect_for(LpScreen::Review) {
            session.save(&state).await?;
            return Ok(redirect(ids.fill(screen.path()), locale));
        }

        let new_confirmation_date = session
            .data
            .acsp()
            .and_then(|data| data.cs_date.new_confirmation_date());
        let mut submission = state
            .confirmation_statements
            .get_confirmation_statement(&ids.transaction_id, &ids.submission_id)
            .await?;
        let data = submission.data_mut();
        data.new_confirmation_date = new_confirmation_date;
        data.accept_lawful_purpose_statement = Some(true);
        state
            .confirmation_statements
            .update_confirmation_statement(&ids.transaction_id, &submission)
            .await?;
    }

    let closed = state
        .transactions
        .close_transaction(&ids.company_number, &ids.transaction_id)
        .await?;

    let Some(payment_url) = closed.payment_url else {
        session.save(&state).await?;
        return Ok(redirect(ids.fill(confirmation_path(acsp_journey)), locale));
    };

    let return_url = ids.fill(payment_callback_path(acsp_journey));
    let payment = state
        .payments
        .start_payment(&payment_url, &return_url, PAYMENT_REFERENCE)
        .await?;
    info!(
        company_number = %sanitise_for_log(&ids.company_number),
        transaction_id = %ids.transaction_id,
        "payment required, handing over to the payment journey"
    );
    session.data.set_payment_state(payment.state);
    session.save(&state).await?;

    Ok(Redirect::to(&payment.journey_url).into_response())
}
