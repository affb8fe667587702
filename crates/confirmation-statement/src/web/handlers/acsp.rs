//! Limited partnership screens filed by an authorised agent.
//!
//! Every screen re-checks the agent answers held in the session through
//! [`LpJourney::redirect_for`] before rendering or accepting input, so a user who jumps ahead by
//! URL is sent back to the first unanswered screen.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, OnceLock};
use tracing::info;

use super::{is_ticked, journey_company, yes_no};
use crate::filing::limited_partnership::is_private_fund_limited_partnership;
use crate::filing::paths::{
    validate_company_number, with_company_number, CONFIRM_COMPANY_BACK_LINK,
};
use crate::filing::task_list::format_record_date;
use crate::filing::{
    check_cs_date, CompanyProfile, CsDateValue, JourneyIds, Locale, LpJourney, LpScreen,
};
use crate::session::CsDateDecision;
use crate::telemetry::sanitise_for_log;
use crate::web::error::WebError;
use crate::web::extract::{CompanyPath, LangQuery, SubmissionPath, UserSession};
use crate::web::messages::FormMessage;
use crate::web::page::{redirect, PageView};
use crate::web::state::FilingState;

const BEFORE_YOU_FILE_TEMPLATE: &str = "acsp/before-you-file";
const CS_DATE_TEMPLATE: &str = "acsp/confirmation-statement-date";
const CHECK_YOUR_ANSWER_TEMPLATE: &str = "acsp/check-your-answer";
const SIC_CODE_SUMMARY_TEMPLATE: &str = "acsp/sic-code-summary";
const MUST_BE_AUTHORISED_AGENT_TEMPLATE: &str = "acsp/must-be-authorised-agent";

pub(crate) const MAX_SIC_CODES: usize = 4;

fn sic_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{5}$").expect("sic code regex"))
}

/// Screen page with the journey's back link already attached.
fn lp_page(
    template: &'static str,
    locale: Locale,
    journey: &LpJourney<'_>,
    screen: LpScreen,
    ids: &JourneyIds,
) -> PageView {
    let page = PageView::new(template, locale);
    match journey.back(screen) {
        Some(link) => page.back_link(ids.fill(link)),
        None => page,
    }
}

async fn load(
    state: &FilingState,
    session: &UserSession,
    path: &SubmissionPath,
) -> Result<(JourneyIds, CompanyProfile), WebError> {
    let ids = path.ids()?;
    let company = journey_company(state, &session.data, &ids.company_number).await?;
    Ok((ids, company))
}

fn gate(
    journey: &LpJourney<'_>,
    screen: LpScreen,
    ids: &JourneyIds,
    locale: Locale,
) -> Option<Response> {
    journey
        .redirect_for(screen)
        .map(|target| redirect(ids.fill(target.path()), locale))
}

pub(crate) async fn show_before_you_file(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();

    session.data.acsp_mut();
    let checked = session
        .data
        .acsp()
        .is_some_and(|acsp| acsp.before_you_file_check);
    let journey = LpJourney::new(&company, session.data.acsp());
    let page = lp_page(
        BEFORE_YOU_FILE_TEMPLATE,
        locale,
        &journey,
        LpScreen::BeforeYouFile,
        &ids,
    )
    .data(json!({ "company": company, "byfCheckbox": checked }));

    session.save(&state).await?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BeforeYouFileForm {
    #[serde(default)]
    byf_checkbox: Option<String>,
}

pub(crate) async fn submit_before_you_file(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<BeforeYouFileForm>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();

    if !is_ticked(form.byf_checkbox.as_deref()) {
        let journey = LpJourney::new(&company, session.data.acsp());
        return Ok(lp_page(
            BEFORE_YOU_FILE_TEMPLATE,
            locale,
            &journey,
            LpScreen::BeforeYouFile,
            &ids,
        )
        .data(json!({ "company": company, "byfCheckbox": false }))
        .error(
            "byfCheckbox",
            FormMessage::BeforeYouFileUnchecked.text(locale),
        )
        .into_response());
    }

    let acsp = session.data.acsp_mut();
    acsp.before_you_file_check = true;
    acsp.company_subtype = company.subtype.clone();
    let next = LpJourney::new(&company, session.data.acsp()).next(LpScreen::BeforeYouFile);
    session.save(&state).await?;
    Ok(redirect(ids.fill(next.path()), locale))
}

fn decision_view(decision: CsDateDecision) -> Value {
    match decision {
        CsDateDecision::Undecided => json!({ "changeCsDate": null }),
        CsDateDecision::NotChanged => json!({ "changeCsDate": "no" }),
        CsDateDecision::ChangedTo(date) => json!({
            "changeCsDate": "yes",
            "csDateDay": date.format("%d").to_string(),
            "csDateMonth": date.format("%m").to_string(),
            "csDateYear": date.format("%Y").to_string(),
        }),
    }
}

async fn cs_date_page(
    state: &FilingState,
    company: &CompanyProfile,
    journey: &LpJourney<'_>,
    ids: &JourneyIds,
    locale: Locale,
    answer: Value,
) -> Result<PageView, WebError> {
    let dates = state
        .confirmation_statements
        .get_next_made_up_to_date(&ids.company_number)
        .await?;
    let current = dates
        .current_next_made_up_to_date
        .or_else(|| company.next_made_up_to());

    Ok(
        lp_page(CS_DATE_TEMPLATE, locale, journey, LpScreen::CsDate, ids).data(json!({
            "company": company,
            "currentNextMadeUpToDate": current.map(format_record_date),
            "answer": answer,
        })),
    )
}

pub(crate) async fn show_cs_date(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::CsDate, &ids, locale) {
        return Ok(response);
    }

    let decision = session
        .data
        .acsp()
        .map(|acsp| acsp.cs_date)
        .unwrap_or_default();
    Ok(
        cs_date_page(&state, &company, &journey, &ids, locale, decision_view(decision))
            .await?
            .into_response(),
    )
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CsDateForm {
    #[serde(default)]
    change_cs_date: Option<String>,
    #[serde(default)]
    cs_date_day: String,
    #[serde(default)]
    cs_date_month: String,
    #[serde(default)]
    cs_date_year: String,
}

impl CsDateForm {
    fn value(&self) -> CsDateValue {
        CsDateValue::new(&self.cs_date_year, &self.cs_date_month, &self.cs_date_day)
    }

    fn echo(&self) -> Value {
        json!({
            "changeCsDate": self.change_cs_date,
            "csDateDay": self.cs_date_day,
            "csDateMonth": self.cs_date_month,
            "csDateYear": self.cs_date_year,
        })
    }
}

pub(crate) async fn submit_cs_date(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<CsDateForm>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::CsDate, &ids, locale) {
        return Ok(response);
    }

    let decision = match yes_no(form.change_cs_date.as_deref()) {
        Some(true) => match check_cs_date(&form.value(), &company, state.today()) {
            Ok(date) => CsDateDecision::ChangedTo(date),
            Err(error) => {
                return Ok(
                    cs_date_page(&state, &company, &journey, &ids, locale, form.echo())
                        .await?
                        .error("csDate", error.message(locale))
                        .into_response(),
                );
            }
        },
        Some(false) => CsDateDecision::NotChanged,
        None => {
            return Ok(
                cs_date_page(&state, &company, &journey, &ids, locale, form.echo())
                    .await?
                    .error("changeCsDate", FormMessage::ChangeCsDateMissing.text(locale))
                    .into_response(),
            );
        }
    };

    info!(
        company_number = %sanitise_for_log(&ids.company_number),
        changed = decision.new_confirmation_date().is_some(),
        "confirmation statement date answered"
    );
    session.data.acsp_mut().cs_date = decision;
    let next = LpJourney::new(&company, session.data.acsp()).next(LpScreen::CsDate);
    session.save(&state).await?;
    Ok(redirect(ids.fill(next.path()), locale))
}

pub(crate) async fn show_check_your_answer(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::CheckYourAnswer, &ids, locale) {
        return Ok(response);
    }

    let new_date = session
        .data
        .acsp()
        .and_then(|acsp| acsp.cs_date.new_confirmation_date());
    Ok(lp_page(
        CHECK_YOUR_ANSWER_TEMPLATE,
        locale,
        &journey,
        LpScreen::CheckYourAnswer,
        &ids,
    )
    .data(json!({
        "company": company,
        "newConfirmationDate": new_date.map(format_record_date),
        "changeUrl": ids.fill(LpScreen::CsDate.path()),
    }))
    .into_response())
}

pub(crate) async fn submit_check_your_answer(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::CheckYourAnswer, &ids, locale) {
        return Ok(response);
    }
    Ok(redirect(
        ids.fill(journey.next(LpScreen::CheckYourAnswer).path()),
        locale,
    ))
}

fn sic_codes(session: &UserSession, company: &CompanyProfile) -> Vec<String> {
    session
        .data
        .sic_codes()
        .map(<[String]>::to_vec)
        .unwrap_or_else(|| company.sic_codes.clone())
}

fn sic_code_page(
    journey: &LpJourney<'_>,
    ids: &JourneyIds,
    locale: Locale,
    codes: &[String],
) -> PageView {
    lp_page(
        SIC_CODE_SUMMARY_TEMPLATE,
        locale,
        journey,
        LpScreen::SicCodeSummary,
        ids,
    )
    .data(json!({
        "sicCodes": codes,
        "maxSicCodes": MAX_SIC_CODES,
        "canAddMore": codes.len() < MAX_SIC_CODES,
    }))
}

pub(crate) async fn show_sic_code_summary(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::SicCodeSummary, &ids, locale) {
        return Ok(response);
    }
    if is_private_fund_limited_partnership(&company) {
        return Ok(redirect(ids.fill(LpScreen::Review.path()), locale));
    }

    let codes = sic_codes(&session, &company);
    let page = sic_code_page(&journey, &ids, locale, &codes);
    session.data.set_sic_codes(codes);
    session.save(&state).await?;
    Ok(page.into_response())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SicCodeForm {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    sic_code: Option<String>,
}

enum SicCodeEdit {
    Add(String),
    Remove(String),
    Continue,
}

impl SicCodeForm {
    fn edit(&self) -> SicCodeEdit {
        let code = self.sic_code.as_deref().unwrap_or_default().trim().to_string();
        match self.action.as_deref() {
            Some("add") => SicCodeEdit::Add(code),
            Some("remove") => SicCodeEdit::Remove(code),
            _ => SicCodeEdit::Continue,
        }
    }
}

/// Apply one add or remove to the list, or say why it was refused.
fn apply_sic_code_edit(codes: &mut Vec<String>, edit: SicCodeEdit) -> Result<(), FormMessage> {
    match edit {
        SicCodeEdit::Add(code) => {
            if !sic_code_pattern().is_match(&code) {
                return Err(FormMessage::SicCodeInvalid);
            }
            if codes.contains(&code) {
                return Err(FormMessage::SicCodeDuplicate);
            }
            if codes.len() >= MAX_SIC_CODES {
                return Err(FormMessage::SicCodeLimitReached);
            }
            codes.push(code);
        }
        SicCodeEdit::Remove(code) => {
            if codes.len() <= 1 && codes.contains(&code) {
                return Err(FormMessage::SicCodeLastRemaining);
            }
            codes.retain(|existing| *existing != code);
        }
        SicCodeEdit::Continue => {}
    }
    Ok(())
}

pub(crate) async fn submit_sic_code_summary(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<SicCodeForm>,
) -> Result<Response, WebError> {
    let (ids, company) = load(&state, &session, &path).await?;
    let locale = lang.locale();
    let journey = LpJourney::new(&company, session.data.acsp());
    if let Some(response) = gate(&journey, LpScreen::SicCodeSummary, &ids, locale) {
        return Ok(response);
    }

    let mut codes = sic_codes(&session, &company);
    let edit = form.edit();
    let target = match edit {
        SicCodeEdit::Continue => journey.next(LpScreen::SicCodeSummary),
        SicCodeEdit::Add(_) | SicCodeEdit::Remove(_) => LpScreen::SicCodeSummary,
    };

    if let Err(message) = apply_sic_code_edit(&mut codes, edit) {
        return Ok(sic_code_page(&journey, &ids, locale, &codes)
            .error("sicCode", message.text(locale))
            .into_response());
    }

    session.data.set_sic_codes(codes);
    session.save(&state).await?;
    Ok(redirect(ids.fill(target.path()), locale))
}

pub(crate) async fn must_be_authorised_agent(
    Path(path): Path<CompanyPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let company_number = validate_company_number(&path.company_number)?;
    Ok(
        PageView::new(MUST_BE_AUTHORISED_AGENT_TEMPLATE, lang.locale())
            .back_link(with_company_number(
                CONFIRM_COMPANY_BACK_LINK,
                &company_number,
            ))
            .data(json!({ "companyNumber": company_number }))
            .into_response(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn adds_valid_code_until_limit() {
        let mut list = codes(&["62012"]);
        assert_eq!(
            apply_sic_code_edit(&mut list, SicCodeEdit::Add("70100".to_string())),
            Ok(())
        );
        assert_eq!(list, codes(&["62012", "70100"]));

        let mut full = codes(&["11111", "22222", "33333", "44444"]);
        assert_eq!(
            apply_sic_code_edit(&mut full, SicCodeEdit::Add("55555".to_string())),
            Err(FormMessage::SicCodeLimitReached)
        );
        assert_eq!(full.len(), MAX_SIC_CODES);
    }

    #[test]
    fn rejects_malformed_and_duplicate_codes() {
        let mut list = codes(&["62012"]);
        for bad in ["6201", "620123", "abcde", "", "\u{663}\u{664}\u{665}\u{666}\u{667}"] {
            assert_eq!(
                apply_sic_code_edit(&mut list, SicCodeEdit::Add(bad.to_string())),
                Err(FormMessage::SicCodeInvalid),
                "{bad}"
            );
        }
        assert_eq!(
            apply_sic_code_edit(&mut list, SicCodeEdit::Add("62012".to_string())),
            Err(FormMessage::SicCodeDuplicate)
        );
    }

    #[test]
    fn keeps_at_least_one_code() {
        let mut list = codes(&["62012"]);
        assert_eq!(
            apply_sic_code_edit(&mut list, SicCodeEdit::Remove("62012".to_string())),
            Err(FormMessage::SicCodeLastRemaining)
        );

        let mut two = codes(&["62012", "70100"]);
        assert_eq!(
            apply_sic_code_edit(&mut two, SicCodeEdit::Remove("62012".to_string())),
            Ok(())
        );
        assert_eq!(two, codes(&["70100"]));
    }
}
