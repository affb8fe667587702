use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::filing::eligibility::{
    confirm_company_destination, paper_filing_override, ConfirmCompanyDestination,
};
use crate::filing::paths::validate_company_number;
use crate::telemetry::sanitise_for_log;
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, UserSession};
use crate::web::page::{redirect, PageView};
use crate::web::state::FilingState;

const TEMPLATE: &str = "confirm-company";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompanyNumberQuery {
    #[serde(default)]
    company_number: Option<String>,
}

impl CompanyNumberQuery {
    pub(crate) fn validated(&self) -> Result<String, WebError> {
        Ok(validate_company_number(
            self.company_number.as_deref().unwrap_or_default(),
        )?)
    }
}

pub(crate) async fn show(
    State(state): State<Arc<FilingState>>,
    _session: UserSession,
    Query(company): Query<CompanyNumberQuery>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let company_number = company.validated()?;
    let profile = state
        .company_profiles
        .get_company_profile(&company_number)
        .await?;

    Ok(PageView::new(TEMPLATE, lang.locale())
        .data(json!({ "company": profile }))
        .into_response())
}

/// Decide whether the company may file online and where the user goes next.
pub(crate) async fn submit(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Query(company): Query<CompanyNumberQuery>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let company_number = company.validated()?;
    let locale = lang.locale();
    let profile = state
        .company_profiles
        .get_company_profile(&company_number)
        .await?;

    if let Some(destination) = paper_filing_override(&profile, &state.features, state.today()) {
        return Ok(redirect(destination.url(&company_number), locale));
    }

    let code = state
        .confirmation_statements
        .check_eligibility(&company_number)
        .await?;
    let destination =
        confirm_company_destination(&profile, &code, session.data.is_acsp_authorised())?;

    if !matches!(destination, ConfirmCompanyDestination::Stop(_)) {
        info!(
            company_number = %sanitise_for_log(&company_number),
            "company confirmed for online filing"
        );
        session.data.set_company_profile(profile);
        session.data.clear_acsp();
        session.save(&state).await?;
    }

    Ok(redirect(destination.url(&company_number), locale))
}
