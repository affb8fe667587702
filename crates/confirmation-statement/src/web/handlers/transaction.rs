use axum::extract::{Path, Query, State};
use axum::response::Response;
use std::sync::Arc;
use tracing::info;

use super::journey_company;
use crate::filing::eligibility::ConfirmCompanyDestination;
use crate::filing::journey::after_create_transaction_path;
use crate::filing::limited_partnership::is_limited_partnership_company_type;
use crate::filing::paths::validate_company_number;
use crate::filing::JourneyIds;
use crate::telemetry::sanitise_for_log;
use crate::web::error::WebError;
use crate::web::extract::{CompanyPath, LangQuery, UserSession};
use crate::web::page::redirect;
use crate::web::state::FilingState;

pub(crate) const TRANSACTION_DESCRIPTION: &str = "Confirmation statement";
pub(crate) const TRANSACTION_REFERENCE: &str = "ConfirmationStatementReference";

/// Open a transaction, create the submission inside it and enter the journey.
pub(crate) async fn start(
    State(state): State<Arc<FilingState>>,
    mut session: UserSession,
    Path(path): Path<CompanyPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let company_number = validate_company_number(&path.company_number)?;
    let locale = lang.locale();
    let profile = journey_company(&state, &session.data, &company_number).await?;

    let is_limited_partnership = is_limited_partnership_company_type(&profile);
    if is_limited_partnership && !session.data.is_acsp_authorised() {
        return Ok(redirect(
            ConfirmCompanyDestination::MustBeAuthorisedAgent.url(&company_number),
            locale,
        ));
    }

    let transaction = state
        .transactions
        .post_transaction(&company_number, TRANSACTION_DESCRIPTION, TRANSACTION_REFERENCE)
        .await?;
    let submission_id = state
        .confirmation_statements
        .create_confirmation_statement(&company_number, &transaction.id)
        .await?;
    let ids = JourneyIds::parse(&company_number, &transaction.id, &submission_id)?;

    info!(
        company_number = %sanitise_for_log(&ids.company_number),
        transaction_id = %ids.transaction_id,
        submission_id = %ids.submission_id,
        "confirmation statement created"
    );

    if is_limited_partnership {
        session.data.acsp_mut().company_subtype = profile.subtype.clone();
    }
    session.data.set_company_profile(profile.clone());
    session.save(&state).await?;

    Ok(redirect(
        ids.fill(after_create_transaction_path(&profile)),
        locale,
    ))
}
