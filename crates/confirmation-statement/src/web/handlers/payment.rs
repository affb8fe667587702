use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Response;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::filing::is_acsp_journey;
use crate::filing::journey::{confirmation_path, review_path};
use crate::telemetry::sanitise_for_log;
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::page::redirect;
use crate::web::state::FilingState;

const PAID_STATUS: &str = "paid";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PaymentCallbackQuery {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    state: Option<String>,
}

/// Return from the hosted payment journey.
pub(crate) async fn callback(
    State(state): State<Arc<FilingState>>,
    uri: Uri,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(callback): Query<PaymentCallbackQuery>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let acsp_journey = is_acsp_journey(uri.path());

    let expected = session.data.take_payment_state();
    if expected.is_none() || expected != callback.state {
        warn!(
            transaction_id = %ids.transaction_id,
            returned_state = %sanitise_for_log(callback.state.as_deref().unwrap_or_default()),
            "payment callback state does not match the session"
        );
        return Err(WebError::PaymentStateMismatch);
    }
    session.save(&state).await?;

    let target = if callback.status.as_deref() == Some(PAID_STATUS) {
        info!(transaction_id = %ids.transaction_id, "payment completed");
        confirmation_path(acsp_journey)
    } else {
        info!(
            transaction_id = %ids.transaction_id,
            status = %sanitise_for_log(callback.status.as_deref().unwrap_or_default()),
            "payment not completed, returning to review"
        );
        review_path(acsp_journey)
    };
    Ok(redirect(ids.fill(target), lang.locale()))
}
