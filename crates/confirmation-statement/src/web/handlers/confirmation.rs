use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::sync::Arc;

use crate::filing::is_acsp_journey;
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::page::PageView;
use crate::web::state::FilingState;

const TEMPLATE: &str = "confirmation";
const ACSP_TEMPLATE: &str = "acsp/confirmation";

pub(crate) async fn show(
    State(state): State<Arc<FilingState>>,
    uri: Uri,
    mut session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let transaction = state.transactions.get_transaction(&ids.transaction_id).await?;

    let data = json!({
        "companyNumber": ids.company_number,
        "transactionId": transaction.id,
        "reference": transaction.reference,
        "userEmail": session.data.user_email(),
    });

    let template = if is_acsp_journey(uri.path()) {
        session.data.clear_acsp();
        session.save(&state).await?;
        ACSP_TEMPLATE
    } else {
        TEMPLATE
    };

    Ok(PageView::new(template, lang.locale())
        .data(data)
        .into_response())
}
