use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use super::yes_no;
use crate::filing::paths::{TRADING_STATUS_PATH, TRADING_STOP_PATH};
use crate::filing::submission::TradingStatusData;
use crate::filing::{JourneyIds, StandardScreen};
use crate::web::error::WebError;
use crate::web::extract::{LangQuery, SubmissionPath, UserSession};
use crate::web::messages::FormMessage;
use crate::web::page::{redirect, PageView};
use crate::web::state::FilingState;

const TEMPLATE: &str = "trading-status";
const STOP_TEMPLATE: &str = "trading-stop";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TradingStatusForm {
    #[serde(default)]
    trading_status: Option<String>,
}

fn back_link(ids: &JourneyIds) -> Option<String> {
    StandardScreen::TradingStatus.back().map(|path| ids.fill(path))
}

pub(crate) async fn show(
    State(state): State<Arc<FilingState>>,
    session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let profile = super::journey_company(&state, &session.data, &ids.company_number).await?;

    let mut page = PageView::new(TEMPLATE, lang.locale()).data(json!({ "company": profile }));
    if let Some(link) = back_link(&ids) {
        page = page.back_link(link);
    }
    Ok(page.into_response())
}

pub(crate) async fn submit(
    State(state): State<Arc<FilingState>>,
    _session: UserSession,
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
    Form(form): Form<TradingStatusForm>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    let locale = lang.locale();

    match yes_no(form.trading_status.as_deref()) {
        Some(true) => {
            let mut submission = state
                .confirmation_statements
                .get_confirmation_statement(&ids.transaction_id, &ids.submission_id)
                .await?;
            submission.data_mut().trading_status_data = Some(TradingStatusData {
                trading_status_answer: Some(true),
            });
            state
                .confirmation_statements
                .update_confirmation_statement(&ids.transaction_id, &submission)
                .await?;
            Ok(redirect(
                ids.fill(StandardScreen::TradingStatus.next().path()),
                locale,
            ))
        }
        Some(false) => Ok(redirect(ids.fill(TRADING_STOP_PATH), locale)),
        None => {
            let mut page = PageView::new(TEMPLATE, locale).error(
                "tradingStatus",
                FormMessage::TradingStatusMissing.text(locale),
            );
            if let Some(link) = back_link(&ids) {
                page = page.back_link(link);
            }
            Ok(page.into_response())
        }
    }
}

pub(crate) async fn stop(
    Path(path): Path<SubmissionPath>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let ids = path.ids()?;
    Ok(PageView::new(STOP_TEMPLATE, lang.locale())
        .back_link(ids.fill(TRADING_STATUS_PATH))
        .data(json!({ "companyNumber": ids.company_number }))
        .into_response())
}
