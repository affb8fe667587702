use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::confirm_company::CompanyNumberQuery;
use crate::filing::paths::{with_company_number, CONFIRM_COMPANY_BACK_LINK};
use crate::filing::StopPage;
use crate::web::error::WebError;
use crate::web::extract::LangQuery;
use crate::web::page::PageView;

pub(crate) async fn show(
    Path(stop_type): Path<String>,
    Query(company): Query<CompanyNumberQuery>,
    Query(lang): Query<LangQuery>,
) -> Result<Response, WebError> {
    let page = StopPage::from_slug(&stop_type).ok_or(WebError::UnknownStopPage)?;
    let company_number = company.validated()?;

    Ok(PageView::new(page.template(), lang.locale())
        .back_link(with_company_number(
            CONFIRM_COMPANY_BACK_LINK,
            &company_number,
        ))
        .data(json!({ "companyNumber": company_number, "stopType": page.slug() }))
        .into_response())
}
