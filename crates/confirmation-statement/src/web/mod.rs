//! HTTP surface of the filing journey.

mod error;
mod extract;
mod handlers;
mod messages;
mod page;
mod state;

#[cfg(test)]
mod tests;

pub use error::WebError;
pub use extract::{LangQuery, SubmissionPath, UserSession};
pub use messages::FormMessage;
pub use page::{redirect, FieldError, PageView};
pub use state::FilingState;

use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::filing::paths::{
    CHECK_EMAIL_ADDRESS_PATH, CONFIRMATION_PATH, CONFIRM_COMPANY_PATH, CREATE_TRANSACTION_PATH,
    LP_BEFORE_YOU_FILE_PATH, LP_CHECK_YOUR_ANSWER_PATH, LP_CONFIRMATION_PATH, LP_CS_DATE_PATH,
    LP_PAYMENT_CALLBACK_PATH, LP_REVIEW_PATH, LP_SIC_CODE_SUMMARY_PATH,
    MUST_BE_AUTHORISED_AGENT_PATH, PAYMENT_CALLBACK_PATH, PROVIDE_EMAIL_ADDRESS_PATH,
    REGISTERED_EMAIL_ADDRESS_PATH, REVIEW_PATH, STOP_PAGE_PATH, TASK_LIST_PATH,
    TRADING_STATUS_PATH, TRADING_STOP_PATH,
};
use handlers::{
    acsp, confirm_company, confirmation, payment, registered_email, review, stop_page, task_list,
    trading_status, transaction,
};

/// Router builder exposing every screen of the confirmation statement journey.
pub fn filing_router(state: Arc<FilingState>) -> Router {
    Router::new()
        .route(
            CONFIRM_COMPANY_PATH,
            get(confirm_company::show).post(confirm_company::submit),
        )
        .route(CREATE_TRANSACTION_PATH, get(transaction::start))
        .route(
            MUST_BE_AUTHORISED_AGENT_PATH,
            get(acsp::must_be_authorised_agent),
        )
        .route(STOP_PAGE_PATH, get(stop_page::show))
        .route(
            TRADING_STATUS_PATH,
            get(trading_status::show).post(trading_status::submit),
        )
        .route(TRADING_STOP_PATH, get(trading_status::stop))
        .route(TASK_LIST_PATH, get(task_list::show))
        .route(REGISTERED_EMAIL_ADDRESS_PATH, get(registered_email::enter))
        .route(
            CHECK_EMAIL_ADDRESS_PATH,
            get(registered_email::show_check).post(registered_email::submit_check),
        )
        .route(
            PROVIDE_EMAIL_ADDRESS_PATH,
            get(registered_email::show_provide).post(registered_email::submit_provide),
        )
        .route(REVIEW_PATH, get(review::show).post(review::submit))
        .route(LP_REVIEW_PATH, get(review::show).post(review::submit))
        .route(PAYMENT_CALLBACK_PATH, get(payment::callback))
        .route(LP_PAYMENT_CALLBACK_PATH, get(payment::callback))
        .route(CONFIRMATION_PATH, get(confirmation::show))
        .route(LP_CONFIRMATION_PATH, get(confirmation::show))
        .route(
            LP_BEFORE_YOU_FILE_PATH,
            get(acsp::show_before_you_file).post(acsp::submit_before_you_file),
        )
        .route(
            LP_CS_DATE_PATH,
            get(acsp::show_cs_date).post(acsp::submit_cs_date),
        )
        .route(
            LP_CHECK_YOUR_ANSWER_PATH,
            get(acsp::show_check_your_answer).post(acsp::submit_check_your_answer),
        )
        .route(
            LP_SIC_CODE_SUMMARY_PATH,
            get(acsp::show_sic_code_summary).post(acsp::submit_sic_code_summary),
        )
        .with_state(state)
}
