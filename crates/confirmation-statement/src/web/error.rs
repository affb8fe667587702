use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use crate::filing::{FilingError, InvalidIdentifier};
use crate::services::ServiceError;
use crate::session::SessionError;
use crate::telemetry::sanitise_for_log;

const SERVICE_UNAVAILABLE_TEMPLATE: &str = "partials/service-unavailable";
const SERVICE_OFFLINE_TEMPLATE: &str = "partials/service-offline";
const SIGN_IN_TEMPLATE: &str = "partials/sign-in-required";

/// Every failure a screen can raise, funnelled into one generic error page.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidIdentifier),
    #[error("request carries no session cookie")]
    Unauthenticated,
    #[error("unknown stop page")]
    UnknownStopPage,
    #[error("payment callback state does not match the session")]
    PaymentStateMismatch,
    #[error(transparent)]
    Filing(#[from] FilingError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, template) = match &self {
            WebError::InvalidIdentifier(invalid) => {
                warn!(
                    field = invalid.field,
                    value = %sanitise_for_log(&invalid.value),
                    "rejected request with malformed identifier"
                );
                (StatusCode::BAD_REQUEST, SERVICE_UNAVAILABLE_TEMPLATE)
            }
            WebError::UnknownStopPage => {
                warn!("requested stop page does not exist");
                (StatusCode::NOT_FOUND, SERVICE_UNAVAILABLE_TEMPLATE)
            }
            WebError::Unauthenticated => (StatusCode::UNAUTHORIZED, SIGN_IN_TEMPLATE),
            WebError::PaymentStateMismatch
            | WebError::Filing(_)
            | WebError::Service(_)
            | WebError::Session(_) => {
                error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, SERVICE_OFFLINE_TEMPLATE)
            }
        };

        let body = json!({ "template": template, "status": status.as_u16() });
        (status, Json(body)).into_response()
    }
}
