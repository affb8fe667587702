use super::common::*;
use crate::filing::fixtures::company;
use axum::body::Body;
use axum::http::{Request, StatusCode};

#[tokio::test]
async fn request_without_session_cookie_is_unauthorised() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        ..Setup::default()
    }
    .build();

    let response = app
        .send(
            Request::get("/confirmation-statement/confirm-company?companyNumber=12345678")
                .body(Body::empty())
                .expect("request"),
        )
        .await;
    let body = error_page(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["status"], 401);
}

#[tokio::test]
async fn malformed_company_number_is_rejected() {
    let app = Setup::default().build();

    for uri in [
        "/confirmation-statement/confirm-company?companyNumber=abc",
        "/confirmation-statement/confirm-company",
        "/confirmation-statement/company/12345678%0Aforged/transaction",
    ] {
        let body = error_page(app.get(uri).await, StatusCode::BAD_REQUEST).await;
        assert_eq!(body["template"], "partials/service-unavailable", "{uri}");
    }
}

#[tokio::test]
async fn malformed_submission_id_is_rejected() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        ..Setup::default()
    }
    .build();

    let uri = "/confirmation-statement/company/12345678/transaction/123456-123456-123456/submission/NOT-HEX/task-list";
    let body = error_page(app.get(uri).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["template"], "partials/service-unavailable");
}

#[tokio::test]
async fn transaction_id_in_another_script_is_rejected() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        ..Setup::default()
    }
    .build();

    let arabic_indic = "%D9%A1%D9%A2%D9%A3%D9%A4%D9%A5%D9%A6";
    let uri = format!(
        "/confirmation-statement/company/12345678/transaction/{arabic_indic}-123456-123456/submission/{SUBMISSION_ID}/task-list"
    );
    let body = error_page(app.get(&uri).await, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["template"], "partials/service-unavailable");
}

#[tokio::test]
async fn unknown_company_is_fatal() {
    let app = Setup::default().build();

    let body = error_page(
        app.get("/confirmation-statement/confirm-company?companyNumber=99999999")
            .await,
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    assert_eq!(body["template"], "partials/service-offline");
}

#[tokio::test]
async fn stop_pages_render_by_slug() {
    let app = Setup::default().build();

    let response = app
        .get("/confirmation-statement/stop-page/no-filing-required?companyNumber=12345678")
        .await;
    let view = page(response).await;
    assert_eq!(view["template"], "stop-pages/no-filing-required");
    assert_eq!(view["data"]["companyNumber"], "12345678");

    let response = app
        .get("/confirmation-statement/stop-page/not-a-page?companyNumber=12345678")
        .await;
    error_page(response, StatusCode::NOT_FOUND).await;
}
