use super::common::*;
use crate::config::FeatureFlags;
use crate::filing::fixtures::{company, limited_partnership};
use crate::session::SessionData;
use axum::http::StatusCode;

fn agent_session() -> Option<SessionData> {
    Some(SessionData::signed_in("agent@example.com").with_acsp_number("ACSP-0001"))
}

#[tokio::test]
async fn authorised_agent_with_open_partnership_creates_transaction() {
    let app = Setup {
        companies: vec![limited_partnership("limited-partnership")],
        session: agent_session(),
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=LP123456", "")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/company/LP123456/transaction"
    );
    let stored = app.session();
    assert_eq!(
        stored.company_profile().map(|profile| profile.company_number.as_str()),
        Some("LP123456")
    );
    assert!(stored.acsp().is_none());

    let response = app
        .get("/confirmation-statement/company/LP123456/transaction")
        .await;
    assert_eq!(
        location(&response),
        submission_url("LP123456", "/acsp/before-you-file")
    );
    assert_eq!(
        app.statements.created(),
        vec![("LP123456".to_string(), TRANSACTION_ID.to_string())]
    );
    assert_eq!(
        app.session()
            .acsp()
            .and_then(|acsp| acsp.company_subtype.as_deref()),
        Some("limited-partnership")
    );
}

#[tokio::test]
async fn partnership_without_agent_number_must_be_authorised_agent() {
    let app = Setup {
        companies: vec![limited_partnership("limited-partnership")],
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=LP123456", "")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/company/LP123456/acsp/must-be-authorised-agent"
    );

    let response = app
        .get("/confirmation-statement/company/LP123456/transaction")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/company/LP123456/acsp/must-be-authorised-agent"
    );
    assert_eq!(app.transactions.posted(), 0);
    assert!(app.statements.created().is_empty());

    let view = page(
        app.get("/confirmation-statement/company/LP123456/acsp/must-be-authorised-agent")
            .await,
    )
    .await;
    assert_eq!(view["template"], "acsp/must-be-authorised-agent");
    assert_eq!(
        view["backLink"],
        "/confirmation-statement/confirm-company?companyNumber=LP123456"
    );
}

#[tokio::test]
async fn closed_subtype_gate_sends_partnership_to_paper() {
    let app = Setup {
        companies: vec![limited_partnership("limited-partnership")],
        session: agent_session(),
        flags: FeatureFlags::default(),
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=LP123456", "")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/stop-page/use-paper?companyNumber=LP123456"
    );
    assert_eq!(app.statements.eligibility_checks(), 0);
    assert!(app.statements.created().is_empty());
}

#[tokio::test]
async fn unrecognised_subtype_is_sent_to_paper_even_when_gates_open() {
    let app = Setup {
        companies: vec![limited_partnership("not-a-real-subtype")],
        session: agent_session(),
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=LP123456", "")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/stop-page/use-paper?companyNumber=LP123456"
    );
}

#[tokio::test]
async fn ineligible_company_lands_on_stop_page_without_session_changes() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        eligibility: "INVALID_COMPANY_APPOINTMENTS_MORE_THAN_ONE_PSC",
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=12345678", "")
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/stop-page/use-webfiling?companyNumber=12345678"
    );
    assert!(app.session().company_profile().is_none());
}

#[tokio::test]
async fn unknown_eligibility_code_is_fatal() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        eligibility: "SOMETHING_NEW",
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form("/confirmation-statement/confirm-company?companyNumber=12345678", "")
        .await;
    let body = error_page(response, StatusCode::INTERNAL_SERVER_ERROR).await;
    assert_eq!(body["template"], "partials/service-offline");
}

#[tokio::test]
async fn standard_company_starts_at_trading_status_in_welsh() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        ..Setup::default()
    }
    .build();

    let response = app
        .post_form(
            "/confirmation-statement/confirm-company?companyNumber=12345678&lang=cy",
            "",
        )
        .await;
    assert_eq!(
        location(&response),
        "/confirmation-statement/company/12345678/transaction?lang=cy"
    );

    let response = app
        .get("/confirmation-statement/company/12345678/transaction?lang=cy")
        .await;
    assert_eq!(
        location(&response),
        format!("{}?lang=cy", submission_url("12345678", "/trading-status"))
    );
    assert_eq!(app.transactions.posted(), 1);
}

#[tokio::test]
async fn confirm_company_page_shows_profile() {
    let app = Setup {
        companies: vec![company("ltd", None)],
        ..Setup::default()
    }
    .build();

    let view = page(
        app.get("/confirmation-statement/confirm-company?companyNumber=12345678")
            .await,
    )
    .await;
    assert_eq!(view["template"], "confirm-company");
    assert_eq!(view["locale"], "en");
    assert_eq!(view["data"]["company"]["companyName"], "Test Company");
}
