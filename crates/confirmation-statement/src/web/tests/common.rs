use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crate::config::{Clock, DateGate, FeatureFlags};
use crate::filing::fixtures::today;
use crate::filing::{CompanyProfile, ConfirmationStatementSubmission};
use crate::services::{
    ClosedTransaction, CompanyProfileService, ConfirmationStatementService, NextMadeUpToDate,
    PaymentService, PaymentSession, RegisteredEmailAddressService, ServiceError, Transaction,
    TransactionService,
};
use crate::session::{MemorySessionStore, SessionData, SESSION_COOKIE_NAME};
use crate::web::{filing_router, FilingState};

pub(super) const SESSION_ID: &str = "session-1";
pub(super) const TRANSACTION_ID: &str = "123456-123456-123456";
pub(super) const SUBMISSION_ID: &str = "0123456789abcdef01234567";
pub(super) const PAYMENT_JOURNEY_URL: &str = "https://payments.example/journey/abc";
pub(super) const PAYMENT_STATE: &str = "payment-state-1";

fn unavailable(service: &'static str) -> ServiceError {
    ServiceError::Unavailable {
        service,
        detail: "fake lock poisoned".to_string(),
    }
}

#[derive(Default)]
pub(super) struct FakeCompanyProfiles {
    profiles: HashMap<String, CompanyProfile>,
}

#[async_trait]
impl CompanyProfileService for FakeCompanyProfiles {
    async fn get_company_profile(
        &self,
        company_number: &str,
    ) -> Result<CompanyProfile, ServiceError> {
        self.profiles
            .get(company_number)
            .cloned()
            .ok_or(ServiceError::Status {
                service: "company profile api",
                status: 404,
            })
    }
}

#[derive(Default)]
pub(super) struct FakeConfirmationStatements {
    pub eligibility: String,
    pub submissions: Mutex<HashMap<String, ConfirmationStatementSubmission>>,
    pub created: Mutex<Vec<(String, String)>>,
    pub eligibility_checks: Mutex<Vec<String>>,
    pub next_made_up_to: NextMadeUpToDate,
}

impl FakeConfirmationStatements {
    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().expect("lock").clone()
    }

    pub fn eligibility_checks(&self) -> usize {
        self.eligibility_checks.lock().expect("lock").len()
    }

    pub fn submission(&self) -> ConfirmationStatementSubmission {
        self.submissions
            .lock()
            .expect("lock")
            .get(SUBMISSION_ID)
            .cloned()
            .expect("submission stored")
    }

    pub fn insert(&self, submission: ConfirmationStatementSubmission) {
        self.submissions
            .lock()
            .expect("lock")
            .insert(submission.submission_id.clone(), submission);
    }
}

#[async_trait]
impl ConfirmationStatementService for FakeConfirmationStatements {
    async fn check_eligibility(&self, company_number: &str) -> Result<String, ServiceError> {
        self.eligibility_checks
            .lock()
            .map_err(|_| unavailable("confirmation statement api"))?
            .push(company_number.to_string());
        Ok(self.eligibility.clone())
    }

    async fn create_confirmation_statement(
        &self,
        company_number: &str,
        transaction_id: &str,
    ) -> Result<String, ServiceError> {
        self.created
            .lock()
            .map_err(|_| unavailable("confirmation statement api"))?
            .push((company_number.to_string(), transaction_id.to_string()));
        self.insert(ConfirmationStatementSubmission::new(SUBMISSION_ID));
        Ok(SUBMISSION_ID.to_string())
    }

    async fn get_confirmation_statement(
        &self,
        _transaction_id: &str,
        submission_id: &str,
    ) -> Result<ConfirmationStatementSubmission, ServiceError> {
        self.submissions
            .lock()
            .map_err(|_| unavailable("confirmation statement api"))?
            .get(submission_id)
            .cloned()
            .ok_or(ServiceError::Status {
                service: "confirmation statement api",
                status: 404,
            })
    }

    async fn update_confirmation_statement(
        &self,
        _transaction_id: &str,
        submission: &ConfirmationStatementSubmission,
    ) -> Result<(), ServiceError> {
        self.insert(submission.clone());
        Ok(())
    }

    async fn get_next_made_up_to_date(
        &self,
        _company_number: &str,
    ) -> Result<NextMadeUpToDate, ServiceError> {
        Ok(self.next_made_up_to.clone())
    }
}

#[derive(Default)]
pub(super) struct FakeTransactions {
    pub payment_url: Option<String>,
    pub posted: Mutex<Vec<String>>,
    pub closed: Mutex<Vec<String>>,
}

impl FakeTransactions {
    pub fn posted(&self) -> usize {
        self.posted.lock().expect("lock").len()
    }

    pub fn closed(&self) -> usize {
        self.closed.lock().expect("lock").len()
    }
}

fn transaction(company_number: &str) -> Transaction {
    Transaction {
        id: TRANSACTION_ID.to_string(),
        company_number: company_number.to_string(),
        reference: "ConfirmationStatementReference".to_string(),
        description: "Confirmation statement".to_string(),
        status: "open".to_string(),
    }
}

#[async_trait]
impl TransactionService for FakeTransactions {
    async fn post_transaction(
        &self,
        company_number: &str,
        _description: &str,
        _reference: &str,
    ) -> Result<Transaction, ServiceError> {
        self.posted
            .lock()
            .map_err(|_| unavailable("transactions api"))?
            .push(company_number.to_string());
        Ok(transaction(company_number))
    }

    async fn get_transaction(&self, _transaction_id: &str) -> Result<Transaction, ServiceError> {
        Ok(transaction("12345678"))
    }

    async fn close_transaction(
        &self,
        _company_number: &str,
        transaction_id: &str,
    ) -> Result<ClosedTransaction, ServiceError> {
        self.closed
            .lock()
            .map_err(|_| unavailable("transactions api"))?
            .push(transaction_id.to_string());
        Ok(ClosedTransaction {
            payment_url: self.payment_url.clone(),
        })
    }
}

#[derive(Default)]
pub(super) struct FakeRegisteredEmails {
    pub email: String,
}

#[async_trait]
impl RegisteredEmailAddressService for FakeRegisteredEmails {
    async fn get_registered_email_address(
        &self,
        _company_number: &str,
    ) -> Result<String, ServiceError> {
        Ok(self.email.clone())
    }
}

#[derive(Default)]
pub(super) struct FakePayments {
    pub started: Mutex<Vec<String>>,
}

#[async_trait]
impl PaymentService for FakePayments {
    async fn start_payment(
        &self,
        _payment_url: &str,
        return_url: &str,
        _reference: &str,
    ) -> Result<PaymentSession, ServiceError> {
        self.started
            .lock()
            .map_err(|_| unavailable("payments api"))?
            .push(return_url.to_string());
        Ok(PaymentSession {
            journey_url: PAYMENT_JOURNEY_URL.to_string(),
            state: PAYMENT_STATE.to_string(),
        })
    }
}

/// Flags with every limited partnership subtype open.
pub(super) fn open_flags() -> FeatureFlags {
    FeatureFlags {
        lp_subtype_start: DateGate::new("2025-01-01"),
        slp_subtype_start: DateGate::new("2025-01-01"),
        pflp_subtype_start: DateGate::new("2025-01-01"),
        spflp_subtype_start: DateGate::new("2025-01-01"),
        ..FeatureFlags::default()
    }
}

pub(super) struct Setup {
    pub companies: Vec<CompanyProfile>,
    pub session: Option<SessionData>,
    pub eligibility: &'static str,
    pub flags: FeatureFlags,
    pub payment_url: Option<String>,
    pub registered_email: String,
    pub next_made_up_to: NextMadeUpToDate,
}

impl Default for Setup {
    fn default() -> Self {
        Self {
            companies: Vec::new(),
            session: Some(SessionData::signed_in("user@example.com")),
            eligibility: "COMPANY_VALID_FOR_SERVICE",
            flags: open_flags(),
            payment_url: None,
            registered_email: String::new(),
            next_made_up_to: NextMadeUpToDate::default(),
        }
    }
}

pub(super) struct TestApp {
    pub router: Router,
    pub sessions: MemorySessionStore,
    pub statements: Arc<FakeConfirmationStatements>,
    pub transactions: Arc<FakeTransactions>,
    pub payments: Arc<FakePayments>,
}

impl Setup {
    pub fn build(self) -> TestApp {
        let sessions = match self.session {
            Some(data) => MemorySessionStore::with_session(SESSION_ID, data),
            None => MemorySessionStore::default(),
        };
        let statements = Arc::new(FakeConfirmationStatements {
            eligibility: self.eligibility.to_string(),
            next_made_up_to: self.next_made_up_to,
            ..FakeConfirmationStatements::default()
        });
        let transactions = Arc::new(FakeTransactions {
            payment_url: self.payment_url,
            ..FakeTransactions::default()
        });
        let payments = Arc::new(FakePayments::default());
        let profiles = FakeCompanyProfiles {
            profiles: self
                .companies
                .into_iter()
                .map(|profile| (profile.company_number.clone(), profile))
                .collect(),
        };

        let state = Arc::new(FilingState {
            features: self.flags,
            clock: Clock::Fixed(today()),
            sessions: Arc::new(sessions.clone()),
            company_profiles: Arc::new(profiles),
            confirmation_statements: statements.clone(),
            transactions: transactions.clone(),
            registered_emails: Arc::new(FakeRegisteredEmails {
                email: self.registered_email,
            }),
            payments: payments.clone(),
        });

        TestApp {
            router: filing_router(state),
            sessions,
            statements,
            transactions,
            payments,
        }
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> Response {
        self.send(
            Request::get(uri)
                .header(COOKIE, format!("{SESSION_COOKIE_NAME}={SESSION_ID}"))
                .body(Body::empty())
                .expect("request"),
        )
        .await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response {
        self.send(
            Request::post(uri)
                .header(COOKIE, format!("{SESSION_COOKIE_NAME}={SESSION_ID}"))
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_string()))
                .expect("request"),
        )
        .await
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router responds")
    }

    pub fn session(&self) -> SessionData {
        self.sessions.snapshot(SESSION_ID).expect("session stored")
    }
}

/// Submission-scoped URL for the given screen suffix.
pub(super) fn submission_url(company_number: &str, suffix: &str) -> String {
    format!(
        "/confirmation-statement/company/{company_number}/transaction/{TRANSACTION_ID}/submission/{SUBMISSION_ID}{suffix}"
    )
}

pub(super) fn location(response: &Response) -> &str {
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "expected redirect");
    response
        .headers()
        .get(LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
}

pub(super) async fn page(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK, "expected rendered page");
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json page")
}

pub(super) async fn error_page(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let body = to_bytes(response.into_body(), 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json error page")
}
