use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use confirmation_statement::filing::company::Address;
use confirmation_statement::filing::{
    CompanyProfile, ConfirmationStatementDates, ConfirmationStatementSubmission,
};
use confirmation_statement::services::{
    registered_email_from_response, ClosedTransaction, CompanyProfileService,
    ConfirmationStatementService, NextMadeUpToDate, PaymentService, PaymentSession,
    RegisteredEmailAddressService, ServiceError, Transaction, TransactionService,
    REGISTERED_EMAIL_NOT_FOUND_ERROR,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

const ELIGIBLE: &str = "COMPANY_VALID_FOR_SERVICE";

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Raw reply of the registered email address API for one company.
#[derive(Debug, Clone)]
struct EmailResponse {
    status: u16,
    body: String,
}

impl EmailResponse {
    fn for_address(registered_email: &str) -> Self {
        if registered_email.is_empty() {
            Self {
                status: 404,
                body: json!({
                    "errors": [{ "error": REGISTERED_EMAIL_NOT_FOUND_ERROR, "type": "ch:service" }]
                })
                .to_string(),
            }
        } else {
            Self {
                status: 200,
                body: json!({ "registeredEmailAddress": registered_email }).to_string(),
            }
        }
    }
}

#[derive(Debug, Clone)]
struct RegisteredCompany {
    profile: CompanyProfile,
    eligibility: String,
    email_response: EmailResponse,
}

#[derive(Debug, Default)]
struct RegistryRecords {
    companies: HashMap<String, RegisteredCompany>,
    transactions: HashMap<String, Transaction>,
    submissions: HashMap<(String, String), ConfirmationStatementSubmission>,
}

/// Stand-in for every remote API the journey talks to, used by the development server.
#[derive(Default, Clone)]
pub(crate) struct InMemoryRegistry {
    records: Arc<Mutex<RegistryRecords>>,
    sequence: Arc<AtomicU64>,
    filing_fee_due: bool,
}

impl InMemoryRegistry {
    /// Registry holding one company per journey, with statements falling due around `today`.
    pub(crate) fn seeded(today: NaiveDate) -> Self {
        let registry = Self::default();
        let overdue = today - Duration::days(30);
        let upcoming = today + Duration::days(45);

        registry.register(
            demo_company("12345678", "Demo Trading Ltd", "ltd", None, overdue),
            ELIGIBLE,
            "enquiries@demo-trading.example",
        );
        registry.register(
            demo_company("00006400", "Dormant Holdings PLC", "plc", None, upcoming),
            "INVALID_COMPANY_TYPE_PAPER_FILING_ONLY",
            "",
        );
        registry.register(
            demo_company(
                "OE000123",
                "Overseas Entity Ltd",
                "registered-overseas-entity",
                None,
                overdue,
            ),
            "INVALID_COMPANY_STATUS",
            "",
        );
        for (number, name, subtype) in [
            ("LP123456", "Harbour Partners LP", "limited-partnership"),
            ("SL123456", "Glen Partners SLP", "scottish-limited-partnership"),
            ("LP654321", "Venture Fund PFLP", "private-fund-limited-partnership"),
            ("SL654321", "Loch Fund SPFLP", "scottish-private-fund-limited-partnership"),
        ] {
            registry.register(
                demo_company(number, name, "limited-partnership", Some(subtype), overdue),
                ELIGIBLE,
                "",
            );
        }

        registry
    }

    /// Close transactions with a payment url so the payment round trip is exercised.
    pub(crate) fn with_filing_fee(mut self) -> Self {
        self.filing_fee_due = true;
        self
    }

    fn register(&self, profile: CompanyProfile, eligibility: &str, registered_email: &str) {
        if let Ok(mut records) = self.records.lock() {
            records.companies.insert(
                profile.company_number.clone(),
                RegisteredCompany {
                    profile,
                    eligibility: eligibility.to_string(),
                    email_response: EmailResponse::for_address(registered_email),
                },
            );
        }
    }

    fn records(
        &self,
        service: &'static str,
    ) -> Result<MutexGuard<'_, RegistryRecords>, ServiceError> {
        self.records.lock().map_err(|_| ServiceError::Unavailable {
            service,
            detail: "registry mutex poisoned".to_string(),
        })
    }

    fn company(
        &self,
        service: &'static str,
        company_number: &str,
    ) -> Result<RegisteredCompany, ServiceError> {
        self.records(service)?
            .companies
            .get(company_number)
            .cloned()
            .ok_or(ServiceError::Status {
                service,
                status: 404,
            })
    }

    fn next_id(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }
}

fn demo_company(
    number: &str,
    name: &str,
    company_type: &str,
    subtype: Option<&str>,
    next_made_up_to: NaiveDate,
) -> CompanyProfile {
    CompanyProfile {
        company_number: number.to_string(),
        company_name: name.to_string(),
        company_status: "active".to_string(),
        company_type: company_type.to_string(),
        subtype: subtype.map(str::to_string),
        date_of_creation: Some(next_made_up_to - Duration::days(365 * 3)),
        confirmation_statement: Some(ConfirmationStatementDates {
            last_made_up_to: Some(next_made_up_to - Duration::days(365)),
            next_made_up_to,
            next_due: next_made_up_to + Duration::days(14),
        }),
        sic_codes: vec!["62012".to_string()],
        registered_office_address: Some(Address {
            address_line_one: "1 Crown Way".to_string(),
            locality: "Cardiff".to_string(),
            postal_code: "CF14 3UZ".to_string(),
            ..Address::default()
        }),
    }
}

#[async_trait]
impl CompanyProfileService for InMemoryRegistry {
    async fn get_company_profile(
        &self,
        company_number: &str,
    ) -> Result<CompanyProfile, ServiceError> {
        Ok(self.company("company profile api", company_number)?.profile)
    }
}

#[async_trait]
impl ConfirmationStatementService for InMemoryRegistry {
    async fn check_eligibility(&self, company_number: &str) -> Result<String, ServiceError> {
        Ok(self
            .company("confirmation statement api", company_number)?
            .eligibility)
    }

    async fn create_confirmation_statement(
        &self,
        _company_number: &str,
        transaction_id: &str,
    ) -> Result<String, ServiceError> {
        let submission_id = format!("{:024x}", self.next_id());
        self.records("confirmation statement api")?.submissions.insert(
            (transaction_id.to_string(), submission_id.clone()),
            ConfirmationStatementSubmission::new(submission_id.clone()),
        );
        Ok(submission_id)
    }

    async fn get_confirmation_statement(
        &self,
        transaction_id: &str,
        submission_id: &str,
    ) -> Result<ConfirmationStatementSubmission, ServiceError> {
        self.records("confirmation statement api")?
            .submissions
            .get(&(transaction_id.to_string(), submission_id.to_string()))
            .cloned()
            .ok_or(ServiceError::Status {
                service: "confirmation statement api",
                status: 404,
            })
    }

    async fn update_confirmation_statement(
        &self,
        transaction_id: &str,
        submission: &ConfirmationStatementSubmission,
    ) -> Result<(), ServiceError> {
        self.records("confirmation statement api")?.submissions.insert(
            (transaction_id.to_string(), submission.submission_id.clone()),
            submission.clone(),
        );
        Ok(())
    }

    async fn get_next_made_up_to_date(
        &self,
        company_number: &str,
    ) -> Result<NextMadeUpToDate, ServiceError> {
        let company = self.company("confirmation statement api", company_number)?;
        Ok(NextMadeUpToDate {
            current_next_made_up_to_date: company.profile.next_made_up_to(),
            is_due: Some(true),
            new_next_made_up_to_date: None,
        })
    }
}

#[async_trait]
impl TransactionService for InMemoryRegistry {
    async fn post_transaction(
        &self,
        company_number: &str,
        description: &str,
        reference: &str,
    ) -> Result<Transaction, ServiceError> {
        let n = self.next_id();
        let transaction = Transaction {
            id: format!(
                "{:06}-{:06}-{:06}",
                n % 1_000_000,
                (n * 7) % 1_000_000,
                (n * 13) % 1_000_000
            ),
            company_number: company_number.to_string(),
            reference: reference.to_string(),
            description: description.to_string(),
            status: "open".to_string(),
        };
        self.records("transactions api")?
            .transactions
            .insert(transaction.id.clone(), transaction.clone());
        Ok(transaction)
    }

    async fn get_transaction(&self, transaction_id: &str) -> Result<Transaction, ServiceError> {
        self.records("transactions api")?
            .transactions
            .get(transaction_id)
            .cloned()
            .ok_or(ServiceError::Status {
                service: "transactions api",
                status: 404,
            })
    }

    async fn close_transaction(
        &self,
        _company_number: &str,
        transaction_id: &str,
    ) -> Result<ClosedTransaction, ServiceError> {
        let mut records = self.records("transactions api")?;
        let transaction = records
            .transactions
            .get_mut(transaction_id)
            .ok_or(ServiceError::Status {
                service: "transactions api",
                status: 404,
            })?;
        transaction.status = "closed".to_string();

        let payment_url = self
            .filing_fee_due
            .then(|| format!("/payments/transactions/{transaction_id}"));
        Ok(ClosedTransaction { payment_url })
    }
}

#[async_trait]
impl RegisteredEmailAddressService for InMemoryRegistry {
    async fn get_registered_email_address(
        &self,
        company_number: &str,
    ) -> Result<String, ServiceError> {
        let response = self
            .company("registered email address api", company_number)?
            .email_response;
        registered_email_from_response(response.status, &response.body)
    }
}

#[async_trait]
impl PaymentService for InMemoryRegistry {
    /// Payments settle immediately: the journey url is the callback marked as paid.
    async fn start_payment(
        &self,
        _payment_url: &str,
        return_url: &str,
        _reference: &str,
    ) -> Result<PaymentSession, ServiceError> {
        let state = format!("payment-{:08x}", self.next_id());
        Ok(PaymentSession {
            journey_url: format!("{return_url}?status=paid&state={state}"),
            state,
        })
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{raw}': {err}"))
}
