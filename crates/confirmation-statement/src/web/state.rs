use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::{Clock, FeatureFlags};
use crate::services::{
    CompanyProfileService, ConfirmationStatementService, PaymentService,
    RegisteredEmailAddressService, TransactionService,
};
use crate::session::SessionStore;

/// Collaborators and switches shared by every screen handler.
#[derive(Clone)]
pub struct FilingState {
    pub features: FeatureFlags,
    pub clock: Clock,
    pub sessions: Arc<dyn SessionStore>,
    pub company_profiles: Arc<dyn CompanyProfileService>,
    pub confirmation_statements: Arc<dyn ConfirmationStatementService>,
    pub transactions: Arc<dyn TransactionService>,
    pub registered_emails: Arc<dyn RegisteredEmailAddressService>,
    pub payments: Arc<dyn PaymentService>,
}

impl FilingState {
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
