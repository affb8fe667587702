use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryRegistry};
use crate::routes::with_filing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use confirmation_statement::config::{AppConfig, Clock};
use confirmation_statement::error::AppError;
use confirmation_statement::session::{MemorySessionStore, SessionData};
use confirmation_statement::telemetry;
use confirmation_statement::web::FilingState;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let filing_state = Arc::new(filing_state(&config, &args));
    let app = with_filing_routes(filing_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "confirmation statement service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn filing_state(config: &AppConfig, args: &ServeArgs) -> FilingState {
    let clock = Clock::System;

    let mut registry = InMemoryRegistry::seeded(clock.today());
    if args.filing_fee {
        registry = registry.with_filing_fee();
    }
    let registry = Arc::new(registry);

    let sessions = match args.session_id.as_deref() {
        Some(session_id) => {
            let mut data = SessionData::signed_in(args.user_email.clone());
            if let Some(acsp_number) = args.acsp_number.as_deref() {
                data = data.with_acsp_number(acsp_number);
            }
            info!(
                session_id,
                acsp = data.is_acsp_authorised(),
                "seeded local session"
            );
            MemorySessionStore::with_session(session_id, data)
        }
        None => MemorySessionStore::default(),
    };

    FilingState {
        features: config.features.clone(),
        clock,
        sessions: Arc::new(sessions),
        company_profiles: registry.clone(),
        confirmation_statements: registry.clone(),
        transactions: registry.clone(),
        registered_emails: registry.clone(),
        payments: registry,
    }
}
