//! Offline evaluation of the journey rules, for checking a company's path without the service.

use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use confirmation_statement::config::{AppConfig, FeatureFlags};
use confirmation_statement::error::AppError;
use confirmation_statement::filing::cs_date::check_cs_date;
use confirmation_statement::filing::{
    confirm_company_destination, paper_filing_override, CompanyProfile, ConfirmCompanyDestination,
    ConfirmationStatementDates, CsDateValue, FilingError, Locale,
};

#[derive(Args, Debug)]
pub(crate) struct EligibilityArgs {
    /// Company number used in the destination url
    #[arg(long, default_value = "12345678")]
    pub(crate) company_number: String,
    /// Registry company type, e.g. `ltd` or `limited-partnership`
    #[arg(long, default_value = "ltd")]
    pub(crate) company_type: String,
    /// Registry company subtype
    #[arg(long)]
    pub(crate) subtype: Option<String>,
    /// Eligibility status code returned by the confirmation statement API
    #[arg(long, default_value = "COMPANY_VALID_FOR_SERVICE")]
    pub(crate) code: String,
    /// ACSP number of the signed-in user, if filing as an authorised agent
    #[arg(long)]
    pub(crate) acsp_number: Option<String>,
    /// Day the feature gates are evaluated on (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

impl EligibilityArgs {
    fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            company_number: self.company_number.clone(),
            company_name: String::new(),
            company_status: "active".to_string(),
            company_type: self.company_type.clone(),
            subtype: self.subtype.clone(),
            date_of_creation: None,
            confirmation_statement: None,
            sic_codes: Vec::new(),
            registered_office_address: None,
        }
    }

    fn acsp_authorised(&self) -> bool {
        self.acsp_number
            .as_deref()
            .is_some_and(|number| !number.trim().is_empty())
    }
}

#[derive(Args, Debug)]
pub(crate) struct CsDateArgs {
    #[arg(long, default_value = "")]
    pub(crate) day: String,
    #[arg(long, default_value = "")]
    pub(crate) month: String,
    #[arg(long, default_value = "")]
    pub(crate) year: String,
    /// Made-up-to date of the company's last confirmation statement
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) last_made_up_to: Option<NaiveDate>,
    /// Next made-up-to date; omit for a company with no confirmation statement on record
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) next_made_up_to: Option<NaiveDate>,
    /// Day the date is validated on (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// `en` or `cy`
    #[arg(long)]
    pub(crate) lang: Option<String>,
}

impl CsDateArgs {
    fn profile(&self) -> CompanyProfile {
        CompanyProfile {
            company_number: "00000000".to_string(),
            company_name: String::new(),
            company_status: "active".to_string(),
            company_type: "ltd".to_string(),
            subtype: None,
            date_of_creation: None,
            confirmation_statement: self.next_made_up_to.map(|next_made_up_to| {
                ConfirmationStatementDates {
                    last_made_up_to: self.last_made_up_to,
                    next_made_up_to,
                    next_due: next_made_up_to + Duration::days(14),
                }
            }),
            sic_codes: Vec::new(),
            registered_office_address: None,
        }
    }
}

fn today_or_now(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn eligibility_destination(
    args: &EligibilityArgs,
    flags: &FeatureFlags,
    today: NaiveDate,
) -> Result<ConfirmCompanyDestination, FilingError> {
    let profile = args.profile();
    if let Some(destination) = paper_filing_override(&profile, flags, today) {
        return Ok(destination);
    }
    confirm_company_destination(&profile, &args.code, args.acsp_authorised())
}

/// Accepted date, or the localised message the date selector would show.
pub(crate) fn cs_date_verdict(args: &CsDateArgs) -> Result<NaiveDate, &'static str> {
    let locale = Locale::from_query(args.lang.as_deref());
    let value = CsDateValue::new(&args.year, &args.month, &args.day);
    check_cs_date(&value, &args.profile(), today_or_now(args.today))
        .map_err(|error| error.message(locale))
}

pub(crate) fn run_eligibility(args: EligibilityArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = today_or_now(args.today);
    let destination = eligibility_destination(&args, &config.features, today)?;

    println!("Company {} ({})", args.company_number, args.company_type);
    if let Some(subtype) = args.subtype.as_deref() {
        println!("  Subtype: {subtype}");
    }
    println!("  Eligibility code: {}", args.code);
    println!("  Authorised agent: {}", args.acsp_authorised());
    println!("  Gates evaluated on: {today}");
    println!("Destination: {:?}", destination);
    println!("  {}", destination.url(&args.company_number));
    Ok(())
}

pub(crate) fn run_cs_date(args: CsDateArgs) -> Result<(), AppError> {
    match cs_date_verdict(&args) {
        Ok(date) => println!("Accepted: {}", date.format("%-d %B %Y")),
        Err(message) => println!("Rejected: {message}"),
    }
    Ok(())
}
