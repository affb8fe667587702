//! Validation for the replacement confirmation statement date entered on the agent journey.

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::company::CompanyProfile;
use super::locale::Locale;

/// Raw day/month/year fields as submitted by the date selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsDateValue {
    #[serde(default)]
    pub cs_date_year: String,
    #[serde(default)]
    pub cs_date_month: String,
    #[serde(default)]
    pub cs_date_day: String,
}

impl CsDateValue {
    pub fn new(year: &str, month: &str, day: &str) -> Self {
        Self {
            cs_date_year: year.to_string(),
            cs_date_month: month.to_string(),
            cs_date_day: day.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CsDateError {
    NoDataEntered,
    MissingDay,
    MissingMonth,
    MissingYear,
    InvalidDate,
    DateInFuture,
    DuplicateDate,
    DateBeforeLastStatement,
}

impl CsDateError {
    pub const fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::NoDataEntered, Locale::En) => "Enter the confirmation statement date",
            (Self::NoDataEntered, Locale::Cy) => "Rhowch ddyddiad y datganiad cadarnhau",
            (Self::MissingDay, Locale::En) => "The confirmation statement date must include a day",
            (Self::MissingDay, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau gynnwys diwrnod"
            }
            (Self::MissingMonth, Locale::En) => {
                "The confirmation statement date must include a month"
            }
            (Self::MissingMonth, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau gynnwys mis"
            }
            (Self::MissingYear, Locale::En) => {
                "The confirmation statement date must include a year"
            }
            (Self::MissingYear, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau gynnwys blwyddyn"
            }
            (Self::InvalidDate, Locale::En) => {
                "The confirmation statement date must be a real date"
            }
            (Self::InvalidDate, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau fod yn ddyddiad go iawn"
            }
            (Self::DateInFuture, Locale::En) => {
                "The confirmation statement date must be today or in the past"
            }
            (Self::DateInFuture, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau fod heddiw neu yn y gorffennol"
            }
            (Self::DuplicateDate, Locale::En) => {
                "The confirmation statement date must be different to the current confirmation statement date"
            }
            (Self::DuplicateDate, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau fod yn wahanol i'r dyddiad presennol"
            }
            (Self::DateBeforeLastStatement, Locale::En) => {
                "The confirmation statement date must be after the date of the last confirmation statement"
            }
            (Self::DateBeforeLastStatement, Locale::Cy) => {
                "Rhaid i ddyddiad y datganiad cadarnhau fod ar ôl dyddiad y datganiad cadarnhau diwethaf"
            }
        }
    }
}

fn day_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0?[1-9]|[12][0-9]|3[01])$").expect("day regex"))
}

fn month_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0?[1-9]|1[0-2])$").expect("month regex"))
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("year regex"))
}

/// True iff `today` is strictly before the company's next made-up-to date.
pub fn is_today_before_file_cs_date(company: &CompanyProfile, today: NaiveDate) -> bool {
    company
        .next_made_up_to()
        .is_some_and(|next_made_up_to| today < next_made_up_to)
}

fn parse_structure(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    if !day_pattern().is_match(day)
        || !month_pattern().is_match(month)
        || !year_pattern().is_match(year)
    {
        return None;
    }

    let year = year.parse().ok()?;
    let month = month.parse().ok()?;
    let day = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Run the ordered checks, stopping at the first failure.
pub fn check_cs_date(
    value: &CsDateValue,
    company: &CompanyProfile,
    today: NaiveDate,
) -> Result<NaiveDate, CsDateError> {
    let day = value.cs_date_day.trim();
    let month = value.cs_date_month.trim();
    let year = value.cs_date_year.trim();

    if day.is_empty() && month.is_empty() && year.is_empty() {
        return Err(CsDateError::NoDataEntered);
    }
    if day.is_empty() {
        return Err(CsDateError::MissingDay);
    }
    if month.is_empty() {
        return Err(CsDateError::MissingMonth);
    }
    if year.is_empty() {
        return Err(CsDateError::MissingYear);
    }

    let date = parse_structure(day, month, year).ok_or(CsDateError::InvalidDate)?;

    if date > today {
        return Err(CsDateError::DateInFuture);
    }

    let reference = if is_today_before_file_cs_date(company, today) {
        company.last_made_up_to()
    } else {
        company.next_made_up_to()
    };

    match reference {
        Some(reference) if date == reference => Err(CsDateError::DuplicateDate),
        Some(reference) if date < reference => Err(CsDateError::DateBeforeLastStatement),
        _ => Ok(date),
    }
}

/// Localised error message for the date selector, or `None` when the date is acceptable.
pub fn validate_date_selector_value(
    locale: Locale,
    value: &CsDateValue,
    company: &CompanyProfile,
    today: NaiveDate,
) -> Option<&'static str> {
    check_cs_date(value, company, today)
        .err()
        .map(|error| error.message(locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filing::fixtures::{company, date, today, with_dates};

    fn ltd() -> CompanyProfile {
        company("ltd", None)
    }

    fn check(
        year: &str,
        month: &str,
        day: &str,
        profile: &CompanyProfile,
    ) -> Result<NaiveDate, CsDateError> {
        check_cs_date(&CsDateValue::new(year, month, day), profile, today())
    }

    #[test]
    fn thirty_first_of_february_is_invalid() {
        assert_eq!(
            validate_date_selector_value(
                Locale::En,
                &CsDateValue::new("2025", "02", "31"),
                &ltd(),
                today()
            ),
            Some(CsDateError::InvalidDate.message(Locale::En))
        );
    }

    #[test]
    fn all_blank_reports_no_data() {
        assert_eq!(
            validate_date_selector_value(Locale::En, &CsDateValue::default(), &ltd(), today()),
            Some("Enter the confirmation statement date")
        );
        assert_eq!(check(" ", "", "  ", &ltd()), Err(CsDateError::NoDataEntered));
    }

    #[test]
    fn missing_fields_checked_day_then_month_then_year() {
        assert_eq!(check("", "", "1", &ltd()), Err(CsDateError::MissingMonth));
        assert_eq!(check("2025", "", "", &ltd()), Err(CsDateError::MissingDay));
        assert_eq!(check("", "3", "1", &ltd()), Err(CsDateError::MissingYear));
        assert_eq!(check("2025", "3", "", &ltd()), Err(CsDateError::MissingDay));
    }

    #[test]
    fn structurally_invalid_fields_are_rejected() {
        for (year, month, day) in [
            ("2025", "13", "1"),
            ("2025", "0", "1"),
            ("2025", "1", "32"),
            ("2025", "1", "00"),
            ("25", "1", "1"),
            ("20255", "1", "1"),
            ("2025", "1", "1a"),
            ("2023", "02", "29"),
        ] {
            assert_eq!(
                check(year, month, day, &ltd()),
                Err(CsDateError::InvalidDate),
                "{year}-{month}-{day}"
            );
        }
    }

    #[test]
    fn future_dates_are_rejected() {
        assert_eq!(check("2025", "6", "11", &ltd()), Err(CsDateError::DateInFuture));
        assert!(check("2025", "6", "10", &ltd()).is_ok());
    }

    #[test]
    fn date_matching_next_made_up_to_is_duplicate() {
        let profile = with_dates(ltd(), None, date(2021, 3, 15));
        assert_eq!(
            validate_date_selector_value(
                Locale::En,
                &CsDateValue::new("2021", "03", "15"),
                &profile,
                today()
            ),
            Some(CsDateError::DuplicateDate.message(Locale::En))
        );
    }

    #[test]
    fn date_before_next_made_up_to_is_already_covered() {
        let profile = with_dates(ltd(), None, date(2021, 3, 15));
        assert_eq!(
            check("2021", "03", "14", &profile),
            Err(CsDateError::DateBeforeLastStatement)
        );
    }

    #[test]
    fn acceptable_date_passes() {
        let profile = with_dates(ltd(), Some(date(2024, 3, 15)), date(2025, 3, 15));
        assert_eq!(
            validate_date_selector_value(
                Locale::En,
                &CsDateValue::new("2025", "4", "1"),
                &profile,
                today()
            ),
            None
        );
        assert_eq!(check("2025", "4", "1", &profile), Ok(date(2025, 4, 1)));
    }

    #[test]
    fn last_made_up_to_is_the_reference_before_filing_is_due() {
        let profile = with_dates(ltd(), Some(date(2024, 9, 1)), date(2025, 9, 1));
        assert!(is_today_before_file_cs_date(&profile, today()));
        assert_eq!(
            check("2024", "9", "1", &profile),
            Err(CsDateError::DuplicateDate)
        );
        assert_eq!(
            check("2024", "8", "31", &profile),
            Err(CsDateError::DateBeforeLastStatement)
        );
        assert!(check("2024", "9", "2", &profile).is_ok());
    }

    #[test]
    fn no_reference_date_means_no_further_checks() {
        let first_filing = with_dates(ltd(), None, date(2025, 9, 1));
        assert!(check("2001", "1", "1", &first_filing).is_ok());

        let mut no_statement = ltd();
        no_statement.confirmation_statement = None;
        assert!(!is_today_before_file_cs_date(&no_statement, today()));
        assert!(check("2001", "1", "1", &no_statement).is_ok());
    }

    #[test]
    fn welsh_messages_differ_from_english() {
        assert_ne!(
            CsDateError::InvalidDate.message(Locale::Cy),
            CsDateError::InvalidDate.message(Locale::En)
        );
    }
}
