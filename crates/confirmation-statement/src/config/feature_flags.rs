use chrono::{Local, NaiveDate};
use std::env;
use tracing::warn;

const GATE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Interpret an environment value as a boolean flag.
///
/// Unset values and `false`, `0`, `off` or the empty string are off; anything else is on.
pub fn parse_flag(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) => !matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "false" | "0" | "off" | ""
        ),
    }
}

/// Feature switched on from a configured ISO date onwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateGate {
    raw: Option<String>,
}

impl DateGate {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    fn from_env(key: &str) -> Self {
        Self {
            raw: env::var(key).ok(),
        }
    }

    /// True when the gate date parses and `day` falls on or after it.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        let Some(raw) = self.raw.as_deref() else {
            return false;
        };

        match NaiveDate::parse_from_str(raw.trim(), GATE_DATE_FORMAT) {
            Ok(start) => day >= start,
            Err(err) => {
                warn!(
                    value = raw,
                    %err,
                    "feature gate date is not yyyy-mm-dd, treating as disabled"
                );
                false
            }
        }
    }
}

/// Feature switches injected into the filing journey.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    pub five_or_less_officers_journey: bool,
    pub lp_subtype_start: DateGate,
    pub slp_subtype_start: DateGate,
    pub pflp_subtype_start: DateGate,
    pub spflp_subtype_start: DateGate,
    pub registered_email_address_start: DateGate,
}

impl FeatureFlags {
    pub fn from_env() -> Self {
        Self {
            five_or_less_officers_journey: parse_flag(
                env::var("FEATURE_FLAG_FIVE_OR_LESS_OFFICERS_JOURNEY")
                    .ok()
                    .as_deref(),
            ),
            lp_subtype_start: DateGate::from_env("FEATURE_FLAG_LP_SUBTYPE_START_DATE"),
            slp_subtype_start: DateGate::from_env("FEATURE_FLAG_SLP_SUBTYPE_START_DATE"),
            pflp_subtype_start: DateGate::from_env("FEATURE_FLAG_PFLP_SUBTYPE_START_DATE"),
            spflp_subtype_start: DateGate::from_env("FEATURE_FLAG_SPFLP_SUBTYPE_START_DATE"),
            registered_email_address_start: DateGate::from_env(
                "FEATURE_FLAG_REGISTERED_EMAIL_ADDRESS_START_DATE",
            ),
        }
    }
}

/// Source of "today" for date gates and date validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(self) -> NaiveDate {
        match self {
            Clock::System => Local::now().date_naive(),
            Clock::Fixed(day) => day,
        }
    }
}
