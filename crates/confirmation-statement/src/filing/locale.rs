use serde::{Deserialize, Serialize};

/// Display language chosen through the `lang` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Cy,
}

impl Locale {
    /// Anything other than `cy` falls back to English.
    pub fn from_query(lang: Option<&str>) -> Self {
        match lang.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("cy") => Self::Cy,
            _ => Self::En,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Cy => "cy",
        }
    }
}
