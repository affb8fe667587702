use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use crate::filing::paths::with_lang;
use crate::filing::Locale;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Template name plus the values it would be rendered with.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub template: &'static str,
    pub locale: Locale,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub back_link: Option<String>,
    pub data: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl PageView {
    pub fn new(template: &'static str, locale: Locale) -> Self {
        Self {
            template,
            locale,
            back_link: None,
            data: Value::Null,
            errors: Vec::new(),
        }
    }

    pub fn back_link(mut self, link: String) -> Self {
        self.back_link = Some(link);
        self
    }

    pub fn data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn error(mut self, field: &'static str, message: &'static str) -> Self {
        self.errors.push(FieldError { field, message });
        self
    }
}

impl IntoResponse for PageView {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// See-other redirect that keeps a Welsh language choice.
pub fn redirect(url: String, locale: Locale) -> Response {
    let url = match locale {
        Locale::En => url,
        Locale::Cy => with_lang(url, locale.code()),
    };
    Redirect::to(&url).into_response()
}
