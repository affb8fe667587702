use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use serde::Deserialize;
use std::sync::Arc;

use super::error::WebError;
use super::state::FilingState;
use crate::filing::{JourneyIds, Locale};
use crate::session::{SessionData, SESSION_COOKIE_NAME};

/// Session loaded from the store for the request's `__SID` cookie.
#[derive(Debug)]
pub struct UserSession {
    pub id: String,
    pub data: SessionData,
}

impl UserSession {
    pub async fn save(self, state: &FilingState) -> Result<(), WebError> {
        state.sessions.save(&self.id, self.data).await?;
        Ok(())
    }
}

fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE_NAME && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

#[async_trait]
impl FromRequestParts<Arc<FilingState>> for UserSession {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<FilingState>,
    ) -> Result<Self, Self::Rejection> {
        let id = session_cookie(&parts.headers).ok_or(WebError::Unauthenticated)?;
        let data = state.sessions.load(&id).await?.unwrap_or_default();
        Ok(Self { id, data })
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionPath {
    pub company_number: String,
    pub transaction_id: String,
    pub submission_id: String,
}

impl SubmissionPath {
    pub fn ids(&self) -> Result<JourneyIds, WebError> {
        Ok(JourneyIds::parse(
            &self.company_number,
            &self.transaction_id,
            &self.submission_id,
        )?)
    }
}

#[derive(Debug, Deserialize)]
pub struct CompanyPath {
    pub company_number: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    #[serde(default)]
    pub lang: Option<String>,
}

impl LangQuery {
    pub fn locale(&self) -> Locale {
        Locale::from_query(self.lang.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn finds_session_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("lang=cy; __SID=abc123; other=1"),
        );
        assert_eq!(session_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn empty_or_missing_cookie_is_none() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_cookie(&headers), None);
        headers.insert(COOKIE, HeaderValue::from_static("__SID="));
        assert_eq!(session_cookie(&headers), None);
    }
}
