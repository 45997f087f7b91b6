//! HTTP-backed duty store
//!
//! Talks to a duty store service over its JSON API. Every response is
//! wrapped in the shared [`ApiResponse`] envelope; error envelopes carry
//! a numeric code which maps onto [`ClientError`] variants, with the
//! HTTP status as fallback when the body is not parseable.

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::store::DutyStore;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ApiResponse, ErrorCode};
use shared::models::{
    DutyRecord, MobileLookup, ProxyReportCreate, ReportCreate, StaffEntry, SubmissionCreate,
};
use std::time::Duration;

/// Duty store client backed by an HTTP service
#[derive(Debug, Clone)]
pub struct HttpDutyStore {
    client: Client,
    base_url: String,
}

impl HttpDutyStore {
    /// Create a store client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Check that the service is up and answering
    pub async fn health(&self) -> ClientResult<serde_json::Value> {
        let response = self.client.get(self.url("health")).send().await?;
        Self::handle_response("health", response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::handle_response(path, response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::handle_response(path, response).await
    }

    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: Response,
    ) -> ClientResult<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = map_failure(path, status, &body);
            tracing::warn!(path, %status, error = %err, "store request failed");
            return Err(err);
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)?;
        if !envelope.is_success() {
            // Some proxies rewrite statuses; trust the envelope over them
            let err = map_failure(path, status, &body);
            tracing::warn!(path, %status, error = %err, "store request failed");
            return Err(err);
        }

        envelope
            .data
            .ok_or_else(|| ClientError::InvalidResponse(format!("{path} returned no payload")))
    }
}

/// Map a failed response onto a client error
///
/// Prefers the envelope's error code; the HTTP status only decides when
/// the body carries no recognizable envelope.
fn map_failure(path: &str, status: StatusCode, body: &str) -> ClientError {
    if let Ok(envelope) = serde_json::from_str::<ApiResponse<()>>(body) {
        if let Some(code) = envelope.code.and_then(|c| ErrorCode::try_from(c).ok()) {
            let message = envelope.message;
            return match code {
                ErrorCode::StaffNotFound => ClientError::UnknownMobile(message),
                ErrorCode::DutyNotFound => ClientError::RecordNotFound(message),
                ErrorCode::AlreadyReported => ClientError::Conflict(message),
                ErrorCode::NotReported => ClientError::NotReported(message),
                ErrorCode::ValidationFailed => ClientError::Validation(message),
                _ => ClientError::Internal(format!("{path} failed: {message}")),
            };
        }
    }

    match status {
        StatusCode::NOT_FOUND => ClientError::RecordNotFound(format!("{path} returned 404")),
        StatusCode::CONFLICT => ClientError::Conflict(format!("{path} returned 409")),
        StatusCode::BAD_REQUEST => ClientError::Validation(format!("{path} returned 400")),
        StatusCode::SERVICE_UNAVAILABLE => {
            ClientError::Internal(format!("{path}: service unavailable"))
        }
        _ => ClientError::Internal(format!("{path} returned {status}")),
    }
}

#[async_trait]
impl DutyStore for HttpDutyStore {
    async fn lookup_mobile(&self, mobile: &str) -> ClientResult<MobileLookup> {
        self.get(&format!("duty/check-mobile/{mobile}")).await
    }

    async fn lookup_staff(&self, mobile: &str) -> ClientResult<Option<StaffEntry>> {
        match self
            .get::<StaffEntry>(&format!("staff/by-mobile/{mobile}"))
            .await
        {
            Ok(entry) => Ok(Some(entry)),
            // A directory miss is an expected answer, not a failure
            Err(ClientError::UnknownMobile(_)) | Err(ClientError::RecordNotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn list_duty_for_date(&self, date: &str) -> ClientResult<Vec<DutyRecord>> {
        self.get(&format!("duty/date/{date}")).await
    }

    async fn list_all_duty(&self) -> ClientResult<Vec<DutyRecord>> {
        self.get("duty/all").await
    }

    async fn create_report(&self, req: &ReportCreate) -> ClientResult<DutyRecord> {
        self.post("duty/report", req).await
    }

    async fn create_proxy_report(&self, req: &ProxyReportCreate) -> ClientResult<DutyRecord> {
        self.post("duty/proxy", req).await
    }

    async fn create_submission(&self, req: &SubmissionCreate) -> ClientResult<DutyRecord> {
        self.post("duty/submit", req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_strips_trailing_slash() {
        let store = HttpDutyStore::new(&ClientConfig::new("http://localhost:8080/"));
        assert_eq!(store.url("duty/all"), "http://localhost:8080/duty/all");

        let store = HttpDutyStore::new(&ClientConfig::new("http://localhost:8080"));
        assert_eq!(store.url("health"), "http://localhost:8080/health");
    }

    #[test]
    fn test_map_failure_prefers_envelope_code() {
        let body = r#"{"code":2002,"message":"duty for A. Rao is already reported"}"#;
        let err = map_failure("duty/report", StatusCode::CONFLICT, body);
        assert!(matches!(err, ClientError::Conflict(_)));

        let body = r#"{"code":1001,"message":"no staff entry for mobile 0000000000"}"#;
        let err = map_failure("duty/report", StatusCode::NOT_FOUND, body);
        assert!(matches!(err, ClientError::UnknownMobile(_)));

        let body = r#"{"code":2003,"message":"no check-in on record"}"#;
        let err = map_failure("duty/submit", StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, ClientError::NotReported(_)));
    }

    #[test]
    fn test_map_failure_falls_back_to_status() {
        let err = map_failure("duty/all", StatusCode::NOT_FOUND, "gateway text");
        assert!(matches!(err, ClientError::RecordNotFound(_)));

        let err = map_failure("duty/all", StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, ClientError::Internal(_)));
    }
}
