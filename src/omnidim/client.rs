//! OmniDimension API client for dispatching and inspecting interview calls.

use chrono::Utc;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::error::{OmniDimError, Result};
use super::observer::{LogObserver, RequestObserver};
use super::transport::{ApiMethod, ApiRequest, ApiResponse, ReqwestTransport, Transport};
use super::types::{
    error_message, CallConfig, CallContext, CallLogQuery, DispatchRequest, InterviewType,
    KeyStatus,
};
use crate::credentials::CredentialProvider;
use crate::settings::ClientSettings;

pub const DEFAULT_BASE_URL: &str = "https://api.omnidim.io/v1";

/// Client for the OmniDimension voice-agent API.
///
/// The key is fixed at construction. An empty key is allowed, but every
/// network operation then fails with [`OmniDimError::MissingApiKey`] without
/// touching the transport.
#[derive(Clone)]
pub struct OmniDimClient {
    api_key: String,
    base_url: String,
    transport: Arc<dyn Transport>,
    observer: Arc<dyn RequestObserver>,
}

impl std::fmt::Debug for OmniDimClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OmniDimClient")
            .field("base_url", &self.base_url)
            .field("key_status", &self.key_status())
            .finish()
    }
}

impl OmniDimClient {
    /// Client using the default reqwest transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(api_key, Arc::new(ReqwestTransport::default()))
    }

    pub fn with_transport(api_key: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            transport,
            observer: Arc::new(LogObserver),
        }
    }

    /// Resolve the key once from `provider`. A missing key becomes empty.
    pub fn from_provider(provider: &dyn CredentialProvider) -> Self {
        Self::new(provider.api_key().unwrap_or_default())
    }

    /// Build a client from loaded settings, resolving the key from `provider`.
    pub fn from_settings(
        settings: &ClientSettings,
        provider: &dyn CredentialProvider,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(settings.timeout_secs.map(Duration::from_secs))?;
        let api_key = provider.api_key().unwrap_or_default();
        Ok(Self::with_transport(api_key, Arc::new(transport)).with_base_url(&settings.base_url))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Describe the configured key without exposing it.
    pub fn key_status(&self) -> KeyStatus {
        KeyStatus::for_key(&self.api_key)
    }

    /// Place an interview call from `agent_id` to `phone_number`.
    ///
    /// The call context always uses the mixed interview type and a fresh
    /// `interview_<millis>` session id.
    pub async fn dispatch_interview_call<T: DeserializeOwned>(
        &self,
        agent_id: u64,
        phone_number: &str,
        config: &CallConfig,
        candidate_name: Option<&str>,
    ) -> Result<T> {
        let request = DispatchRequest {
            agent_id,
            to_number: phone_number.to_string(),
            call_context: CallContext {
                candidate_name: candidate_name.map(str::to_string),
                job_role: config.job_role.clone(),
                difficulty_level: config.difficulty_level,
                target_company: config.target_company.clone(),
                interview_type: InterviewType::Mixed,
                session_id: new_session_id(),
            },
        };
        let body = serde_json::to_value(&request)
            .map_err(|e| OmniDimError::Decode(format!("Failed to encode dispatch body: {}", e)))?;

        self.execute(
            "dispatch_interview_call",
            ApiMethod::Post,
            &["call", "dispatch"],
            &[],
            Some(body),
        )
        .await
    }

    pub async fn get_interview_call_logs<T: DeserializeOwned>(
        &self,
        page: u32,
        page_size: u32,
        agent_id: Option<u64>,
    ) -> Result<T> {
        self.call_logs(&CallLogQuery {
            page,
            page_size,
            agent_id,
        })
        .await
    }

    /// Same as [`get_interview_call_logs`](Self::get_interview_call_logs), taking a query record.
    pub async fn call_logs<T: DeserializeOwned>(&self, query: &CallLogQuery) -> Result<T> {
        self.execute(
            "get_interview_call_logs",
            ApiMethod::Get,
            &["call", "logs"],
            &query.to_params(),
            None,
        )
        .await
    }

    pub async fn get_call_log<T: DeserializeOwned>(&self, call_log_id: &str) -> Result<T> {
        self.execute(
            "get_call_log",
            ApiMethod::Get,
            &["call", "logs", call_log_id],
            &[],
            None,
        )
        .await
    }

    pub async fn list_interview_agents<T: DeserializeOwned>(&self) -> Result<T> {
        self.execute("list_interview_agents", ApiMethod::Get, &["agents"], &[], None)
            .await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: ApiMethod,
        segments: &[&str],
        params: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let result = self.try_execute(operation, method, segments, params, body).await;
        if let Err(e) = &result {
            self.observer.on_error(operation, e);
        }
        result
    }

    async fn try_execute<T: DeserializeOwned>(
        &self,
        operation: &str,
        method: ApiMethod,
        segments: &[&str],
        params: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        if self.api_key.is_empty() {
            return Err(OmniDimError::MissingApiKey);
        }

        let request = ApiRequest {
            method,
            url: self.endpoint(segments, params)?,
            api_key: self.api_key.clone(),
            body,
        };

        self.observer.on_request(operation, &request);
        let response = self.transport.send(request).await?;
        self.observer.on_response(operation, &response);

        if !response.is_success() {
            return Err(http_error(&response));
        }

        serde_json::from_str(&response.body).map_err(|e| OmniDimError::Decode(e.to_string()))
    }

    fn endpoint(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            OmniDimError::Transport(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                OmniDimError::Transport(format!("Base URL '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }
}

/// Turn a failed response into an error, preferring the server's message.
fn http_error(response: &ApiResponse) -> OmniDimError {
    let body: serde_json::Value = match serde_json::from_str(&response.body) {
        Ok(body) => body,
        Err(e) => {
            return OmniDimError::Transport(format!(
                "Unreadable error response (status {}): {}",
                response.status, e
            ))
        }
    };

    let message = error_message(&body)
        .or_else(|| response.reason().map(str::to_string))
        .unwrap_or_default();

    OmniDimError::Http {
        status: response.status,
        message,
    }
}

fn new_session_id() -> String {
    format!("interview_{}", Utc::now().timestamp_millis())
}
