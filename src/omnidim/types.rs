//! Request and status records for the OmniDimension API.

use serde::{Deserialize, Serialize};

/// How hard the mock interviewer should push the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl std::str::FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(DifficultyLevel::Beginner),
            "intermediate" => Ok(DifficultyLevel::Intermediate),
            "advanced" => Ok(DifficultyLevel::Advanced),
            other => Err(format!(
                "unknown difficulty '{}' (expected beginner, intermediate or advanced)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Behavioral,
    Mixed,
}

/// Caller-supplied parameters for a dispatched interview call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallConfig {
    pub job_role: String,
    pub difficulty_level: DifficultyLevel,
    pub target_company: Option<String>,
}

impl CallConfig {
    pub fn new(job_role: impl Into<String>, difficulty_level: DifficultyLevel) -> Self {
        Self {
            job_role: job_role.into(),
            difficulty_level,
            target_company: None,
        }
    }

    pub fn with_target_company(mut self, company: impl Into<String>) -> Self {
        self.target_company = Some(company.into());
        self
    }
}

/// Metadata sent alongside a call so the agent can tailor the interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_name: Option<String>,
    pub job_role: String,
    pub difficulty_level: DifficultyLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_company: Option<String>,
    pub interview_type: InterviewType,
    pub session_id: String,
}

/// Body of `POST /call/dispatch`
#[derive(Debug, Clone, Serialize)]
pub struct DispatchRequest {
    pub agent_id: u64,
    pub to_number: String,
    pub call_context: CallContext,
}

/// Paging and filtering for `GET /call/logs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallLogQuery {
    pub page: u32,
    pub page_size: u32,
    pub agent_id: Option<u64>,
}

impl Default for CallLogQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            agent_id: None,
        }
    }
}

impl CallLogQuery {
    /// Query string pairs in the order the API documents them.
    /// An agent id of zero counts as "no filter".
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
        ];
        if let Some(agent_id) = self.agent_id.filter(|id| *id != 0) {
            params.push(("agent_id", agent_id.to_string()));
        }
        params
    }
}

/// Summary of the configured key, safe to show in a UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStatus {
    pub has_key: bool,
    pub key_length: usize,
    pub key_prefix: String,
}

impl KeyStatus {
    pub fn for_key(key: &str) -> Self {
        Self {
            has_key: !key.is_empty(),
            key_length: key.chars().count(),
            key_prefix: key.chars().take(4).collect(),
        }
    }
}

/// The `message` field of an API error body, if it is a non-empty string.
pub(crate) fn error_message(body: &serde_json::Value) -> Option<String> {
    match body.get("message") {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}
