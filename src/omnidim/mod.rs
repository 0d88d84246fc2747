//! OmniDimension voice-agent API integration.
//!
//! This module provides:
//! - [`OmniDimClient`] for dispatching interview calls and reading call logs and agents
//! - A [`Transport`] seam, backed by reqwest in production
//! - [`RequestObserver`] hooks for request diagnostics
//!
//! Responses are returned as whatever `DeserializeOwned` type the caller asks
//! for; use `serde_json::Value` to pass the server's JSON through untouched.

mod client;
mod error;
mod observer;
mod transport;
mod types;

pub use client::{OmniDimClient, DEFAULT_BASE_URL};
pub use error::{OmniDimError, Result};
pub use observer::{LogObserver, NoopObserver, RequestObserver};
pub use transport::{ApiMethod, ApiRequest, ApiResponse, ReqwestTransport, Transport};
pub use types::{
    CallConfig, CallContext, CallLogQuery, DifficultyLevel, DispatchRequest, InterviewType,
    KeyStatus,
};
