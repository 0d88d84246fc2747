//! Diagnostic hooks around each API request.

use super::error::OmniDimError;
use super::transport::{ApiRequest, ApiResponse};
use crate::credentials::mask_key;

/// Receives notifications for every request the client makes.
/// All methods default to doing nothing.
pub trait RequestObserver: Send + Sync {
    fn on_request(&self, _operation: &str, _request: &ApiRequest) {}

    fn on_response(&self, _operation: &str, _response: &ApiResponse) {}

    fn on_error(&self, _operation: &str, _error: &OmniDimError) {}
}

/// Discards every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RequestObserver for NoopObserver {}

/// Writes request diagnostics to the `log` facade. Keys are masked.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl RequestObserver for LogObserver {
    fn on_request(&self, operation: &str, request: &ApiRequest) {
        log::debug!(
            "OmniDim {}: {:?} {} (key {})",
            operation,
            request.method,
            request.url,
            mask_key(&request.api_key)
        );
    }

    fn on_response(&self, operation: &str, response: &ApiResponse) {
        log::debug!(
            "OmniDim {}: status {} headers {:?}",
            operation,
            response.status,
            response.headers
        );
        log::trace!("OmniDim {}: body {}", operation, response.body);
    }

    fn on_error(&self, operation: &str, error: &OmniDimError) {
        log::error!("OmniDim {} failed: {}", operation, error);
    }
}
