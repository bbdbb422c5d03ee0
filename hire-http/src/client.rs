use std::time::Duration;

use hire_core::ServiceError;
use reqwest::{Client, Response};
use tracing::warn;

/// One client per collaborator; the timeout covers the whole request.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ServiceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ServiceError::Configuration(format!("cannot build HTTP client: {e}")))
}

pub(crate) fn map_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::Timeout
    } else if error.is_decode() {
        ServiceError::Decode(error.to_string())
    } else {
        ServiceError::Network(error.to_string())
    }
}

/// Passes 2xx responses through and turns anything else into
/// [`ServiceError::Status`].
pub(crate) fn ensure_success(response: Response) -> Result<Response, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(status = status.as_u16(), url = %response.url(), "service returned an error status");
    Err(ServiceError::Status {
        code: status.as_u16(),
        message: status.canonical_reason().unwrap_or("unknown status").to_string(),
    })
}
