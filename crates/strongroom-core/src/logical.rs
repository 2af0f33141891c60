//! Logical read/write operations against the server's `/v1` API.

use std::sync::Arc;

use reqwest::{Method, StatusCode, header};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{client::internal::InternalClient, error::ApiError, mfa::MfaRequirement};

/// Header carrying the client token on every authenticated request.
pub const TOKEN_HEADER: &str = "X-Strongroom-Token";

/// A response returned from the server's logical API.
///
/// Every field is optional on the wire; absent fields deserialize to their
/// defaults so engine-specific responses stay forward compatible.
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Secret {
    pub request_id: String,
    pub lease_id: String,
    pub lease_duration: u64,
    pub renewable: bool,
    /// Engine-specific response data.
    pub data: Option<Map<String, Value>>,
    pub warnings: Option<Vec<String>>,
    pub auth: Option<SecretAuth>,
}

/// Authentication information attached to a [`Secret`].
#[allow(missing_docs)]
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecretAuth {
    pub client_token: String,
    pub accessor: String,
    pub policies: Vec<String>,
    pub lease_duration: u64,
    pub renewable: bool,
    /// Present when the operation is held pending MFA confirmation.
    pub mfa_requirement: Option<MfaRequirement>,
}

impl Secret {
    /// The MFA requirement attached to this response, if any.
    pub fn mfa_requirement(&self) -> Option<&MfaRequirement> {
        self.auth.as_ref()?.mfa_requirement.as_ref()
    }
}

/// Client for the logical secret API.
pub struct LogicalClient {
    internal: Arc<InternalClient>,
}

impl LogicalClient {
    pub(crate) fn new(internal: &Arc<InternalClient>) -> Self {
        Self {
            internal: Arc::clone(internal),
        }
    }

    /// Write a JSON body to the given logical path.
    ///
    /// Returns `Ok(None)` when the server acknowledges the write without a
    /// response body. A non-success status preserves the raw body in
    /// [`ApiError::Response`] so callers can surface server diagnostics.
    pub async fn write<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<Secret>, ApiError> {
        let url = format!("{}/v1/{}", self.internal.base_url(), path);
        debug!(%url, "logical write");

        let mut request = self
            .internal
            .get_http_client()
            .request(Method::PUT, url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json");

        if let Some(token) = self.internal.token() {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.json(body).send().await?;

        let status = response.status();
        let content = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Response { status, content });
        }

        if status == StatusCode::NO_CONTENT || content.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&content)?))
    }
}
