use std::sync::Arc;

use reqwest::header::{self, HeaderValue};
use url::Url;

use crate::{
    client::{client_settings::ClientSettings, internal::InternalClient},
    error::ClientError,
    logical::LogicalClient,
};

/// The main struct to interact with a Strongroom server.
#[derive(Debug, Clone)]
pub struct Client {
    // Important: The [`Client`] struct requires its `Clone` implementation to return an owned
    // reference to the same instance, so all shared state lives behind this Arc.
    #[doc(hidden)]
    pub internal: Arc<InternalClient>,
}

impl Client {
    /// Create a new Strongroom client.
    ///
    /// Construction fails when the configured server URL does not parse or the
    /// underlying HTTP client cannot be built; nothing has been sent to the
    /// server at that point.
    pub fn new(settings: Option<ClientSettings>) -> Result<Self, ClientError> {
        let settings = settings.unwrap_or_default();

        let base_url = settings.server_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|source| ClientError::InvalidServerUrl {
            url: settings.server_url.clone(),
            source,
        })?;

        let headers = build_default_headers(&settings);
        let http_client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            internal: Arc::new(InternalClient {
                settings,
                base_url,
                http_client,
            }),
        })
    }

    /// Access the logical secret API of the server.
    pub fn logical(&self) -> LogicalClient {
        LogicalClient::new(&self.internal)
    }
}

/// Build default headers for the Strongroom HTTP client
fn build_default_headers(settings: &ClientSettings) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();

    headers.append(
        header::USER_AGENT,
        HeaderValue::from_str(&settings.user_agent)
            .expect("User agent should be a valid header value"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_server_url() {
        let result = Client::new(Some(ClientSettings {
            server_url: "not a url".into(),
            ..ClientSettings::default()
        }));

        assert!(matches!(
            result,
            Err(ClientError::InvalidServerUrl { ref url, .. }) if url == "not a url"
        ));
    }

    #[test]
    fn new_strips_trailing_slash() {
        let client = Client::new(Some(ClientSettings {
            server_url: "http://localhost:8200/".into(),
            ..ClientSettings::default()
        }))
        .expect("client should build");

        assert_eq!(client.internal.base_url(), "http://localhost:8200");
    }
}
