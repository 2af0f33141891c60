use crate::client::client_settings::ClientSettings;

/// Connection state shared by the [`Client`](crate::Client) and all of its
/// subclients.
#[derive(Debug)]
pub struct InternalClient {
    pub(crate) settings: ClientSettings,
    /// Server base URL, validated and stripped of any trailing slash.
    pub(crate) base_url: String,
    pub(crate) http_client: reqwest::Client,
}

impl InternalClient {
    pub fn get_http_client(&self) -> &reqwest::Client {
        &self.http_client
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.settings.token.as_deref()
    }
}
