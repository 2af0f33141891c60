use serde::{Deserialize, Serialize};

/// Basic client behavior settings. These settings specify the target server and
/// the credentials of the Strongroom client. They are optional and uneditable
/// once the client is initialized.
///
/// Defaults to
///
/// ```
/// # use strongroom_core::ClientSettings;
/// let settings = ClientSettings {
///     server_url: "https://localhost:8200".to_string(),
///     token: None,
///     user_agent: "Strongroom Rust-SDK".to_string(),
/// };
/// let default = ClientSettings::default();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientSettings {
    /// The base url of the targeted Strongroom server. Defaults to `https://localhost:8200`
    pub server_url: String,
    /// The authentication token sent with every request, if any.
    pub token: Option<String>,
    /// The user_agent sent to the server. Defaults to `Strongroom Rust-SDK`
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "https://localhost:8200".into(),
            token: None,
            user_agent: "Strongroom Rust-SDK".into(),
        }
    }
}
