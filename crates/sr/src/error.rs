use std::process::ExitCode;

use inquire::InquireError;
use strongroom_core::{ApiError, ClientError, logical::Secret};
use thiserror::Error;

/// Failures surfaced by a command, each mapped to the exit code callers of the
/// write operation expect.
#[derive(Debug, Error)]
pub(crate) enum CommandError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("error writing data to {path}: {source}")]
    Write {
        path: String,
        source: ApiError,
        /// Response body returned alongside the error, when one parses.
        secret: Option<Box<Secret>>,
    },

    #[error(
        "failed to read the passcode: {source}; validate the request by sending \
         a request to the sys/mfa/validate endpoint"
    )]
    PasscodeInput { source: InquireError },

    #[error("MFA validation failed: {source}")]
    MfaValidation {
        source: ApiError,
        secret: Option<Box<Secret>>,
    },

    #[error("field {0:?} not present in response")]
    MissingField(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl CommandError {
    /// Client, network, and confirmation failures exit 2; usage and rendering
    /// problems exit 1.
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            CommandError::Usage(_)
            | CommandError::MissingField(_)
            | CommandError::Json(_)
            | CommandError::Yaml(_) => ExitCode::from(1),

            CommandError::Client(_)
            | CommandError::Write { .. }
            | CommandError::PasscodeInput { .. }
            | CommandError::MfaValidation { .. } => ExitCode::from(2),
        }
    }

    /// The server response body attached to this error, if one was returned.
    pub(crate) fn response_body(&self) -> Option<&Secret> {
        match self {
            CommandError::Write { secret, .. } | CommandError::MfaValidation { secret, .. } => {
                secret.as_deref()
            }
            _ => None,
        }
    }
}

/// Parse the body of an error response as a [`Secret`] so it can be rendered
/// alongside the failure. Plain error bodies (no data, auth, or warnings) are
/// not worth rendering and yield `None`.
pub(crate) fn secret_from_error(error: &ApiError) -> Option<Box<Secret>> {
    let ApiError::Response { content, .. } = error else {
        return None;
    };

    let value: serde_json::Value = serde_json::from_str(content).ok()?;
    let has_payload = ["data", "auth", "warnings"]
        .iter()
        .any(|key| value.get(key).is_some_and(|v| !v.is_null()));
    if !has_payload {
        return None;
    }

    serde_json::from_value(value).ok().map(Box::new)
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn error_body_with_data_is_rendered() {
        let error = ApiError::Response {
            status: StatusCode::FORBIDDEN,
            content: r#"{"request_id":"req-1","data":{"reason":"denied"}}"#.to_string(),
        };

        let secret = secret_from_error(&error).expect("body should parse");
        assert_eq!(secret.request_id, "req-1");
    }

    #[test]
    fn plain_error_body_is_not_rendered() {
        let error = ApiError::Response {
            status: StatusCode::FORBIDDEN,
            content: r#"{"errors":["permission denied"]}"#.to_string(),
        };

        assert!(secret_from_error(&error).is_none());
    }

    #[test]
    fn transport_errors_have_no_body() {
        let error = ApiError::NotConnected("connection refused".into());
        assert!(secret_from_error(&error).is_none());
    }
}
