use strongroom_cli::Prompt;
use strongroom_core::{
    Client,
    mfa::{MFA_VALIDATE_PATH, MfaMethod, MfaRequirement, MfaValidateRequest},
};
use tracing::info;

use crate::{
    error::{CommandError, secret_from_error},
    render::{CommandOutput, CommandResult},
};

/// Drive an auto-resolvable MFA requirement to completion: collect the
/// credential and submit the confirmation write to [`MFA_VALIDATE_PATH`].
pub(crate) async fn confirm(
    client: &Client,
    requirement: &MfaRequirement,
    method: MfaMethod,
    prompt: &mut dyn Prompt,
) -> CommandResult {
    let passcode = if method.uses_passcode {
        prompt
            .secret(&format!(
                "Enter the passphrase for method {:?} of type {:?}:",
                method.id, method.method_type
            ))
            .map_err(|source| CommandError::PasscodeInput { source })?
    } else {
        info!(
            "Requesting MFA validation from the upstream service. You should receive \
             a push notification in your authenticator app shortly"
        );
        // The method is still submitted, with an empty passcode.
        String::new()
    };

    let request = MfaValidateRequest::new(&requirement.mfa_request_id, &method.id, passcode);

    match client.logical().write(MFA_VALIDATE_PATH, &request).await {
        Err(source) => Err(CommandError::MfaValidation {
            secret: secret_from_error(&source),
            source,
        }),
        Ok(None) => Ok(CommandOutput::Written {
            path: MFA_VALIDATE_PATH.to_string(),
        }),
        Ok(Some(secret)) => Ok(CommandOutput::Secret(Box::new(secret))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use inquire::{InquireError, error::InquireResult};
    use strongroom_core::ClientSettings;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_json, method, path},
    };

    use super::*;

    /// Prompt double that replays scripted responses and counts calls.
    struct ScriptedPrompt {
        responses: VecDeque<InquireResult<String>>,
        calls: usize,
    }

    impl ScriptedPrompt {
        fn returning(passcode: &str) -> Self {
            Self {
                responses: VecDeque::from([Ok(passcode.to_string())]),
                calls: 0,
            }
        }

        fn failing() -> Self {
            Self {
                responses: VecDeque::from([Err(InquireError::NotTTY)]),
                calls: 0,
            }
        }

        fn unused() -> Self {
            Self {
                responses: VecDeque::new(),
                calls: 0,
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn secret(&mut self, _message: &str) -> InquireResult<String> {
            self.calls += 1;
            self.responses.pop_front().expect("unexpected prompt")
        }
    }

    fn requirement() -> MfaRequirement {
        serde_json::from_value(serde_json::json!({
            "mfa_request_id": "mfa-1",
            "mfa_constraints": {
                "c1": { "any": [
                    { "id": "m1", "type": "totp", "uses_passcode": true }
                ]}
            }
        }))
        .expect("well-formed requirement")
    }

    fn totp_method() -> MfaMethod {
        MfaMethod {
            id: "m1".into(),
            method_type: "totp".into(),
            uses_passcode: true,
        }
    }

    fn push_method() -> MfaMethod {
        MfaMethod {
            id: "m2".into(),
            method_type: "push".into(),
            uses_passcode: false,
        }
    }

    async fn setup_client() -> (MockServer, Client) {
        let server = MockServer::start().await;
        let client = Client::new(Some(ClientSettings {
            server_url: server.uri(),
            ..ClientSettings::default()
        }))
        .expect("client should build");
        (server, client)
    }

    #[tokio::test]
    async fn passcode_is_submitted_verbatim() {
        let (server, client) = setup_client().await;

        Mock::given(method("PUT"))
            .and(path("/v1/sys/mfa/validate"))
            .and(body_json(serde_json::json!({
                "mfa_request_id": "mfa-1",
                "mfa_payload": { "m1": [" 123456 "] },
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        // Surrounding whitespace must survive untouched.
        let mut prompt = ScriptedPrompt::returning(" 123456 ");
        let output = confirm(&client, &requirement(), totp_method(), &mut prompt)
            .await
            .expect("confirmation should succeed");

        assert_eq!(prompt.calls, 1);
        assert!(matches!(output, CommandOutput::Written { path } if path == MFA_VALIDATE_PATH));
    }

    #[tokio::test]
    async fn push_method_submits_empty_passcode_without_prompting() {
        let (server, client) = setup_client().await;

        Mock::given(method("PUT"))
            .and(path("/v1/sys/mfa/validate"))
            .and(body_json(serde_json::json!({
                "mfa_request_id": "mfa-1",
                "mfa_payload": { "m2": [""] },
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut prompt = ScriptedPrompt::unused();
        confirm(&client, &requirement(), push_method(), &mut prompt)
            .await
            .expect("confirmation should succeed");

        assert_eq!(prompt.calls, 0);
    }

    #[tokio::test]
    async fn failed_prompt_skips_the_submission() {
        let (server, client) = setup_client().await;

        Mock::given(method("PUT"))
            .and(path("/v1/sys/mfa/validate"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let mut prompt = ScriptedPrompt::failing();
        let error = confirm(&client, &requirement(), totp_method(), &mut prompt)
            .await
            .expect_err("failed prompt should abort the confirmation");

        assert!(matches!(error, CommandError::PasscodeInput { .. }));
        assert!(
            error.to_string().contains("sys/mfa/validate"),
            "the error should direct the user to the validate endpoint: {error}"
        );
    }

    #[tokio::test]
    async fn failed_submission_carries_the_response_body() {
        let (server, client) = setup_client().await;

        Mock::given(method("PUT"))
            .and(path("/v1/sys/mfa/validate"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "data": { "error": "MFA request expired" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut prompt = ScriptedPrompt::returning("123456");
        let error = confirm(&client, &requirement(), totp_method(), &mut prompt)
            .await
            .expect_err("confirmation should fail");

        match error {
            CommandError::MfaValidation { secret, .. } => {
                let secret = secret.expect("response body should be preserved");
                assert!(secret.data.is_some());
            }
            other => panic!("expected MFA validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_confirmation_returns_the_response() {
        let (server, client) = setup_client().await;

        Mock::given(method("PUT"))
            .and(path("/v1/sys/mfa/validate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "request_id": "req-9",
                "auth": { "client_token": "s.confirmed" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut prompt = ScriptedPrompt::returning("123456");
        let output = confirm(&client, &requirement(), totp_method(), &mut prompt)
            .await
            .expect("confirmation should succeed");

        match output {
            CommandOutput::Secret(secret) => {
                assert_eq!(secret.request_id, "req-9");
                let auth = secret.auth.expect("auth should be present");
                assert_eq!(auth.client_token, "s.confirmed");
            }
            _ => panic!("expected a secret output"),
        }
    }
}
