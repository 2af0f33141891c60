use std::process::ExitCode;

use clap::ValueEnum;
use strongroom_cli::Color;
use strongroom_core::logical::Secret;

use crate::{command::Cli, error::CommandError};

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub(crate) enum Output {
    Table,
    Json,
    Yaml,
}

#[derive(Debug)]
pub(crate) enum CommandOutput {
    Plain(String),
    /// The server acknowledged a write to `path` without a response body.
    Written { path: String },
    Secret(Box<Secret>),
}

pub(crate) type CommandResult = Result<CommandOutput, CommandError>;

impl From<&str> for CommandOutput {
    fn from(text: &str) -> Self {
        CommandOutput::Plain(text.to_owned())
    }
}
impl From<String> for CommandOutput {
    fn from(text: String) -> Self {
        CommandOutput::Plain(text)
    }
}
impl From<()> for CommandOutput {
    fn from(_: ()) -> Self {
        CommandOutput::Plain(String::new())
    }
}

pub(crate) struct RenderConfig {
    pub output: Output,
    pub color: Color,
    pub field: Option<String>,
}

impl RenderConfig {
    pub fn new(cli: &Cli) -> Self {
        Self {
            output: cli.output,
            color: cli.color,
            field: cli.field.clone(),
        }
    }

    pub fn render_result(&self, result: CommandResult) -> ExitCode {
        match result {
            Ok(output) => match self.render_output(output) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => self.report(e),
            },
            Err(e) => self.report(e),
        }
    }

    fn report(&self, error: CommandError) -> ExitCode {
        // A response body returned alongside the failure may carry diagnostic
        // detail; surface it before the error message.
        if let Some(secret) = error.response_body() {
            let _ = self.render_secret(secret);
        }
        eprintln!("Error: {error}");
        error.exit_code()
    }

    fn render_output(&self, output: CommandOutput) -> Result<(), CommandError> {
        match output {
            CommandOutput::Plain(text) => {
                if !text.is_empty() {
                    println!("{}", text);
                }
                Ok(())
            }

            // Don't output anything unless using the "table" format
            CommandOutput::Written { path } => {
                if self.output == Output::Table {
                    println!("Success! Data written to: {}", path);
                }
                Ok(())
            }

            CommandOutput::Secret(secret) => self.render_secret(&secret),
        }
    }

    fn render_secret(&self, secret: &Secret) -> Result<(), CommandError> {
        if let Some(field) = &self.field {
            println!("{}", raw_field(secret, field)?);
            return Ok(());
        }

        match self.output {
            Output::Table => print!("{}", table(secret)),
            Output::Json => {
                let mut json = serde_json::to_string_pretty(secret)?;
                // Yaml/table serializations add a newline at the end, so we do the same
                // here for consistency
                json.push('\n');
                pretty_print("json", &json, self.color);
            }
            Output::Yaml => {
                let yaml = serde_yaml::to_string(secret)?;
                pretty_print("yaml", &yaml, self.color);
            }
        }
        Ok(())
    }
}

fn pretty_print(language: &str, data: &str, color: Color) {
    if color.is_enabled() {
        bat::PrettyPrinter::new()
            .input_from_bytes(data.as_bytes())
            .language(language)
            .print()
            .expect("Input is valid");
    } else {
        print!("{}", data);
    }
}

/// Extract a single field's raw value from the response data. Strings are
/// returned without quoting, other values as JSON.
pub(crate) fn raw_field(secret: &Secret, field: &str) -> Result<String, CommandError> {
    let value = secret
        .data
        .as_ref()
        .and_then(|data| data.get(field))
        .ok_or_else(|| CommandError::MissingField(field.to_string()))?;

    Ok(match value {
        serde_json::Value::String(text) => text.clone(),
        other => other.to_string(),
    })
}

/// Render a secret as an aligned key/value table.
pub(crate) fn table(secret: &Secret) -> String {
    let mut rows: Vec<(String, String)> = Vec::new();

    if !secret.lease_id.is_empty() {
        rows.push(("lease_id".into(), secret.lease_id.clone()));
        rows.push(("lease_duration".into(), secret.lease_duration.to_string()));
        rows.push(("lease_renewable".into(), secret.renewable.to_string()));
    }

    if let Some(warnings) = &secret.warnings {
        for warning in warnings {
            rows.push(("warning".into(), warning.clone()));
        }
    }

    if let Some(auth) = &secret.auth {
        if !auth.client_token.is_empty() {
            rows.push(("token".into(), auth.client_token.clone()));
            rows.push(("token_accessor".into(), auth.accessor.clone()));
            rows.push(("token_duration".into(), auth.lease_duration.to_string()));
            rows.push(("token_renewable".into(), auth.renewable.to_string()));
            rows.push(("token_policies".into(), auth.policies.join(", ")));
        }
    }

    if let Some(data) = &secret.data {
        let mut keys: Vec<_> = data.keys().collect();
        keys.sort();
        for key in keys {
            let value = match &data[key.as_str()] {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            rows.push((key.clone(), value));
        }
    }

    let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0).max(3);

    let mut out = String::new();
    out.push_str(&format!("{:<key_width$}    {}\n", "Key", "Value"));
    out.push_str(&format!("{:<key_width$}    {}\n", "---", "-----"));
    for (key, value) in rows {
        out.push_str(&format!("{key:<key_width$}    {value}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use strongroom_core::logical::SecretAuth;

    use super::*;

    fn secret_with_data(pairs: &[(&str, serde_json::Value)]) -> Secret {
        Secret {
            data: Some(
                pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
            ),
            ..Secret::default()
        }
    }

    #[test]
    fn raw_field_returns_strings_unquoted() {
        let secret = secret_with_data(&[("password", serde_json::json!("hunter2"))]);
        assert_eq!(
            raw_field(&secret, "password").expect("field should be present"),
            "hunter2"
        );
    }

    #[test]
    fn raw_field_renders_non_strings_as_json() {
        let secret = secret_with_data(&[("ttl", serde_json::json!(3600))]);
        assert_eq!(
            raw_field(&secret, "ttl").expect("field should be present"),
            "3600"
        );
    }

    #[test]
    fn raw_field_missing_is_an_error() {
        let secret = secret_with_data(&[("a", serde_json::json!("b"))]);
        let error = raw_field(&secret, "nope").expect_err("field should be missing");
        assert!(matches!(error, CommandError::MissingField(field) if field == "nope"));
    }

    #[test]
    fn table_lists_data_keys_sorted() {
        let secret = secret_with_data(&[
            ("zebra", serde_json::json!("z")),
            ("alpha", serde_json::json!("a")),
        ]);

        let table = table(&secret);
        let alpha = table.find("alpha").expect("alpha should be listed");
        let zebra = table.find("zebra").expect("zebra should be listed");
        assert!(alpha < zebra, "{table}");
        assert!(table.starts_with("Key"), "{table}");
    }

    #[test]
    fn table_includes_warnings_and_auth() {
        let secret = Secret {
            warnings: Some(vec!["deprecated path".to_string()]),
            auth: Some(SecretAuth {
                client_token: "s.token".into(),
                accessor: "accessor".into(),
                policies: vec!["default".into(), "admin".into()],
                lease_duration: 3600,
                renewable: true,
                mfa_requirement: None,
            }),
            ..Secret::default()
        };

        let table = table(&secret);
        assert!(table.contains("deprecated path"), "{table}");
        assert!(table.contains("s.token"), "{table}");
        assert!(table.contains("default, admin"), "{table}");
    }
}
