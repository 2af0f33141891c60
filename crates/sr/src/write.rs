use std::io::IsTerminal;

use clap::Args;
use strongroom_cli::Prompt;
use strongroom_core::{
    Client,
    mfa::{MFA_VALIDATE_PATH, MfaDecision, evaluate_requirement},
};
use tracing::{debug, warn};

use crate::{
    error::{CommandError, secret_from_error},
    kv, mfa,
    render::{CommandOutput, CommandResult},
};

#[derive(Args, Clone)]
pub struct WriteArgs {
    #[arg(help = "Path to write the data to")]
    pub path: String,

    #[arg(
        value_name = "DATA",
        help = "key=value data to write. If a value begins with an \"@\" it is loaded \
                from a file; a value of \"-\" is read from stdin."
    )]
    pub data: Vec<String>,

    #[arg(
        short = 'f',
        long,
        help = "Allow the operation to continue with no key=value pairs. This allows \
                writing to keys that do not need or expect data."
    )]
    pub force: bool,
}

impl WriteArgs {
    pub async fn run(
        self,
        client: &Client,
        non_interactive: bool,
        prompt: &mut dyn Prompt,
    ) -> CommandResult {
        if self.data.is_empty() && !self.force {
            return Err(CommandError::Usage("must supply data or use -force".into()));
        }

        let data = kv::parse_args_data(&mut std::io::stdin().lock(), &self.data)?;
        let path = kv::sanitize_path(&self.path);
        debug!(%path, "writing data");

        let secret = match client.logical().write(&path, &data).await {
            Err(source) => {
                return Err(CommandError::Write {
                    secret: secret_from_error(&source),
                    path,
                    source,
                });
            }
            Ok(None) => return Ok(CommandOutput::Written { path }),
            Ok(Some(secret)) => secret,
        };

        if let Some(requirement) = secret.mfa_requirement() {
            // Only a requirement with a single constraint and a single method is
            // validated within this invocation; everything else is confirmed out
            // of band.
            let interactive_allowed = !non_interactive && std::io::stdin().is_terminal();
            match evaluate_requirement(requirement, interactive_allowed) {
                MfaDecision::AutoResolve(method) => {
                    return mfa::confirm(client, requirement, method, prompt).await;
                }
                MfaDecision::Defer => warn!(
                    "The request was issued but is subject to MFA validation. Make sure \
                     to validate it by sending another request to the {MFA_VALIDATE_PATH} \
                     endpoint"
                ),
            }
        }

        Ok(CommandOutput::Secret(Box::new(secret)))
    }
}
