#![doc = include_str!("../README.md")]

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use strongroom_cli::{TerminalPrompt, install_color_eyre};
use strongroom_core::{Client, ClientSettings};
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

use crate::{command::*, render::CommandResult};

mod command;
mod error;
mod kv;
mod mfa;
mod render;
mod write;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // the log level hierarchy is determined by:
    //    - if RUST_LOG is detected at runtime
    //    - if RUST_LOG is provided at compile time
    //    - default to INFO
    let filter = EnvFilter::builder()
        .with_default_directive(
            option_env!("RUST_LOG")
                .unwrap_or("info")
                .parse()
                .expect("should provide valid log level at compile time."),
        )
        // parse directives from the RUST_LOG environment variable,
        // overriding the default directive for matching targets.
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    if let Err(e) = install_color_eyre(cli.color) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }
    let render_config = render::RenderConfig::new(&cli);

    let Some(command) = cli.command.clone() else {
        let mut cmd = Cli::command();
        let _ = cmd.print_help();
        return ExitCode::SUCCESS;
    };

    let result = process_command(command, &cli).await;

    // Render the result of the command
    render_config.render_result(result)
}

async fn process_command(command: Commands, cli: &Cli) -> CommandResult {
    match command {
        Commands::Write(args) => {
            let client = Client::new(Some(client_settings(cli)))?;
            args.run(&client, cli.non_interactive, &mut TerminalPrompt)
                .await
        }

        Commands::Completion { shell } => {
            let Some(shell) = shell.or_else(Shell::from_env) else {
                return Ok(
                    "Couldn't autodetect a valid shell. Run `sr completion --help` for more info."
                        .into(),
                );
            };

            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(().into())
        }
    }
}

fn client_settings(cli: &Cli) -> ClientSettings {
    let defaults = ClientSettings::default();
    ClientSettings {
        server_url: cli.server.clone().unwrap_or(defaults.server_url),
        token: cli.token.clone(),
        user_agent: defaults.user_agent,
    }
}
