use clap::{Parser, Subcommand};
use strongroom_cli::Color;

use crate::{render::Output, write::WriteArgs};

pub const SERVER_ENV: &str = "STRONGROOM_SERVER";
pub const TOKEN_ENV: &str = "STRONGROOM_TOKEN";

#[derive(Parser, Clone)]
#[command(name = "Strongroom CLI", version, about = "Strongroom CLI", long_about = None)]
pub struct Cli {
    // Optional as a workaround for https://github.com/clap-rs/clap/issues/3572
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short = 'o', long, global = true, value_enum, default_value_t = Output::Table)]
    pub output: Output,

    #[arg(short = 'c', long, global = true, value_enum, default_value_t = Color::Auto)]
    pub color: Color,

    #[arg(
        long,
        global = true,
        help = "Print only the field with the given name from the response."
    )]
    pub field: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Do not prompt for interactive user input."
    )]
    pub non_interactive: bool,

    #[arg(short = 's', long, global = true, env = SERVER_ENV, help = "Server URL")]
    pub server: Option<String>,

    #[arg(
        long,
        global = true,
        env = TOKEN_ENV,
        hide_env_values = true,
        help = "Authentication token sent with every request."
    )]
    pub token: Option<String>,
}

#[derive(Subcommand, Clone)]
pub enum Commands {
    #[command(
        long_about = "Write data, configuration, and secrets to the server at the given path. \
                      The specific behavior is determined by the secret engine mounted at the \
                      path. Data is specified as key=value pairs; if a value begins with an \
                      \"@\" it is loaded from a file, and a value of \"-\" is read from stdin."
    )]
    Write(WriteArgs),

    #[command(long_about = "Generate shell completions.")]
    Completion {
        #[arg(long, help = "The shell to generate completions for.")]
        shell: Option<clap_complete::Shell>,
    },
}
