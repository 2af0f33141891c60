use std::process::Command;

/// Create a new sr CLI command with a clean environment.
pub fn sr() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sr"));
    command.env_remove("STRONGROOM_SERVER");
    command.env_remove("STRONGROOM_TOKEN");
    command
}
