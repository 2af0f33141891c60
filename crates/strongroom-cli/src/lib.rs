#![doc = include_str!("../README.md")]

mod color;

pub use color::{Color, install_color_eyre};
use inquire::{Password, error::InquireResult};

/// Terminal prompt abstraction, so commands that collect credentials never
/// talk to the terminal directly and tests can script the input instead.
pub trait Prompt {
    /// Prompt for a secret value. Input is not echoed back to the terminal.
    fn secret(&mut self, message: &str) -> InquireResult<String>;
}

/// [`Prompt`] implementation backed by the interactive terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn secret(&mut self, message: &str) -> InquireResult<String> {
        Password::new(message).without_confirmation().prompt()
    }
}
