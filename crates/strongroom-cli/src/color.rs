use clap::ValueEnum;

/// Whether command output should use color.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Color {
    /// Never use color.
    No,
    /// Use color when the output stream supports it.
    Auto,
    /// Always use color.
    Yes,
}

impl Color {
    /// Evaluate whether color output is enabled for the current terminal.
    pub fn is_enabled(self) -> bool {
        match self {
            Color::No => false,
            Color::Auto => supports_color::on(supports_color::Stream::Stdout).is_some(),
            Color::Yes => true,
        }
    }
}

/// Install color-eyre as the error and panic report handler, honoring the
/// requested color choice.
pub fn install_color_eyre(color: Color) -> color_eyre::eyre::Result<()> {
    if color.is_enabled() {
        color_eyre::install()
    } else {
        color_eyre::config::HookBuilder::new()
            .theme(color_eyre::config::Theme::new())
            .install()
    }
}
