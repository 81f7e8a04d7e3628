//! Terminal colorization for validation output
//!
//! Applies ANSI colors to issue lines using crossterm, honoring `NO_COLOR`
//! and whether stdout is a terminal.

use crossterm::style::{Color, Stylize};
use crossterm::tty::IsTty;

/// When to colorize output
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if stdout is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Resolve a color choice against the environment
pub fn should_colorize(choice: ColorChoice) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => {
            if std::env::var("NO_COLOR").is_ok() {
                return false;
            }
            std::io::stdout().is_tty()
        }
    }
}

/// Format a validation issue line, yellow when colors are on
pub fn paint_issue(issue: &str, colored: bool) -> String {
    if colored {
        format!("{} {}", "warning:".with(Color::Yellow).bold(), issue)
    } else {
        format!("warning: {}", issue)
    }
}

/// Format the all-clear line, green when colors are on
pub fn paint_clean(message: &str, colored: bool) -> String {
    if colored {
        format!("{}", message.with(Color::Green))
    } else {
        message.to_string()
    }
}
