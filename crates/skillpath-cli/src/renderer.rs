//! Terminal rendering of the markdown produced by the core's Display impls.

use std::fmt::Display;

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled through termimad or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));
        skin.bullet.set_fg(Color::DarkGrey);

        Self { rich_enabled, skin }
    }

    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            self.skin.print_text(markdown);
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// Renders any value whose Display output is markdown.
    pub fn show(&self, value: &impl Display) -> Result<()> {
        self.render(&value.to_string())
    }

    /// Non-fatal notice such as a repaired date. Goes to stderr so stdout
    /// stays clean for piping.
    pub fn alert(&self, message: &str) {
        if self.rich_enabled {
            eprintln!("\x1b[33mWarning:\x1b[0m {message}");
        } else {
            eprintln!("Warning: {message}");
        }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
