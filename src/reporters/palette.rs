use crate::core::config::ColorChoice;

/// The closed set of colors the reporters may ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    GreenBold,
    Red,
    RedBold,
    RedUnder,
    RedBlink,
    Yellow,
    YellowBold,
    Cyan,
    CyanBold,
    Reset,
}

impl Color {
    pub fn escape(&self) -> &'static str {
        match self {
            Color::Green => "\x1b[32;03m",
            Color::GreenBold => "\x1b[32;01m",
            Color::Red => "\x1b[31;03m",
            Color::RedBold => "\x1b[31;01m",
            Color::RedUnder => "\x1b[31;04m",
            Color::RedBlink => "\x1b[31;05m",
            Color::Yellow => "\x1b[33;03m",
            Color::YellowBold => "\x1b[33;01m",
            Color::Cyan => "\x1b[36;03m",
            Color::CyanBold => "\x1b[36;01m",
            Color::Reset => "\x1b[0m",
        }
    }
}

/// Wraps text in palette escapes, or passes it through when disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Resolves `choice` for a stream; `sink_is_terminal` says whether that
    /// stream (not stdout) is a terminal.
    pub fn new(choice: ColorChoice, sink_is_terminal: bool) -> Self {
        let enabled = match choice {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => auto_enabled(sink_is_terminal, |key| std::env::var(key).ok()),
        };
        Self { enabled }
    }

    pub fn plain() -> Self {
        Self { enabled: false }
    }

    pub fn ansi() -> Self {
        Self { enabled: true }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            format!("{}{}{}", color.escape(), text, Color::Reset.escape())
        } else {
            text.to_string()
        }
    }

    /// Like [`Palette::paint`], but `None` leaves the text untouched.
    pub fn paint_opt(&self, text: &str, color: Option<Color>) -> String {
        match color {
            Some(color) => self.paint(text, color),
            None => text.to_string(),
        }
    }
}

/// `CLICOLOR_FORCE`, `NO_COLOR` and `CLICOLOR`, in the order `colored` honors them.
fn auto_enabled(sink_is_terminal: bool, env: impl Fn(&str) -> Option<String>) -> bool {
    if env("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }
    if env("NO_COLOR").is_some() {
        return false;
    }
    if env("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }
    sink_is_terminal
}
