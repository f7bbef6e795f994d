//! Terminal color helpers.

use std::io::IsTerminal;
use std::sync::OnceLock;

static NO_COLOR: OnceLock<bool> = OnceLock::new();

pub fn init(no_color_flag: bool) {
    let _ = NO_COLOR.set(
        no_color_flag || std::env::var("NO_COLOR").is_ok() || !std::io::stdout().is_terminal(),
    );
}

fn is_disabled() -> bool {
    *NO_COLOR.get().unwrap_or(&false)
}

mod codes {
    pub const RESET: &str = "\x1b[0m";
    pub const WHITE: &str = "\x1b[37m";
    pub const GREEN: &str = "\x1b[32m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[90m";
    pub const BOLD: &str = "\x1b[1m";
}

/// Named foreground colors available for user-facing output such as greetings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    White,
    Red,
    Cyan,
    Magenta,
    Yellow,
    Green,
}

impl Hue {
    pub const ALL: [Hue; 6] = [
        Hue::White,
        Hue::Red,
        Hue::Cyan,
        Hue::Magenta,
        Hue::Yellow,
        Hue::Green,
    ];

    fn code(self) -> &'static str {
        match self {
            Hue::White => codes::WHITE,
            Hue::Red => codes::RED,
            Hue::Cyan => codes::CYAN,
            Hue::Magenta => codes::MAGENTA,
            Hue::Yellow => codes::YELLOW,
            Hue::Green => codes::GREEN,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Hue::White => "white",
            Hue::Red => "red",
            Hue::Cyan => "cyan",
            Hue::Magenta => "magenta",
            Hue::Yellow => "yellow",
            Hue::Green => "green",
        }
    }
}

pub struct Colors;

fn wrap_with_ansi(text: &str, prefixes: &[&str]) -> String {
    let prefix_len: usize = prefixes.iter().map(|prefix| prefix.len()).sum();
    let mut out = String::with_capacity(prefix_len + text.len() + codes::RESET.len());
    for prefix in prefixes {
        out.push_str(prefix);
    }
    out.push_str(text);
    out.push_str(codes::RESET);
    out
}

fn paint(text: &str, prefixes: &[&str]) -> String {
    if is_disabled() {
        text.to_string()
    } else {
        wrap_with_ansi(text, prefixes)
    }
}

impl Colors {
    pub fn error(text: &str) -> String {
        paint(text, &[codes::RED])
    }

    pub fn warning(text: &str) -> String {
        paint(text, &[codes::YELLOW])
    }

    pub fn dim(text: &str) -> String {
        paint(text, &[codes::DIM])
    }

    pub fn bold(text: &str) -> String {
        paint(text, &[codes::BOLD])
    }

    /// Plugin and command names in listings.
    pub fn name(text: &str) -> String {
        paint(text, &[codes::BOLD, codes::CYAN])
    }

    pub fn version(text: &str) -> String {
        paint(text, &[codes::BOLD, codes::BLUE])
    }

    pub fn bold_hue(text: &str, hue: Hue) -> String {
        paint(text, &[codes::BOLD, hue.code()])
    }
}
