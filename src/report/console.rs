//! Colored status lines for terminal output

use owo_colors::OwoColorize;

pub const RULE_WIDTH: usize = 60;

pub fn error(message: impl AsRef<str>) {
    eprintln!("{}", message.as_ref().red());
}

pub fn warning(message: impl AsRef<str>) {
    println!("{}", message.as_ref().yellow());
}

pub fn success(message: impl AsRef<str>) {
    println!("{}", message.as_ref().green());
}

/// A heavy `====` rule spanning the report width.
pub fn heavy_rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// A light `----` rule spanning the report width.
pub fn light_rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Print `title` framed by light rules.
pub fn section(title: &str) {
    println!("{}", light_rule());
    println!("{title}");
    println!("{}\n", light_rule());
}
