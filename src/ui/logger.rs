//! Styled status lines
//!
//! One glyph per kind of message, colored with `console` (colors are dropped
//! automatically when stdout is not a terminal).

use console::{Style, style};

pub fn info(msg: &str) {
    println!("{} {msg}", style("●").cyan());
}

pub fn success(msg: &str) {
    println!("{} {msg}", style("✓").green());
}

pub fn warn(msg: &str) {
    println!("{} {msg}", style("▲").yellow());
}

pub fn blank() {
    println!();
}

/// Bold heading with a dim rule underneath
pub fn title(msg: &str) {
    println!();
    println!("{}", style(msg).bold());
    println!("{}", style(rule(msg)).dim());
}

/// A shell command the user should run, set apart from surrounding text
pub fn command(cmd: &str) {
    println!();
    println!("  {}", Style::new().white().on_black().apply_to(format!(" {cmd} ")));
    println!();
}

pub fn dim(msg: &str) {
    println!("{}", style(format!("  {msg}")).dim());
}

pub fn bold(text: &str) -> String {
    style(text).bold().to_string()
}

pub fn file(path: &str) -> String {
    style(path).underlined().to_string()
}

fn rule(msg: &str) -> String {
    "─".repeat((msg.chars().count() + 4).min(50))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_tracks_title_length() {
        assert_eq!(rule("Done!").chars().count(), 9);
        assert_eq!(rule(&"x".repeat(120)).chars().count(), 50);
    }

    #[test]
    fn test_inline_styles_keep_text() {
        console::set_colors_enabled(false);
        assert_eq!(bold("button"), "button");
        assert_eq!(file("components.json"), "components.json");
    }
}
