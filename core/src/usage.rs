//! Usage-text rendering.
//!
//! A presentation collaborator built entirely on [`OptionSet`]'s public
//! introspection. Column layout is cosmetic and deliberately outside the
//! parser's correctness contract.

use crate::registry::OptionSet;

/// Column where descriptions start, when the name part is short enough.
const DESCRIPTION_COLUMN: usize = 30;

/// Renders a usage block: a header line plus one line per option in
/// registration order.
///
/// # Examples
///
/// ```
/// use optline_core::{OptionSet, usage};
///
/// let opts = OptionSet::new("demo");
/// let text = usage::render(&opts);
/// assert!(text.starts_with("Usage: demo [options]\n"));
/// assert!(text.contains("--help"));
/// ```
pub fn render(set: &OptionSet<'_>) -> String {
    let mut out = format!("Usage: {} [options]\n", set.progname());

    for info in set.iter() {
        let mut line = match info.short_alias {
            Some(ch) => format!("  -{ch},"),
            None => "     ".to_string(),
        };
        line.push_str(" --");
        line.push_str(info.canonical);

        if !info.description.is_empty() {
            if line.len() < DESCRIPTION_COLUMN {
                line.push_str(&" ".repeat(DESCRIPTION_COLUMN - line.len()));
            } else {
                line.push(' ');
            }
            line.push_str(info.description);
        }

        out.push_str(&line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use crate::action::Action;

    use super::*;

    #[test]
    fn test_render_lists_options_in_registration_order() {
        let mut opts = OptionSet::without_help("demo");
        opts.register("output|o", Action::param(|_| {}), "Where to write.")
            .expect("registration must succeed");
        opts.register("verbose", Action::flag(|| {}), "Chatty output.")
            .expect("registration must succeed");

        let text = render(&opts);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Usage: demo [options]");
        assert!(lines[1].starts_with("  -o, --output"));
        assert!(lines[1].ends_with("Where to write."));
        assert!(lines[2].starts_with("      --verbose"));
        assert!(lines[2].ends_with("Chatty output."));
    }

    #[test]
    fn test_render_aligns_short_and_long_forms() {
        let mut opts = OptionSet::without_help("demo");
        opts.register("all|a", Action::flag(|| {}), "")
            .expect("registration must succeed");
        opts.register("brief", Action::flag(|| {}), "")
            .expect("registration must succeed");

        let text = render(&opts);
        let lines: Vec<&str> = text.lines().collect();

        let col_a = lines[1].find("--").expect("long form must be present");
        let col_b = lines[2].find("--").expect("long form must be present");
        assert_eq!(col_a, col_b);
    }
}
