//! Pure line-level text rules.
//!
//! Everything here works on owned `Vec<String>` / `&str` and never touches the
//! filesystem; [`LineEditor`](crate::application::LineEditor) wires these to
//! the `Filesystem` port.

use crate::domain::rules::PrefixRule;

/// Split text into lines without their terminators (`\n` or `\r\n`).
///
/// A trailing terminator does not produce an empty last element.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Join lines with `\n`, trim trailing whitespace, and end with exactly one
/// newline unless the result is empty.
pub fn normalize_lines(lines: &[String]) -> String {
    let joined = lines.join("\n");
    let trimmed = joined.trim_end();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}\n")
    }
}

/// Collapse every run of consecutive empty lines to a single empty line.
pub fn remove_double_blank_lines(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut last_blank = false;
    for line in lines {
        let blank = line.is_empty();
        if blank && last_blank {
            continue;
        }
        last_blank = blank;
        out.push(line);
    }
    out
}

/// Replace every occurrence of `old` with `new` on every line containing it.
///
/// Returns the number of lines that changed.
pub fn replace_in_lines(lines: &mut [String], old: &str, new: &str) -> usize {
    if old.is_empty() {
        return 0;
    }
    let mut changed = 0;
    for line in lines.iter_mut().filter(|l| l.contains(old)) {
        *line = line.replace(old, new);
        changed += 1;
    }
    changed
}

/// Rewrite every line that starts (at column zero) with a rule's trigger.
///
/// Each line is checked against all rules in order; the last matching rule
/// decides the replacement. Returns the number of lines rewritten.
pub fn apply_prefix_rules(lines: &mut [String], rules: &[PrefixRule]) -> usize {
    let mut changed = 0;
    for line in lines.iter_mut() {
        let hit = rules
            .iter()
            .filter(|rule| line.starts_with(rule.trigger.as_str()))
            .next_back();
        if let Some(rule) = hit {
            *line = rule.replacement.clone();
            changed += 1;
        }
    }
    changed
}
