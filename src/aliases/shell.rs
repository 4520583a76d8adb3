// Shell export - renders the alias store as a script that can be sourced from a shell rc file

use super::types::{AliasData, AliasGroups};

pub const EXPORT_HEADER: &str = "# Generated by aliasdeck. Changes made here are overwritten on export.";

/// Quote a string for POSIX shells using single quotes
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

fn alias_line(alias: &AliasData) -> String {
    format!("alias {}={}", alias.name, shell_quote(&alias.command))
}

/// Append `text` as comment lines, one `# ` prefix per line
fn push_commented(out: &mut String, text: &str) {
    for line in text.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
}

/// Render every group. Disabled aliases stay in the output as comments so the
/// file documents them without defining them.
///
/// Commands may span lines, so a disabled alias is commented line by line;
/// none of its body is live when the script is sourced.
pub fn render_aliases(groups: &AliasGroups) -> String {
    let mut out = String::from(EXPORT_HEADER);
    out.push('\n');

    for (group, aliases) in groups {
        out.push_str(&format!("\n# group: {}\n", group));
        for alias in aliases.values() {
            if let Some(description) = &alias.description {
                push_commented(&mut out, description);
            }
            if alias.disabled {
                push_commented(&mut out, &format!("{}  # disabled", alias_line(alias)));
            } else {
                out.push_str(&alias_line(alias));
                out.push('\n');
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "shell_test.rs"]
mod tests;
