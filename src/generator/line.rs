//! Rule line composition.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::matches::ComposedMatches;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// What goes between the chain and the jump target.
#[derive(Debug, Clone, Copy)]
pub enum LineBody<'a> {
    /// Raw rule text, emitted verbatim
    Raw(&'a str),
    /// Rendered match clauses followed by the merged target options
    Composed {
        matches: &'a ComposedMatches,
        target_options: &'a str,
    },
}

/// Compose one newline-terminated rule line.
///
/// A raw body yields `<command> <chain> <rule> -j <target>` untouched.
/// A composed body yields
/// `<command> <chain> <implicit> <explicit> -j <target> <options>` with
/// whitespace runs collapsed to one space and no leading or trailing blanks.
pub fn compose_line(command: &str, chain: &str, target: &str, body: LineBody<'_>) -> String {
    match body {
        LineBody::Raw(rule) => format!("{} {} {} -j {}\n", command, chain, rule, target),
        LineBody::Composed {
            matches,
            target_options,
        } => {
            let joined = [
                command,
                chain,
                matches.implicit.as_str(),
                matches.explicit.as_str(),
                "-j",
                target,
                target_options,
            ]
            .join(" ");

            let mut line = WHITESPACE.replace_all(joined.trim(), " ").into_owned();
            line.push('\n');
            line
        }
    }
}
