//! Message-command prefix resolution.

/// Recognized invocation prefixes.
///
/// Ordered longest-first so that `"bb! "` wins over `"bb!"` and `"bb"`.
pub const COMMAND_PREFIXES: [&str; 4] = ["bb! ", "bb ", "bb!", "bb"];

/// Prefix shown in help text and error guidance.
pub const DISPLAY_PREFIX: &str = "bb";

/// A message split into its prefix, command name, and argument string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The literal prefix that matched.
    pub prefix: &'a str,
    /// Command name, ASCII-lowercased.
    pub name: String,
    /// Everything after the command name, trimmed.
    pub args: &'a str,
}

/// Match the longest prefix anchored at the start of `content`.
pub fn strip_prefix<'a>(prefixes: &[&'a str], content: &'a str) -> Option<(&'a str, &'a str)> {
    prefixes
        .iter()
        .filter(|prefix| !prefix.is_empty())
        .filter_map(|prefix| content.strip_prefix(*prefix).map(|rest| (*prefix, rest)))
        .max_by_key(|(prefix, _rest)| prefix.len())
}

/// Resolve a raw message into a command invocation.
///
/// Returns `None` when no prefix matches or when no command name directly
/// follows the prefix.
pub fn parse_command<'a>(prefixes: &[&'a str], content: &'a str) -> Option<ParsedCommand<'a>> {
    let (prefix, rest) = strip_prefix(prefixes, content)?;

    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, args) = rest.split_at(name_end);
    if name.is_empty() {
        return None;
    }

    Some(ParsedCommand {
        prefix,
        name: name.to_ascii_lowercase(),
        args: args.trim(),
    })
}
