use std::num::IntErrorKind;

use twilight_model::id::{Id, marker::UserMarker};

/// Why a raw argument could not be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgError {
    Missing,
    Invalid,
}

/// Parse a target user from a raw argument (`<@id>`, `<@!id>`, or raw ID).
pub fn parse_target_user_id(raw: &str) -> Option<Id<UserMarker>> {
    let trimmed = raw.trim();

    let numeric = if trimmed.starts_with("<@") && trimmed.ends_with('>') {
        let without_wrappers = trimmed.strip_prefix("<@")?.strip_suffix('>')?;
        without_wrappers
            .strip_prefix('!')
            .unwrap_or(without_wrappers)
    } else {
        trimmed
    };

    let id = numeric.parse::<u64>().ok()?;

    Id::new_checked(id)
}

/// First whitespace-separated token of an argument string.
pub fn first_token(raw: &str) -> Option<&str> {
    raw.split_whitespace().next()
}

/// Parse the leading integer argument.
///
/// Values past the `i64` range saturate instead of failing, so
/// clamping callers see a huge request as a huge request.
pub fn parse_integer_arg(raw: &str) -> Result<i64, ArgError> {
    let token = first_token(raw).ok_or(ArgError::Missing)?;

    match token.parse::<i64>() {
        Ok(value) => Ok(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(ArgError::Invalid),
        },
    }
}

/// Parse an optional leading user reference.
pub fn parse_optional_user_arg(raw: &str) -> Result<Option<Id<UserMarker>>, ArgError> {
    match first_token(raw) {
        None => Ok(None),
        Some(token) => parse_target_user_id(token)
            .map(Some)
            .ok_or(ArgError::Invalid),
    }
}

/// Require a non-empty free-text argument.
pub fn parse_text_arg(raw: &str) -> Result<String, ArgError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ArgError::Missing);
    }

    Ok(text.to_owned())
}

/// Clamp a requested value into `[min, max]` and narrow it to `u16`.
pub fn clamp_to_u16(value: i64, min: u16, max: u16) -> u16 {
    let clamped = value.clamp(i64::from(min), i64::from(max));
    u16::try_from(clamped).unwrap_or(max)
}
