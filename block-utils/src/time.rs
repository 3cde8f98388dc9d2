use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Milliseconds between the Unix epoch and the first second of 2015.
const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |duration| duration.as_secs())
}

/// Format an uptime as `{d}d {h}h {m}m {s}s`.
pub fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    format!("{days}d {hours}h {minutes}m {seconds}s")
}

/// Creation time of a snowflake, in Unix seconds.
pub fn snowflake_created_secs(snowflake: u64) -> u64 {
    ((snowflake >> 22) + DISCORD_EPOCH_MS) / 1000
}

/// Discord relative timestamp markup (`<t:secs:R>`).
pub fn relative_timestamp(unix_secs: i64) -> String {
    format!("<t:{unix_secs}:R>")
}
