//! Line grammar of `mysqlbinlog` output.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("line grammar patterns are valid")
}

/// `DELIMITER <delim>` in the preamble.
pub(super) static DELIMITER: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?i)^delimiter\s+(\S+)"));

/// `# at <offset>` event marker.
pub(super) static MARKER: LazyLock<Regex> = LazyLock::new(|| pattern(r"^# at (\d+)"));

/// `#<yymmdd hh:mm:ss> server id <id> end_log_pos <offset> <type>`
pub(super) static TYPE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^#(\d{6}\s+\d?\d:\d\d:\d\d)\s+server id\s+(\d+)\s+end_log_pos\s+(\d+)\s+(\w+)",
    )
});

pub(super) static QUERY_REST: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^\s*thread_id=(\d+)\s+exec_time=(\d+)\s+error_code=(\d+)")
});

pub(super) static XID_REST: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*=\s*(\d+)"));

pub(super) static START_REST: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"^: binlog v\s*(\d+),\s*server v\s*(\S+)(?:\s+created\s*(\d{6}\s+\d?\d:\d\d:\d\d))?",
    )
});

/// `SET INSERT_ID=<value>`
pub(super) static INTVAR_SET: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^set\s+(\w+)\s*=\s*(.+)"));

/// `SET @<name>:=<value>`
pub(super) static USER_VAR_SET: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^set\s+(@\S+)\s*:=\s*(.+)"));

/// `use <db>` annotation ahead of a statement.
pub(super) static USE_DATABASE: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^use\s+`?([^`/;\s]+)`?"));

/// Parses a `yymmdd h:mm:ss` date-time, read as UTC, into Unix seconds.
pub(super) fn parse_timestamp(text: &str) -> Option<u32> {
    let (date, time) = text.trim().split_once(char::is_whitespace)?;
    let date = NaiveDate::parse_from_str(date, "%y%m%d").ok()?;

    let mut parts = time.trim().splitn(3, ':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    let second = parts.next()?.parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;

    u32::try_from(date.and_time(time).and_utc().timestamp()).ok()
}

/// Removes a trailing statement delimiter and surrounding whitespace.
pub(super) fn strip_delimiter<'a>(text: &'a str, delimiter: &str) -> &'a str {
    let text = text.trim_end();
    text.strip_suffix(delimiter).unwrap_or(text).trim()
}
