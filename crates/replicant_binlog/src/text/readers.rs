//! Per-type body readers.
//!
//! Each reader receives the remainder of the type line and the line cursor
//! positioned after it. It returns the payload and the first line that is
//! not part of the event (`None` at end of input).

use super::grammar::{self, strip_delimiter};
use super::{EventHead, Line, LineCursor};
use crate::error::{BinlogError, BinlogResult};
use crate::event::{
    EventData, FormatDescriptionEvent, IntVarEvent, IntVarKind, QueryEvent, StartEvent,
    UserVarEvent, UserVarValue, XidEvent,
};
use crate::header::RecordHeader;
use std::io::BufRead;
use tracing::debug;

type BodyOutcome = BinlogResult<(EventData, Option<Line>)>;

pub(super) fn read_body<R: BufRead>(
    head: &EventHead,
    rest: &str,
    lines: &mut LineCursor<R>,
    delimiter: &str,
) -> BodyOutcome {
    match head.type_name.as_str() {
        "Query" => query(head, rest, lines, delimiter),
        "Intvar" => int_var(lines, delimiter),
        "User_var" => user_var(lines, delimiter),
        "Xid" => xid(head, rest, lines),
        "Start" => start(head, rest, lines),
        other => {
            debug!(offset = head.offset, type_name = other, "no reader for event type, skipping body");
            Ok((EventData::Unknown, lines.skip_to_marker()?))
        }
    }
}

fn require_line<R: BufRead>(lines: &mut LineCursor<R>, context: &str) -> BinlogResult<Line> {
    lines
        .next_line()?
        .ok_or_else(|| BinlogError::unexpected_end(context))
}

fn query<R: BufRead>(
    head: &EventHead,
    rest: &str,
    lines: &mut LineCursor<R>,
    delimiter: &str,
) -> BodyOutcome {
    let caps = grammar::QUERY_REST
        .captures(rest)
        .ok_or_else(|| head.unrecognized())?;
    let field = |i: usize| -> BinlogResult<u32> {
        caps[i].parse().map_err(|_| head.unrecognized())
    };
    let thread_id = field(1)?;
    let exec_time = field(2)?;
    let error_code = u16::try_from(field(3)?).map_err(|_| head.unrecognized())?;

    let context = format!("query event at {}", head.offset);

    // Session annotations, each terminated by the delimiter.
    let mut database = String::new();
    let mut line = require_line(lines, &context)?;
    while line.text.ends_with(delimiter) && line.text != delimiter {
        if let Some(caps) = grammar::USE_DATABASE.captures(&line.text) {
            database = caps[1].to_string();
        }
        line = require_line(lines, &context)?;
    }

    // Statement lines, up to a line holding only the delimiter.
    let mut statement = Vec::new();
    while line.text != delimiter {
        statement.push(line.text);
        line = require_line(lines, &context)?;
    }

    let data = EventData::Query(QueryEvent {
        thread_id,
        exec_time,
        error_code,
        database,
        status_vars: Vec::new(),
        query: statement.join("\n").into_bytes(),
    });
    Ok((data, lines.next_line()?))
}

fn int_var<R: BufRead>(lines: &mut LineCursor<R>, delimiter: &str) -> BodyOutcome {
    let line = require_line(lines, "intvar assignment")?;
    let unrecognized = || BinlogError::unrecognized_format(line.number, &line.text);

    let caps = grammar::INTVAR_SET.captures(&line.text).ok_or_else(unrecognized)?;
    let variable = IntVarKind::from_name(&caps[1]).ok_or_else(unrecognized)?;
    let value = strip_delimiter(&caps[2], delimiter)
        .parse()
        .map_err(|_| unrecognized())?;

    let data = EventData::IntVar(IntVarEvent { variable, value });
    Ok((data, lines.skip_to_marker()?))
}

fn user_var_value(text: &str) -> UserVarValue {
    if text.eq_ignore_ascii_case("NULL") {
        UserVarValue::Null
    } else if let Ok(v) = text.parse::<i64>() {
        UserVarValue::Integer(v)
    } else if let Some(v) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
        UserVarValue::Real(v)
    } else {
        UserVarValue::Text {
            charset: 0,
            bytes: text.as_bytes().to_vec(),
        }
    }
}

fn user_var<R: BufRead>(lines: &mut LineCursor<R>, delimiter: &str) -> BodyOutcome {
    let line = require_line(lines, "user variable assignment")?;
    let caps = grammar::USER_VAR_SET
        .captures(&line.text)
        .ok_or_else(|| BinlogError::unrecognized_format(line.number, &line.text))?;

    let name = caps[1].trim_start_matches('@').trim_matches('`').to_string();
    let value = user_var_value(strip_delimiter(&caps[2], delimiter));

    let data = EventData::UserVar(UserVarEvent { name, value });
    Ok((data, lines.skip_to_marker()?))
}

fn xid<R: BufRead>(head: &EventHead, rest: &str, lines: &mut LineCursor<R>) -> BodyOutcome {
    let xid = grammar::XID_REST
        .captures(rest)
        .and_then(|caps| caps[1].parse::<u64>().ok())
        .ok_or_else(|| head.unrecognized())?;
    Ok((EventData::Xid(XidEvent { xid }), lines.skip_to_marker()?))
}

fn start<R: BufRead>(head: &EventHead, rest: &str, lines: &mut LineCursor<R>) -> BodyOutcome {
    let caps = grammar::START_REST
        .captures(rest)
        .ok_or_else(|| head.unrecognized())?;

    let binlog_version: u16 = caps[1].parse().map_err(|_| head.unrecognized())?;
    let server_version = caps[2].to_string();
    let created = caps
        .get(3)
        .and_then(|m| grammar::parse_timestamp(m.as_str()))
        .unwrap_or(0);

    let data = if binlog_version >= 4 {
        EventData::FormatDescription(FormatDescriptionEvent {
            binlog_version,
            server_version,
            created,
            header_length: RecordHeader::LENGTH as u8,
            post_header_lengths: Vec::new(),
        })
    } else {
        EventData::Start(StartEvent {
            binlog_version,
            server_version,
            created,
        })
    };
    Ok((data, lines.skip_to_marker()?))
}
