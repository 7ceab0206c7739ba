//! Events from the textual output of `mysqlbinlog`.
//!
//! `mysqlbinlog` renders each event as a `# at <offset>` marker, a type
//! line carrying the header fields, and a body of SQL or comments. This
//! module recovers [`Event`]s from that rendering so that a log can be
//! inspected when only the text dump (or a pipe from the tool) is
//! available.
//!
//! Only the common header and the fields of query, intvar, user variable,
//! xid and start events are recovered. Everything else is reported as
//! [`EventData::Unknown`] with the type code resolved from its name.
//!
//! ```
//! use replicant_binlog::text::TextLogReader;
//! use replicant_binlog::EventKind;
//!
//! let dump = concat!(
//!     "DELIMITER /*!*/;\n",
//!     "# at 4\n",
//!     "#100302 13:06:32 server id 1  end_log_pos 106 \tStart: binlog v 4, server v 5.1.41-log\n",
//!     "ROLLBACK/*!*/;\n",
//!     "DELIMITER ;\n",
//! );
//! let events: Vec<_> = TextLogReader::new(dump.as_bytes())
//!     .events()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].kind(), EventKind::FormatDescription);
//! ```

mod grammar;
mod readers;

use crate::error::{BinlogError, BinlogResult};
use crate::event::{Event, EventData};
use crate::header::RecordHeader;
use crate::kind::EventKind;
use std::io::BufRead;
use std::iter::FusedIterator;
use tracing::debug;

/// A line of input with its one-based line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Line {
    number: usize,
    text: String,
}

/// Line-by-line reader over the dump, tracking line numbers.
#[derive(Debug)]
pub(crate) struct LineCursor<R> {
    input: R,
    number: usize,
}

impl<R: BufRead> LineCursor<R> {
    fn new(input: R) -> Self {
        Self { input, number: 0 }
    }

    /// Reads the next line without its line terminator.
    fn next_line(&mut self) -> BinlogResult<Option<Line>> {
        let mut text = String::new();
        if self.input.read_line(&mut text)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        while text.ends_with('\n') || text.ends_with('\r') {
            text.pop();
        }
        Ok(Some(Line {
            number: self.number,
            text,
        }))
    }

    /// Skips lines up to the next event marker or the closing `DELIMITER`
    /// line, which is returned. `None` means the input ended first.
    fn skip_to_marker(&mut self) -> BinlogResult<Option<Line>> {
        while let Some(line) = self.next_line()? {
            if grammar::MARKER.is_match(&line.text) || is_trailer(&line.text) {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }
}

fn is_trailer(line: &str) -> bool {
    line.starts_with("DELIMITER")
}

/// Reader over `mysqlbinlog` output.
#[derive(Debug)]
pub struct TextLogReader<R> {
    lines: LineCursor<R>,
}

impl<R: BufRead> TextLogReader<R> {
    /// Wraps a line-oriented input.
    pub fn new(input: R) -> Self {
        Self {
            lines: LineCursor::new(input),
        }
    }

    /// Iterates over the events of the dump.
    pub fn events(self) -> TextEventIter<R> {
        TextEventIter {
            lines: self.lines,
            delimiter: None,
            pending: None,
            finished: false,
        }
    }
}

/// Header fields common to every rendered event.
#[derive(Debug, Clone)]
pub(crate) struct EventHead {
    pub(crate) offset: u64,
    pub(crate) timestamp: u32,
    pub(crate) server_id: u32,
    pub(crate) end_offset: u32,
    pub(crate) type_name: String,
    /// The type line, for error reporting.
    pub(crate) line: Line,
}

impl EventHead {
    /// Error pointing at the type line.
    fn unrecognized(&self) -> BinlogError {
        BinlogError::unrecognized_format(self.line.number, &self.line.text)
    }

    fn into_event(self, data: EventData) -> Event {
        let type_code = if matches!(data, EventData::Unknown) {
            EventKind::from_text_name(&self.type_name).map_or(0, EventKind::code)
        } else {
            data.kind().code()
        };
        let size = u64::from(self.end_offset).saturating_sub(self.offset);
        let header = RecordHeader {
            offset: self.offset,
            timestamp: self.timestamp,
            type_code,
            server_id: self.server_id,
            size: u32::try_from(size).unwrap_or(u32::MAX),
            end_offset: self.end_offset,
            flags: 0,
        };
        Event::new(header, data)
    }
}

/// Iterator over the events of a `mysqlbinlog` dump.
///
/// The first error is yielded once, after which the iterator is fused.
#[derive(Debug)]
pub struct TextEventIter<R> {
    lines: LineCursor<R>,
    delimiter: Option<String>,
    pending: Option<Line>,
    finished: bool,
}

impl<R: BufRead> TextEventIter<R> {
    /// The statement delimiter declared in the preamble, once read.
    pub fn delimiter(&self) -> Option<&str> {
        self.delimiter.as_deref()
    }

    /// Reads the preamble up to the first event marker.
    ///
    /// Returns the delimiter and the marker line, or `None` if the input
    /// ends before either is found.
    fn read_preamble(&mut self) -> BinlogResult<Option<(String, Line)>> {
        let delimiter = loop {
            let Some(line) = self.lines.next_line()? else {
                return Ok(None);
            };
            if let Some(caps) = grammar::DELIMITER.captures(&line.text) {
                break caps[1].to_string();
            }
        };

        while let Some(line) = self.lines.next_line()? {
            if grammar::MARKER.is_match(&line.text) {
                return Ok(Some((delimiter, line)));
            }
        }
        Ok(None)
    }

    fn read_head(&mut self, marker: &Line) -> BinlogResult<(EventHead, String)> {
        let offset = grammar::MARKER
            .captures(&marker.text)
            .and_then(|caps| caps[1].parse::<u64>().ok())
            .ok_or_else(|| BinlogError::unrecognized_format(marker.number, &marker.text))?;

        let line = self
            .lines
            .next_line()?
            .ok_or_else(|| BinlogError::unexpected_end(format!("type line of event at {offset}")))?;
        let unrecognized = || BinlogError::unrecognized_format(line.number, &line.text);

        let caps = grammar::TYPE_LINE.captures(&line.text).ok_or_else(unrecognized)?;
        let timestamp = grammar::parse_timestamp(&caps[1]).ok_or_else(unrecognized)?;
        let server_id = caps[2].parse().map_err(|_| unrecognized())?;
        let end_offset = caps[3].parse().map_err(|_| unrecognized())?;
        let rest_start = caps.get(0).map_or(0, |m| m.end());
        let type_name = caps[4].to_string();
        let rest = line.text[rest_start..].to_string();

        let head = EventHead {
            offset,
            timestamp,
            server_id,
            end_offset,
            type_name,
            line,
        };
        Ok((head, rest))
    }

    fn read_next(&mut self) -> BinlogResult<Option<Event>> {
        let marker = match self.pending.take() {
            Some(line) => line,
            None => {
                if self.delimiter.is_some() {
                    return Ok(None);
                }
                let Some((delimiter, marker)) = self.read_preamble()? else {
                    return Ok(None);
                };
                debug!(delimiter = %delimiter, "read mysqlbinlog preamble");
                self.delimiter = Some(delimiter);
                marker
            }
        };

        if is_trailer(&marker.text) {
            return Ok(None);
        }

        let (head, rest) = self.read_head(&marker)?;
        let delimiter = self.delimiter.as_deref().unwrap_or(";");
        let (data, next) = readers::read_body(&head, &rest, &mut self.lines, delimiter)?;
        self.pending = next;
        Ok(Some(head.into_event(data)))
    }
}

impl<R: BufRead> Iterator for TextEventIter<R> {
    type Item = BinlogResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for TextEventIter<R> {}
