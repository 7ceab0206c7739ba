//! Streaming iteration over a binary log.
//!
//! Records are read one at a time from the source, so memory use is bounded
//! by the largest record rather than the size of the log.
//!
//! # Error Handling
//!
//! - End of stream (including a partial trailing header) ends iteration
//! - Any other failure is yielded once, after which the iterator is fused
//! - A record whose `end_offset - size` disagrees with where it was found
//!   is logged, or rejected when [`ReaderConfig::verify_positions`] is set

use crate::config::ReaderConfig;
use crate::decode::decode;
use crate::error::{BinlogError, BinlogResult};
use crate::event::{Event, EventData};
use crate::stub::EventStub;
use replicant_source::LogSource;
use std::iter::FusedIterator;
use tracing::{trace, warn};

/// Iterator over undecoded records.
#[derive(Debug)]
pub struct StubIter<S> {
    source: S,
    config: ReaderConfig,
    finished: bool,
}

impl<S: LogSource> StubIter<S> {
    pub(crate) fn new(source: S, config: ReaderConfig) -> Self {
        Self {
            source,
            config,
            finished: false,
        }
    }

    /// Current stream offset.
    pub fn position(&self) -> u64 {
        self.source.position()
    }

    fn read_next(&mut self) -> BinlogResult<Option<EventStub>> {
        let Some(stub) = EventStub::read(&mut self.source, &self.config)? else {
            return Ok(None);
        };

        let header = &stub.header;
        if let Some(claimed) = header.claimed_offset() {
            if claimed != header.offset {
                if self.config.verify_positions {
                    return Err(BinlogError::PositionMismatch {
                        offset: header.offset,
                        claimed,
                        end_offset: header.end_offset,
                        size: header.size,
                    });
                }
                warn!(
                    offset = header.offset,
                    claimed,
                    end_offset = header.end_offset,
                    "record position does not match its end_log_pos"
                );
            }
        }

        trace!(
            offset = header.offset,
            type_code = header.type_code,
            size = header.size,
            "read record"
        );
        Ok(Some(stub))
    }
}

impl<S: LogSource> Iterator for StubIter<S> {
    type Item = BinlogResult<EventStub>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.read_next() {
            Ok(Some(stub)) => Some(Ok(stub)),
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

impl<S: LogSource> FusedIterator for StubIter<S> {}

/// Iterator over decoded events.
///
/// The first event of the log is remembered when it describes the log
/// format (a format description or start event), see
/// [`Self::format_description`].
#[derive(Debug)]
pub struct EventIter<S> {
    stubs: StubIter<S>,
    format_description: Option<Event>,
    seen_first: bool,
}

impl<S: LogSource> EventIter<S> {
    pub(crate) fn new(stubs: StubIter<S>) -> Self {
        Self {
            stubs,
            format_description: None,
            seen_first: false,
        }
    }

    /// The format description (or start) event that opened the log, once
    /// it has been read.
    pub fn format_description(&self) -> Option<&Event> {
        self.format_description.as_ref()
    }

    /// Current stream offset.
    pub fn position(&self) -> u64 {
        self.stubs.position()
    }
}

impl<S: LogSource> Iterator for EventIter<S> {
    type Item = BinlogResult<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        let stub = match self.stubs.next()? {
            Ok(stub) => stub,
            Err(e) => return Some(Err(e)),
        };

        match decode(&stub) {
            Ok(event) => {
                if !self.seen_first {
                    self.seen_first = true;
                    if matches!(
                        event.data,
                        EventData::FormatDescription(_) | EventData::Start(_)
                    ) {
                        self.format_description = Some(event.clone());
                    }
                }
                Some(Ok(event))
            }
            Err(e) => {
                self.stubs.finished = true;
                Some(Err(e))
            }
        }
    }
}

impl<S: LogSource> FusedIterator for EventIter<S> {}
