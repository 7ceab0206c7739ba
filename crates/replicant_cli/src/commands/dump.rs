//! Dump command implementation.

use clap::ValueEnum;
use replicant_binlog::{
    open_with_config, BinlogReader, BinlogResult, Event, EventData, Locator, ReaderConfig,
    TextLogReader,
};
use replicant_source::StreamSource;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

/// Output format for decoded events.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// `mysqlbinlog`-like rendering
    Text,
    /// One JSON object per line
    Json,
}

/// Options of the dump command.
#[derive(Debug, Clone)]
pub struct DumpOptions {
    /// Input is `mysqlbinlog` text.
    pub text: bool,
    /// Stop after this many events.
    pub limit: Option<usize>,
    /// Output format.
    pub format: OutputFormat,
    /// Reject records whose end_log_pos disagrees with their position.
    pub verify_positions: bool,
}

/// Event representation for JSON output.
#[derive(Debug, Serialize)]
pub struct EventInfo {
    /// Offset of the event in the log.
    pub offset: u64,
    /// Offset of the following event.
    pub end_offset: u64,
    /// Event size in bytes.
    pub size: u32,
    /// Unix timestamp.
    pub timestamp: u32,
    /// Originating server.
    pub server_id: u32,
    /// Raw type code.
    pub type_code: u8,
    /// Kind name.
    pub kind: &'static str,
    /// Session thread (query events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<u32>,
    /// Default database (query events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Statement text (query events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Variable name (intvar and user variable events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variable: Option<String>,
    /// Rendered value (intvar and user variable events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Transaction id (xid events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xid: Option<u64>,
    /// Next log file (rotate events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_file: Option<String>,
    /// Server version (start and format description events).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_version: Option<String>,
}

impl From<&Event> for EventInfo {
    fn from(event: &Event) -> Self {
        let kind = match (&event.data, event.header.kind()) {
            (EventData::Unknown, Some(kind)) => kind.name(),
            _ => event.kind().name(),
        };
        let mut info = EventInfo {
            offset: event.start_offset(),
            end_offset: event.end_offset(),
            size: event.size(),
            timestamp: event.header.timestamp,
            server_id: event.server_id(),
            type_code: event.header.type_code,
            kind,
            thread_id: None,
            database: None,
            query: None,
            variable: None,
            value: None,
            xid: None,
            next_file: None,
            server_version: None,
        };

        match &event.data {
            EventData::Query(q) => {
                info.thread_id = Some(q.thread_id);
                info.database = Some(q.database.clone());
                info.query = Some(q.query_text().into_owned());
            }
            EventData::IntVar(v) => {
                info.variable = Some(v.variable.ident().to_string());
                info.value = Some(v.value.to_string());
            }
            EventData::UserVar(v) => {
                info.variable = Some(v.name.clone());
                info.value = Some(v.value.to_string());
            }
            EventData::Xid(x) => info.xid = Some(x.xid),
            EventData::Rotate(r) => info.next_file = Some(format!("{}:{}", r.next_file, r.next_position)),
            EventData::Start(s) => info.server_version = Some(s.server_version.clone()),
            EventData::FormatDescription(f) => info.server_version = Some(f.server_version.clone()),
            _ => {}
        }
        info
    }
}

type Events = Box<dyn Iterator<Item = BinlogResult<Event>>>;

/// Runs the dump command.
pub fn run(locator: &str, options: &DumpOptions) -> Result<(), Box<dyn std::error::Error>> {
    let events = open_events(locator, options)?;
    let stdout = io::stdout();
    let count = write_events(events, options, &mut stdout.lock())?;
    info!(count, "dumped events");
    Ok(())
}

fn open_events(locator: &str, options: &DumpOptions) -> BinlogResult<Events> {
    let config = ReaderConfig::new().verify_positions(options.verify_positions);

    let events: Events = match (locator, options.text) {
        ("-", true) => Box::new(TextLogReader::new(io::stdin().lock()).events()),
        ("-", false) => {
            Box::new(BinlogReader::with_config(StreamSource::new(io::stdin()), config)?.events())
        }
        (_, true) => {
            let Locator::File(path) = Locator::parse(locator)?;
            let file = File::open(&path)?;
            Box::new(TextLogReader::new(BufReader::new(file)).events())
        }
        (_, false) => Box::new(open_with_config(locator, config)?.events()),
    };
    Ok(events)
}

/// Writes up to `options.limit` events and returns how many were written.
/// A decode error stops the dump after the events before it are written.
pub fn write_events<W: Write>(
    events: impl Iterator<Item = BinlogResult<Event>>,
    options: &DumpOptions,
    out: &mut W,
) -> Result<usize, Box<dyn std::error::Error>> {
    let mut count = 0;
    for event in events.take(options.limit.unwrap_or(usize::MAX)) {
        let event = event?;
        match options.format {
            OutputFormat::Json => {
                writeln!(out, "{}", serde_json::to_string(&EventInfo::from(&event))?)?;
            }
            OutputFormat::Text => writeln!(out, "{event}\n")?,
        }
        count += 1;
    }
    Ok(count)
}
