//! Decoded events.
//!
//! An [`Event`] pairs the common [`RecordHeader`] with an [`EventData`]
//! payload whose shape depends on the event kind. Events produced by the
//! binary decoder and by the textual log parser share these types, so the
//! two pipelines can be used interchangeably.

use crate::header::RecordHeader;
use crate::kind::EventKind;
use chrono::DateTime;
use std::borrow::Cow;
use std::fmt;

/// A decoded binary log event.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Common header fields.
    pub header: RecordHeader,
    /// Kind-specific payload.
    pub data: EventData,
}

impl Event {
    /// Creates an event.
    #[must_use]
    pub fn new(header: RecordHeader, data: EventData) -> Self {
        Self { header, data }
    }

    /// Returns the kind of the payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.data.kind()
    }

    /// Stream offset where the event starts.
    #[must_use]
    pub fn start_offset(&self) -> u64 {
        self.header.offset
    }

    /// Stream offset of the byte following the event.
    #[must_use]
    pub fn end_offset(&self) -> u64 {
        u64::from(self.header.end_offset)
    }

    /// Total size of the event in bytes.
    #[must_use]
    pub fn size(&self) -> u32 {
        self.header.size
    }

    /// Id of the server that originated the event.
    #[must_use]
    pub fn server_id(&self) -> u32 {
        self.header.server_id
    }
}

/// Kind-specific event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EventData {
    /// Unknown type code, or a kind the textual parser has no reader for.
    Unknown,
    /// Start event (binlog format v1-v3).
    Start(StartEvent),
    /// Statement executed on the source.
    Query(QueryEvent),
    /// Server shutdown marker.
    Stop,
    /// Switch to the next log file.
    Rotate(RotateEvent),
    /// Integer session variable.
    IntVar(IntVarEvent),
    /// Legacy `LOAD DATA`.
    Load,
    /// Reserved kind.
    Slave,
    /// Legacy `LOAD DATA` file creation.
    CreateFile,
    /// `LOAD DATA` file block.
    AppendBlock,
    /// Legacy `LOAD DATA` execution.
    ExecLoad,
    /// `LOAD DATA` file removal.
    DeleteFile,
    /// Legacy `LOAD DATA` with multi-character separators.
    NewLoad,
    /// Random seeds for `RAND()`.
    Rand(RandEvent),
    /// User variable assignment.
    UserVar(UserVarEvent),
    /// Format description (binlog format v4).
    FormatDescription(FormatDescriptionEvent),
    /// Transaction commit marker.
    Xid(XidEvent),
    /// Start of a `LOAD DATA` file.
    BeginLoadQuery,
    /// `LOAD DATA` execution.
    ExecuteLoadQuery,
    /// Table id to table definition mapping.
    TableMap,
    /// Pre-GA row insert.
    PreGaWriteRows,
    /// Pre-GA row update.
    PreGaUpdateRows,
    /// Pre-GA row delete.
    PreGaDeleteRows,
    /// Row insert.
    WriteRows,
    /// Row update.
    UpdateRows,
    /// Row delete.
    DeleteRows,
    /// Incident marker.
    Incident,
    /// Keep-alive.
    Heartbeat,
    /// Skippable event.
    Ignorable,
    /// Original statement of a row-based change.
    RowsQuery,
}

impl EventData {
    /// Returns the kind of this payload.
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Unknown => EventKind::Unknown,
            Self::Start(_) => EventKind::Start,
            Self::Query(_) => EventKind::Query,
            Self::Stop => EventKind::Stop,
            Self::Rotate(_) => EventKind::Rotate,
            Self::IntVar(_) => EventKind::IntVar,
            Self::Load => EventKind::Load,
            Self::Slave => EventKind::Slave,
            Self::CreateFile => EventKind::CreateFile,
            Self::AppendBlock => EventKind::AppendBlock,
            Self::ExecLoad => EventKind::ExecLoad,
            Self::DeleteFile => EventKind::DeleteFile,
            Self::NewLoad => EventKind::NewLoad,
            Self::Rand(_) => EventKind::Rand,
            Self::UserVar(_) => EventKind::UserVar,
            Self::FormatDescription(_) => EventKind::FormatDescription,
            Self::Xid(_) => EventKind::Xid,
            Self::BeginLoadQuery => EventKind::BeginLoadQuery,
            Self::ExecuteLoadQuery => EventKind::ExecuteLoadQuery,
            Self::TableMap => EventKind::TableMap,
            Self::PreGaWriteRows => EventKind::PreGaWriteRows,
            Self::PreGaUpdateRows => EventKind::PreGaUpdateRows,
            Self::PreGaDeleteRows => EventKind::PreGaDeleteRows,
            Self::WriteRows => EventKind::WriteRows,
            Self::UpdateRows => EventKind::UpdateRows,
            Self::DeleteRows => EventKind::DeleteRows,
            Self::Incident => EventKind::Incident,
            Self::Heartbeat => EventKind::Heartbeat,
            Self::Ignorable => EventKind::Ignorable,
            Self::RowsQuery => EventKind::RowsQuery,
        }
    }
}

/// Payload of a start event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartEvent {
    /// Binary log format version.
    pub binlog_version: u16,
    /// Version string of the server that wrote the log.
    pub server_version: String,
    /// Creation time, seconds since the Unix epoch (0 if unknown).
    pub created: u32,
}

/// Payload of a format description event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDescriptionEvent {
    /// Binary log format version.
    pub binlog_version: u16,
    /// Version string of the server that wrote the log.
    pub server_version: String,
    /// Creation time, seconds since the Unix epoch (0 if unknown).
    pub created: u32,
    /// Length of the common header of every following record.
    pub header_length: u8,
    /// Post-header length per type code, starting at code 1.
    pub post_header_lengths: Vec<u8>,
}

/// Payload of a query event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEvent {
    /// Id of the session that executed the statement.
    pub thread_id: u32,
    /// Execution time in seconds.
    pub exec_time: u32,
    /// Error code the statement produced on the source.
    pub error_code: u16,
    /// Default database of the session.
    pub database: String,
    /// Session state recorded alongside the statement.
    pub status_vars: Vec<StatusVar>,
    /// Statement text, kept as raw bytes.
    pub query: Vec<u8>,
}

impl QueryEvent {
    /// Statement text, with invalid UTF-8 replaced.
    #[must_use]
    pub fn query_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.query)
    }
}

/// A status variable attached to a query event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusVar {
    /// `Q_FLAGS2_CODE` (0): session option bits.
    Flags2(u32),
    /// `Q_SQL_MODE_CODE` (1).
    SqlMode(u64),
    /// `Q_AUTO_INCREMENT` (3).
    AutoIncrement {
        /// `auto_increment_increment`.
        increment: u16,
        /// `auto_increment_offset`.
        offset: u16,
    },
    /// `Q_CHARSET_CODE` (4).
    Charset {
        /// `character_set_client`.
        client: u16,
        /// `collation_connection`.
        connection: u16,
        /// `collation_server`.
        server: u16,
    },
    /// `Q_TIME_ZONE_CODE` (5).
    TimeZone(String),
    /// `Q_CATALOG_NZ_CODE` (6).
    Catalog(String),
    /// `Q_LC_TIME_NAMES_CODE` (7).
    LcTimeNames(u16),
    /// `Q_CHARSET_DATABASE_CODE` (8).
    CharsetDatabase(u16),
    /// `Q_TABLE_MAP_FOR_UPDATE_CODE` (9).
    TableMapForUpdate(u64),
    /// `Q_MASTER_DATA_WRITTEN_CODE` (10).
    MasterDataWritten(u32),
    /// `Q_INVOKER` (11).
    Invoker {
        /// Definer user name.
        user: String,
        /// Definer host name.
        host: String,
    },
}

impl StatusVar {
    /// Returns the status variable code.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::Flags2(_) => 0,
            Self::SqlMode(_) => 1,
            Self::AutoIncrement { .. } => 3,
            Self::Charset { .. } => 4,
            Self::TimeZone(_) => 5,
            Self::Catalog(_) => 6,
            Self::LcTimeNames(_) => 7,
            Self::CharsetDatabase(_) => 8,
            Self::TableMapForUpdate(_) => 9,
            Self::MasterDataWritten(_) => 10,
            Self::Invoker { .. } => 11,
        }
    }
}

/// Payload of a rotate event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateEvent {
    /// Offset of the first event in the next file.
    pub next_position: u64,
    /// Name of the next file.
    pub next_file: String,
}

/// Which integer variable an intvar event sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntVarKind {
    /// Invalid marker (0).
    Invalid,
    /// `LAST_INSERT_ID` (1).
    LastInsertId,
    /// `INSERT_ID` (2).
    InsertId,
}

impl IntVarKind {
    /// Converts the encoded variable byte.
    #[must_use]
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Invalid),
            1 => Some(Self::LastInsertId),
            2 => Some(Self::InsertId),
            _ => None,
        }
    }

    /// Resolves the SQL variable name as rendered by `mysqlbinlog`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("LAST_INSERT_ID") {
            Some(Self::LastInsertId)
        } else if name.eq_ignore_ascii_case("INSERT_ID") {
            Some(Self::InsertId)
        } else {
            None
        }
    }

    /// SQL variable name.
    #[must_use]
    pub const fn ident(self) -> &'static str {
        match self {
            Self::Invalid => "*INVALID*",
            Self::LastInsertId => "LAST_INSERT_ID",
            Self::InsertId => "INSERT_ID",
        }
    }
}

/// Payload of an intvar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntVarEvent {
    /// The variable being set.
    pub variable: IntVarKind,
    /// The value.
    pub value: u64,
}

/// Payload of a rand event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandEvent {
    /// First seed.
    pub seed1: u64,
    /// Second seed.
    pub seed2: u64,
}

/// Payload of a user variable event.
#[derive(Debug, Clone, PartialEq)]
pub struct UserVarEvent {
    /// Variable name, without the leading `@`.
    pub name: String,
    /// Assigned value.
    pub value: UserVarValue,
}

/// Value of a user variable.
#[derive(Debug, Clone, PartialEq)]
pub enum UserVarValue {
    /// SQL `NULL`.
    Null,
    /// String result (type tag 0).
    Text {
        /// Collation id of the value.
        charset: u32,
        /// Raw value bytes.
        bytes: Vec<u8>,
    },
    /// Real result (type tag 1).
    Real(f64),
    /// Integer result (type tag 2).
    Integer(i64),
    /// A value type that is not decoded (row, decimal, or newer tags).
    Unsupported {
        /// The raw type tag.
        type_tag: u8,
    },
}

impl UserVarValue {
    /// Returns `true` for SQL `NULL`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns the encoded value type tag, or `None` for `NULL`.
    #[must_use]
    pub fn type_tag(&self) -> Option<u8> {
        match self {
            Self::Null => None,
            Self::Text { .. } => Some(0),
            Self::Real(_) => Some(1),
            Self::Integer(_) => Some(2),
            Self::Unsupported { type_tag } => Some(*type_tag),
        }
    }
}

impl fmt::Display for UserVarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Text { bytes, .. } => write!(f, "'{}'", String::from_utf8_lossy(bytes)),
            Self::Real(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Unsupported { type_tag } => write!(f, "<unsupported type {type_tag}>"),
        }
    }
}

/// Payload of an xid event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XidEvent {
    /// Transaction id.
    pub xid: u64,
}

fn format_timestamp(secs: u32) -> String {
    DateTime::from_timestamp(i64::from(secs), 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| secs.to_string())
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (&self.data, self.header.kind()) {
            (EventData::Unknown, Some(kind)) => kind.name(),
            _ => self.kind().name(),
        };
        writeln!(f, "# at {}", self.header.offset)?;
        write!(
            f,
            "# {} {} - server ID: {}, end_log_pos: {}",
            format_timestamp(self.header.timestamp),
            name,
            self.header.server_id,
            self.header.end_offset
        )?;

        match &self.data {
            EventData::Query(q) => write!(
                f,
                ", thread_id: {}, exec_time: {}, error_code: {}\n{};",
                q.thread_id,
                q.exec_time,
                q.error_code,
                q.query_text()
            ),
            EventData::IntVar(v) => write!(f, "\nSET {} = {};", v.variable.ident(), v.value),
            EventData::UserVar(v) => write!(f, "\nSET @`{}` = {};", v.name, v.value),
            EventData::Rotate(r) => write!(f, ", next: {}:{}", r.next_file, r.next_position),
            EventData::Xid(x) => write!(f, ", xid: {}", x.xid),
            _ => Ok(()),
        }
    }
}
