//! Event kinds and their type codes.

use std::fmt;

/// Kind of a binary log event, identified by the type code in its header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EventKind {
    /// Unknown or unsupported event.
    Unknown = 0,
    /// Start event (binlog format v1-v3).
    Start = 1,
    /// Statement executed on the source.
    Query = 2,
    /// Server shutdown marker.
    Stop = 3,
    /// Switch to the next binary log file.
    Rotate = 4,
    /// Integer session variable (`LAST_INSERT_ID`, `INSERT_ID`).
    IntVar = 5,
    /// Legacy `LOAD DATA`.
    Load = 6,
    /// Reserved, never written.
    Slave = 7,
    /// Legacy `LOAD DATA` file creation.
    CreateFile = 8,
    /// `LOAD DATA` file block.
    AppendBlock = 9,
    /// Legacy `LOAD DATA` execution.
    ExecLoad = 10,
    /// `LOAD DATA` file removal.
    DeleteFile = 11,
    /// Legacy `LOAD DATA` with multi-character separators.
    NewLoad = 12,
    /// Random seed for `RAND()`.
    Rand = 13,
    /// User variable assignment.
    UserVar = 14,
    /// Format description (binlog format v4).
    FormatDescription = 15,
    /// Transaction commit marker.
    Xid = 16,
    /// Start of a `LOAD DATA` file.
    BeginLoadQuery = 17,
    /// `LOAD DATA` execution.
    ExecuteLoadQuery = 18,
    /// Table id to table definition mapping.
    TableMap = 19,
    /// Pre-GA row insert.
    PreGaWriteRows = 20,
    /// Pre-GA row update.
    PreGaUpdateRows = 21,
    /// Pre-GA row delete.
    PreGaDeleteRows = 22,
    /// Row insert.
    WriteRows = 23,
    /// Row update.
    UpdateRows = 24,
    /// Row delete.
    DeleteRows = 25,
    /// Incident on the source that replicas should stop at.
    Incident = 26,
    /// Keep-alive sent to replicas.
    Heartbeat = 27,
    /// Event replicas may skip if they do not understand it.
    Ignorable = 28,
    /// Original statement of a row-based change.
    RowsQuery = 29,
}

impl EventKind {
    /// Number of type codes in the closed table (0 through 29).
    pub const COUNT: usize = 30;

    /// All kinds, indexed by type code.
    pub const ALL: [EventKind; Self::COUNT] = [
        Self::Unknown,
        Self::Start,
        Self::Query,
        Self::Stop,
        Self::Rotate,
        Self::IntVar,
        Self::Load,
        Self::Slave,
        Self::CreateFile,
        Self::AppendBlock,
        Self::ExecLoad,
        Self::DeleteFile,
        Self::NewLoad,
        Self::Rand,
        Self::UserVar,
        Self::FormatDescription,
        Self::Xid,
        Self::BeginLoadQuery,
        Self::ExecuteLoadQuery,
        Self::TableMap,
        Self::PreGaWriteRows,
        Self::PreGaUpdateRows,
        Self::PreGaDeleteRows,
        Self::WriteRows,
        Self::UpdateRows,
        Self::DeleteRows,
        Self::Incident,
        Self::Heartbeat,
        Self::Ignorable,
        Self::RowsQuery,
    ];

    /// Converts a type code to a kind.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code)).copied()
    }

    /// Returns the type code.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Returns the display name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Start => "Start",
            Self::Query => "Query",
            Self::Stop => "Stop",
            Self::Rotate => "Rotate",
            Self::IntVar => "Intvar",
            Self::Load => "Load",
            Self::Slave => "Slave",
            Self::CreateFile => "CreateFile",
            Self::AppendBlock => "AppendBlock",
            Self::ExecLoad => "ExecLoad",
            Self::DeleteFile => "DeleteFile",
            Self::NewLoad => "NewLoad",
            Self::Rand => "Rand",
            Self::UserVar => "Uservar",
            Self::FormatDescription => "FormatDescription",
            Self::Xid => "Xid",
            Self::BeginLoadQuery => "BeginLoadQuery",
            Self::ExecuteLoadQuery => "ExecuteLoadQuery",
            Self::TableMap => "TableMap",
            Self::PreGaWriteRows => "PreGaWriteRows",
            Self::PreGaUpdateRows => "PreGaUpdateRows",
            Self::PreGaDeleteRows => "PreGaDeleteRows",
            Self::WriteRows => "WriteRows",
            Self::UpdateRows => "UpdateRows",
            Self::DeleteRows => "DeleteRows",
            Self::Incident => "Incident",
            Self::Heartbeat => "Heartbeat",
            Self::Ignorable => "Ignorable",
            Self::RowsQuery => "RowsQuery",
        }
    }

    /// Resolves the type name printed by `mysqlbinlog` in its event header
    /// lines (`Query`, `User_var`, `Table_map`, ...).
    #[must_use]
    pub fn from_text_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Start" | "Start_v3" => Self::Start,
            "Query" => Self::Query,
            "Stop" => Self::Stop,
            "Rotate" => Self::Rotate,
            "Intvar" => Self::IntVar,
            "Load" => Self::Load,
            "Slave" => Self::Slave,
            "Create_file" => Self::CreateFile,
            "Append_block" => Self::AppendBlock,
            "Exec_load" => Self::ExecLoad,
            "Delete_file" => Self::DeleteFile,
            "New_load" => Self::NewLoad,
            "RAND" | "Rand" => Self::Rand,
            "User_var" => Self::UserVar,
            "Format_desc" => Self::FormatDescription,
            "Xid" => Self::Xid,
            "Begin_load_query" => Self::BeginLoadQuery,
            "Execute_load_query" => Self::ExecuteLoadQuery,
            "Table_map" => Self::TableMap,
            "Write_rows_event_old" => Self::PreGaWriteRows,
            "Update_rows_event_old" => Self::PreGaUpdateRows,
            "Delete_rows_event_old" => Self::PreGaDeleteRows,
            "Write_rows" => Self::WriteRows,
            "Update_rows" => Self::UpdateRows,
            "Delete_rows" => Self::DeleteRows,
            "Incident" => Self::Incident,
            "Heartbeat" => Self::Heartbeat,
            "Ignorable" => Self::Ignorable,
            "Rows_query" => Self::RowsQuery,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_table_index() {
        for (index, kind) in EventKind::ALL.iter().enumerate() {
            assert_eq!(usize::from(kind.code()), index);
        }
    }

    #[test]
    fn from_code_roundtrip() {
        for code in 0..30u8 {
            assert_eq!(EventKind::from_code(code).unwrap().code(), code);
        }
        assert_eq!(EventKind::from_code(30), None);
        assert_eq!(EventKind::from_code(255), None);
    }

    #[test]
    fn well_known_codes() {
        assert_eq!(EventKind::Query.code(), 2);
        assert_eq!(EventKind::FormatDescription.code(), 15);
        assert_eq!(EventKind::Xid.code(), 16);
        assert_eq!(EventKind::RowsQuery.code(), 29);
    }

    #[test]
    fn text_names() {
        assert_eq!(EventKind::from_text_name("Query"), Some(EventKind::Query));
        assert_eq!(EventKind::from_text_name("User_var"), Some(EventKind::UserVar));
        assert_eq!(EventKind::from_text_name("Table_map"), Some(EventKind::TableMap));
        assert_eq!(EventKind::from_text_name("Gtid"), None);
    }
}
