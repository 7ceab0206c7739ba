//! Binary and textual log fixtures.
//!
//! [`BinlogBuilder`] assembles a byte-exact binary log: the signature and a
//! sequence of records whose `end_log_pos` fields chain correctly.
//! [`TextLogBuilder`] renders the same kind of log the way `mysqlbinlog`
//! prints it.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Binary log signature.
pub const MAGIC: [u8; 4] = [0xfe, 0x62, 0x69, 0x6e];

/// Length of the common record header.
pub const HEADER_LEN: usize = 19;

/// Record type codes used by the builders.
pub mod codes {
    /// Start (v3).
    pub const START_V3: u8 = 1;
    /// Query.
    pub const QUERY: u8 = 2;
    /// Stop.
    pub const STOP: u8 = 3;
    /// Rotate.
    pub const ROTATE: u8 = 4;
    /// Integer session variable.
    pub const INTVAR: u8 = 5;
    /// Random seeds.
    pub const RAND: u8 = 13;
    /// User variable.
    pub const USER_VAR: u8 = 14;
    /// Format description (v4 start).
    pub const FORMAT_DESCRIPTION: u8 = 15;
    /// Transaction commit.
    pub const XID: u8 = 16;
    /// Table map.
    pub const TABLE_MAP: u8 = 19;
}

/// Builds a binary log in memory.
///
/// ```
/// use replicant_testkit::BinlogBuilder;
///
/// let log = BinlogBuilder::new()
///     .format_description("5.1.41-log")
///     .query(2, "test", "BEGIN")
///     .xid(13)
///     .build();
/// assert_eq!(&log[..4], &[0xfe, 0x62, 0x69, 0x6e]);
/// ```
#[derive(Debug, Clone)]
pub struct BinlogBuilder {
    buf: Vec<u8>,
    server_id: u32,
    timestamp: u32,
}

impl Default for BinlogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BinlogBuilder {
    /// Starts a log holding only the signature.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: MAGIC.to_vec(),
            server_id: 1,
            timestamp: 1_267_531_631,
        }
    }

    /// Starts a log with no signature, for headerless sources.
    #[must_use]
    pub fn without_magic() -> Self {
        Self {
            buf: Vec::new(),
            ..Self::new()
        }
    }

    /// Sets the server id of subsequent records.
    #[must_use]
    pub fn server_id(mut self, server_id: u32) -> Self {
        self.server_id = server_id;
        self
    }

    /// Sets the timestamp of subsequent records.
    #[must_use]
    pub fn timestamp(mut self, timestamp: u32) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Offset at which the next record starts.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.buf.len() as u64
    }

    /// Appends a record with a correct `end_log_pos`.
    #[must_use]
    pub fn raw(self, type_code: u8, body: &[u8]) -> Self {
        let end = self.position() + (HEADER_LEN + body.len()) as u64;
        self.raw_with_end(type_code, body, end as u32)
    }

    /// Appends a record claiming an arbitrary `end_log_pos`.
    #[must_use]
    pub fn raw_with_end(mut self, type_code: u8, body: &[u8], end_log_pos: u32) -> Self {
        let size = (HEADER_LEN + body.len()) as u32;
        self.buf.extend_from_slice(&self.timestamp.to_le_bytes());
        self.buf.push(type_code);
        self.buf.extend_from_slice(&self.server_id.to_le_bytes());
        self.buf.extend_from_slice(&size.to_le_bytes());
        self.buf.extend_from_slice(&end_log_pos.to_le_bytes());
        self.buf.extend_from_slice(&0u16.to_le_bytes());
        self.buf.extend_from_slice(body);
        self
    }

    /// Appends raw bytes with no framing.
    #[must_use]
    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Appends a v3 start record.
    #[must_use]
    pub fn start_v3(self, server_version: &str) -> Self {
        let body = start_body(3, server_version, self.timestamp);
        self.raw(codes::START_V3, &body)
    }

    /// Appends a format description record.
    #[must_use]
    pub fn format_description(self, server_version: &str) -> Self {
        let mut body = start_body(4, server_version, self.timestamp);
        body.push(HEADER_LEN as u8);
        body.extend_from_slice(&[56, 13, 0, 8, 0, 18, 0, 4, 4, 4, 4, 18, 0, 0, 84, 0, 4, 26, 8]);
        self.raw(codes::FORMAT_DESCRIPTION, &body)
    }

    /// Appends a query record with no status variables.
    #[must_use]
    pub fn query(self, thread_id: u32, database: &str, sql: &str) -> Self {
        self.query_with_status(thread_id, database, sql, &[])
    }

    /// Appends a query record with a raw status variable block.
    #[must_use]
    pub fn query_with_status(self, thread_id: u32, database: &str, sql: &str, status: &[u8]) -> Self {
        let mut body = Vec::new();
        body.extend_from_slice(&thread_id.to_le_bytes());
        body.extend_from_slice(&0u32.to_le_bytes());
        body.push(database.len() as u8);
        body.extend_from_slice(&0u16.to_le_bytes());
        body.extend_from_slice(&(status.len() as u16).to_le_bytes());
        body.extend_from_slice(status);
        body.extend_from_slice(database.as_bytes());
        body.push(0);
        body.extend_from_slice(sql.as_bytes());
        self.raw(codes::QUERY, &body)
    }

    /// Appends an integer session variable record (1 = `LAST_INSERT_ID`,
    /// 2 = `INSERT_ID`).
    #[must_use]
    pub fn intvar(self, variable: u8, value: u64) -> Self {
        let mut body = vec![variable];
        body.extend_from_slice(&value.to_le_bytes());
        self.raw(codes::INTVAR, &body)
    }

    /// Appends a random seed record.
    #[must_use]
    pub fn rand(self, seed1: u64, seed2: u64) -> Self {
        let mut body = seed1.to_le_bytes().to_vec();
        body.extend_from_slice(&seed2.to_le_bytes());
        self.raw(codes::RAND, &body)
    }

    /// Appends a user variable record holding SQL `NULL`.
    #[must_use]
    pub fn user_var_null(self, name: &str) -> Self {
        let mut body = user_var_name(name);
        body.push(1);
        self.raw(codes::USER_VAR, &body)
    }

    /// Appends a user variable record with an integer value.
    #[must_use]
    pub fn user_var_int(self, name: &str, value: i64) -> Self {
        self.user_var(name, 2, 0, &value.to_le_bytes())
    }

    /// Appends a user variable record with a real value.
    #[must_use]
    pub fn user_var_real(self, name: &str, value: f64) -> Self {
        self.user_var(name, 1, 0, &value.to_le_bytes())
    }

    /// Appends a user variable record with a string value.
    #[must_use]
    pub fn user_var_text(self, name: &str, charset: u32, value: &[u8]) -> Self {
        self.user_var(name, 0, charset, value)
    }

    fn user_var(self, name: &str, type_tag: u8, charset: u32, value: &[u8]) -> Self {
        let mut body = user_var_name(name);
        body.push(0);
        body.push(type_tag);
        body.extend_from_slice(&charset.to_le_bytes());
        body.extend_from_slice(&(value.len() as u32).to_le_bytes());
        body.extend_from_slice(value);
        self.raw(codes::USER_VAR, &body)
    }

    /// Appends a rotate record.
    #[must_use]
    pub fn rotate(self, next_position: u64, next_file: &str) -> Self {
        let mut body = next_position.to_le_bytes().to_vec();
        body.extend_from_slice(next_file.as_bytes());
        self.raw(codes::ROTATE, &body)
    }

    /// Appends a transaction commit record.
    #[must_use]
    pub fn xid(self, xid: u64) -> Self {
        self.raw(codes::XID, &xid.to_le_bytes())
    }

    /// Appends a stop record.
    #[must_use]
    pub fn stop(self) -> Self {
        self.raw(codes::STOP, &[])
    }

    /// Returns the log bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.buf
    }

    /// Writes the log into a fresh temporary directory.
    pub fn write_temp(self, file_name: &str) -> TempLog {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let path = dir.path().join(file_name);
        std::fs::write(&path, self.buf).expect("Failed to write binary log");
        TempLog { dir, path }
    }
}

fn start_body(binlog_version: u16, server_version: &str, created: u32) -> Vec<u8> {
    let mut version = [0u8; 50];
    let n = server_version.len().min(version.len());
    version[..n].copy_from_slice(&server_version.as_bytes()[..n]);

    let mut body = binlog_version.to_le_bytes().to_vec();
    body.extend_from_slice(&version);
    body.extend_from_slice(&created.to_le_bytes());
    body
}

fn user_var_name(name: &str) -> Vec<u8> {
    let mut body = (name.len() as u32).to_le_bytes().to_vec();
    body.extend_from_slice(name.as_bytes());
    body
}

/// A log file in a temporary directory, removed on drop.
#[derive(Debug)]
pub struct TempLog {
    dir: TempDir,
    path: PathBuf,
}

impl TempLog {
    /// Path of the log file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The containing directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}

/// Renders `mysqlbinlog`-style text.
///
/// Offsets are assigned from a running position; each event advances it by
/// the size given to the builder method.
#[derive(Debug, Clone)]
pub struct TextLogBuilder {
    out: String,
    position: u64,
    server_id: u32,
    stamp: String,
}

impl Default for TextLogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLogBuilder {
    /// Starts a dump with the usual preamble and `/*!*/;` delimiter.
    #[must_use]
    pub fn new() -> Self {
        let mut out = String::new();
        out.push_str("/*!40019 SET @@session.max_insert_delayed_threads=0*/;\n");
        out.push_str("/*!50003 SET @OLD_COMPLETION_TYPE=@@COMPLETION_TYPE,COMPLETION_TYPE=0*/;\n");
        out.push_str("DELIMITER /*!*/;\n");
        Self {
            out,
            position: 4,
            server_id: 1,
            stamp: "100302 13:07:11".to_string(),
        }
    }

    /// Offset of the next event.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Sets the `yymmdd hh:mm:ss` stamp of subsequent events.
    #[must_use]
    pub fn stamp(mut self, stamp: &str) -> Self {
        self.stamp = stamp.to_string();
        self
    }

    fn head(&mut self, size: u64, type_text: &str) {
        let end = self.position + size;
        self.out.push_str(&format!(
            "# at {}\n#{} server id {}  end_log_pos {} \t{}\n",
            self.position, self.stamp, self.server_id, end, type_text
        ));
        self.position = end;
    }

    /// Appends a start event of the given binlog version.
    #[must_use]
    pub fn start(mut self, size: u64, binlog_version: u16, server_version: &str) -> Self {
        let created = self.stamp.clone();
        self.head(
            size,
            &format!("Start: binlog v {binlog_version}, server v {server_version} created {created} at startup"),
        );
        self.out.push_str("ROLLBACK/*!*/;\n");
        self
    }

    /// Appends a query event.
    #[must_use]
    pub fn query(mut self, size: u64, thread_id: u32, database: Option<&str>, sql: &str) -> Self {
        self.head(
            size,
            &format!("Query\tthread_id={thread_id}\texec_time=0\terror_code=0"),
        );
        if let Some(db) = database {
            self.out.push_str(&format!("use {db}/*!*/;\n"));
        }
        self.out.push_str("SET TIMESTAMP=1267531631/*!*/;\n");
        self.out.push_str(sql);
        self.out.push_str("\n/*!*/;\n");
        self
    }

    /// Appends an `INSERT_ID` or `LAST_INSERT_ID` event.
    #[must_use]
    pub fn intvar(mut self, size: u64, name: &str, value: u64) -> Self {
        self.head(size, "Intvar");
        self.out.push_str(&format!("SET {name}={value}/*!*/;\n"));
        self
    }

    /// Appends a user variable event; `value` is rendered verbatim.
    #[must_use]
    pub fn user_var(mut self, size: u64, name: &str, value: &str) -> Self {
        self.head(size, "User_var");
        self.out.push_str(&format!("SET @`{name}`:={value}/*!*/;\n"));
        self
    }

    /// Appends a commit event.
    #[must_use]
    pub fn xid(mut self, size: u64, xid: u64) -> Self {
        self.head(size, &format!("Xid = {xid}"));
        self.out.push_str("COMMIT/*!*/;\n");
        self
    }

    /// Appends an event of a type with no recovered fields.
    #[must_use]
    pub fn other(mut self, size: u64, type_text: &str) -> Self {
        self.head(size, type_text);
        self
    }

    /// Appends the closing lines and returns the dump.
    #[must_use]
    pub fn build(mut self) -> String {
        self.out.push_str("DELIMITER ;\n# End of log file\n");
        self.out.push_str("ROLLBACK /* added by mysqlbinlog */;\n");
        self.out
    }
}
