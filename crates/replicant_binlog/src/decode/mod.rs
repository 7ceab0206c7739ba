//! Body decoders.
//!
//! Decoding is a pure function of an [`EventStub`]: the type code selects
//! one entry of a closed table of decoder functions, and the entry turns
//! the body bytes into an [`EventData`]. Kinds whose payload is not
//! modelled get a header-only decoder. Type codes past the end of the
//! table decode to [`EventData::Unknown`].

mod control;
mod query;
mod session;

use crate::error::{BinlogError, BinlogResult};
use crate::event::{Event, EventData};
use crate::kind::EventKind;
use crate::stub::EventStub;
use replicant_codec::CodecError;
use tracing::debug;

/// Failure inside a body decoder, before the record offset is known.
#[derive(Debug)]
pub(crate) enum BodyError {
    Codec(CodecError),
    BadStatusVariable(u8),
    UnsupportedStatusVariable(u8),
}

impl From<CodecError> for BodyError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}

pub(crate) type BodyResult<T> = Result<T, BodyError>;

type DecodeFn = fn(&[u8]) -> BodyResult<EventData>;

macro_rules! header_only {
    ($($name:ident => $variant:ident),+ $(,)?) => {
        $(
            fn $name(_body: &[u8]) -> BodyResult<EventData> {
                Ok(EventData::$variant)
            }
        )+
    };
}

header_only! {
    unknown => Unknown,
    stop => Stop,
    load => Load,
    slave => Slave,
    create_file => CreateFile,
    append_block => AppendBlock,
    exec_load => ExecLoad,
    delete_file => DeleteFile,
    new_load => NewLoad,
    begin_load_query => BeginLoadQuery,
    execute_load_query => ExecuteLoadQuery,
    table_map => TableMap,
    pre_ga_write_rows => PreGaWriteRows,
    pre_ga_update_rows => PreGaUpdateRows,
    pre_ga_delete_rows => PreGaDeleteRows,
    write_rows => WriteRows,
    update_rows => UpdateRows,
    delete_rows => DeleteRows,
    incident => Incident,
    heartbeat => Heartbeat,
    ignorable => Ignorable,
    rows_query => RowsQuery,
}

/// Decoders indexed by type code.
static DECODERS: [DecodeFn; EventKind::COUNT] = [
    unknown,
    control::start,
    query::query,
    stop,
    control::rotate,
    session::int_var,
    load,
    slave,
    create_file,
    append_block,
    exec_load,
    delete_file,
    new_load,
    session::rand,
    session::user_var,
    control::format_description,
    control::xid,
    begin_load_query,
    execute_load_query,
    table_map,
    pre_ga_write_rows,
    pre_ga_update_rows,
    pre_ga_delete_rows,
    write_rows,
    update_rows,
    delete_rows,
    incident,
    heartbeat,
    ignorable,
    rows_query,
];

/// Decodes the body of `stub` into an event.
///
/// # Errors
///
/// - [`BinlogError::MalformedEvent`] if the body is shorter than its layout
///   requires or holds an out-of-range field
/// - [`BinlogError::BadStatusVariable`] or
///   [`BinlogError::UnsupportedStatusVariable`] for query events carrying
///   status variables that cannot be decoded
pub fn decode(stub: &EventStub) -> BinlogResult<Event> {
    let header = stub.header;
    let Some(decoder) = DECODERS.get(usize::from(header.type_code)) else {
        debug!(
            offset = header.offset,
            type_code = header.type_code,
            "type code outside the event table"
        );
        return Ok(Event::new(header, EventData::Unknown));
    };

    let data = decoder(&stub.body).map_err(|err| {
        let kind = EventKind::from_code(header.type_code).unwrap_or(EventKind::Unknown);
        match err {
            BodyError::Codec(source) => BinlogError::MalformedEvent {
                offset: header.offset,
                kind,
                source,
            },
            BodyError::BadStatusVariable(code) => BinlogError::BadStatusVariable {
                offset: header.offset,
                code,
            },
            BodyError::UnsupportedStatusVariable(code) => {
                BinlogError::UnsupportedStatusVariable {
                    offset: header.offset,
                    code,
                }
            }
        }
    })?;

    Ok(Event::new(header, data))
}

impl EventStub {
    /// Decodes this stub. See [`decode`].
    ///
    /// # Errors
    ///
    /// Same as [`decode`].
    pub fn decode(&self) -> BinlogResult<Event> {
        decode(self)
    }
}
