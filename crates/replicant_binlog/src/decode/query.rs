//! Query event decoder.

use super::{BodyError, BodyResult};
use crate::event::{EventData, QueryEvent, StatusVar};
use replicant_codec::FieldDecoder;

/// `thread_id, exec_time, db_len, error_code, status_vars_len`
type PostHeader = (u32, u32, u8, u16, u16);

const Q_CATALOG_CODE: u8 = 2;

pub(super) fn query(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let (thread_id, exec_time, db_len, error_code, status_len) = dec.read::<PostHeader>()?;

    let status_vars = status_vars(dec.read_bytes(usize::from(status_len))?)?;

    let database = String::from_utf8_lossy(dec.read_bytes(usize::from(db_len))?).into_owned();
    dec.skip(1)?;
    let query = dec.rest().to_vec();

    Ok(EventData::Query(QueryEvent {
        thread_id,
        exec_time,
        error_code,
        database,
        status_vars,
        query,
    }))
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Decodes the status variable block. A variable running past the end of
/// the block fails as a truncated field.
fn status_vars(block: &[u8]) -> BodyResult<Vec<StatusVar>> {
    let mut dec = FieldDecoder::new(block);
    let mut vars = Vec::new();

    while !dec.is_empty() {
        let var = match dec.read::<u8>()? {
            0 => StatusVar::Flags2(dec.read()?),
            1 => StatusVar::SqlMode(dec.read()?),
            Q_CATALOG_CODE => return Err(BodyError::UnsupportedStatusVariable(Q_CATALOG_CODE)),
            3 => {
                let (increment, offset) = dec.read::<(u16, u16)>()?;
                StatusVar::AutoIncrement { increment, offset }
            }
            4 => {
                let (client, connection, server) = dec.read::<(u16, u16, u16)>()?;
                StatusVar::Charset {
                    client,
                    connection,
                    server,
                }
            }
            5 => StatusVar::TimeZone(lossy(dec.read_length_prefixed()?)),
            6 => StatusVar::Catalog(lossy(dec.read_length_prefixed()?)),
            7 => StatusVar::LcTimeNames(dec.read()?),
            8 => StatusVar::CharsetDatabase(dec.read()?),
            9 => StatusVar::TableMapForUpdate(dec.read()?),
            10 => StatusVar::MasterDataWritten(dec.read()?),
            11 => {
                let user = lossy(dec.read_length_prefixed()?);
                let host = lossy(dec.read_length_prefixed()?);
                StatusVar::Invoker { user, host }
            }
            code => return Err(BodyError::BadStatusVariable(code)),
        };
        vars.push(var);
    }

    Ok(vars)
}
