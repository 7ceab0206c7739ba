//! Decoders for session-context events: intvar, rand and user variables.

use super::BodyResult;
use crate::event::{EventData, IntVarEvent, IntVarKind, RandEvent, UserVarEvent, UserVarValue};
use replicant_codec::{CodecError, FieldDecoder};

const STRING_RESULT: u8 = 0;
const REAL_RESULT: u8 = 1;
const INT_RESULT: u8 = 2;

pub(super) fn int_var(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let (variable, value) = dec.read::<(u8, u64)>()?;
    let variable = IntVarKind::from_byte(variable).ok_or_else(|| {
        CodecError::invalid_field(0, format!("intvar variable {variable} out of range"))
    })?;
    Ok(EventData::IntVar(IntVarEvent { variable, value }))
}

pub(super) fn rand(body: &[u8]) -> BodyResult<EventData> {
    let (seed1, seed2) = FieldDecoder::new(body).read::<(u64, u64)>()?;
    Ok(EventData::Rand(RandEvent { seed1, seed2 }))
}

pub(super) fn user_var(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let name_len = dec.read::<u32>()? as usize;
    let name = String::from_utf8_lossy(dec.read_bytes(name_len)?).into_owned();

    if dec.read::<bool>()? {
        return Ok(EventData::UserVar(UserVarEvent {
            name,
            value: UserVarValue::Null,
        }));
    }

    let (type_tag, charset, value_len) = dec.read::<(u8, u32, u32)>()?;
    let raw = dec.read_bytes(value_len as usize)?;
    let value = match type_tag {
        STRING_RESULT => UserVarValue::Text {
            charset,
            bytes: raw.to_vec(),
        },
        REAL_RESULT => UserVarValue::Real(FieldDecoder::new(raw).read::<f64>()?),
        INT_RESULT => UserVarValue::Integer(FieldDecoder::new(raw).read::<i64>()?),
        _ => UserVarValue::Unsupported { type_tag },
    };

    Ok(EventData::UserVar(UserVarEvent { name, value }))
}
