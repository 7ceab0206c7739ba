//! Decoders for log-structure events: start, format description, rotate
//! and xid.

use super::BodyResult;
use crate::event::{EventData, FormatDescriptionEvent, RotateEvent, StartEvent, XidEvent};
use replicant_codec::FieldDecoder;

const SERVER_VERSION_LEN: usize = 50;

type StartLayout = (u16, [u8; SERVER_VERSION_LEN], u32);

fn server_version(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

pub(super) fn start(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let (binlog_version, version, created) = dec.read::<StartLayout>()?;
    Ok(EventData::Start(StartEvent {
        binlog_version,
        server_version: server_version(&version),
        created,
    }))
}

pub(super) fn format_description(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let (binlog_version, version, created) = dec.read::<StartLayout>()?;
    let header_length = dec.read::<u8>()?;
    Ok(EventData::FormatDescription(FormatDescriptionEvent {
        binlog_version,
        server_version: server_version(&version),
        created,
        header_length,
        post_header_lengths: dec.rest().to_vec(),
    }))
}

pub(super) fn rotate(body: &[u8]) -> BodyResult<EventData> {
    let mut dec = FieldDecoder::new(body);
    let next_position = dec.read::<u64>()?;
    let next_file = String::from_utf8_lossy(dec.rest()).into_owned();
    Ok(EventData::Rotate(RotateEvent {
        next_position,
        next_file,
    }))
}

pub(super) fn xid(body: &[u8]) -> BodyResult<EventData> {
    let xid = FieldDecoder::new(body).read::<u64>()?;
    Ok(EventData::Xid(XidEvent { xid }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_body(version: &str) -> Vec<u8> {
        let mut body = 4u16.to_le_bytes().to_vec();
        let mut padded = [0u8; SERVER_VERSION_LEN];
        padded[..version.len()].copy_from_slice(version.as_bytes());
        body.extend_from_slice(&padded);
        body.extend_from_slice(&1_267_447_992u32.to_le_bytes());
        body
    }

    #[test]
    fn start_strips_padding() {
        let data = start(&start_body("5.1.41-log")).unwrap();
        assert_eq!(
            data,
            EventData::Start(StartEvent {
                binlog_version: 4,
                server_version: "5.1.41-log".into(),
                created: 1_267_447_992,
            })
        );
    }

    #[test]
    fn format_description_keeps_post_header_lengths() {
        let mut body = start_body("5.5.8");
        body.push(19);
        body.extend_from_slice(&[56, 11, 0, 8, 0]);
        match format_description(&body).unwrap() {
            EventData::FormatDescription(fde) => {
                assert_eq!(fde.server_version, "5.5.8");
                assert_eq!(fde.header_length, 19);
                assert_eq!(fde.post_header_lengths, vec![56, 11, 0, 8, 0]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn format_description_needs_header_length() {
        assert!(format_description(&start_body("5.5.8")).is_err());
    }

    #[test]
    fn rotate_reads_file_name() {
        let mut body = 4u64.to_le_bytes().to_vec();
        body.extend_from_slice(b"master-bin.000002");
        assert_eq!(
            rotate(&body).unwrap(),
            EventData::Rotate(RotateEvent {
                next_position: 4,
                next_file: "master-bin.000002".into(),
            })
        );
    }
}
