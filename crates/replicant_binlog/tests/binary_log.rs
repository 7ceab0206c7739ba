//! End-to-end decoding of binary logs built with the testkit.

use proptest::prelude::*;
use replicant_binlog::{
    open, open_file, BinlogError, BinlogReader, Event, EventData, EventKind, IntVarKind,
    ReaderConfig, UserVarValue,
};
use replicant_source::{MemorySource, StreamSource};
use replicant_testkit::prelude::*;

fn decode_all(log: Vec<u8>) -> Result<Vec<Event>, BinlogError> {
    BinlogReader::from_source(MemorySource::new(log))?
        .events()
        .collect()
}

fn transaction() -> BinlogBuilder {
    BinlogBuilder::new()
        .format_description("5.1.41-log")
        .query(2, "test", "BEGIN")
        .intvar(2, 1)
        .user_var_int("a", 12)
        .query(2, "test", "insert into t1 values (null)")
        .xid(13)
}

#[test]
fn decodes_a_transaction() {
    let events = decode_all(transaction().build()).unwrap();
    let kinds: Vec<_> = events.iter().map(Event::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::FormatDescription,
            EventKind::Query,
            EventKind::IntVar,
            EventKind::UserVar,
            EventKind::Query,
            EventKind::Xid,
        ]
    );

    match &events[0].data {
        EventData::FormatDescription(fde) => {
            assert_eq!(fde.binlog_version, 4);
            assert_eq!(fde.server_version, "5.1.41-log");
            assert_eq!(fde.header_length, 19);
        }
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[2].data {
        EventData::IntVar(v) => assert_eq!((v.variable, v.value), (IntVarKind::InsertId, 1)),
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[3].data {
        EventData::UserVar(v) => {
            assert_eq!(v.name, "a");
            assert_eq!(v.value, UserVarValue::Integer(12));
        }
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[4].data {
        EventData::Query(q) => {
            assert_eq!(q.database, "test");
            assert_eq!(q.query_text(), "insert into t1 values (null)");
        }
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[5].data {
        EventData::Xid(x) => assert_eq!(x.xid, 13),
        other => panic!("unexpected payload {other:?}"),
    }
}

#[test]
fn events_are_contiguous() {
    let log = transaction().build();
    let len = log.len() as u64;
    let events = decode_all(log).unwrap();

    let mut expected = 4;
    for event in &events {
        assert_eq!(event.start_offset(), expected);
        assert_eq!(event.end_offset(), event.start_offset() + u64::from(event.size()));
        expected = event.end_offset();
    }
    assert_eq!(expected, len);
}

#[test]
fn remembers_format_description() {
    let reader = BinlogReader::from_source(MemorySource::new(transaction().build())).unwrap();
    let mut events = reader.events();
    assert!(events.format_description().is_none());
    events.next().unwrap().unwrap();
    let fde = events.format_description().unwrap();
    assert_eq!(fde.kind(), EventKind::FormatDescription);
    assert_eq!(events.count(), 5);
}

#[test]
fn decodes_session_and_control_events() {
    let log = BinlogBuilder::new()
        .start_v3("4.0.23-log")
        .rand(11, 22)
        .user_var_null("n")
        .user_var_real("r", 2.5)
        .user_var_text("s", 33, b"abc")
        .rotate(4, "master-bin.000002")
        .stop()
        .build();
    let events = decode_all(log).unwrap();

    assert!(matches!(&events[0].data, EventData::Start(s) if s.binlog_version == 3));
    assert!(matches!(&events[1].data, EventData::Rand(r) if (r.seed1, r.seed2) == (11, 22)));
    assert!(matches!(&events[2].data, EventData::UserVar(v) if v.value.is_null()));
    assert!(matches!(&events[3].data, EventData::UserVar(v) if v.value == UserVarValue::Real(2.5)));
    assert!(matches!(
        &events[4].data,
        EventData::UserVar(v) if v.value == UserVarValue::Text { charset: 33, bytes: b"abc".to_vec() }
    ));
    match &events[5].data {
        EventData::Rotate(r) => {
            assert_eq!(r.next_position, 4);
            assert_eq!(r.next_file, "master-bin.000002");
        }
        other => panic!("unexpected payload {other:?}"),
    }
    assert_eq!(events[6].kind(), EventKind::Stop);
}

#[test]
fn header_only_and_unknown_kinds() {
    let log = BinlogBuilder::new()
        .raw(codes::TABLE_MAP, &[1, 2, 3, 4, 5, 6, 7, 8])
        .raw(200, &[0xaa; 3])
        .xid(1)
        .build();
    let events = decode_all(log).unwrap();

    assert_eq!(events[0].kind(), EventKind::TableMap);
    assert_eq!(events[1].kind(), EventKind::Unknown);
    assert_eq!(events[1].header.type_code, 200);
    assert_eq!(events[2].kind(), EventKind::Xid);
}

#[test]
fn rejects_bad_magic() {
    let err = BinlogReader::from_source(MemorySource::new(b"\xfebix".to_vec())).unwrap_err();
    assert!(matches!(err, BinlogError::BadMagic { ref found } if found == b"\xfebix"));

    let err = BinlogReader::from_source(MemorySource::new(Vec::new())).unwrap_err();
    assert!(matches!(err, BinlogError::BadMagic { ref found } if found.is_empty()));
}

#[test]
fn truncated_record_is_an_error() {
    let mut log = transaction().build();
    log.truncate(log.len() - 3);
    let results: Vec<_> = BinlogReader::from_source(MemorySource::new(log))
        .unwrap()
        .events()
        .collect();

    assert_eq!(results.len(), 6);
    assert!(results[..5].iter().all(Result::is_ok));
    assert!(matches!(
        results[5],
        Err(BinlogError::TruncatedRecord { expected: 8, actual: 5, .. })
    ));
}

#[test]
fn partial_header_ends_the_stream() {
    let log = BinlogBuilder::new().xid(1).bytes(&[0u8; 7]).build();
    let events = decode_all(log).unwrap();
    assert_eq!(events.len(), 1);
}

#[test]
fn catalog_status_variable_is_unsupported() {
    let log = BinlogBuilder::new()
        .xid(1)
        .query_with_status(1, "", "BEGIN", &[2, 3, b's', b't', b'd', 0])
        .xid(2)
        .build();
    let mut events = BinlogReader::from_source(MemorySource::new(log))
        .unwrap()
        .events();

    assert!(events.next().unwrap().is_ok());
    assert!(matches!(
        events.next(),
        Some(Err(BinlogError::UnsupportedStatusVariable { offset: 31, code: 2 }))
    ));
    assert!(events.next().is_none());
}

#[test]
fn unknown_status_variable_is_fatal() {
    let log = BinlogBuilder::new()
        .query_with_status(1, "", "BEGIN", &[42])
        .build();
    assert!(matches!(
        decode_all(log),
        Err(BinlogError::BadStatusVariable { offset: 4, code: 42 })
    ));
}

#[test]
fn malformed_body_reports_kind_and_offset() {
    let log = BinlogBuilder::new().raw(codes::XID, &[1, 2, 3]).build();
    match decode_all(log) {
        Err(BinlogError::MalformedEvent { offset, kind, .. }) => {
            assert_eq!(offset, 4);
            assert_eq!(kind, EventKind::Xid);
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn verify_positions_rejects_gaps() {
    let log = BinlogBuilder::new().xid(1).raw_with_end(codes::XID, &9u64.to_le_bytes(), 999).build();

    let lenient = decode_all(log.clone()).unwrap();
    assert_eq!(lenient.len(), 2);

    let config = ReaderConfig::new().verify_positions(true);
    let results: Vec<_> = BinlogReader::with_config(MemorySource::new(log), config)
        .unwrap()
        .events()
        .collect();
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(BinlogError::PositionMismatch { offset: 31, claimed: 972, .. })
    ));
}

#[test]
fn oversized_record_is_rejected() {
    let log = BinlogBuilder::new().query(1, "test", &"x".repeat(200)).build();
    let config = ReaderConfig::new().max_event_size(128);
    let mut events = BinlogReader::with_config(MemorySource::new(log), config)
        .unwrap()
        .events();
    assert!(matches!(
        events.next(),
        Some(Err(BinlogError::EventTooLarge { max: 128, .. }))
    ));
}

#[test]
fn reads_from_a_stream() {
    let log = transaction().build();
    let reader = BinlogReader::from_source(StreamSource::new(log.as_slice())).unwrap();
    let events: Vec<_> = reader.events().collect::<Result<_, _>>().unwrap();
    assert_eq!(events.len(), 6);
}

#[test]
fn opens_files_by_locator() {
    let log = transaction().write_temp("master-bin.000001");
    let path = log.path().to_str().unwrap().to_string();

    let by_path = open(&path).unwrap().events().count();
    let by_scheme = open(&format!("file:{path}")).unwrap().events().count();
    let direct = open_file(log.path()).unwrap().events().count();
    assert_eq!((by_path, by_scheme, direct), (6, 6, 6));
}

#[test]
fn unknown_scheme_and_missing_file() {
    assert!(matches!(
        open("mysql://localhost/binlog"),
        Err(BinlogError::UnrecognizedScheme { ref scheme }) if scheme == "mysql"
    ));

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.000001");
    assert!(matches!(
        open(missing.to_str().unwrap()),
        Err(BinlogError::Source(_))
    ));
}

#[test]
fn stubs_can_be_decoded_later() {
    let stubs: Vec<_> = BinlogReader::from_source(MemorySource::new(transaction().build()))
        .unwrap()
        .stubs()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(stubs.len(), 6);
    let xid = stubs[5].decode().unwrap();
    assert!(matches!(xid.data, EventData::Xid(ref x) if x.xid == 13));
    assert_eq!(stubs[4].next_offset(), u64::from(stubs[5].header.offset));
}

proptest! {
    #[test]
    fn decoding_is_deterministic(ids in prop::collection::vec(any::<u64>(), 0..12)) {
        let log = ids
            .iter()
            .fold(BinlogBuilder::new(), |b, id| b.query(1, "db", &format!("select {id}")).xid(*id))
            .build();
        let first = decode_all(log.clone()).unwrap();
        let second = decode_all(log).unwrap();
        prop_assert_eq!(first.len(), ids.len() * 2);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn arbitrary_bytes_never_panic(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let log = BinlogBuilder::new().bytes(&body).build();
        for result in BinlogReader::from_source(MemorySource::new(log)).unwrap().events() {
            if result.is_err() {
                break;
            }
        }
    }
}
