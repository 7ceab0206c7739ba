//! Recovering events from `mysqlbinlog` output.

use replicant_binlog::text::TextLogReader;
use replicant_binlog::{BinlogError, Event, EventData, EventKind, IntVarKind, UserVarValue};
use replicant_testkit::TextLogBuilder;

fn read(dump: &str) -> Result<Vec<Event>, BinlogError> {
    TextLogReader::new(dump.as_bytes()).events().collect()
}

fn session() -> TextLogBuilder {
    TextLogBuilder::new()
        .stamp("100302 13:06:32")
        .start(102, 4, "5.1.41-log")
        .stamp("100302 13:07:11")
        .query(68, 2, None, "BEGIN")
        .intvar(28, "INSERT_ID", 1)
        .user_var(45, "a", "12")
        .query(105, 2, Some("test"), "insert into t1\nvalues (null)")
        .other(44, "Table_map: `test`.`t1` mapped to number 15")
        .xid(27, 13)
}

#[test]
fn recovers_every_event() {
    let events = read(&session().build()).unwrap();
    let kinds: Vec<_> = events.iter().map(Event::kind).collect();
    assert_eq!(
        kinds,
        vec![
            EventKind::FormatDescription,
            EventKind::Query,
            EventKind::IntVar,
            EventKind::UserVar,
            EventKind::Query,
            EventKind::Unknown,
            EventKind::Xid,
        ]
    );
    assert_eq!(events[5].header.type_code, EventKind::TableMap.code());
}

#[test]
fn offsets_chain_from_four() {
    let builder = session();
    let end = builder.position();
    let events = read(&builder.build()).unwrap();

    let mut expected = 4;
    for event in &events {
        assert_eq!(event.start_offset(), expected);
        assert_eq!(u64::from(event.size()), event.end_offset() - event.start_offset());
        assert_eq!(event.header.flags, 0);
        expected = event.end_offset();
    }
    assert_eq!(expected, end);
}

#[test]
fn fields_match_the_rendering() {
    let events = read(&session().build()).unwrap();

    // 2010-03-02 13:07:11 UTC
    assert_eq!(events[1].header.timestamp, 1_267_535_231);
    assert_eq!(events[1].server_id(), 1);

    match &events[4].data {
        EventData::Query(q) => {
            assert_eq!(q.database, "test");
            assert_eq!(q.thread_id, 2);
            assert_eq!(q.query_text(), "insert into t1\nvalues (null)");
        }
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[2].data {
        EventData::IntVar(v) => assert_eq!((v.variable, v.value), (IntVarKind::InsertId, 1)),
        other => panic!("unexpected payload {other:?}"),
    }
    match &events[3].data {
        EventData::UserVar(v) => assert_eq!((v.name.as_str(), &v.value), ("a", &UserVarValue::Integer(12))),
        other => panic!("unexpected payload {other:?}"),
    }
    assert!(matches!(events[6].data, EventData::Xid(ref x) if x.xid == 13));
}

#[test]
fn old_start_events_stay_start() {
    let events = read(&TextLogBuilder::new().start(98, 3, "4.0.23-log").build()).unwrap();
    assert!(matches!(events[0].data, EventData::Start(ref s) if s.server_version == "4.0.23-log"));
}

#[test]
fn text_and_binary_render_alike() {
    let events = read(&session().build()).unwrap();
    let rendered = events[6].to_string();
    assert!(rendered.starts_with("# at 396\n"));
    assert!(rendered.contains("Xid - server ID: 1, end_log_pos: 423"));
}

#[test]
fn truncated_query_is_an_error() {
    let mut dump = session().build();
    let cut = dump.find("insert into t1").unwrap();
    dump.truncate(cut + "insert into t1\n".len());
    let results: Vec<_> = TextLogReader::new(dump.as_bytes()).events().collect();

    assert!(results[..4].iter().all(Result::is_ok));
    assert!(matches!(
        results.last(),
        Some(Err(BinlogError::UnexpectedEndOfText { .. }))
    ));
}

#[test]
fn garbage_type_line_is_reported_with_line_number() {
    let dump = TextLogBuilder::new().xid(27, 1).build().replace("#100302", "#garbage");
    match read(&dump) {
        Err(BinlogError::UnrecognizedFormat { line_number, line }) => {
            assert_eq!(line_number, 5);
            assert!(line.starts_with("#garbage"));
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn empty_dump_has_no_events() {
    assert!(read("").unwrap().is_empty());
    assert!(read(&TextLogBuilder::new().build()).unwrap().is_empty());
}
