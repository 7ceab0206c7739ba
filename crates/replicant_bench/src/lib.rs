//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use rand::Rng;
use replicant_testkit::{BinlogBuilder, UUID_POOL};

/// Generate a random SQL statement of roughly `len` bytes.
pub fn random_statement(len: usize) -> String {
    let mut rng = rand::thread_rng();
    let values: String = (0..len.saturating_sub(24))
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect();
    format!("insert into t values ('{values}')")
}

/// Generate a binary log of `transactions` query/intvar/xid groups.
pub fn generate_log(transactions: usize, statement_len: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut builder = BinlogBuilder::new().format_description("5.7.44-log");
    for xid in 0..transactions as u64 {
        builder = builder
            .query(rng.gen_range(1..64), "bench", "BEGIN")
            .intvar(2, rng.gen())
            .query(1, "bench", &random_statement(statement_len))
            .xid(xid);
    }
    builder.build()
}

/// Generate GTID set text with `ranges` random ranges per pooled server.
pub fn generate_gtid_text(ranges: usize) -> String {
    let mut rng = rand::thread_rng();
    UUID_POOL
        .iter()
        .map(|uuid| {
            let parts: Vec<String> = (0..ranges)
                .map(|_| {
                    let start: u64 = rng.gen_range(1..100_000);
                    format!("{}-{}", start, start + rng.gen_range(0..50))
                })
                .collect();
            format!("{uuid}:{}", parts.join(":"))
        })
        .collect::<Vec<_>>()
        .join(",")
}
