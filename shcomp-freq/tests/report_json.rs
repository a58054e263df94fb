//! JSON rendering of frequency reports (needs the `serde` feature).

use shcomp_freq::{ChunkConfig, FrequencyReport, analyze};
use std::io::Cursor;

#[test]
fn test_report_json_rows() {
    // 1011 0010 0100 1111 1011 0010
    let data = vec![0xB2, 0x4F, 0xB2];
    let analysis = analyze(Cursor::new(data), ChunkConfig::NIBBLE).expect("analysis failed");
    let report = FrequencyReport::from_table(&analysis.table, 4);

    let json = serde_json::to_value(&report).expect("serialize failed");
    assert_eq!(json["width"], 4);
    assert_eq!(json["total"], 6);
    assert_eq!(json["distinct"], 4);

    let rows = json["rows"].as_array().expect("rows array");
    let pairs: Vec<(&str, u64)> = rows
        .iter()
        .map(|row| (row["pattern"].as_str().unwrap(), row["count"].as_u64().unwrap()))
        .collect();
    assert_eq!(pairs, vec![("0010", 2), ("0100", 1), ("1011", 2), ("1111", 1)]);
    assert_eq!(rows[0]["packed"], serde_json::json!([0x20]));
}

#[test]
fn test_report_json_text() {
    let analysis = analyze(Cursor::new(b"aab"), ChunkConfig::BYTE).expect("analysis failed");
    let report = FrequencyReport::from_table(&analysis.table, 8);

    let text = serde_json::to_string(&report).expect("serialize failed");
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("parse failed");
    assert_eq!(parsed["rows"][0]["pattern"], "01100001");
    assert_eq!(parsed["rows"][0]["count"], 2);
    assert!(parsed["entropy"].as_f64().unwrap() > 0.0);
}
