//! End-to-end tests: fixture files through loading, aggregation and report output.

use std::fs;
use std::path::{Path, PathBuf};

use flowtag::parser::load_flow_records;
use flowtag::report::{format_text, write_report};
use flowtag::tags::load_tag_table;
use flowtag::{aggregate, generate_counts, EmptyInput, FlowTagError, ProtocolTable, ReportFormat};
use tempfile::TempDir;

fn resource(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/resources")
        .join(name)
}

#[test]
fn test_fixture_counts() {
    let counts = generate_counts(&resource("flow_logs.txt"), &resource("tags.csv")).unwrap();

    let expected_tags = [("untagged", 8), ("email", 3), ("sv_P1", 2), ("sv_P2", 1)];
    assert_eq!(counts.tags.len(), expected_tags.len());
    for (tag, count) in expected_tags {
        assert_eq!(counts.tags.get(tag), count, "tag {tag}");
    }

    let expected_keys = [
        "49153,tcp", "49154,tcp", "49155,tcp", "49156,tcp", "49157,tcp", "49158,tcp", "80,tcp",
        "1024,tcp", "443,tcp", "23,tcp", "25,tcp", "110,tcp", "993,tcp", "143,tcp",
    ];
    assert_eq!(counts.port_protocols.len(), expected_keys.len());
    for key in expected_keys {
        assert_eq!(counts.port_protocols.get(key), 1, "key {key}");
    }
    assert_eq!(counts.unrecognized, 0);
}

#[test]
fn test_missing_inputs_fail_with_empty_input() {
    let err = generate_counts(Path::new("invalid_path"), Path::new("invalid_tags_path")).unwrap_err();
    assert!(matches!(err, FlowTagError::EmptyInput(EmptyInput::FlowLogs)));

    let err = generate_counts(&resource("flow_logs.txt"), Path::new("invalid_tags_path")).unwrap_err();
    assert!(matches!(err, FlowTagError::EmptyInput(EmptyInput::Tags)));
    assert_eq!(err.to_string(), "No tags found");
}

#[test]
fn test_malformed_lines_do_not_abort() {
    let dir = TempDir::new().unwrap();
    let logs = dir.path().join("flow.log");
    let tags = dir.path().join("tags.csv");

    let mut content = fs::read_to_string(resource("flow_logs.txt")).unwrap();
    content.push_str("\n2 123456789012 truncated line\n");
    content.push_str("2 123456789012 eni-x 10.0.0.1 10.0.0.2 1000 8080 255 1 1 1 1 ACCEPT OK\n");
    content.push_str("2 123456789012 eni-x 10.0.0.1 10.0.0.2 1000 68 17 1 1 1 1 ACCEPT OK\n");
    fs::write(&logs, content).unwrap();
    fs::write(
        &tags,
        "dstport,protocol,tag\n68,udp,sv_P2\nbroken-row\n,,\n110,tcp,email\n",
    )
    .unwrap();

    let records = load_flow_records(&logs);
    assert_eq!(records.len(), 16);

    let table = load_tag_table(&tags);
    assert_eq!(table.len(), 2);

    let counts = aggregate(records, &table, ProtocolTable::iana()).unwrap();
    assert_eq!(counts.unrecognized, 1);
    assert_eq!(counts.port_protocols.total(), 15);
    assert_eq!(counts.tags.total(), counts.port_protocols.total());
    assert_eq!(counts.tags.get("sv_P2"), 1);
    assert_eq!(counts.tags.get("email"), 1);
    assert_eq!(counts.tags.get("untagged"), 13);
    assert_eq!(counts.port_protocols.get("8080,255"), 0);
}

#[test]
fn test_report_written_from_fixture() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("output/counts.txt");

    let counts = generate_counts(&resource("flow_logs.txt"), &resource("tags.csv")).unwrap();
    write_report(&path, &counts, ReportFormat::Text).unwrap();

    let report = fs::read_to_string(&path).unwrap();
    assert_eq!(report, format_text(&counts));
    assert!(report.starts_with("Tag Counts:\nTag,Count\nuntagged,8\nsv_P2,1\n"));
    assert!(report.contains("\nPort/Protocol Combination Counts:\nPort,Protocol,Count\n49153,tcp,1\n"));
    assert!(report.ends_with("143,tcp,1\n"));
}
