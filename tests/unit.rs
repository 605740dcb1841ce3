use std::fs;
use tempfile::tempdir;
use texpack::{
    EncodeError, Encoding, FileKind, FileRecord, Payload, PayloadSummary, TextDecoding, classify,
    encode_file, output, summary::find_main_file,
};
fn text(path: &str, content: &str) -> FileRecord {
    FileRecord {
        path: path.into(),
        content: content.into(),
        encoding: None,
    }
}
fn binary(path: &str, content: &str) -> FileRecord {
    FileRecord {
        path: path.into(),
        content: content.into(),
        encoding: Some(Encoding::Base64),
    }
}
#[test]
fn test_classify_by_extension() {
    assert_eq!(classify("figure.png"), FileKind::Binary);
    assert_eq!(classify("figure.PNG"), FileKind::Binary);
    assert_eq!(classify("paper.pdf"), FileKind::Binary);
    assert_eq!(classify("archive.tar.gz"), FileKind::Binary);
    assert_eq!(classify("images/logo.Svg"), FileKind::Binary);
    assert_eq!(classify("main.tex"), FileKind::Text);
    assert_eq!(classify("refs.bib"), FileKind::Text);
}
#[test]
fn test_classify_defaults_to_text() {
    assert_eq!(classify("Makefile"), FileKind::Text);
    assert_eq!(classify("data.xyz"), FileKind::Text);
    assert_eq!(classify("png"), FileKind::Text);
    assert!(!texpack::classify::is_known_text("data.xyz"));
    assert!(texpack::classify::is_known_text("style.STY"));
}
#[test]
fn test_exclusion_rules() {
    use texpack::classify::{is_excluded_dir, is_excluded_file};
    assert!(is_excluded_dir(".git"));
    assert!(is_excluded_dir("node_modules"));
    assert!(is_excluded_dir("build"));
    assert!(!is_excluded_dir("figures"));
    assert!(is_excluded_file(".DS_Store"));
    assert!(is_excluded_file("texput.log"));
    assert!(!is_excluded_file("main.log"));
    assert!(!is_excluded_file("build"));
}
#[test]
fn test_encode_binary_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("figure.png"), [1u8, 2, 3]).unwrap();
    let record = encode_file(
        dir.path().join("figure.png"),
        dir.path(),
        TextDecoding::Replace,
    )
    .unwrap();
    assert_eq!(record, binary("figure.png", "AQID"));
}
#[test]
fn test_encode_text_file_relative_path() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("chapters/intro")).unwrap();
    fs::write(dir.path().join("chapters/intro/a.tex"), "héllo").unwrap();
    let record = encode_file("chapters/intro/a.tex", dir.path(), TextDecoding::Replace).unwrap();
    assert_eq!(record, text("chapters/intro/a.tex", "héllo"));
}
#[test]
fn test_invalid_utf8_replace() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"ab\xffcd\xc3").unwrap();
    let record = encode_file("notes.txt", dir.path(), TextDecoding::Replace).unwrap();
    assert_eq!(record.content, "ab\u{FFFD}cd\u{FFFD}");
    assert_eq!(record.encoding, None);
}
#[test]
fn test_invalid_utf8_ignore() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), b"ab\xffcd\xc3").unwrap();
    let record = encode_file("notes.txt", dir.path(), TextDecoding::Ignore).unwrap();
    assert_eq!(record.content, "abcd");
}
#[test]
fn test_decoded_text_is_stable() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.tex"), b"x\x80y").unwrap();
    let first = encode_file("a.tex", dir.path(), TextDecoding::Replace).unwrap();
    fs::write(dir.path().join("a.tex"), first.content.as_bytes()).unwrap();
    let second = encode_file("a.tex", dir.path(), TextDecoding::Replace).unwrap();
    assert_eq!(first, second);
}
#[test]
fn test_missing_file_reports_relative_path() {
    let dir = tempdir().unwrap();
    let err = encode_file("gone/main.tex", dir.path(), TextDecoding::Replace).unwrap_err();
    match err {
        EncodeError::FileRead { path, source } => {
            assert_eq!(path, "gone/main.tex");
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("unexpected error: {other}"),
    }
}
#[test]
fn test_path_outside_root_rejected() {
    let dir = tempdir().unwrap();
    let other = tempdir().unwrap();
    fs::write(other.path().join("x.tex"), "x").unwrap();
    let err = encode_file(other.path().join("x.tex"), dir.path(), TextDecoding::Replace)
        .unwrap_err();
    assert!(matches!(err, EncodeError::OutsideRoot { .. }));
    let err = encode_file("../x.tex", dir.path(), TextDecoding::Replace).unwrap_err();
    assert!(matches!(err, EncodeError::OutsideRoot { .. }));
}
#[test]
fn test_absolute_path_under_relative_root() {
    let dir = tempfile::tempdir_in(".").unwrap();
    assert!(dir.path().is_relative());
    fs::write(dir.path().join("a.tex"), "inside").unwrap();
    let absolute = std::path::absolute(dir.path()).unwrap().join("a.tex");
    let record = encode_file(&absolute, dir.path(), TextDecoding::Replace).unwrap();
    assert_eq!(record, text("a.tex", "inside"));
}
#[test]
fn test_json_shape() {
    let payload = Payload {
        files: vec![text("main.tex", "hello"), binary("figure.png", "AQID")],
    };
    let json = output::format_payload(&payload, false).unwrap();
    assert_eq!(
        json,
        r#"{"files":[{"path":"main.tex","content":"hello"},{"path":"figure.png","content":"AQID","encoding":"base64"}]}"#
    );
    let parsed: Payload = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, payload);
}
#[test]
fn test_pretty_json_keeps_unicode() {
    let payload = Payload {
        files: vec![text("ü.tex", "Grüße")],
    };
    let json = output::format_payload(&payload, true).unwrap();
    assert!(json.contains("\n  \"files\": ["));
    assert!(json.contains("Grüße"));
}
#[test]
fn test_main_file_prefers_documentclass() {
    let files = vec![
        binary("paper.tex", "XGRvY3VtZW50Y2xhc3M="),
        text("chapters/one.tex", "\\section{One}"),
        text("main.tex", "\\documentclass{article}"),
    ];
    let main = find_main_file(&files).unwrap();
    assert_eq!(main.path, "main.tex");
    assert!(main.has_documentclass);
}
#[test]
fn test_main_file_fallback_and_absent() {
    let files = vec![text("notes.md", "# notes"), text("b.tex", "b"), text("a.tex", "a")];
    let main = find_main_file(&files).unwrap();
    assert_eq!(main.path, "b.tex");
    assert!(!main.has_documentclass);
    assert_eq!(find_main_file(&[text("readme.txt", "hi")]), None);
}
#[test]
fn test_summary_counts() {
    let payload = Payload {
        files: vec![
            text("main.tex", "\\documentclass{article}"),
            binary("a.png", "AQID"),
            text("refs.bib", "@book{}"),
        ],
    };
    let summary = PayloadSummary::from_payload(&payload);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.text, 2);
    assert_eq!(summary.binary, 1);
    assert_eq!(summary.content_bytes, 23 + 4 + 7);
    assert_eq!(summary.main_file.unwrap().path, "main.tex");
}
#[test]
fn test_upload_command_and_output_path() {
    let cmd = output::upload_command(output::DEFAULT_ENDPOINT, "paper.json");
    assert!(cmd.starts_with("curl -X POST http://localhost:3001/compile"));
    assert!(cmd.contains("-d @paper.json"));
    let dir = tempdir().unwrap();
    let project = dir.path().join("my-paper");
    fs::create_dir(&project).unwrap();
    assert_eq!(
        output::default_output_path(&project),
        std::path::PathBuf::from("my-paper.json")
    );
}
#[test]
fn test_usage_errors() {
    assert!(EncodeError::NotFound("x".into()).is_usage_error());
    assert!(EncodeError::EmptyProject {
        root: "x".into(),
        skipped: 0
    }
    .is_usage_error());
    assert!(!EncodeError::Cancelled.is_usage_error());
}
