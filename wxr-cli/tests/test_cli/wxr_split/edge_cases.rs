use crate::add_test;
use crate::common::{Fixture, SAMPLE_ARCHIVE};

// Test an existing split is not overwritten
add_test!(refuses_existing_header, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    fixture.write("out/Header.xml", b"<rss/>");

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.starts_with("wxr-split: out/Header.xml: "));
    assert!(output.stderr.contains("already exists"));
    assert_eq!(fixture.read("out/Header.xml"), "<rss/>");
    assert!(!fixture.file_exists("out/xml"));
});

// Test a missing input file
add_test!(missing_input, async {
    let mut fixture = Fixture::new();

    let output = fixture
        .run_cargo("wxr-split", &["missing.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.starts_with("wxr-split: missing.xml: "));
    assert!(!fixture.file_exists("out"));
});

// Test malformed XML is rejected before anything is written
add_test!(malformed_input, async {
    let truncated = &SAMPLE_ARCHIVE[..SAMPLE_ARCHIVE.len() - 20];
    let mut fixture = Fixture::with_file("export.xml", truncated.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.starts_with("wxr-split: export.xml: "));
    assert!(!fixture.file_exists("out"));
});

// Test a document without a channel
add_test!(no_channel, async {
    let mut fixture = Fixture::with_file("export.xml", b"<rss version=\"2.0\"></rss>");

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.contains("no <channel> element"));
});

// Test the output directory must not be a file
add_test!(output_is_a_file, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    fixture.write("out", b"");

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.contains("Not a directory"));
});

// Test -qq silences error messages but not the exit status
add_test!(double_quiet_silences_errors, async {
    let mut fixture = Fixture::new();

    let output = fixture
        .run_cargo("wxr-split", &["-qq", "missing.xml", "out"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.is_empty());
});

// Test an archive without items still yields a header
add_test!(empty_channel, async {
    let mut fixture = Fixture::with_file(
        "export.xml",
        b"<?xml version=\"1.0\"?>\n<rss><channel>\n\t<title>Empty</title>\n</channel></rss>\n",
    );

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success(), "{}", output.stderr);
    assert!(fixture.list("out/xml").is_empty());
    assert!(fixture.read("out/Header.xml").contains("<!-- items removed -->"));
});
