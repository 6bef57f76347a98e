use crate::add_test;
use crate::common::{Fixture, SAMPLE_ARCHIVE};

async fn split_sample(fixture: &mut Fixture) {
    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success(), "{}", output.stderr);
}

// Test the input directory must hold a header
add_test!(missing_header, async {
    let mut fixture = Fixture::new();
    fixture.write("split/xml/post-1.xml", b"<item/>");

    let output = fixture.run_cargo("wxr-compose", &["split"]).await;
    assert!(!output.status.success());
    assert_eq!(
        output.stderr.trim_end(),
        "wxr-compose: split: No Header.xml in directory"
    );
});

// Test the input must be a directory
add_test!(input_not_a_directory, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture.run_cargo("wxr-compose", &["export.xml"]).await;
    assert!(!output.status.success());
    assert!(output.stderr.contains("export.xml: Not a directory"));
});

// Test an existing output file needs --force
add_test!(existing_output, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    split_sample(&mut fixture).await;
    fixture.write("composed.xml", b"keep me");

    let output = fixture
        .run_cargo("wxr-compose", &["out", "composed.xml"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.contains("composed.xml: Output file already exists"));
    assert_eq!(fixture.read("composed.xml"), "keep me");

    let output = fixture
        .run_cargo("wxr-compose", &["-f", "out", "composed.xml"])
        .await;
    assert!(output.status.success());
    assert!(fixture.read("composed.xml").contains("<rss"));
});

// Test a broken item file aborts without output
add_test!(broken_item_file, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    split_sample(&mut fixture).await;
    fixture.write("out/xml/post-5.xml", b"<item><wp:post_id>5</item>");

    let output = fixture
        .run_cargo("wxr-compose", &["out", "composed.xml"])
        .await;
    assert!(!output.status.success());
    assert!(output.stderr.starts_with("wxr-compose: out/xml/post-5.xml: malformed XML"));
    assert!(!fixture.file_exists("composed.xml"));
});

// Test missing HTML companions are tolerated
add_test!(missing_companion, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    split_sample(&mut fixture).await;
    fixture.remove_file("out/html/page-3.sample-page-content.html");

    let output = fixture.run_cargo("wxr-compose", &["out"]).await;
    assert!(output.status.success(), "{}", output.stderr);
    assert!(output.stderr.is_empty());
    assert!(!output.stdout.contains("This is a page."));
    assert_eq!(output.stdout.matches("<item>").count(), 4);

    let output = fixture.run_cargo("wxr-compose", &["-v", "out"]).await;
    assert!(output.status.success());
    assert!(output
        .stderr
        .contains("could not find: out/html/page-3.sample-page-content.html"));
});

// Test files outside the naming convention are ignored
add_test!(ignores_foreign_files, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());
    split_sample(&mut fixture).await;
    fixture.write("out/xml/README.txt", b"notes");
    fixture.write("out/xml/scratch.xml", b"not xml");

    let output = fixture.run_cargo("wxr-compose", &["out"]).await;
    assert!(output.status.success(), "{}", output.stderr);
    assert_eq!(output.stdout.matches("<item>").count(), 4);
});

// Test -qq silences error messages
add_test!(double_quiet_silences_errors, async {
    let mut fixture = Fixture::new();

    let output = fixture.run_cargo("wxr-compose", &["-qq", "nowhere"]).await;
    assert!(!output.status.success());
    assert!(output.stderr.is_empty());
});
