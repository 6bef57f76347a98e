use crate::add_test;
use crate::common::{Fixture, HELLO_WORLD_CONTENT, SAMPLE_ARCHIVE};

// Test combined layout writes one file per item
add_test!(combined_layout, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["-c", "export.xml", "out"])
        .await;
    assert!(output.status.success(), "{}", output.stderr);

    assert_eq!(
        fixture.list("out"),
        [
            "Header.xml",
            "attachment-40.logo.xml",
            "page-3.sample-page.xml",
            "post-12.hello-world.xml",
            "post-2.xml",
        ]
    );
    assert!(!fixture.file_exists("out/html"));

    let item = fixture.read("out/post-12.hello-world.xml");
    assert!(item.contains("<p>Welcome &amp; enjoy ]]]]><![CDATA[> the show.</p>"));
    assert!(!item.contains(HELLO_WORLD_CONTENT));
});

// Test Divi metadata stripping
add_test!(strip_divi, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["--strip-divi", "export.xml", "out"])
        .await;
    assert!(output.status.success());

    let item = fixture.read("out/xml/post-12.hello-world.xml");
    assert!(!item.contains("_et_pb_use_builder"));
    assert!(item.contains("_edit_last"));
});

// Test custom prefix stripping
add_test!(strip_prefix, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo(
            "wxr-split",
            &["--strip-prefix", "_edit", "export.xml", "out"],
        )
        .await;
    assert!(output.status.success());

    let item = fixture.read("out/xml/post-12.hello-world.xml");
    assert!(!item.contains("_edit_last"));
    assert!(item.contains("_et_pb_use_builder"));
});

// Test verbose notices go to stderr
add_test!(verbose_reports_notices, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["-v", "export.xml", "out"])
        .await;
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.contains("removed duplicate: _edit_last"));
    assert!(output.stderr.contains("skipping item without post_id"));
    assert!(output.stderr.contains("split 5 items: 4 written, 1 skipped"));
    assert!(output.stderr.contains("Input: export.xml"));
    assert!(output.stderr.contains("Output: out/Header.xml"));
});

// Test RUST_LOG overrides the level chosen on the command line
add_test!(rust_log_overrides_level, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_with_env("wxr-split", &["export.xml", "out"], &[("RUST_LOG", "info")])
        .await;
    assert!(output.status.success());
    assert!(output.stderr.contains("split 5 items"));
    assert!(!output.stderr.contains("removed duplicate"));
});

// Test --force replaces a previous split
add_test!(force_overwrites, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success());

    let output = fixture
        .run_cargo("wxr-split", &["-f", "-s", "export.xml", "out"])
        .await;
    assert!(output.status.success(), "{}", output.stderr);
    assert!(!fixture
        .read("out/xml/post-12.hello-world.xml")
        .contains("_et_pb_use_builder"));
});
