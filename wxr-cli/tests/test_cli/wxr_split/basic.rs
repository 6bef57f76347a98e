use crate::add_test;
use crate::common::{Fixture, HELLO_WORLD_CONTENT, SAMPLE_ARCHIVE};

// Test the default split layout
add_test!(split_layout, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success(), "{}", output.stderr);
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());

    assert_eq!(fixture.list("out"), ["Header.xml"]);
    assert_eq!(
        fixture.list("out/xml"),
        [
            "attachment-40.logo.xml",
            "page-3.sample-page.xml",
            "post-12.hello-world.xml",
            "post-2.xml",
        ]
    );
    assert_eq!(fixture.list("out/html").len(), 8);
});

// Test that HTML bodies are moved out of the item XML
add_test!(html_bodies_are_separated, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success());

    assert_eq!(
        fixture.read("out/html/post-12.hello-world-content.html"),
        HELLO_WORLD_CONTENT
    );
    assert_eq!(
        fixture.read("out/html/post-12.hello-world-excerpt.html"),
        "Welcome"
    );
    assert_eq!(fixture.read("out/html/post-2-excerpt.html"), "");

    let item = fixture.read("out/xml/post-12.hello-world.xml");
    assert!(item.contains("<content:encoded><![CDATA[]]></content:encoded>"));
    assert!(item.contains(r#"xmlns:wp="http://wordpress.org/export/1.2/""#));
});

// Test the header keeps the envelope and drops the items
add_test!(header_has_no_items, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success());

    let header = fixture.read("out/Header.xml");
    assert!(header.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(header.contains("<!-- generator=\"WordPress/6.4.2\""));
    assert!(header.contains("<title>Test Site</title>"));
    assert!(header.contains("<wp:author_login><![CDATA[admin]]></wp:author_login>"));
    assert!(header.contains("<!-- items removed -->"));
    assert!(!header.contains("<item>"));
});

// Test that repeated metadata keys keep only the first entry
add_test!(duplicate_meta_is_dropped, async {
    let mut fixture = Fixture::with_file("export.xml", SAMPLE_ARCHIVE.as_bytes());

    let output = fixture
        .run_cargo("wxr-split", &["export.xml", "out"])
        .await;
    assert!(output.status.success());

    let item = fixture.read("out/xml/post-12.hello-world.xml");
    assert_eq!(item.matches("_edit_last").count(), 1);
    assert!(item.contains("<wp:meta_value><![CDATA[1]]></wp:meta_value>"));
    assert!(item.contains("_et_pb_use_builder"));
});
