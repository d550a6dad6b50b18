// tests/document_tree.rs

use confsync::document::{resolve, XmlDocument};
use confsync::errors::ConfsyncError;
use confsync_test_utils::builders::{path, FREQ_XML, TUNER_XML};

use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn serialised_document_parses_back_to_the_same_tree() -> TestResult {
    let doc = XmlDocument::parse(TUNER_XML)?;
    let again = XmlDocument::parse(&doc.to_xml_string())?;
    assert_eq!(doc, again);
    Ok(())
}

#[test]
fn entities_are_unescaped_on_read_and_escaped_on_write() -> TestResult {
    let doc = XmlDocument::parse(TUNER_XML)?;
    let value = resolve(&doc, &path("hostname > value"))?.expect("hostname value");

    assert_eq!(doc.text(value), "satpi & co");
    assert!(doc.to_xml_string().contains("<value>satpi &amp; co</value>"));
    Ok(())
}

#[test]
fn set_text_replaces_only_the_target_value() -> TestResult {
    let mut doc = XmlDocument::parse(FREQ_XML)?;
    let value = resolve(&doc, &path("freq > value"))?.expect("freq value");

    doc.set_text(value, "600");

    assert_eq!(
        doc.to_xml_string(),
        "<tuner><freq><inputtype>number</inputtype><value>600</value><minvalue>100</minvalue><maxvalue>2000</maxvalue></freq></tuner>"
    );
    Ok(())
}

#[test]
fn set_text_keeps_element_children() -> TestResult {
    let mut doc = XmlDocument::parse("<a>old<b>x</b>tail</a>")?;
    let root = doc.root();

    doc.set_text(root, "new");

    assert_eq!(doc.text(root), "new");
    assert_eq!(doc.to_xml_string(), "<a>new<b>x</b></a>");
    Ok(())
}

#[test]
fn attributes_and_self_closing_elements_are_kept() -> TestResult {
    let doc = XmlDocument::parse(r#"<data version="2"><empty/></data>"#)?;

    assert_eq!(doc.attribute(doc.root(), "version"), Some("2"));
    let empty = doc.child_named(doc.root(), "empty").expect("empty child");
    assert_eq!(doc.text(empty), "");
    assert_eq!(doc.to_xml_string(), r#"<data version="2"><empty></empty></data>"#);
    Ok(())
}

#[test]
fn descendants_are_listed_in_document_order() -> TestResult {
    let doc = XmlDocument::parse("<r><a><b/></a><c/></r>")?;
    let names: Vec<&str> = doc
        .descendants(doc.root())
        .into_iter()
        .map(|n| doc.name(n))
        .collect();
    assert_eq!(names, ["a", "b", "c"]);
    Ok(())
}

#[test]
fn broken_documents_are_rejected() {
    for bad in [
        "",
        "<a><b></a>",
        "<a>",
        "<a/><b/>",
        "stray<a/>",
    ] {
        match XmlDocument::parse(bad) {
            Err(ConfsyncError::XmlError(_)) => {}
            other => panic!("expected an XML error for {bad:?}, got {other:?}"),
        }
    }
}

#[test]
fn documents_parse_through_from_str() -> TestResult {
    let doc: XmlDocument = FREQ_XML.parse()?;
    assert_eq!(doc.to_string(), FREQ_XML);
    Ok(())
}
