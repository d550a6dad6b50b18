// tests/displayed_value_commit.rs

use quick_xml::escape::unescape;

use confsync::document::{resolve, XmlDocument};
use confsync::engine::{CoreCommand, CoreRuntime, SyncEvent, UiInteraction};
use confsync::render::{PageLayout, RendererRegistry, Trigger};
use confsync::types::{AbsentCommitPolicy, InputKind};
use confsync_test_utils::builders::{path, LayoutBuilder, TUNER_XML};

fn layout() -> PageLayout {
    LayoutBuilder::new()
        .row("Frequency", "tuner freq")
        .row("IP address", "ipaddress")
        .row("Hostname", "hostname")
        .row("SSDP", "ssdpEnabled")
        .row("DiSEqC", "diseqcType")
        .build()
}

fn loaded() -> CoreRuntime {
    let mut core = CoreRuntime::new(
        "config.xml",
        layout(),
        RendererRegistry::standard(),
        AbsentCommitPolicy::Drop,
    );
    core.step(SyncEvent::DocumentFetched {
        result: Ok(XmlDocument::parse(TUNER_XML).expect("tuner document parses")),
    });
    core
}

/// Markup of the control whose `id` is `at`: the `<input .../>` tag or the
/// whole `<select>...</select>`.
fn control_markup<'a>(html: &'a str, at: &str) -> &'a str {
    let id = format!(" id=\"{at}\"");
    let found = html.find(&id).expect("control is on the page");
    let start = html[..found].rfind('<').expect("control has an opening tag");
    let rest = &html[start..];
    let end = if rest.starts_with("<select") {
        rest.find("</select>").expect("select is closed") + "</select>".len()
    } else {
        rest.find("/>").expect("input is closed") + 2
    };
    &rest[..end]
}

fn attribute<'a>(markup: &'a str, name: &str) -> &'a str {
    let key = format!(" {name}=\"");
    let start = markup.find(&key).expect("attribute present") + key.len();
    let len = markup[start..].find('"').expect("attribute closed");
    &markup[start..start + len]
}

/// The value the user sees, in the form the UI reports it back.
fn displayed_value(markup: &str, kind: InputKind) -> String {
    match kind {
        InputKind::Checkbox => {
            let checked = markup.contains(" checked");
            if checked { "on" } else { "off" }.to_string()
        }
        InputKind::SelectionList => {
            let selected = markup
                .split("<option")
                .find(|option| option.contains(" selected"))
                .expect("one option is selected");
            attribute(selected, "value").to_string()
        }
        _ => unescape(attribute(markup, "value"))
            .expect("value attribute unescapes")
            .into_owned(),
    }
}

fn commit_trigger(kind: InputKind) -> Trigger {
    match kind {
        InputKind::Checkbox => Trigger::Click,
        InputKind::Ip => Trigger::Enter,
        _ => Trigger::Change,
    }
}

fn value_text(doc: &XmlDocument, at: &str) -> String {
    let node = resolve(doc, &path(at).child("value"))
        .expect("value path is unambiguous")
        .expect("value node exists");
    doc.text(node)
}

#[test]
fn committing_the_displayed_value_leaves_the_document_unchanged() {
    let mut core = loaded();
    let page = core.page().cloned().expect("page rendered");
    let original = core.document().cloned().expect("document loaded");

    for (at, kind) in [
        ("tuner freq", InputKind::Number),
        ("ipaddress", InputKind::Ip),
        ("hostname", InputKind::Text),
        ("ssdpEnabled", InputKind::Checkbox),
        ("diseqcType", InputKind::SelectionList),
    ] {
        let control = page.control(&path(at)).expect("field is interactive");
        assert_eq!(control.kind, kind);

        let shown = displayed_value(control_markup(&page.html, at), kind);
        let step = core.step(SyncEvent::Interaction(UiInteraction {
            path: path(at),
            trigger: commit_trigger(kind),
            value: Some(shown.clone()),
        }));

        let body = match step.commands.as_slice() {
            [CoreCommand::PostDocument { body, .. }] => body.clone(),
            other => panic!("expected a post for {at} ({shown:?}), got {other:?}"),
        };
        let posted = XmlDocument::parse(&body).expect("posted body parses");
        assert_eq!(value_text(&posted, at), value_text(&original, at), "value of {at}");
        assert_eq!(body, original.to_xml_string(), "document after committing {at}");
    }
}

#[test]
fn escaped_text_is_shown_unescaped_and_written_back_escaped() {
    let mut core = loaded();
    let page = core.page().cloned().expect("page rendered");

    let markup = control_markup(&page.html, "hostname");
    assert!(markup.contains(" value=\"satpi &amp; co\""));
    assert_eq!(displayed_value(markup, InputKind::Text), "satpi & co");

    let step = core.step(SyncEvent::Interaction(UiInteraction {
        path: path("hostname"),
        trigger: Trigger::Enter,
        value: Some("satpi & co".to_string()),
    }));
    match step.commands.as_slice() {
        [CoreCommand::PostDocument { body, .. }] => {
            assert!(body.contains("<value>satpi &amp; co</value>"))
        }
        other => panic!("expected a post, got {other:?}"),
    }
}
