// tests/render_rows.rs

use confsync::diagnostic::Diagnostic;
use confsync::document::{describe, resolve, XmlDocument};
use confsync::render::{
    build_page, build_row, Action, RenderedField, RendererRegistry, RowOutcome, Trigger,
};
use confsync::types::InputKind;
use confsync_test_utils::builders::{path, LayoutBuilder, TUNER_XML};

use std::error::Error;

type TestResult = Result<(), Box<dyn Error>>;

fn tuner() -> XmlDocument {
    XmlDocument::parse(TUNER_XML).expect("tuner document parses")
}

fn row_for(doc: &XmlDocument, at: &str) -> confsync::render::Row {
    match build_row("Label", doc, &path(at), &RendererRegistry::standard()) {
        RowOutcome::Row(row) => row,
        RowOutcome::Omitted => panic!("row for {at} was omitted"),
    }
}

#[test]
fn number_field_renders_bounded_input() {
    let row = row_for(&tuner(), "tuner freq");

    assert!(row.markup.starts_with("<tr><td align=\"left\">Label</td><td align=\"left\">"));
    assert!(row.markup.contains("<input type=\"number\""));
    assert!(row.markup.contains(" value=\"505\""));
    assert!(row.markup.contains(" min=\"100\" max=\"2000\""));
    assert!(row.markup.contains(" data-path=\"tuner freq\""));
    assert!(row.diagnostic.is_none());

    let control = row.control.expect("number is interactive");
    assert_eq!(control.kind, InputKind::Number);
    assert_eq!(control.path, path("tuner freq"));
}

#[test]
fn every_control_suspends_on_focus_and_resumes_on_blur() {
    let doc = tuner();
    for at in ["tuner freq", "ipaddress", "hostname", "ssdpEnabled", "diseqcType"] {
        let control = row_for(&doc, at).control.expect("interactive field");
        assert_eq!(
            control.actions_for(Trigger::Focus).collect::<Vec<_>>(),
            [Action::Suspend],
            "focus binding of {at}"
        );
        assert_eq!(
            control.actions_for(Trigger::Blur).collect::<Vec<_>>(),
            [Action::Resume],
            "blur binding of {at}"
        );
    }
}

#[test]
fn each_kind_commits_on_its_own_trigger() {
    let doc = tuner();

    let checkbox = row_for(&doc, "ssdpEnabled");
    assert!(checkbox.markup.contains("type=\"checkbox\""));
    assert!(checkbox.markup.contains(" checked"));
    let checkbox = checkbox.control.expect("checkbox control");
    assert_eq!(checkbox.actions_for(Trigger::Click).collect::<Vec<_>>(), [Action::Commit]);
    assert_eq!(checkbox.actions_for(Trigger::Enter).count(), 0);

    let ip = row_for(&doc, "ipaddress").control.expect("ip control");
    assert_eq!(ip.actions_for(Trigger::Enter).collect::<Vec<_>>(), [Action::CommitValidIp]);
    assert_eq!(ip.actions_for(Trigger::Change).count(), 0);

    let text = row_for(&doc, "hostname").control.expect("text control");
    for trigger in [Trigger::Click, Trigger::Change, Trigger::Enter] {
        assert_eq!(text.actions_for(trigger).collect::<Vec<_>>(), [Action::Commit]);
    }

    let select = row_for(&doc, "diseqcType").control.expect("select control");
    assert_eq!(select.actions_for(Trigger::Change).collect::<Vec<_>>(), [Action::Commit]);
    assert_eq!(select.option_count, Some(3));
}

#[test]
fn bindings_are_declared_on_the_markup() {
    let row = row_for(&tuner(), "ipaddress");
    assert!(row
        .markup
        .contains(" data-bind=\"focus:suspend blur:resume enter:commit-ip\""));
    assert!(row.markup.contains(" data-kind=\"ip\""));
}

#[test]
fn text_values_are_escaped_in_markup() {
    let row = row_for(&tuner(), "hostname");
    assert!(row.markup.contains(" value=\"satpi &amp; co\""));
}

#[test]
fn selection_list_marks_the_stored_index() {
    let row = row_for(&tuner(), "diseqcType");
    assert!(row.markup.contains("<option value=\"0\">DiSEqc Switch</option>"));
    assert!(row
        .markup
        .contains("<option value=\"1\" selected>Unicable (EN50494)</option>"));
    assert_eq!(row.markup.matches(" selected").count(), 1);
}

#[test]
fn readonly_field_renders_text_without_control() {
    let row = row_for(&tuner(), "tuner delsys");
    assert!(row.markup.contains("<td align=\"left\">dvbs2</td>"));
    assert!(row.control.is_none());
    assert!(row.diagnostic.is_none());
}

#[test]
fn absent_path_omits_the_row() {
    let outcome = build_row("SSDP", &tuner(), &path("ssdpInterval"), &RendererRegistry::standard());
    assert_eq!(outcome, RowOutcome::Omitted);
}

#[test]
fn unsupported_kind_renders_empty_cell_with_diagnostic() {
    let row = row_for(&tuner(), "reset");

    assert!(row.markup.ends_with("<td align=\"left\"></td></tr>"));
    assert!(row.control.is_none());
    assert_eq!(
        row.diagnostic,
        Some(Diagnostic::UnsupportedKind {
            path: path("reset"),
            kind: "submit".to_string(),
        })
    );
}

#[test]
fn ambiguous_path_renders_empty_cell_with_diagnostic() {
    let row = row_for(&tuner(), "fbcLinked");
    assert!(row.control.is_none());
    assert_eq!(
        row.diagnostic,
        Some(Diagnostic::AmbiguousPath {
            path: "fbcLinked".to_string(),
            count: 2,
        })
    );
}

#[test]
fn registry_without_a_renderer_reports_the_kind() -> TestResult {
    let doc = tuner();
    let node = resolve(&doc, &path("tuner freq"))?.expect("freq exists");
    let descriptor = describe(&doc, node)?;

    let empty = RendererRegistry::empty();
    assert!(!empty.supports(InputKind::Number));
    assert_eq!(
        empty.render(&path("tuner freq"), &descriptor),
        Err(Diagnostic::UnsupportedKind {
            path: path("tuner freq"),
            kind: "number".to_string(),
        })
    );
    Ok(())
}

#[test]
fn registered_renderer_replaces_the_standard_one() -> TestResult {
    fn plain(_path: &confsync::document::TagPath, d: &confsync::document::FieldDescriptor) -> RenderedField {
        RenderedField {
            markup: format!("<b>{}</b>", d.value),
            control: None,
        }
    }

    let mut registry = RendererRegistry::standard();
    registry.register(InputKind::Number, plain);

    match build_row("Freq", &tuner(), &path("tuner freq"), &registry) {
        RowOutcome::Row(row) => assert!(row.markup.contains("<b>505</b>")),
        RowOutcome::Omitted => panic!("row omitted"),
    }
    Ok(())
}

#[test]
fn page_keeps_layout_order_and_counts_rows() {
    let layout = LayoutBuilder::new()
        .title("Configure <tuner>")
        .row("Frequency", "tuner freq")
        .row("Interval", "ssdpInterval")
        .row("Reset", "reset")
        .row("Host", "hostname")
        .build();

    let page = build_page(&layout, &tuner(), &RendererRegistry::standard());

    assert!(page.html.starts_with("<table class=\"confsync\"><caption>Configure &lt;tuner&gt;</caption>"));
    assert!(page.html.ends_with("</table>"));
    let freq_at = page.html.find("Frequency").expect("freq row");
    let host_at = page.html.find("Host").expect("host row");
    assert!(freq_at < host_at);
    assert!(!page.html.contains("Interval"));

    assert_eq!(page.rows_rendered, 3);
    assert_eq!(page.rows_omitted, 1);
    assert_eq!(page.controls.len(), 2);
    assert!(page.control(&path("hostname")).is_some());
    assert_eq!(page.diagnostics.len(), 1);
}
