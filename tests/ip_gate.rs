// tests/ip_gate.rs

use proptest::prelude::*;

use confsync::diagnostic::Diagnostic;
use confsync::document::XmlDocument;
use confsync::engine::{is_valid_ipv4, CoreCommand, CoreRuntime, SyncEvent, UiInteraction};
use confsync::render::{RendererRegistry, Trigger};
use confsync::types::AbsentCommitPolicy;
use confsync_test_utils::builders::{path, LayoutBuilder, TUNER_XML};

fn loaded_core() -> CoreRuntime {
    let layout = LayoutBuilder::new().row("IP address", "ipaddress").build();
    let mut core = CoreRuntime::new(
        "config.xml",
        layout,
        RendererRegistry::standard(),
        AbsentCommitPolicy::Drop,
    );
    core.step(SyncEvent::DocumentFetched {
        result: Ok(XmlDocument::parse(TUNER_XML).expect("tuner document parses")),
    });
    core
}

fn press_enter(core: &mut CoreRuntime, value: &str) -> Vec<CoreCommand> {
    core.step(SyncEvent::Interaction(UiInteraction {
        path: path("ipaddress"),
        trigger: Trigger::Enter,
        value: Some(value.to_string()),
    }))
    .commands
}

#[test]
fn known_addresses_are_classified() {
    for good in ["192.168.0.1", "0.0.0.0", "255.255.255.255", "10.0.0.254"] {
        assert!(is_valid_ipv4(good), "{good} should be accepted");
    }
    for bad in ["999.1.1.1", "1.2.3", "1.2.3.4.5", "256.0.0.1", "a.b.c.d", "", " 1.2.3.4", "1.2.3.4 "] {
        assert!(!is_valid_ipv4(bad), "{bad:?} should be rejected");
    }
}

#[test]
fn invalid_address_alerts_and_leaves_document_alone() {
    let mut core = loaded_core();
    let before = core.document().map(|d| d.to_xml_string());

    let commands = press_enter(&mut core, "999.1.1.1");

    match commands.as_slice() {
        [CoreCommand::Alert(diagnostic)] => {
            assert!(matches!(
                diagnostic,
                Diagnostic::InvalidIp { value, .. } if value == "999.1.1.1"
            ));
            assert_eq!(
                diagnostic.to_string(),
                "You have entered an invalid IP address! (999.1.1.1)"
            );
        }
        other => panic!("expected one InvalidIp alert, got {other:?}"),
    }
    assert_eq!(core.document().map(|d| d.to_xml_string()), before);
}

#[test]
fn valid_address_is_written_then_posted() {
    let mut core = loaded_core();

    let commands = press_enter(&mut core, "192.168.0.1");

    match commands.as_slice() {
        [CoreCommand::PostDocument { resource, body }] => {
            assert_eq!(resource, "config.xml");
            assert!(body.contains("<ipaddress><inputtype>ip</inputtype><value>192.168.0.1</value></ipaddress>"));
        }
        other => panic!("expected one post, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn four_octets_in_range_are_accepted(a in 0u16..=255, b in 0u16..=255, c in 0u16..=255, d in 0u16..=255) {
        let ip = format!("{a}.{b}.{c}.{d}");
        prop_assert!(is_valid_ipv4(&ip));
    }

    #[test]
    fn any_octet_above_255_is_rejected(octets in proptest::array::uniform4(0u16..=255), slot in 0usize..4, big in 256u16..1000) {
        let mut octets = octets;
        octets[slot] = big;
        let ip = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
        prop_assert!(!is_valid_ipv4(&ip));
    }

    #[test]
    fn rejected_input_never_produces_a_post(raw in "[0-9.]{0,18}") {
        let mut core = loaded_core();
        let commands = press_enter(&mut core, &raw);
        let posted = commands.iter().any(|c| matches!(c, CoreCommand::PostDocument { .. }));
        prop_assert_eq!(posted, is_valid_ipv4(&raw));
    }
}
