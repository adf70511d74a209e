//! Preview pipeline tests
//!
//! Edits flow through `update`; the debouncer decides when a rebuild fires
//! and stale rebuilds are dropped, so a burst of edits writes once.

mod common;

use std::time::{Duration, Instant};

use common::test_model;
use playpen::commands::Cmd;
use playpen::messages::{DocumentMsg, Msg, PreviewMsg};
use playpen::model::Region;
use playpen::preview::{build_document, Debouncer, PreviewOptions};
use playpen::update::update;

/// Run `msg` and feed any debounce request into `debouncer` at `now`
fn edit(
    model: &mut playpen::PlaygroundModel,
    debouncer: &mut Debouncer,
    msg: Msg,
    now: Instant,
) {
    if let Some(Cmd::DebouncedPreviewRebuild { revision, delay_ms }) = update(model, msg) {
        debouncer.schedule(revision, Duration::from_millis(delay_ms), now);
    }
}

#[test]
fn test_keystroke_burst_rebuilds_once_after_quiet_period() {
    let mut model = test_model("", "", "");
    let mut debouncer = Debouncer::new();
    let start = Instant::now();

    let mut text = String::new();
    for (i, ch) in "<h1>Hi</h1>".chars().enumerate() {
        text.push(ch);
        let now = start + Duration::from_millis(50 * i as u64);
        edit(&mut model, &mut debouncer, Msg::value_changed(Region::Markup, text.clone()), now);
        assert_eq!(debouncer.fire_if_due(now), None);
    }

    let last_edit = start + Duration::from_millis(50 * 10);
    assert_eq!(debouncer.fire_if_due(last_edit + Duration::from_millis(249)), None);
    let revision = debouncer
        .fire_if_due(last_edit + Duration::from_millis(250))
        .expect("rebuild due");
    assert_eq!(revision, model.revision);

    let cmd = update(&mut model, Msg::Preview(PreviewMsg::RebuildReady { revision }));
    match cmd {
        Some(Cmd::WritePreview { html }) => assert!(html.contains("<h1>Hi</h1>")),
        other => panic!("Expected WritePreview, got {:?}", other),
    }
    assert!(!debouncer.is_pending());
}

#[test]
fn test_stale_rebuild_is_dropped() {
    let mut model = test_model("", "", "");
    update(&mut model, Msg::value_changed(Region::Styles, "a {}"));
    update(&mut model, Msg::value_changed(Region::Styles, "a { color: red; }"));

    let stale = update(&mut model, Msg::Preview(PreviewMsg::RebuildReady { revision: 1 }));
    assert!(stale.is_none());
    assert_eq!(model.preview, None);

    let fresh = update(&mut model, Msg::Preview(PreviewMsg::RebuildReady { revision: 2 }));
    assert!(fresh.is_some());
    assert!(model.preview_is_current());
    assert!(model
        .preview
        .as_deref()
        .is_some_and(|html| html.contains("a { color: red; }")));
}

#[test]
fn test_undo_restores_previous_preview_source() {
    let mut model = test_model("<p>one</p>", "", "");
    update(&mut model, Msg::value_changed(Region::Markup, "<p>two</p>"));
    update(&mut model, Msg::Document(DocumentMsg::Undo(Region::Markup)));
    assert_eq!(model.value(Region::Markup), "<p>one</p>");

    let revision = model.revision;
    let cmd = update(&mut model, Msg::Preview(PreviewMsg::RebuildReady { revision }));
    let Some(Cmd::WritePreview { html }) = cmd else {
        panic!("Expected WritePreview");
    };
    assert!(html.contains("<p>one</p>"));
    assert!(!html.contains("<p>two</p>"));
}

#[test]
fn test_script_cannot_escape_its_wrapper() {
    let model = test_model("", "", "console.log('</script><b>x</b>')");
    let html = build_document(&model.preview_sources(), &PreviewOptions::default());
    assert!(html.contains("console.log('<\\/script><b>x</b>')"));
    assert_eq!(html.matches("</script>").count(), 1);
}

#[test]
fn test_overlay_timeout_follows_config() {
    let mut model = test_model("", "", "throw 1");
    model.config.error_overlay_ms = 1500;
    update(&mut model, Msg::value_changed(Region::Script, "throw 2"));
    let revision = model.revision;
    let Some(Cmd::WritePreview { html }) =
        update(&mut model, Msg::Preview(PreviewMsg::RebuildReady { revision }))
    else {
        panic!("Expected WritePreview");
    };
    assert!(html.contains("setTimeout(() => errorDiv.remove(), 1500);"));
}
