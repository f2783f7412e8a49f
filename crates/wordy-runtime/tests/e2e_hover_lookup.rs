//! End-to-end: page events through the driver to a rendered tooltip.

use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;
use web_time::Instant;
use wordy_core::{Key, KeyEvent, PageEvent, Platform, Point, StaticPage, TextMetrics, Viewport};
use wordy_runtime::{
    ContentScript, ExtensionStorage, LookupError, LookupMode, LookupRequest, LookupResponse,
    LookupResult, LookupService, Pronunciation, Pronunciations, SettingsBridge, SettingsUpdate,
    TooltipView, WordyConfig,
};

#[derive(Default)]
struct MockDictionary {
    entries: HashMap<String, LookupResponse>,
    wire: Vec<serde_json::Value>,
}

impl MockDictionary {
    fn with(mut self, word: &str, definition: &str) -> Self {
        self.entries.insert(
            word.to_string(),
            LookupResponse::new(
                definition,
                Pronunciations {
                    american: Pronunciation::new("[wəːrld]", "https://audio/us.mp3"),
                    british: Pronunciation::new("[wɜːld]", ""),
                },
            ),
        );
        self
    }
}

impl LookupService for MockDictionary {
    fn lookup(&mut self, request: &LookupRequest) -> LookupResult<LookupResponse> {
        self.wire.push(serde_json::to_value(request).map_err(LookupError::from)?);
        Ok(self
            .entries
            .get(request.text())
            .cloned()
            .unwrap_or_else(LookupResponse::empty))
    }
}

fn page() -> StaticPage {
    let mut page = StaticPage::new(Viewport::new(1000.0, 800.0));
    let p = page.append_element(page.root(), None, Some(16.0));
    page.append_text(
        p,
        "hello world",
        Point::new(0.0, 100.0),
        TextMetrics::new(8.0, 16.0),
    );
    page
}

fn script(dictionary: MockDictionary) -> ContentScript<StaticPage, MockDictionary> {
    let mut script = ContentScript::new(
        page(),
        dictionary,
        SettingsBridge::new(ExtensionStorage::in_memory()),
        WordyConfig::default(),
        Platform::from_user_agent("Mozilla/5.0 (X11; Linux x86_64)"),
    );
    script.start();
    script
}

fn hover(script: &mut ContentScript<StaticPage, MockDictionary>, point: Point, at: Instant) {
    script.handle_event(PageEvent::MouseMove(point), at);
    script.tick(at + Duration::from_millis(100));
}

// "world" spans x 48..88 on the line at y 100..116.
const OVER_WORLD: Point = Point::new(70.0, 108.0);
const OVER_HELLO: Point = Point::new(10.0, 108.0);

#[test]
fn hover_over_world_translates() {
    let mut script = script(MockDictionary::default().with("world", "1. greeting"));
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    hover(&mut script, OVER_WORLD, t0);

    assert_eq!(
        script.lookup().wire,
        vec![serde_json::json!({ "type": "word", "data": "world" })]
    );
    assert!(script.state().matches("enabled.hotkey-pressed.translated"));
    let details = &script.machine().context().word_details;
    assert_eq!(details.word, "world");
    assert_eq!(details.definition, "1. greeting");

    let position = script.machine().context().tooltip_styles.position;
    assert_eq!(position.left, Some(70.0));
    assert_eq!(position.top, Some(108.0 + 16.0));

    let Some(TooltipView::Definition {
        lines,
        pronunciations,
        frame,
        ..
    }) = script.view()
    else {
        panic!("expected a definition tooltip");
    };
    assert_eq!(lines, vec!["1. greeting"]);
    assert_eq!(pronunciations.len(), 2);
    assert_eq!(
        pronunciations[0].audio_href.as_deref(),
        Some("https://audio/us.mp3")
    );
    assert_eq!(pronunciations[1].audio_href, None);
    assert_eq!(frame.element_id, "assistant-tooltip");
}

#[test]
fn empty_definition_shows_error_with_search_link() {
    let mut script = script(MockDictionary::default());
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    hover(&mut script, OVER_WORLD, t0);

    assert!(script.state().matches("enabled.hotkey-pressed.translation-failed"));
    assert!(!script.machine().context().error_message.is_empty());
    let Some(TooltipView::Error { search_url, .. }) = script.view() else {
        panic!("expected an error tooltip");
    };
    assert_eq!(search_url, "https://www.google.com/search?q=world");
}

#[test]
fn repeated_hover_issues_one_lookup_per_word() {
    let mut script = script(
        MockDictionary::default()
            .with("world", "1. earth")
            .with("hello", "1. greeting"),
    );
    let mut t = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t);
    for point in [OVER_WORLD, OVER_WORLD, Point::new(80.0, 110.0), OVER_HELLO, OVER_HELLO] {
        hover(&mut script, point, t);
        t += Duration::from_millis(200);
    }
    let words: Vec<_> = script
        .lookup()
        .wire
        .iter()
        .map(|v| v["data"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(words, vec!["world", "hello"]);
    assert_eq!(
        script.machine().context().word_details.definition,
        "1. greeting"
    );
}

#[test]
fn late_response_for_superseded_word_is_ignored() {
    let mut script = script(
        MockDictionary::default()
            .with("world", "1. earth")
            .with("hello", "1. greeting"),
    )
    .with_lookup_mode(LookupMode::Deferred);
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    hover(&mut script, OVER_HELLO, t0);
    hover(&mut script, OVER_WORLD, t0 + Duration::from_millis(300));
    assert_eq!(script.pending_lookups(), 2);

    // Newest answers first, then the stale "hello" reply arrives.
    script.run_pending_lookups_newest_first();
    let details = &script.machine().context().word_details;
    assert_eq!(details.word, "world");
    assert_eq!(details.definition, "1. earth");
    assert!(script.state().matches("enabled.hotkey-pressed.translated"));
}

#[test]
fn hotkey_release_discards_in_flight_lookup() {
    let mut script = script(MockDictionary::default().with("world", "1. earth"))
        .with_lookup_mode(LookupMode::Deferred);
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    hover(&mut script, OVER_WORLD, t0);
    script.handle_event(PageEvent::KeyUp(KeyEvent::new(Key::Control)), t0);
    script.run_pending_lookups();

    assert!(script.state().matches("enabled.hotkey-unpressed"));
    assert!(script.machine().context().is_cleared());
    assert!(script.view().is_none());
}

#[test]
fn disabling_from_store_mid_lookup_discards_result() {
    let storage = ExtensionStorage::in_memory();
    let popup = SettingsBridge::new(storage.clone());
    let mut script = ContentScript::new(
        page(),
        MockDictionary::default().with("world", "1. earth"),
        SettingsBridge::new(storage),
        WordyConfig::default(),
        Platform::Other,
    )
    .with_lookup_mode(LookupMode::Deferred);
    script.start();

    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    hover(&mut script, OVER_WORLD, t0);
    assert!(script.state().matches("enabled.hotkey-pressed.awaiting-lookup"));

    popup.update(SettingsUpdate::enabled(false)).unwrap();
    script.poll_settings();
    script.run_pending_lookups();

    assert!(script.state().matches("disabled"));
    assert!(script.machine().context().is_cleared());
    assert!(script.view().is_none());
}

#[test]
fn pointer_over_tooltip_is_not_detected() {
    let mut page = page();
    let tooltip = page.append_element(page.root(), Some("assistant-tooltip"), Some(14.0));
    page.append_text(
        tooltip,
        "definition",
        Point::new(0.0, 300.0),
        TextMetrics::new(8.0, 16.0),
    );
    let mut script = ContentScript::new(
        page,
        MockDictionary::default().with("definition", "1. x"),
        SettingsBridge::new(ExtensionStorage::in_memory()),
        WordyConfig::default(),
        Platform::Other,
    );
    script.start();
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    script.handle_event(PageEvent::MouseMove(Point::new(20.0, 305.0)), t0);
    script.tick(t0 + Duration::from_millis(100));

    assert!(script.lookup().wire.is_empty());
    assert!(script.state().matches("enabled.hotkey-pressed.idle"));
}

#[test]
fn mac_uses_meta_hotkey() {
    let mut script = ContentScript::new(
        page(),
        MockDictionary::default(),
        SettingsBridge::new(ExtensionStorage::in_memory()),
        WordyConfig::default(),
        Platform::from_user_agent("Mozilla/5.0 (Macintosh; Intel Mac OS X 14_0)"),
    );
    script.start();
    let t0 = Instant::now();
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Control)), t0);
    assert!(script.state().matches("enabled.hotkey-unpressed"));
    script.handle_event(PageEvent::KeyDown(KeyEvent::new(Key::Meta)), t0);
    assert!(script.state().matches("enabled.hotkey-pressed"));
}
