#![forbid(unsafe_code)]

//! Content-script driver.
//!
//! [`ContentScript`] is the event source and effect executor around the
//! [`HoverMachine`]. It turns [`PageEvent`]s into machine messages (with
//! hotkey filtering and pointer debouncing), executes the machine's effects
//! against the settings store and the lookup service, feeds settings
//! changes from other contexts back in, and runs the layout pass after each
//! tooltip render.
//!
//! # Listener rules
//!
//! | Event | Active in | Message |
//! |-------|-----------|---------|
//! | hotkey down (not repeat) | `enabled` | `HOTKEY_PRESSED` |
//! | hotkey up | `enabled` | `RESET` |
//! | window focus / blur | `enabled` | `RESET` |
//! | pointer move (debounced) | `enabled.hotkey-pressed` | `WORD_DETECTED` |
//! | selection | `enabled.hotkey-pressed` | `WORD_DETECTED` |
//!
//! Time is always passed in. The host calls [`ContentScript::tick`] at or
//! after [`ContentScript::next_deadline`], and on its own cadence while
//! [`ContentScript::settings_load_pending`] is true: a failed settings load
//! is retried once per tick, never in a loop inside one call.

use std::collections::VecDeque;

use tracing::{debug, warn};
use web_time::Instant;
use wordy_core::{Debouncer, HostPage, PageEvent, Platform, Point, Rect, WordDetector};
use wordy_layout::TooltipLayout;

use crate::config::WordyConfig;
use crate::lookup::{LookupRequest, LookupService};
use crate::machine::{
    HoverEffect, HoverMachine, HoverMsg, HoverState, LookupTicket, WordDetection,
};
use crate::program::Program;
use crate::settings::{SettingsBridge, SettingsChanges, SettingsToggle};
use crate::view::TooltipView;

/// When lookups issued by the machine are performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupMode {
    /// Perform each lookup as soon as the machine asks for it.
    #[default]
    Immediate,
    /// Queue lookups until [`ContentScript::run_pending_lookups`].
    Deferred,
}

/// Requests the driver hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostAction {
    /// Play the audio clip at this URL.
    PlayAudio(String),
}

pub struct ContentScript<P, L> {
    program: Program<HoverMachine>,
    page: P,
    lookup: L,
    settings: SettingsBridge,
    changes: Option<SettingsChanges>,
    config: WordyConfig,
    detector: WordDetector,
    platform: Platform,
    layout: TooltipLayout,
    hover: Debouncer<Point>,
    audio: Debouncer<String>,
    mode: LookupMode,
    pending_lookups: VecDeque<(LookupTicket, LookupRequest)>,
    pending_load: bool,
    actions: Vec<HostAction>,
}

impl<P: HostPage, L: LookupService> ContentScript<P, L> {
    pub fn new(
        page: P,
        lookup: L,
        settings: SettingsBridge,
        config: WordyConfig,
        platform: Platform,
    ) -> Self {
        Self {
            program: Program::new(HoverMachine::new()),
            page,
            lookup,
            settings,
            changes: None,
            detector: WordDetector::new(config.tooltip_element_id.clone()),
            platform,
            layout: TooltipLayout::new(config.tooltip_padding),
            hover: Debouncer::new(config.hover_debounce()),
            audio: Debouncer::new(config.audio_debounce()),
            mode: LookupMode::Immediate,
            pending_lookups: VecDeque::new(),
            pending_load: false,
            actions: Vec::new(),
            config,
        }
    }

    #[must_use]
    pub fn with_lookup_mode(mut self, mode: LookupMode) -> Self {
        self.mode = mode;
        self
    }

    /// Subscribe to settings changes and make the first settings load.
    ///
    /// Returns after one attempt. If it failed the machine stays in
    /// `loading` and [`tick`](Self::tick) retries.
    pub fn start(&mut self) {
        self.program.start();
        self.run_effects();
        self.load_settings();
    }

    pub fn state(&self) -> HoverState {
        self.program.model().state()
    }

    pub fn machine(&self) -> &HoverMachine {
        self.program.model()
    }

    pub fn config(&self) -> &WordyConfig {
        &self.config
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Send a message straight to the machine.
    pub fn send(&mut self, msg: HoverMsg) {
        self.program.send(msg);
        self.run_effects();
    }

    /// Feed one page event.
    pub fn handle_event(&mut self, event: PageEvent, now: Instant) {
        let state = self.state();
        if !state.is_enabled() {
            return;
        }
        match event {
            PageEvent::KeyDown(key) => {
                if !key.repeat && self.platform.is_hotkey(&key.key) {
                    self.send(HoverMsg::HotkeyPressed);
                }
            }
            PageEvent::KeyUp(key) => {
                if self.platform.is_hotkey(&key.key) {
                    self.reset();
                }
            }
            PageEvent::WindowFocus | PageEvent::WindowBlur => self.reset(),
            PageEvent::MouseMove(point) => {
                if state.is_hotkey_pressed() {
                    self.hover.push(point, now);
                }
            }
            PageEvent::Selection { text, point } => {
                if state.is_hotkey_pressed()
                    && let Some(detection) = self.detector.detect_selection(&self.page, &text, point)
                {
                    self.send(HoverMsg::WordDetected(WordDetection::from_detection(
                        &detection,
                    )));
                }
            }
        }
    }

    /// Fire due debounced work and retry a failed settings load.
    pub fn tick(&mut self, now: Instant) {
        self.load_settings();
        if let Some(point) = self.hover.poll(now) {
            self.detect_at(point);
        }
        if let Some(href) = self.audio.poll(now) {
            self.actions.push(HostAction::PlayAudio(href));
        }
    }

    /// Earliest instant at which [`tick`](Self::tick) has work.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.hover.deadline(), self.audio.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a settings load is waiting for the next tick.
    pub fn settings_load_pending(&self) -> bool {
        self.pending_load
    }

    /// Apply settings changes made by other contexts.
    ///
    /// A flipped field is forwarded only if the machine does not already
    /// hold the new value, so this context's own writes are not replayed.
    pub fn poll_settings(&mut self) {
        while let Some(delta) = self.changes.as_mut().and_then(SettingsChanges::try_next) {
            let current = self.machine().settings();
            for toggle in delta.toggles() {
                let (msg, applied) = match toggle {
                    SettingsToggle::Enabled => (
                        HoverMsg::EnableToggled,
                        current.enabled == delta.new_value.enabled,
                    ),
                    SettingsToggle::ShowPronunciationInfo => (
                        HoverMsg::ShowPronunciationInfoToggled,
                        current.show_pronunciation_info == delta.new_value.show_pronunciation_info,
                    ),
                };
                if applied {
                    continue;
                }
                debug!(?toggle, "settings changed elsewhere");
                self.send(msg);
            }
        }
    }

    /// Ask to play a pronunciation clip; debounced.
    pub fn play_audio(&mut self, href: impl Into<String>, now: Instant) {
        let href = href.into();
        if !href.is_empty() {
            self.audio.push(href, now);
        }
    }

    /// Host actions produced since the last call.
    pub fn take_actions(&mut self) -> Vec<HostAction> {
        std::mem::take(&mut self.actions)
    }

    /// The tooltip to draw, if any.
    pub fn view(&self) -> Option<TooltipView> {
        TooltipView::of(self.program.model(), &self.config)
    }

    /// Layout pass: correct the tooltip after it was drawn at `rendered`.
    pub fn tooltip_rendered(&mut self, rendered: Rect) {
        if self.view().is_none() {
            return;
        }
        let font_size = self.machine().context().word_details.font_size;
        let patch = self.layout.adjust(
            rendered,
            self.page.viewport(),
            self.page.scroll_offset(),
            font_size,
        );
        if !patch.is_empty() {
            self.send(HoverMsg::TooltipStylesChanged(patch));
        }
    }

    /// Number of queued lookups in [`LookupMode::Deferred`].
    pub fn pending_lookups(&self) -> usize {
        self.pending_lookups.len()
    }

    /// Perform every queued lookup, oldest first.
    pub fn run_pending_lookups(&mut self) {
        while let Some((ticket, request)) = self.pending_lookups.pop_front() {
            self.perform_lookup(ticket, &request);
        }
    }

    /// Perform every queued lookup, newest first.
    pub fn run_pending_lookups_newest_first(&mut self) {
        while let Some((ticket, request)) = self.pending_lookups.pop_back() {
            self.perform_lookup(ticket, &request);
        }
    }

    /// One settings load attempt, if the machine asked for one.
    fn load_settings(&mut self) {
        if !self.pending_load {
            return;
        }
        self.pending_load = false;
        if self.changes.is_none() {
            match self.settings.on_change() {
                Ok(changes) => self.changes = Some(changes),
                Err(err) => warn!(error = %err, "settings subscription failed"),
            }
        }
        let result = self.settings.load();
        self.program.send(HoverMsg::SettingsLoaded(result));
        self.run_effects();
    }

    fn reset(&mut self) {
        self.hover.clear();
        self.send(HoverMsg::Reset);
    }

    fn detect_at(&mut self, point: Point) {
        if !self.state().is_hotkey_pressed() {
            return;
        }
        let Some(detection) = self.detector.detect_at(&self.page, point) else {
            return;
        };
        if detection.candidate.word == self.machine().context().word_details.word {
            return;
        }
        self.send(HoverMsg::WordDetected(WordDetection::from_detection(&detection)));
    }

    fn perform_lookup(&mut self, ticket: LookupTicket, request: &LookupRequest) {
        let result = self.lookup.lookup(request);
        if let Err(err) = &result {
            warn!(word = request.text(), error = %err, "lookup failed");
        }
        self.send(HoverMsg::LookupFinished { ticket, result });
    }

    fn run_effects(&mut self) {
        while self.program.has_effects() {
            for effect in self.program.take_effects() {
                match effect {
                    HoverEffect::LoadSettings => self.pending_load = true,
                    HoverEffect::PersistSettings(update) => {
                        if let Err(err) = self.settings.update(update) {
                            warn!(error = %err, "settings write failed");
                        }
                    }
                    HoverEffect::Lookup { ticket, request } => match self.mode {
                        LookupMode::Immediate => self.perform_lookup(ticket, &request),
                        LookupMode::Deferred => self.pending_lookups.push_back((ticket, request)),
                    },
                }
            }
        }
    }
}
