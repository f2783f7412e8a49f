#![forbid(unsafe_code)]

//! Hover/translation state machine.
//!
//! # States
//!
//! ```text
//! loading ──ok(enabled)──▶ enabled ──ENABLE_TOGGLED──▶ disabled
//!    │  ╰──ok(disabled)──────────────────────────────────▲
//!    ╰─err─▶ loading (reload)
//!
//! enabled
//! ├── hotkey-unpressed ──HOTKEY_PRESSED──▶ hotkey-pressed
//! └── hotkey-pressed                        (RESET ▶ hotkey-unpressed)
//!     ├── idle ──WORD_DETECTED──▶ awaiting-lookup
//!     ├── awaiting-lookup ──ok──▶ translated
//!     │                  ╰─err/empty─▶ translation-failed
//!     ├── translated ──WORD_DETECTED──▶ awaiting-lookup
//!     └── translation-failed ──WORD_DETECTED──▶ awaiting-lookup
//! ```
//!
//! # Invariants
//!
//! 1. Exactly one leaf state is active.
//! 2. Only [`HoverMachine::update`] mutates the [`HoverContext`].
//! 3. Every new target word, reset, and disable advances the lookup ticket;
//!    a [`HoverMsg::LookupFinished`] is applied only when its ticket is the
//!    current one and the machine is in `awaiting-lookup`.
//! 4. Leaving `hotkey-pressed` clears word details, tooltip styles, and the
//!    error message.
//! 5. Detecting the word that is already targeted does nothing.
//!
//! # Failure Modes
//!
//! - Settings load failure re-issues [`HoverEffect::LoadSettings`]; there is
//!   no backoff and no attempt limit.
//! - A lookup error or an empty definition lands in `translation-failed`
//!   with a user-facing message; the next detected word clears it.

use std::fmt;

use tracing::{debug, trace, warn};
use wordy_core::Detection;
use wordy_core::word::is_supported_word;
use wordy_layout::{TooltipPosition, TooltipStyles, TooltipStylesPatch, default_position};

use crate::lookup::{LookupError, LookupRequest, LookupResponse, LookupResult, Pronunciations};
use crate::program::{Cmd, Model};
use crate::settings::{Settings, SettingsUpdate};
use crate::storage::StorageResult;

// ---------------------------------------------------------------------------
// States
// ---------------------------------------------------------------------------

/// Sub-states of `enabled.hotkey-pressed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressedState {
    Idle,
    AwaitingLookup,
    Translated,
    TranslationFailed,
}

/// Sub-states of `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnabledState {
    HotkeyUnpressed,
    HotkeyPressed(PressedState),
}

/// The active leaf state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoverState {
    #[default]
    Loading,
    Disabled,
    Enabled(EnabledState),
}

impl HoverState {
    const UNPRESSED: Self = Self::Enabled(EnabledState::HotkeyUnpressed);

    const fn pressed(state: PressedState) -> Self {
        Self::Enabled(EnabledState::HotkeyPressed(state))
    }

    /// Dotted path of the active leaf, e.g. `enabled.hotkey-pressed.idle`.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Disabled => "disabled",
            Self::Enabled(EnabledState::HotkeyUnpressed) => "enabled.hotkey-unpressed",
            Self::Enabled(EnabledState::HotkeyPressed(pressed)) => match pressed {
                PressedState::Idle => "enabled.hotkey-pressed.idle",
                PressedState::AwaitingLookup => "enabled.hotkey-pressed.awaiting-lookup",
                PressedState::Translated => "enabled.hotkey-pressed.translated",
                PressedState::TranslationFailed => "enabled.hotkey-pressed.translation-failed",
            },
        }
    }

    /// Whether the active leaf is `prefix` or lies beneath it.
    #[must_use]
    pub fn matches(&self, prefix: &str) -> bool {
        let path = self.path();
        match path.strip_prefix(prefix) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    #[must_use]
    pub const fn is_hotkey_pressed(&self) -> bool {
        matches!(self, Self::Enabled(EnabledState::HotkeyPressed(_)))
    }

    /// The `hotkey-pressed` sub-state, if active.
    #[must_use]
    pub const fn pressed_state(&self) -> Option<PressedState> {
        match self {
            Self::Enabled(EnabledState::HotkeyPressed(pressed)) => Some(*pressed),
            _ => None,
        }
    }
}

impl fmt::Display for HoverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// The targeted word and its dictionary entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WordDetails {
    pub word: String,
    /// Empty until a lookup succeeds.
    pub definition: String,
    pub font_size: f64,
    pub pronunciations: Pronunciations,
}

/// Data owned by the machine alongside its state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HoverContext {
    pub settings: Settings,
    pub word_details: WordDetails,
    pub tooltip_styles: TooltipStyles,
    pub error_message: String,
}

impl HoverContext {
    /// Whether word details, styles, and error are all empty.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.word_details == WordDetails::default()
            && self.tooltip_styles.is_empty()
            && self.error_message.is_empty()
    }

    fn clear(&mut self) {
        self.word_details = WordDetails::default();
        self.tooltip_styles = TooltipStyles::default();
        self.error_message.clear();
    }
}

/// Freshness token for one issued lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct LookupTicket(u64);

impl LookupTicket {
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for LookupTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Messages and effects
// ---------------------------------------------------------------------------

/// A detected word, ready for the machine.
#[derive(Debug, Clone, PartialEq)]
pub struct WordDetection {
    pub word: String,
    /// Whether the word may be sent to the dictionary.
    pub supported: bool,
    pub font_size: f64,
    /// Initial tooltip position for this word.
    pub position: TooltipPosition,
}

impl WordDetection {
    /// Build a detection, validating the word's shape.
    pub fn new(word: impl Into<String>, font_size: f64, position: TooltipPosition) -> Self {
        let word = word.into();
        Self {
            supported: is_supported_word(&word),
            word,
            font_size,
            position,
        }
    }

    /// From a page detection, placing the tooltip below the pointer.
    #[must_use]
    pub fn from_detection(detection: &Detection) -> Self {
        Self {
            word: detection.candidate.word.clone(),
            supported: detection.candidate.supported,
            font_size: detection.font_size,
            position: default_position(detection.pointer, detection.scroll, detection.font_size),
        }
    }
}

#[derive(Debug)]
pub enum HoverMsg {
    /// Result of [`HoverEffect::LoadSettings`].
    SettingsLoaded(StorageResult<Settings>),
    HotkeyPressed,
    /// Hotkey released or window focus changed.
    Reset,
    WordDetected(WordDetection),
    /// Result of [`HoverEffect::Lookup`].
    LookupFinished {
        ticket: LookupTicket,
        result: LookupResult<LookupResponse>,
    },
    /// Corrective patch from the layout pass.
    TooltipStylesChanged(TooltipStylesPatch),
    EnableToggled,
    ShowPronunciationInfoToggled,
}

impl HoverMsg {
    /// Event name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SettingsLoaded(_) => "SETTINGS_LOADED",
            Self::HotkeyPressed => "HOTKEY_PRESSED",
            Self::Reset => "RESET",
            Self::WordDetected(_) => "WORD_DETECTED",
            Self::LookupFinished { .. } => "LOOKUP_FINISHED",
            Self::TooltipStylesChanged(_) => "TOOLTIP_STYLES_CHANGED",
            Self::EnableToggled => "ENABLE_TOGGLED",
            Self::ShowPronunciationInfoToggled => "SHOW_PRONUNCIATION_INFO_TOGGLED",
        }
    }
}

/// Side effects requested by the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverEffect {
    /// Load settings and answer with [`HoverMsg::SettingsLoaded`].
    LoadSettings,
    /// Write the changed fields to the settings store.
    PersistSettings(SettingsUpdate),
    /// Look up a word and answer with [`HoverMsg::LookupFinished`].
    Lookup {
        ticket: LookupTicket,
        request: LookupRequest,
    },
}

pub type HoverCmd = Cmd<HoverMsg, HoverEffect>;

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct HoverMachine {
    state: HoverState,
    context: HoverContext,
    ticket: LookupTicket,
    load_attempts: u32,
}

impl HoverMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    pub fn context(&self) -> &HoverContext {
        &self.context
    }

    pub fn settings(&self) -> Settings {
        self.context.settings
    }

    /// Ticket a lookup response must carry to be applied.
    pub fn current_ticket(&self) -> LookupTicket {
        self.ticket
    }

    /// Settings loads issued so far, including retries.
    pub fn load_attempts(&self) -> u32 {
        self.load_attempts
    }

    pub fn matches(&self, prefix: &str) -> bool {
        self.state.matches(prefix)
    }

    fn load_settings(&mut self) -> HoverCmd {
        self.load_attempts = self.load_attempts.saturating_add(1);
        Cmd::effect(HoverEffect::LoadSettings)
    }

    /// Drop the targeted word and invalidate any in-flight lookup.
    fn discard_work(&mut self) {
        self.context.clear();
        self.ticket = self.ticket.next();
    }

    fn on_settings_loaded(&mut self, result: StorageResult<Settings>) -> HoverCmd {
        if self.state != HoverState::Loading {
            debug!(state = %self.state, "settings load result ignored");
            return Cmd::none();
        }
        match result {
            Ok(settings) => {
                self.context.settings = settings;
                self.state = if settings.enabled {
                    HoverState::UNPRESSED
                } else {
                    HoverState::Disabled
                };
                Cmd::none()
            }
            Err(err) => {
                warn!(attempt = self.load_attempts, error = %err, "settings load failed, retrying");
                self.load_settings()
            }
        }
    }

    fn on_hotkey_pressed(&mut self) -> HoverCmd {
        if self.state == HoverState::UNPRESSED {
            self.state = HoverState::pressed(PressedState::Idle);
        }
        Cmd::none()
    }

    fn on_reset(&mut self) -> HoverCmd {
        self.discard_work();
        if self.state.is_enabled() {
            self.state = HoverState::UNPRESSED;
        }
        Cmd::none()
    }

    fn on_word_detected(&mut self, detection: WordDetection) -> HoverCmd {
        if !self.state.is_hotkey_pressed() || detection.word.trim().is_empty() {
            return Cmd::none();
        }
        if detection.word == self.context.word_details.word {
            trace!(word = %detection.word, "word already targeted");
            return Cmd::none();
        }

        self.discard_work();
        self.context.word_details.word = detection.word;
        self.context.word_details.font_size = detection.font_size;

        if !detection.supported {
            debug!(word = %self.context.word_details.word, "unsupported word, no lookup");
            self.state = HoverState::pressed(PressedState::Idle);
            return Cmd::none();
        }

        self.context.tooltip_styles = TooltipStyles::at(detection.position);
        self.state = HoverState::pressed(PressedState::AwaitingLookup);
        Cmd::effect(HoverEffect::Lookup {
            ticket: self.ticket,
            request: LookupRequest::word(self.context.word_details.word.clone()),
        })
    }

    fn on_lookup_finished(
        &mut self,
        ticket: LookupTicket,
        result: LookupResult<LookupResponse>,
    ) -> HoverCmd {
        if ticket != self.ticket
            || self.state != HoverState::pressed(PressedState::AwaitingLookup)
        {
            debug!(%ticket, current = %self.ticket, state = %self.state, "stale lookup dropped");
            return Cmd::none();
        }

        let failure = match result {
            Ok(response) if !response.is_empty() => {
                let details = &mut self.context.word_details;
                details.definition = response.definition;
                details.pronunciations = response.pronunciations;
                self.state = HoverState::pressed(PressedState::Translated);
                return Cmd::none();
            }
            Ok(_) => LookupError::EmptyDefinition,
            Err(err) => err,
        };
        debug!(word = %self.context.word_details.word, error = %failure, "lookup failed");
        self.context.error_message = failure.user_message().to_string();
        self.state = HoverState::pressed(PressedState::TranslationFailed);
        Cmd::none()
    }

    fn on_tooltip_styles_changed(&mut self, patch: TooltipStylesPatch) -> HoverCmd {
        if matches!(
            self.state.pressed_state(),
            Some(PressedState::Translated | PressedState::TranslationFailed)
        ) {
            self.context.tooltip_styles.apply(&patch);
        }
        Cmd::none()
    }

    fn on_enable_toggled(&mut self) -> HoverCmd {
        let enabled = match self.state {
            HoverState::Loading => return Cmd::none(),
            HoverState::Disabled => {
                self.state = HoverState::UNPRESSED;
                true
            }
            HoverState::Enabled(_) => {
                self.discard_work();
                self.state = HoverState::Disabled;
                false
            }
        };
        self.context.settings.enabled = enabled;
        Cmd::effect(HoverEffect::PersistSettings(SettingsUpdate::enabled(
            enabled,
        )))
    }

    fn on_show_pronunciation_info_toggled(&mut self) -> HoverCmd {
        if self.state == HoverState::Loading {
            return Cmd::none();
        }
        let show = !self.context.settings.show_pronunciation_info;
        self.context.settings.show_pronunciation_info = show;
        Cmd::effect(HoverEffect::PersistSettings(
            SettingsUpdate::show_pronunciation_info(show),
        ))
    }
}

impl Model for HoverMachine {
    type Message = HoverMsg;
    type Effect = HoverEffect;

    fn init(&mut self) -> HoverCmd {
        self.load_settings()
    }

    fn update(&mut self, msg: HoverMsg) -> HoverCmd {
        let before = self.state;
        let event = msg.name();
        let cmd = match msg {
            HoverMsg::SettingsLoaded(result) => self.on_settings_loaded(result),
            HoverMsg::HotkeyPressed => self.on_hotkey_pressed(),
            HoverMsg::Reset => self.on_reset(),
            HoverMsg::WordDetected(detection) => self.on_word_detected(detection),
            HoverMsg::LookupFinished { ticket, result } => self.on_lookup_finished(ticket, result),
            HoverMsg::TooltipStylesChanged(patch) => self.on_tooltip_styles_changed(patch),
            HoverMsg::EnableToggled => self.on_enable_toggled(),
            HoverMsg::ShowPronunciationInfoToggled => self.on_show_pronunciation_info_toggled(),
        };
        if before != self.state {
            debug!(event, from = %before, to = %self.state, "state transition");
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::Pronunciation;
    use crate::program::Program;
    use crate::storage::StorageError;
    use pretty_assertions::assert_eq;
    use wordy_layout::{Edit, PositionPatch};

    fn position() -> TooltipPosition {
        TooltipPosition {
            left: Some(10.0),
            top: Some(30.0),
            ..TooltipPosition::default()
        }
    }

    fn detected(word: &str) -> HoverMsg {
        HoverMsg::WordDetected(WordDetection::new(word, 16.0, position()))
    }

    fn found(definition: &str) -> LookupResult<LookupResponse> {
        Ok(LookupResponse::new(
            definition,
            Pronunciations {
                american: Pronunciation::new("[wəːrld]", "https://audio/us.mp3"),
                british: Pronunciation::default(),
            },
        ))
    }

    fn pressed() -> Program<HoverMachine> {
        let mut program = Program::new(HoverMachine::new());
        program.start();
        program.send(HoverMsg::SettingsLoaded(Ok(Settings::default())));
        program.send(HoverMsg::HotkeyPressed);
        program.take_effects();
        program
    }

    fn lookups(program: &mut Program<HoverMachine>) -> Vec<(LookupTicket, String)> {
        program
            .take_effects()
            .into_iter()
            .filter_map(|effect| match effect {
                HoverEffect::Lookup { ticket, request } => Some((ticket, request.text().to_string())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn starts_loading_and_requests_settings() {
        let mut program = Program::new(HoverMachine::new());
        program.start();
        assert_eq!(program.model().state(), HoverState::Loading);
        assert_eq!(program.take_effects(), vec![HoverEffect::LoadSettings]);
    }

    #[test]
    fn settings_pick_initial_state() {
        let mut program = Program::new(HoverMachine::new());
        program.start();
        program.send(HoverMsg::SettingsLoaded(Ok(Settings {
            enabled: false,
            show_pronunciation_info: true,
        })));
        assert_eq!(program.model().state(), HoverState::Disabled);

        let program = pressed();
        assert!(program.model().matches("enabled.hotkey-pressed.idle"));
    }

    #[test]
    fn load_failure_retries() {
        let mut program = Program::new(HoverMachine::new());
        program.start();
        program.take_effects();
        program.send(HoverMsg::SettingsLoaded(Err(StorageError::Poisoned)));
        assert_eq!(program.model().state(), HoverState::Loading);
        assert_eq!(program.take_effects(), vec![HoverEffect::LoadSettings]);
        assert_eq!(program.model().load_attempts(), 2);
    }

    #[test]
    fn word_lookup_success() {
        let mut program = pressed();
        program.send(detected("world"));
        assert!(program.model().matches("enabled.hotkey-pressed.awaiting-lookup"));
        let issued = lookups(&mut program);
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].1, "world");

        program.send(HoverMsg::LookupFinished {
            ticket: issued[0].0,
            result: found("1. the earth"),
        });
        let model = program.model();
        assert!(model.matches("enabled.hotkey-pressed.translated"));
        assert_eq!(model.context().word_details.definition, "1. the earth");
        assert_eq!(model.context().word_details.font_size, 16.0);
        assert_eq!(model.context().tooltip_styles, TooltipStyles::at(position()));
    }

    #[test]
    fn empty_definition_fails_with_message() {
        let mut program = pressed();
        program.send(detected("qwerty"));
        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::LookupFinished {
            ticket,
            result: found(""),
        });
        let model = program.model();
        assert!(model.matches("enabled.hotkey-pressed.translation-failed"));
        assert!(!model.context().error_message.is_empty());
        assert_eq!(model.context().word_details.definition, "");
    }

    #[test]
    fn transport_error_fails() {
        let mut program = pressed();
        program.send(detected("word"));
        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::LookupFinished {
            ticket,
            result: Err(LookupError::Transport("offline".into())),
        });
        assert_eq!(
            program.model().context().error_message,
            "The dictionary could not be reached."
        );
    }

    #[test]
    fn same_word_is_ignored() {
        let mut program = pressed();
        program.send(detected("hello"));
        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::LookupFinished {
            ticket,
            result: found("1. greeting"),
        });
        let before = program.model().context().clone();
        program.send(HoverMsg::WordDetected(WordDetection::new(
            "hello",
            30.0,
            TooltipPosition::default(),
        )));
        assert!(lookups(&mut program).is_empty());
        assert_eq!(program.model().context(), &before);
    }

    #[test]
    fn superseded_response_is_dropped() {
        let mut program = pressed();
        program.send(detected("first"));
        let (old_ticket, _) = lookups(&mut program)[0].clone();
        program.send(detected("second"));
        let (new_ticket, word) = lookups(&mut program)[0].clone();
        assert_eq!(word, "second");
        assert_ne!(old_ticket, new_ticket);

        program.send(HoverMsg::LookupFinished {
            ticket: old_ticket,
            result: found("1. stale"),
        });
        assert!(program.model().matches("enabled.hotkey-pressed.awaiting-lookup"));
        assert_eq!(program.model().context().word_details.word, "second");
        assert_eq!(program.model().context().word_details.definition, "");

        program.send(HoverMsg::LookupFinished {
            ticket: new_ticket,
            result: found("1. fresh"),
        });
        assert_eq!(program.model().context().word_details.definition, "1. fresh");
    }

    #[test]
    fn unsupported_word_tracked_without_lookup() {
        let mut program = pressed();
        program.send(detected("café"));
        assert!(lookups(&mut program).is_empty());
        assert!(program.model().matches("enabled.hotkey-pressed.idle"));
        assert_eq!(program.model().context().word_details.word, "café");

        program.send(detected("café"));
        assert!(lookups(&mut program).is_empty());
    }

    #[test]
    fn reset_clears_context_and_invalidates() {
        let mut program = pressed();
        program.send(detected("hello"));
        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::Reset);
        assert!(program.model().matches("enabled.hotkey-unpressed"));
        assert!(program.model().context().is_cleared());

        program.send(HoverMsg::LookupFinished {
            ticket,
            result: found("1. late"),
        });
        assert!(program.model().context().is_cleared());
        assert!(program.model().matches("enabled.hotkey-unpressed"));
    }

    #[test]
    fn styles_merge_only_after_lookup() {
        let mut program = pressed();
        program.send(detected("hello"));
        let patch = TooltipStylesPatch {
            position: PositionPatch {
                left: Edit::Clear,
                right: Edit::Set(16.0),
                ..PositionPatch::default()
            },
            ..TooltipStylesPatch::default()
        };
        program.send(HoverMsg::TooltipStylesChanged(patch));
        assert_eq!(program.model().context().tooltip_styles.position.right, None);

        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::LookupFinished {
            ticket,
            result: found("1. greeting"),
        });
        program.send(HoverMsg::TooltipStylesChanged(patch));
        let styles = program.model().context().tooltip_styles;
        assert_eq!(styles.position.left, None);
        assert_eq!(styles.position.right, Some(16.0));
        assert_eq!(styles.position.top, Some(30.0));
        assert!(program.model().matches("enabled.hotkey-pressed.translated"));
    }

    #[test]
    fn disable_mid_lookup_discards_result() {
        let mut program = pressed();
        program.send(detected("hello"));
        let (ticket, _) = lookups(&mut program)[0].clone();
        program.send(HoverMsg::EnableToggled);
        assert_eq!(program.model().state(), HoverState::Disabled);
        assert!(!program.model().settings().enabled);
        assert_eq!(
            program.take_effects(),
            vec![HoverEffect::PersistSettings(SettingsUpdate::enabled(false))]
        );

        program.send(HoverMsg::LookupFinished {
            ticket,
            result: found("1. greeting"),
        });
        assert!(program.model().context().is_cleared());

        program.send(HoverMsg::EnableToggled);
        assert!(program.model().matches("enabled.hotkey-unpressed"));
        assert!(program.model().settings().enabled);
    }

    #[test]
    fn pronunciation_toggle_keeps_state() {
        let mut program = pressed();
        program.send(detected("hello"));
        program.take_effects();
        program.send(HoverMsg::ShowPronunciationInfoToggled);
        assert!(program.model().matches("enabled.hotkey-pressed.awaiting-lookup"));
        assert!(!program.model().settings().show_pronunciation_info);
        assert_eq!(
            program.take_effects(),
            vec![HoverEffect::PersistSettings(
                SettingsUpdate::show_pronunciation_info(false)
            )]
        );
    }

    #[test]
    fn hotkey_ignored_outside_unpressed() {
        let mut program = Program::new(HoverMachine::new());
        program.start();
        program.send(HoverMsg::HotkeyPressed);
        assert_eq!(program.model().state(), HoverState::Loading);
        program.send(detected("hello"));
        assert!(program.model().context().is_cleared());
    }

    #[test]
    fn state_paths_match_prefixes() {
        let state = HoverState::pressed(PressedState::Translated);
        assert!(state.matches("enabled"));
        assert!(state.matches("enabled.hotkey-pressed"));
        assert!(!state.matches("enabled.hotkey"));
        assert!(!state.matches("disabled"));
        assert_eq!(state.to_string(), "enabled.hotkey-pressed.translated");
    }
}
