#![forbid(unsafe_code)]

//! Runtime: the hover/translation machine and everything that drives it.
//!
//! # Role in Wordy
//! `wordy-runtime` coordinates detected words with dictionary lookups and
//! tooltip placement. The machine is a pure [`program::Model`]; lookups and
//! settings I/O are effects it returns, executed by [`ContentScript`] and
//! answered with messages.
//!
//! # Primary responsibilities
//! - **HoverMachine**: loading/disabled/enabled states, hotkey handling,
//!   one logical lookup slot guarded by a freshness ticket.
//! - **Settings bridge**: shared settings in [`ExtensionStorage`] with a
//!   change stream that becomes machine toggles.
//! - **ContentScript**: listener rules, debouncing, effect execution, and
//!   the layout pass.
//! - **TooltipView**: what the UI draws for the current state.

pub mod config;
pub mod content;
pub mod lookup;
pub mod machine;
pub mod program;
pub mod settings;
pub mod storage;
pub mod view;

pub use config::{ConfigError, WordyConfig};
pub use content::{ContentScript, HostAction, LookupMode};
pub use lookup::{
    LookupError, LookupRequest, LookupResponse, LookupResult, LookupService, MessageLookup,
    MessageTransport, Pronunciation, Pronunciations,
};
pub use machine::{
    EnabledState, HoverContext, HoverEffect, HoverMachine, HoverMsg, HoverState, LookupTicket,
    PressedState, WordDetails, WordDetection,
};
pub use program::{Cmd, Model, Program};
pub use settings::{
    Settings, SettingsBridge, SettingsChanges, SettingsDelta, SettingsToggle, SettingsUpdate,
};
#[cfg(feature = "state-persistence")]
pub use storage::FileStorage;
pub use storage::{
    AreaName, ExtensionStorage, MemoryStorage, StorageBackend, StorageChange, StorageError,
    StorageResult, StorageWatch,
};
pub use view::{Accent, PronunciationRow, TooltipFrame, TooltipView, format_definition};
