#![forbid(unsafe_code)]

//! Render snapshot of the tooltip.
//!
//! The UI layer is a passive subscriber: after each update it asks for a
//! [`TooltipView`] and draws exactly that. A tooltip exists only in
//! `translated` (definition) and `translation-failed` (error with a search
//! link).

use serde::Serialize;
use wordy_layout::TooltipStyles;

use crate::config::WordyConfig;
use crate::lookup::Pronunciation;
use crate::machine::{HoverMachine, PressedState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    American,
    British,
}

impl Accent {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::American => "US",
            Self::British => "UK",
        }
    }

    /// Accessible name of the play button.
    #[must_use]
    pub const fn play_label(self) -> &'static str {
        match self {
            Self::American => "Play American pronunciation",
            Self::British => "Play British pronunciation",
        }
    }
}

/// One pronunciation line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PronunciationRow {
    pub accent: Accent,
    pub symbol: String,
    /// Present only when there is audio to play.
    pub audio_href: Option<String>,
}

impl PronunciationRow {
    fn from_entry(accent: Accent, entry: &Pronunciation) -> Option<Self> {
        if entry.symbol.is_empty() {
            return None;
        }
        Some(Self {
            accent,
            symbol: entry.symbol.clone(),
            audio_href: (!entry.href.is_empty()).then(|| entry.href.clone()),
        })
    }
}

/// Box properties shared by both tooltip variants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipFrame {
    pub element_id: String,
    pub styles: TooltipStyles,
    pub max_width: f64,
    pub max_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TooltipView {
    Definition {
        frame: TooltipFrame,
        word: String,
        /// Empty when pronunciation info is hidden or unavailable.
        pronunciations: Vec<PronunciationRow>,
        lines: Vec<String>,
    },
    Error {
        frame: TooltipFrame,
        word: String,
        message: String,
        search_url: String,
    },
}

impl TooltipView {
    /// Snapshot for the machine's current state, if a tooltip is visible.
    #[must_use]
    pub fn of(machine: &HoverMachine, config: &WordyConfig) -> Option<Self> {
        let context = machine.context();
        let details = &context.word_details;
        let frame = TooltipFrame {
            element_id: config.tooltip_element_id.clone(),
            styles: context.tooltip_styles,
            max_width: config.tooltip_max_width,
            max_height: config.tooltip_max_height,
        };
        match machine.state().pressed_state()? {
            PressedState::Translated => {
                let pronunciations = if context.settings.show_pronunciation_info {
                    [
                        (Accent::American, &details.pronunciations.american),
                        (Accent::British, &details.pronunciations.british),
                    ]
                    .into_iter()
                    .filter_map(|(accent, entry)| PronunciationRow::from_entry(accent, entry))
                    .collect()
                } else {
                    Vec::new()
                };
                Some(Self::Definition {
                    frame,
                    word: details.word.clone(),
                    pronunciations,
                    lines: format_definition(&details.definition),
                })
            }
            PressedState::TranslationFailed => Some(Self::Error {
                frame,
                word: details.word.clone(),
                message: context.error_message.clone(),
                search_url: config.search_url(&details.word),
            }),
            PressedState::Idle | PressedState::AwaitingLookup => None,
        }
    }

    #[must_use]
    pub fn frame(&self) -> &TooltipFrame {
        match self {
            Self::Definition { frame, .. } | Self::Error { frame, .. } => frame,
        }
    }

    /// Plain-text rendering, one line per row.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = Vec::new();
        match self {
            Self::Definition {
                pronunciations,
                lines,
                ..
            } => {
                for row in pronunciations {
                    let audio = if row.audio_href.is_some() { " ♪" } else { "" };
                    out.push(format!("{} {}{audio}", row.accent.label(), row.symbol));
                }
                out.extend(lines.iter().cloned());
            }
            Self::Error {
                word,
                message,
                search_url,
                ..
            } => {
                out.push(message.clone());
                out.push(format!("Search \"{word}\": {search_url}"));
            }
        }
        out.join("\n")
    }
}

/// Split a definition into numbered lines.
///
/// A line break goes before every `2.` to `9.` sense marker that does not
/// continue a longer number, and each `N.` marker is followed by one space.
/// The space applies to any digit before a dot, so `12.5` reads `12. 5`.
#[must_use]
pub fn format_definition(definition: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut prev: Option<char> = None;
    let mut chars = definition.chars().peekable();

    while let Some(c) = chars.next() {
        let is_marker = c.is_ascii_digit() && chars.peek() == Some(&'.');
        if !is_marker {
            current.push(c);
            prev = Some(c);
            continue;
        }
        let continues_number = prev.is_some_and(|p| p.is_ascii_digit());
        if ('2'..='9').contains(&c) && !continues_number && !current.trim().is_empty() {
            lines.push(current.trim().to_string());
            current.clear();
        }
        chars.next();
        current.push(c);
        current.push('.');
        if chars.peek().is_some_and(|next| !next.is_whitespace()) {
            current.push(' ');
        }
        prev = Some('.');
    }
    if !current.trim().is_empty() {
        lines.push(current.trim().to_string());
    }
    lines
}
