// Light and dark palettes for the timer and analytics screens.

use clap::ValueEnum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }
}

/// Color palette for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub kind: ThemeKind,
    pub bg: Color,
    pub card: Color,
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub danger: Color,
    pub info: Color,
    pub text: Color,
    pub subtext: Color,
}

impl Theme {
    pub fn from_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }

    pub fn light() -> Self {
        Self {
            kind: ThemeKind::Light,
            bg: Color::Rgb(0xf1, 0xf5, 0xf9),
            card: Color::Rgb(0xff, 0xff, 0xff),
            primary: Color::Rgb(0x4f, 0x46, 0xe5),
            secondary: Color::Rgb(0x14, 0xb8, 0xa6),
            accent: Color::Rgb(0x22, 0xc5, 0x5e),
            danger: Color::Rgb(0xef, 0x44, 0x44),
            info: Color::Rgb(0x0e, 0xa5, 0xe9),
            text: Color::Rgb(0x0f, 0x17, 0x2a),
            subtext: Color::Rgb(0x47, 0x55, 0x69),
        }
    }

    pub fn dark() -> Self {
        Self {
            kind: ThemeKind::Dark,
            bg: Color::Rgb(0x02, 0x06, 0x17),
            card: Color::Rgb(0x02, 0x06, 0x17),
            primary: Color::Rgb(0x81, 0x8c, 0xf8),
            secondary: Color::Rgb(0x2d, 0xd4, 0xbf),
            accent: Color::Rgb(0x4a, 0xde, 0x80),
            danger: Color::Rgb(0xf8, 0x71, 0x71),
            info: Color::Rgb(0x38, 0xbd, 0xf8),
            text: Color::Rgb(0xe5, 0xe7, 0xeb),
            subtext: Color::Rgb(0x94, 0xa3, 0xb8),
        }
    }

    pub fn toggled(&self) -> Self {
        Self::from_kind(self.kind.toggled())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
