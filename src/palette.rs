// Copyright (c) 2026 rezky_nightky

use std::fmt;

use crossterm::style::Color;
use tracing::warn;

use crate::cell::Style;
use crate::runtime::ColorMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl NamedColor {
    pub const ALL: [NamedColor; 8] = [
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::White,
    ];

    pub const DEFAULT_RAIN: NamedColor = NamedColor::Cyan;
    pub const DEFAULT_LIGHTNING: NamedColor = NamedColor::Yellow;

    pub fn name(self) -> &'static str {
        match self {
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::White => "white",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
    }

    pub fn resolve(what: &str, s: &str, fallback: NamedColor) -> Self {
        Self::parse(s).unwrap_or_else(|| {
            warn!(
                "invalid {} color '{}', using default '{}'",
                what, s, fallback
            );
            fallback
        })
    }

    pub fn ansi_index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub rain: Style,
    pub lightning: Style,
}

fn fg(mode: ColorMode, c: NamedColor) -> Option<Color> {
    match mode {
        ColorMode::Mono => None,
        ColorMode::Ansi8 => Some(Color::AnsiValue(c.ansi_index())),
    }
}

pub fn build_palette(rain: NamedColor, lightning: NamedColor, mode: ColorMode) -> Palette {
    Palette {
        rain: Style {
            fg: fg(mode, rain),
            bold: false,
        },
        lightning: Style {
            fg: fg(mode, lightning),
            bold: true,
        },
    }
}
