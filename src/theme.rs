// SPDX-License-Identifier: MPL-2.0
//! Accent colours per toast type.
//!
//! The table starts from [`palette`] and can be overridden per toaster
//! instance, either in code via [`Theme::with_color`] or from the `[theme]`
//! section of the configuration file.

use crate::config::Config;
use crate::error::{Error, Result};
use iced_core::Color;
use std::fmt;
use std::str::FromStr;

pub mod palette {
    use iced_core::Color;

    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);

    // Semantic colors
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);
}

/// Visual category of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastType {
    #[default]
    Default,
    Success,
    Fail,
    Info,
}

impl ToastType {
    pub const ALL: [ToastType; 4] = [
        ToastType::Default,
        ToastType::Success,
        ToastType::Fail,
        ToastType::Info,
    ];

    fn index(self) -> usize {
        match self {
            ToastType::Default => 0,
            ToastType::Success => 1,
            ToastType::Fail => 2,
            ToastType::Info => 3,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ToastType::Default => "default",
            ToastType::Success => "success",
            ToastType::Fail => "fail",
            ToastType::Info => "info",
        }
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Ok(ToastType::Default),
            "success" => Ok(ToastType::Success),
            "fail" => Ok(ToastType::Fail),
            "info" => Ok(ToastType::Info),
            other => Err(Error::Config(format!("unknown toast type: {}", other))),
        }
    }
}

/// Toast type → accent colour table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    accents: [Color; 4],
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accents: [
                palette::GRAY_400,
                palette::SUCCESS_500,
                palette::ERROR_500,
                palette::INFO_500,
            ],
        }
    }
}

impl Theme {
    /// Builds the default table with the `[theme]` overrides from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut theme = Self::default();
        for (name, hex) in &config.theme {
            let toast_type = name.parse::<ToastType>()?;
            let color = parse_hex(hex)
                .ok_or_else(|| Error::Config(format!("invalid colour for {}: {}", name, hex)))?;
            theme = theme.with_color(toast_type, color);
        }
        Ok(theme)
    }

    #[must_use]
    pub fn with_color(mut self, toast_type: ToastType, color: Color) -> Self {
        self.accents[toast_type.index()] = color;
        self
    }

    #[must_use]
    pub fn accent(&self, toast_type: ToastType) -> Color {
        self.accents[toast_type.index()]
    }
}

/// Parses `#RRGGBB` or `RRGGBB`.
fn parse_hex(raw: &str) -> Option<Color> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
