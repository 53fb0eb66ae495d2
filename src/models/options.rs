//! Style and encoding options for a single render
//!
//! [`QrOptions`] is a plain value. Changes go through [`QrOptions::apply`],
//! which returns a new value with every field clamped to its supported range,
//! so a renderer can treat its input as a pure function argument.

use super::{ECLevel, Logo, Rgb};
use crate::error::Error;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Supported canvas side length in pixels
pub const SIZE_RANGE: RangeInclusive<u32> = 100..=500;
/// Supported quiet-zone margin in modules
pub const MARGIN_RANGE: RangeInclusive<u32> = 0..=10;
/// Supported logo size as a percentage of the canvas
pub const LOGO_SIZE_RANGE: RangeInclusive<u32> = 15..=25;
/// Supported border stroke width in pixels
pub const BORDER_WIDTH_RANGE: RangeInclusive<u32> = 1..=20;

/// Shown when a logo forces the error correction level
pub const EC_LOCK_REASON: &str =
    "Raised to High (H) automatically to keep the code scannable with a logo";

/// Border stroke style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BorderStyle {
    /// No border
    #[default]
    None,
    /// Continuous stroke
    Solid,
    /// 5px on, 5px off
    Dashed,
    /// 1px on, 3px off
    Dotted,
}

impl BorderStyle {
    /// On/off dash lengths in pixels; `None` for a continuous stroke or no border
    pub fn dash_pattern(&self) -> Option<(u32, u32)> {
        match self {
            BorderStyle::Dashed => Some((5, 5)),
            BorderStyle::Dotted => Some((1, 3)),
            BorderStyle::None | BorderStyle::Solid => None,
        }
    }

    /// Whether any stroke is drawn
    pub fn is_visible(&self) -> bool {
        *self != BorderStyle::None
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BorderStyle::None => "No border",
            BorderStyle::Solid => "Solid",
            BorderStyle::Dashed => "Dashed",
            BorderStyle::Dotted => "Dotted",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BorderStyle::None => "none",
            BorderStyle::Solid => "solid",
            BorderStyle::Dashed => "dashed",
            BorderStyle::Dotted => "dotted",
        })
    }
}

impl FromStr for BorderStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BorderStyle::None),
            "solid" => Ok(BorderStyle::Solid),
            "dashed" => Ok(BorderStyle::Dashed),
            "dotted" => Ok(BorderStyle::Dotted),
            _ => Err(Error::InvalidOption(format!("border style '{s}'"))),
        }
    }
}

/// Complete style descriptor and encoding options for a render
#[derive(Debug, Clone, PartialEq)]
pub struct QrOptions {
    /// Canvas side length in pixels
    pub size: u32,
    /// Dark module colour
    pub foreground: Rgb,
    /// Light module and quiet-zone colour
    pub background: Rgb,
    /// Quiet-zone width in modules
    pub margin: u32,
    /// Requested error correction level (see [`QrOptions::effective_ec_level`])
    pub ec_level: ECLevel,
    /// Optional centred logo
    pub logo: Option<Logo>,
    /// Logo side as a percentage of the canvas side
    pub logo_size: u32,
    /// Border stroke style
    pub border_style: BorderStyle,
    /// Border stroke colour
    pub border_color: Rgb,
    /// Border stroke width in pixels
    pub border_width: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 200,
            foreground: Rgb::BLACK,
            background: Rgb::WHITE,
            margin: 4,
            ec_level: ECLevel::M,
            logo: None,
            logo_size: 20,
            border_style: BorderStyle::None,
            border_color: Rgb::BLACK,
            border_width: 2,
        }
    }
}

/// A single option edit
#[derive(Debug, Clone, PartialEq)]
pub enum OptionChange {
    /// Set canvas size
    Size(u32),
    /// Set dark colour
    Foreground(Rgb),
    /// Set light colour
    Background(Rgb),
    /// Set quiet-zone margin
    Margin(u32),
    /// Set requested error correction level
    EcLevel(ECLevel),
    /// Attach or remove the logo
    Logo(Option<Logo>),
    /// Set logo size percentage
    LogoSize(u32),
    /// Set border style
    BorderStyle(BorderStyle),
    /// Set border colour
    BorderColor(Rgb),
    /// Set border width
    BorderWidth(u32),
}

impl QrOptions {
    /// Return a copy with `change` applied and all fields clamped
    pub fn apply(&self, change: OptionChange) -> QrOptions {
        let mut next = self.clone();
        match change {
            OptionChange::Size(size) => next.size = size,
            OptionChange::Foreground(color) => next.foreground = color,
            OptionChange::Background(color) => next.background = color,
            OptionChange::Margin(margin) => next.margin = margin,
            OptionChange::EcLevel(level) => next.ec_level = level,
            OptionChange::Logo(logo) => next.logo = logo,
            OptionChange::LogoSize(percent) => next.logo_size = percent,
            OptionChange::BorderStyle(style) => next.border_style = style,
            OptionChange::BorderColor(color) => next.border_color = color,
            OptionChange::BorderWidth(width) => next.border_width = width,
        }
        next.normalized()
    }

    /// Clamp every numeric field into its supported range
    pub fn normalized(mut self) -> QrOptions {
        self.size = clamp(self.size, &SIZE_RANGE);
        self.margin = clamp(self.margin, &MARGIN_RANGE);
        self.logo_size = clamp(self.logo_size, &LOGO_SIZE_RANGE);
        self.border_width = clamp(self.border_width, &BORDER_WIDTH_RANGE);
        self
    }

    /// Level passed to the encoder: a logo always forces `H`
    pub fn effective_ec_level(&self) -> ECLevel {
        if self.logo.is_some() {
            ECLevel::H
        } else {
            self.ec_level
        }
    }

    /// Why the level cannot be edited, when it is forced
    pub fn ec_level_lock(&self) -> Option<&'static str> {
        self.logo.as_ref().map(|_| EC_LOCK_REASON)
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}
