//! Small value types shared by several controls.

use std::fmt;
use std::str::FromStr;

use crate::error::VeneerError;

/// Orientation of linear containers, sliders, scroll bars and splitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Children are laid out left to right.
    #[default]
    Horizontal,
    /// Children are laid out top to bottom.
    Vertical,
}

impl FromStr for Orientation {
    type Err = VeneerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            other => Err(VeneerError::invalid_argument(
                other,
                "orientation must be 'horizontal' or 'vertical'",
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        })
    }
}

/// Horizontal justification of label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Left,
    Center,
    Right,
}

impl Justify {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

impl FromStr for Justify {
    type Err = VeneerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(VeneerError::invalid_argument(
                other,
                "alignment must be 'left', 'center' or 'right'",
            )),
        }
    }
}

/// Edge of a tab widget that carries the tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TabPosition {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl FromStr for TabPosition {
    type Err = VeneerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Self::Top),
            "bottom" => Ok(Self::Bottom),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(VeneerError::invalid_argument(
                other,
                "tab position must be 'top', 'bottom', 'left' or 'right'",
            )),
        }
    }
}

/// A font request handed to the toolkit as a description string.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Family name, e.g. `"Monospace"`.
    pub family: String,
    /// Size in points.
    pub point_size: f32,
}

impl Font {
    /// Create a font request.
    pub fn new(family: impl Into<String>, point_size: f32) -> Self {
        Self {
            family: family.into(),
            point_size,
        }
    }

    /// Toolkit font description, e.g. `"Monospace 10"`.
    pub fn description(&self) -> String {
        format!("{} {}", self.family, self.point_size)
    }
}
