//! Supporting value types: color, padding, highlight, orientation, position

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::distance::{Distance, ResolutionContext};
use crate::errors::ThemeError;

/// RGBA color with floating point channels, nominally in 0.0-1.0
///
/// Channels are not clamped; out-of-range values pass through untouched
/// and validation is left to whoever produced them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThemeColor {
    /// red channel
    pub red: f64,
    /// green channel
    pub green: f64,
    /// blue channel
    pub blue: f64,
    /// alpha channel
    pub alpha: f64,
}

impl Default for ThemeColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl ThemeColor {
    pub const BLACK: ThemeColor = ThemeColor {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
    pub const WHITE: ThemeColor = ThemeColor {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };
    pub const TRANSPARENT: ThemeColor = ThemeColor {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 0.0,
    };

    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Create an opaque color from RGB bytes (0-255)
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            red: r as f64 / 255.0,
            green: g as f64 / 255.0,
            blue: b as f64 / 255.0,
            alpha: 1.0,
        }
    }

    /// Create a color from RGBA bytes (0-255)
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            red: r as f64 / 255.0,
            green: g as f64 / 255.0,
            blue: b as f64 / 255.0,
            alpha: a as f64 / 255.0,
        }
    }
}

/// Four-sided padding, one distance per side
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: Distance,
    pub right: Distance,
    pub bottom: Distance,
    pub left: Distance,
}

impl Padding {
    /// Create from all four values
    pub fn new(top: Distance, right: Distance, bottom: Distance, left: Distance) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create uniform padding on all sides
    pub fn uniform(d: Distance) -> Self {
        Self {
            top: d.clone(),
            right: d.clone(),
            bottom: d.clone(),
            left: d,
        }
    }

    /// Create from vertical and horizontal values
    pub fn symmetric(vertical: Distance, horizontal: Distance) -> Self {
        Self {
            top: vertical.clone(),
            bottom: vertical,
            left: horizontal.clone(),
            right: horizontal,
        }
    }

    /// Resolve all sides to pixels
    ///
    /// Percent sides resolve against the extent of their own axis, so the
    /// caller supplies one context per axis. Top and bottom use the
    /// vertical context, left and right the horizontal one.
    pub fn to_pixels(
        &self,
        horizontal: &ResolutionContext,
        vertical: &ResolutionContext,
    ) -> Result<ResolvedPadding, ThemeError> {
        Ok(ResolvedPadding {
            top: self.top.to_pixels(vertical)?,
            right: self.right.to_pixels(horizontal)?,
            bottom: self.bottom.to_pixels(vertical)?,
            left: self.left.to_pixels(horizontal)?,
        })
    }
}

/// Padding with every side resolved to pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedPadding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

bitflags! {
    /// Text highlight attributes
    ///
    /// Bit values match existing theme files and must stay stable.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HighlightStyle: u32 {
        const BOLD = 1;
        const UNDERLINE = 2;
        const ITALIC = 4;
        /// The paired color is meaningful
        const COLOR = 8;
        const STRIKETHROUGH = 16;
        const SMALL_CAPS = 32;
    }
}

/// Highlight attributes with their color
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TextHighlight {
    /// Attributes to apply
    pub style: HighlightStyle,
    /// Only consulted when the COLOR bit is set
    pub color: ThemeColor,
}

impl TextHighlight {
    pub fn new(style: HighlightStyle, color: ThemeColor) -> Self {
        Self { style, color }
    }

    /// Test whether all bits of `flag` are set
    pub fn has(&self, flag: HighlightStyle) -> bool {
        self.style.contains(flag)
    }

    /// The highlight color, if the COLOR bit says it applies
    pub fn effective_color(&self) -> Option<ThemeColor> {
        self.has(HighlightStyle::COLOR).then_some(self.color)
    }
}

/// Window location or gravity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WindowLocation {
    #[default]
    Center,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

/// Layout orientation for containers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

/// An integer interval consumed by matching logic outside this core
///
/// Whether the interval is half-open or closed is the consumer's call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePair {
    pub start: i32,
    pub stop: i32,
}

impl RangePair {
    pub fn new(start: i32, stop: i32) -> Self {
        Self { start, stop }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::LineStyle;

    #[test]
    fn test_color_constructors() {
        let c = ThemeColor::rgb(255, 0, 0);
        assert_eq!(c, ThemeColor::new(1.0, 0.0, 0.0, 1.0));

        let c = ThemeColor::rgba(0, 0, 0, 0);
        assert_eq!(c, ThemeColor::TRANSPARENT);

        // channels pass through unclamped
        let c = ThemeColor::new(1.5, -0.25, 0.0, 2.0);
        assert_eq!(c.red, 1.5);
        assert_eq!(c.green, -0.25);
        assert_eq!(c.alpha, 2.0);
    }

    #[test]
    fn test_padding_constructors() {
        let p = Padding::uniform(Distance::px(10.0));
        assert_eq!(p.top, Distance::px(10.0));
        assert_eq!(p.left, Distance::px(10.0));

        let p = Padding::symmetric(Distance::px(4.0), Distance::px(8.0));
        assert_eq!(p.top, Distance::px(4.0));
        assert_eq!(p.bottom, Distance::px(4.0));
        assert_eq!(p.left, Distance::px(8.0));
        assert_eq!(p.right, Distance::px(8.0));
    }

    #[test]
    fn test_padding_resolves_percent_per_axis() {
        // 10% sides against a 200x100 container
        let p = Padding::uniform(Distance::percent(10.0));
        let horizontal = ResolutionContext::new().with_container_extent(200.0);
        let vertical = ResolutionContext::new().with_container_extent(100.0);

        let resolved = p.to_pixels(&horizontal, &vertical).unwrap();
        assert_eq!(resolved.left, 20.0);
        assert_eq!(resolved.right, 20.0);
        assert_eq!(resolved.top, 10.0);
        assert_eq!(resolved.bottom, 10.0);
    }

    #[test]
    fn test_padding_missing_axis_extent_fails() {
        let p = Padding::uniform(Distance::percent(10.0));
        let horizontal = ResolutionContext::new().with_container_extent(200.0);
        let empty = ResolutionContext::new();
        assert_eq!(
            p.to_pixels(&horizontal, &empty),
            Err(ThemeError::MissingContext("container_extent_px"))
        );
    }

    #[test]
    fn test_highlight_bit_values_are_stable() {
        assert_eq!(HighlightStyle::BOLD.bits(), 1);
        assert_eq!(HighlightStyle::UNDERLINE.bits(), 2);
        assert_eq!(HighlightStyle::ITALIC.bits(), 4);
        assert_eq!(HighlightStyle::COLOR.bits(), 8);
        assert_eq!(HighlightStyle::STRIKETHROUGH.bits(), 16);
        assert_eq!(HighlightStyle::SMALL_CAPS.bits(), 32);
    }

    #[test]
    fn test_highlight_bit_tests_and_merge() {
        let hl = TextHighlight::new(
            HighlightStyle::BOLD | HighlightStyle::UNDERLINE,
            ThemeColor::default(),
        );
        assert!(hl.has(HighlightStyle::BOLD));
        assert!(hl.has(HighlightStyle::UNDERLINE));
        assert!(!hl.has(HighlightStyle::ITALIC));
        assert!(hl.effective_color().is_none());

        let merged = hl.style | HighlightStyle::COLOR;
        let hl = TextHighlight::new(merged, ThemeColor::rgb(255, 0, 0));
        assert!(hl.has(HighlightStyle::BOLD));
        assert_eq!(hl.effective_color(), Some(ThemeColor::rgb(255, 0, 0)));
    }

    #[test]
    fn test_color_serialization_shape() {
        let json = serde_json::to_string(&ThemeColor::BLACK).unwrap();
        assert_eq!(json, r#"{"red":0.0,"green":0.0,"blue":0.0,"alpha":1.0}"#);
    }

    #[test]
    fn test_distance_serde_round_trip() {
        let d = Distance::em(1.5).with_style(LineStyle::Dashed);
        let json = serde_json::to_string(&d).unwrap();
        let back: Distance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }
}
