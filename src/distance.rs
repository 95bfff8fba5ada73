//! Distance expressions and pixel resolution
//!
//! A distance is an arithmetic tree over unit values (px, em, %, ch) plus
//! an optional line style consulted by border consumers. Relative units
//! stay symbolic until resolved against a [`ResolutionContext`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ThemeError;

/// Distance unit types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    /// Absolute pixels
    #[default]
    Px,
    /// Relative to the font's em size
    Em,
    /// Percentage of the container extent
    Percent,
    /// Relative to the font's character advance width
    Ch,
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceUnit::Px => f.write_str("px"),
            DistanceUnit::Em => f.write_str("em"),
            DistanceUnit::Percent => f.write_str("%"),
            DistanceUnit::Ch => f.write_str("ch"),
        }
    }
}

/// Binary arithmetic operators combining two distance expressions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl fmt::Display for DistanceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceOp::Add => f.write_str("+"),
            DistanceOp::Subtract => f.write_str("-"),
            DistanceOp::Multiply => f.write_str("*"),
            DistanceOp::Divide => f.write_str("/"),
            // keyword form; "%" is the percent unit
            DistanceOp::Modulo => f.write_str("modulo"),
        }
    }
}

/// A node in a distance expression tree
///
/// Each variant carries exactly the fields it needs, so a tree is
/// well-formed by construction: a leaf has no children, a group has one,
/// a binary node has two.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum DistanceExpr {
    /// A raw magnitude with its unit
    Leaf {
        /// Magnitude in `unit` terms
        value: f64,
        /// Unit the magnitude is expressed in
        unit: DistanceUnit,
    },
    /// Parenthesized sub-expression. No numeric effect; kept so source
    /// expressions re-emit with their original grouping.
    Group(Box<DistanceExpr>),
    /// Two sub-expressions combined with an arithmetic operator
    Binary {
        op: DistanceOp,
        left: Box<DistanceExpr>,
        right: Box<DistanceExpr>,
    },
}

impl DistanceExpr {
    /// Create a leaf node
    pub fn leaf(value: f64, unit: DistanceUnit) -> Self {
        DistanceExpr::Leaf { value, unit }
    }

    /// Wrap an expression in a grouping marker
    pub fn group(inner: DistanceExpr) -> Self {
        DistanceExpr::Group(Box::new(inner))
    }

    /// Combine two expressions with an operator
    pub fn binary(op: DistanceOp, left: DistanceExpr, right: DistanceExpr) -> Self {
        DistanceExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Resolve this expression to physical pixels
    ///
    /// Pure function of the tree and context. Relative leaves require
    /// their metric to be present in `ctx`; divide and modulo fail when
    /// the right side resolves to zero.
    pub fn to_pixels(&self, ctx: &ResolutionContext) -> Result<f64, ThemeError> {
        match self {
            DistanceExpr::Leaf { value, unit } => match unit {
                DistanceUnit::Px => Ok(*value),
                DistanceUnit::Em => {
                    let em = ctx
                        .font_em_size_px
                        .ok_or(ThemeError::MissingContext("font_em_size_px"))?;
                    Ok(value * em)
                }
                DistanceUnit::Ch => {
                    let ch = ctx
                        .font_char_width_px
                        .ok_or(ThemeError::MissingContext("font_char_width_px"))?;
                    Ok(value * ch)
                }
                DistanceUnit::Percent => {
                    let extent = ctx
                        .container_extent_px
                        .ok_or(ThemeError::MissingContext("container_extent_px"))?;
                    Ok(value / 100.0 * extent)
                }
            },
            DistanceExpr::Group(inner) => inner.to_pixels(ctx),
            DistanceExpr::Binary { op, left, right } => {
                let l = left.to_pixels(ctx)?;
                let r = right.to_pixels(ctx)?;
                match op {
                    DistanceOp::Add => Ok(l + r),
                    DistanceOp::Subtract => Ok(l - r),
                    DistanceOp::Multiply => Ok(l * r),
                    DistanceOp::Divide => {
                        if r == 0.0 {
                            Err(ThemeError::DivisionByZero)
                        } else {
                            Ok(l / r)
                        }
                    }
                    DistanceOp::Modulo => {
                        if r == 0.0 {
                            Err(ThemeError::DivisionByZero)
                        } else {
                            Ok(l % r)
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for DistanceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistanceExpr::Leaf { value, unit } => write!(f, "{}{}", value, unit),
            DistanceExpr::Group(inner) => write!(f, "( {} )", inner),
            DistanceExpr::Binary { op, left, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}

/// Style of line for border-type properties
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
}

/// A distance expression with its line style
///
/// The style is orthogonal to the numeric value and is only consulted by
/// border-style consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub base: DistanceExpr,
    pub style: LineStyle,
}

impl Default for Distance {
    fn default() -> Self {
        Self::px(0.0)
    }
}

impl Distance {
    pub fn new(base: DistanceExpr, style: LineStyle) -> Self {
        Self { base, style }
    }

    pub fn px(value: f64) -> Self {
        Self {
            base: DistanceExpr::leaf(value, DistanceUnit::Px),
            style: LineStyle::Solid,
        }
    }

    pub fn em(value: f64) -> Self {
        Self {
            base: DistanceExpr::leaf(value, DistanceUnit::Em),
            style: LineStyle::Solid,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            base: DistanceExpr::leaf(value, DistanceUnit::Percent),
            style: LineStyle::Solid,
        }
    }

    pub fn ch(value: f64) -> Self {
        Self {
            base: DistanceExpr::leaf(value, DistanceUnit::Ch),
            style: LineStyle::Solid,
        }
    }

    /// Replace the line style
    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Resolve to physical pixels given context
    pub fn to_pixels(&self, ctx: &ResolutionContext) -> Result<f64, ThemeError> {
        self.base.to_pixels(ctx)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if self.style == LineStyle::Dashed {
            f.write_str(" dash")?;
        }
        Ok(())
    }
}

/// Metrics for resolving relative distances
///
/// Every field is optional: a context only needs the metrics the
/// expressions resolved against it actually use. The container extent is
/// per axis; the caller supplies the value for the axis being laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolutionContext {
    /// Em size of the current font, in pixels (for `em`)
    pub font_em_size_px: Option<f64>,
    /// Character advance width of the current font, in pixels (for `ch`)
    pub font_char_width_px: Option<f64>,
    /// Extent of the container along the caller's axis, in pixels (for `%`)
    pub container_extent_px: Option<f64>,
}

impl ResolutionContext {
    /// Create an empty context (sufficient for pixel-only expressions)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_em_size(mut self, px: f64) -> Self {
        self.font_em_size_px = Some(px);
        self
    }

    pub fn with_font_char_width(mut self, px: f64) -> Self {
        self.font_char_width_px = Some(px);
        self
    }

    pub fn with_container_extent(mut self, px: f64) -> Self {
        self.container_extent_px = Some(px);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_leaves_need_no_context() {
        let expr = DistanceExpr::binary(
            DistanceOp::Add,
            DistanceExpr::leaf(10.0, DistanceUnit::Px),
            DistanceExpr::leaf(5.0, DistanceUnit::Px),
        );
        assert_eq!(expr.to_pixels(&ResolutionContext::new()).unwrap(), 15.0);
    }

    #[test]
    fn test_add_subtract_over_pixels_is_plain_arithmetic() {
        // ((8 + 4) - 3) px
        let expr = DistanceExpr::binary(
            DistanceOp::Subtract,
            DistanceExpr::binary(
                DistanceOp::Add,
                DistanceExpr::leaf(8.0, DistanceUnit::Px),
                DistanceExpr::leaf(4.0, DistanceUnit::Px),
            ),
            DistanceExpr::leaf(3.0, DistanceUnit::Px),
        );
        assert_eq!(expr.to_pixels(&ResolutionContext::new()).unwrap(), 9.0);
    }

    #[test]
    fn test_group_has_no_numeric_effect() {
        let ctx = ResolutionContext::new().with_font_em_size(8.0);
        let inner = DistanceExpr::leaf(2.0, DistanceUnit::Em);
        let grouped = DistanceExpr::group(inner.clone());
        assert_eq!(
            grouped.to_pixels(&ctx).unwrap(),
            inner.to_pixels(&ctx).unwrap()
        );
    }

    #[test]
    fn test_em_resolution() {
        let ctx = ResolutionContext::new().with_font_em_size(8.0);
        assert_eq!(Distance::em(2.0).to_pixels(&ctx).unwrap(), 16.0);
    }

    #[test]
    fn test_ch_resolution() {
        let ctx = ResolutionContext::new().with_font_char_width(7.5);
        assert_eq!(Distance::ch(4.0).to_pixels(&ctx).unwrap(), 30.0);
    }

    #[test]
    fn test_percent_plus_pixels() {
        let ctx = ResolutionContext::new().with_container_extent(100.0);
        let expr = DistanceExpr::binary(
            DistanceOp::Add,
            DistanceExpr::leaf(50.0, DistanceUnit::Percent),
            DistanceExpr::leaf(10.0, DistanceUnit::Px),
        );
        assert_eq!(expr.to_pixels(&ctx).unwrap(), 60.0);
    }

    #[test]
    fn test_modulo() {
        let expr = DistanceExpr::binary(
            DistanceOp::Modulo,
            DistanceExpr::leaf(10.0, DistanceUnit::Px),
            DistanceExpr::leaf(4.0, DistanceUnit::Px),
        );
        assert_eq!(expr.to_pixels(&ResolutionContext::new()).unwrap(), 2.0);
    }

    #[test]
    fn test_divide_by_zero_fails() {
        // right side resolves to zero through a subtree, not just a leaf
        let zero = DistanceExpr::binary(
            DistanceOp::Subtract,
            DistanceExpr::leaf(5.0, DistanceUnit::Px),
            DistanceExpr::leaf(5.0, DistanceUnit::Px),
        );
        for op in [DistanceOp::Divide, DistanceOp::Modulo] {
            let expr = DistanceExpr::binary(
                op,
                DistanceExpr::leaf(10.0, DistanceUnit::Px),
                zero.clone(),
            );
            assert_eq!(
                expr.to_pixels(&ResolutionContext::new()),
                Err(ThemeError::DivisionByZero)
            );
        }
    }

    #[test]
    fn test_missing_context_names_the_field() {
        let empty = ResolutionContext::new();
        assert_eq!(
            Distance::percent(50.0).to_pixels(&empty),
            Err(ThemeError::MissingContext("container_extent_px"))
        );
        assert_eq!(
            Distance::em(1.0).to_pixels(&empty),
            Err(ThemeError::MissingContext("font_em_size_px"))
        );
        assert_eq!(
            Distance::ch(1.0).to_pixels(&empty),
            Err(ThemeError::MissingContext("font_char_width_px"))
        );
    }

    #[test]
    fn test_display_round_trips_grouping() {
        let expr = DistanceExpr::binary(
            DistanceOp::Add,
            DistanceExpr::group(DistanceExpr::leaf(2.0, DistanceUnit::Em)),
            DistanceExpr::leaf(10.0, DistanceUnit::Px),
        );
        assert_eq!(expr.to_string(), "( 2em ) + 10px");

        let modulo = DistanceExpr::binary(
            DistanceOp::Modulo,
            DistanceExpr::leaf(100.0, DistanceUnit::Percent),
            DistanceExpr::leaf(3.0, DistanceUnit::Px),
        );
        assert_eq!(modulo.to_string(), "100% modulo 3px");
    }

    #[test]
    fn test_display_line_style() {
        assert_eq!(Distance::px(2.0).to_string(), "2px");
        assert_eq!(
            Distance::px(2.0).with_style(LineStyle::Dashed).to_string(),
            "2px dash"
        );
    }

    #[test]
    fn test_default_distance_is_zero_pixels() {
        let d = Distance::default();
        assert_eq!(d.to_pixels(&ResolutionContext::new()).unwrap(), 0.0);
        assert_eq!(d.style, LineStyle::Solid);
    }
}
