//! Timber - typed property and distance-expression core for a
//! rasi-style theming language
//!
//! Parsing and rendering live elsewhere: a parser hands this crate
//! fully-built values and expression trees, and a renderer consumes the
//! resolved pixel values and typed payloads.

// Distance expression trees and pixel resolution
pub mod distance;

// Error types shared across the crate
pub mod errors;

// Typed property values and strict accessors
pub mod property;

// Scopes, the cascade, and link resolution
pub mod scope;

// Supporting value types (color, padding, highlight, ...)
pub mod types;

// Public API re-exports
pub use distance::{Distance, DistanceExpr, DistanceOp, DistanceUnit, LineStyle, ResolutionContext};
pub use errors::ThemeError;
pub use property::{LinkValue, Property, PropertyType, PropertyValue};
pub use scope::{Cascade, Scope};
pub use types::{
    HighlightStyle, Orientation, Padding, RangePair, ResolvedPadding, TextHighlight, ThemeColor,
    WindowLocation,
};
