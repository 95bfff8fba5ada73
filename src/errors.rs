//! Error types for property access and resolution
//!
//! All failures the value model can produce. Resolvers return these
//! explicitly rather than sentinel values.

use thiserror::Error;

use crate::property::PropertyType;

/// Main theme error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    /// A typed accessor was called on a value of a different type
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Type the accessor requires
        expected: PropertyType,
        /// Type the value actually holds
        actual: PropertyType,
    },

    /// A relative unit was resolved without its required metric
    #[error("Missing resolution context field: {0}")]
    MissingContext(&'static str),

    /// Divide or modulo with a zero right-hand operand
    #[error("Division by zero in distance expression")]
    DivisionByZero,

    /// A property link chain revisited a name
    #[error("Cyclic property link: {0}")]
    CyclicLink(String),
}
