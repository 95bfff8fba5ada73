//! Typed property values and strict accessors
//!
//! A property is a named slot holding exactly one typed value. The enum
//! tag and its payload cannot disagree, and replacing a value swaps both
//! at once.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::distance::Distance;
use crate::errors::ThemeError;
use crate::types::{Orientation, Padding, TextHighlight, ThemeColor, WindowLocation};

/// Type of property
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyType {
    Integer,
    Double,
    String,
    Boolean,
    Color,
    Padding,
    Distance,
    /// Link to a property elsewhere in the cascade
    Link,
    Position,
    Highlight,
    List,
    Orientation,
    Inherit,
}

impl PropertyType {
    /// User-readable name, stable across releases
    pub fn name(&self) -> &'static str {
        match self {
            PropertyType::Integer => "Integer",
            PropertyType::Double => "Double",
            PropertyType::String => "String",
            PropertyType::Boolean => "Boolean",
            PropertyType::Color => "Color",
            PropertyType::Padding => "Padding",
            PropertyType::Distance => "Distance",
            PropertyType::Link => "Link",
            PropertyType::Position => "Position",
            PropertyType::Highlight => "Highlight",
            PropertyType::List => "List",
            PropertyType::Orientation => "Orientation",
            PropertyType::Inherit => "Inherit",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A reference to a property elsewhere in the cascade
///
/// Carries the referent's name, a cache slot for the last successful
/// lookup, and an owned fallback used when no referent exists. The cache
/// is only an optimization: it is stamped with the cascade generation it
/// was populated under and ignored once the cascade changes.
#[derive(Clone, Debug)]
pub struct LinkValue {
    name: String,
    cache: RefCell<LinkCache>,
    default_value: Rc<Property>,
}

#[derive(Clone, Debug, Default)]
struct LinkCache {
    generation: u64,
    target: Weak<Property>,
}

impl LinkValue {
    pub fn new(name: impl Into<String>, default_value: Property) -> Self {
        Self {
            name: name.into(),
            cache: RefCell::new(LinkCache::default()),
            default_value: Rc::new(default_value),
        }
    }

    /// Name of the referenced property
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fallback used when the referent is absent
    pub fn default_value(&self) -> &Property {
        &self.default_value
    }

    pub(crate) fn default_rc(&self) -> Rc<Property> {
        Rc::clone(&self.default_value)
    }

    /// Cached referent, valid only for the given cascade generation
    pub(crate) fn cached_target(&self, generation: u64) -> Option<Rc<Property>> {
        let cache = self.cache.borrow();
        if cache.generation != generation {
            return None;
        }
        cache.target.upgrade()
    }

    pub(crate) fn cache_target(&self, generation: u64, target: &Rc<Property>) {
        *self.cache.borrow_mut() = LinkCache {
            generation,
            target: Rc::downgrade(target),
        };
    }
}

// The cache slot is runtime state, not part of the value.
impl PartialEq for LinkValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.default_value == other.default_value
    }
}

/// Property value, exactly one variant live per instance
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    /// Integer
    Integer(i32),
    /// Double
    Double(f64),
    /// String
    String(String),
    /// Boolean
    Boolean(bool),
    /// Color
    Color(ThemeColor),
    /// Padding
    Padding(Padding),
    /// Distance expression
    Distance(Distance),
    /// Reference to another property
    Link(LinkValue),
    /// Window location
    Position(WindowLocation),
    /// Highlight style
    Highlight(TextHighlight),
    /// Ordered list of values
    List(Vec<PropertyValue>),
    /// Orientation
    Orientation(Orientation),
    /// Inherited from a less specific scope
    Inherit,
}

impl PropertyValue {
    /// The live variant's type tag. Total and side-effect-free.
    pub fn property_type(&self) -> PropertyType {
        match self {
            PropertyValue::Integer(_) => PropertyType::Integer,
            PropertyValue::Double(_) => PropertyType::Double,
            PropertyValue::String(_) => PropertyType::String,
            PropertyValue::Boolean(_) => PropertyType::Boolean,
            PropertyValue::Color(_) => PropertyType::Color,
            PropertyValue::Padding(_) => PropertyType::Padding,
            PropertyValue::Distance(_) => PropertyType::Distance,
            PropertyValue::Link(_) => PropertyType::Link,
            PropertyValue::Position(_) => PropertyType::Position,
            PropertyValue::Highlight(_) => PropertyType::Highlight,
            PropertyValue::List(_) => PropertyType::List,
            PropertyValue::Orientation(_) => PropertyType::Orientation,
            PropertyValue::Inherit => PropertyType::Inherit,
        }
    }

    fn mismatch(&self, expected: PropertyType) -> ThemeError {
        ThemeError::TypeMismatch {
            expected,
            actual: self.property_type(),
        }
    }

    pub fn as_integer(&self) -> Result<i32, ThemeError> {
        match self {
            PropertyValue::Integer(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Integer)),
        }
    }

    pub fn as_double(&self) -> Result<f64, ThemeError> {
        match self {
            PropertyValue::Double(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Double)),
        }
    }

    pub fn as_string(&self) -> Result<&str, ThemeError> {
        match self {
            PropertyValue::String(v) => Ok(v),
            other => Err(other.mismatch(PropertyType::String)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool, ThemeError> {
        match self {
            PropertyValue::Boolean(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Boolean)),
        }
    }

    pub fn as_color(&self) -> Result<ThemeColor, ThemeError> {
        match self {
            PropertyValue::Color(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Color)),
        }
    }

    pub fn as_padding(&self) -> Result<&Padding, ThemeError> {
        match self {
            PropertyValue::Padding(v) => Ok(v),
            other => Err(other.mismatch(PropertyType::Padding)),
        }
    }

    pub fn as_distance(&self) -> Result<&Distance, ThemeError> {
        match self {
            PropertyValue::Distance(v) => Ok(v),
            other => Err(other.mismatch(PropertyType::Distance)),
        }
    }

    pub fn as_link(&self) -> Result<&LinkValue, ThemeError> {
        match self {
            PropertyValue::Link(v) => Ok(v),
            other => Err(other.mismatch(PropertyType::Link)),
        }
    }

    pub fn as_position(&self) -> Result<WindowLocation, ThemeError> {
        match self {
            PropertyValue::Position(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Position)),
        }
    }

    pub fn as_highlight(&self) -> Result<TextHighlight, ThemeError> {
        match self {
            PropertyValue::Highlight(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Highlight)),
        }
    }

    pub fn as_list(&self) -> Result<&[PropertyValue], ThemeError> {
        match self {
            PropertyValue::List(v) => Ok(v),
            other => Err(other.mismatch(PropertyType::List)),
        }
    }

    pub fn as_orientation(&self) -> Result<Orientation, ThemeError> {
        match self {
            PropertyValue::Orientation(v) => Ok(*v),
            other => Err(other.mismatch(PropertyType::Orientation)),
        }
    }

    /// Whether this value defers to a less specific scope
    pub fn is_inherit(&self) -> bool {
        matches!(self, PropertyValue::Inherit)
    }
}

/// A named, typed property slot
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    /// Name, unique within its owning scope
    pub name: String,
    /// Current value; assigning replaces tag and payload together
    pub value: PropertyValue,
}

impl Property {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Type of the current value
    pub fn property_type(&self) -> PropertyType {
        self.value.property_type()
    }
}
