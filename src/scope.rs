//! Scopes, the cascade, and link resolution
//!
//! A scope is one level of style specificity: a mapping from property
//! name to property. The cascade is the ordered stack of scopes a lookup
//! walks, most specific first. Link values resolve against the cascade,
//! with a generation-stamped cache and cycle detection.

use std::collections::HashMap;
use std::rc::Rc;

use crate::distance::Distance;
use crate::errors::ThemeError;
use crate::property::{LinkValue, Property, PropertyValue};
use crate::types::{Orientation, Padding, TextHighlight, ThemeColor, WindowLocation};

/// One level of style specificity
#[derive(Clone, Debug, Default)]
pub struct Scope {
    properties: HashMap<String, Rc<Property>>,
}

impl Scope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, keyed by its own name. Replaces any property
    /// with the same name.
    pub fn set(&mut self, property: Property) {
        self.properties
            .insert(property.name.clone(), Rc::new(property));
    }

    /// Get a property by name
    pub fn get(&self, name: &str) -> Option<&Rc<Property>> {
        self.properties.get(name)
    }

    /// Merge another scope into this one (other takes precedence)
    pub fn merge(&mut self, other: Scope) {
        self.properties.extend(other.properties);
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Names of the properties defined in this scope
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }
}

/// Priority-ordered stack of scopes
///
/// The last scope pushed is the most specific and is consulted first.
/// Every mutation bumps the generation counter, which invalidates the
/// cache slots of link values resolved under earlier generations.
#[derive(Clone, Debug, Default)]
pub struct Cascade {
    scopes: Vec<Scope>,
    generation: u64,
}

impl Cascade {
    /// Create an empty cascade
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a scope that is more specific than all existing ones
    pub fn push_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
        self.generation += 1;
    }

    /// Insert a property into the scope at `index` (0 = root, least
    /// specific).
    ///
    /// Panics if `index` is out of range.
    pub fn set_property(&mut self, index: usize, property: Property) {
        self.scopes[index].set(property);
        self.generation += 1;
    }

    /// Merge a scope into the scope at `index` (incoming wins per name).
    ///
    /// Panics if `index` is out of range.
    pub fn merge_into(&mut self, index: usize, other: Scope) {
        self.scopes[index].merge(other);
        self.generation += 1;
    }

    /// Counter bumped by every mutation
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// First property with this name, most specific scope first
    pub fn find(&self, name: &str) -> Option<Rc<Property>> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
    }

    /// Like [`find`](Self::find), but an `Inherit` value is transparent:
    /// the walk continues into less specific scopes.
    pub fn lookup(&self, name: &str) -> Option<Rc<Property>> {
        for scope in self.scopes.iter().rev() {
            if let Some(prop) = scope.get(name) {
                if prop.value.is_inherit() {
                    continue;
                }
                return Some(Rc::clone(prop));
            }
        }
        None
    }

    /// Look up a property and chase links to the final referent.
    ///
    /// Returns `Ok(None)` when the name is absent (or bottoms out at
    /// `Inherit`). A cyclic link recovers through the link's own default
    /// property; other errors propagate.
    fn resolved(&self, name: &str) -> Result<Option<Rc<Property>>, ThemeError> {
        let Some(prop) = self.lookup(name) else {
            return Ok(None);
        };
        let target = match &prop.value {
            PropertyValue::Link(link) => match link.resolve(self) {
                Ok(target) => target,
                Err(ThemeError::CyclicLink(_)) => link.default_rc(),
                Err(err) => return Err(err),
            },
            _ => Rc::clone(&prop),
        };
        if target.value.is_inherit() {
            return Ok(None);
        }
        Ok(Some(target))
    }

    /// Get an integer property with a default for absent names
    pub fn get_integer(&self, name: &str, default: i32) -> Result<i32, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_integer(),
            None => Ok(default),
        }
    }

    /// Get a double property with a default for absent names
    pub fn get_double(&self, name: &str, default: f64) -> Result<f64, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_double(),
            None => Ok(default),
        }
    }

    /// Get a string property with a default for absent names
    pub fn get_string(&self, name: &str, default: &str) -> Result<String, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_string().map(str::to_owned),
            None => Ok(default.to_owned()),
        }
    }

    /// Get a boolean property with a default for absent names
    pub fn get_boolean(&self, name: &str, default: bool) -> Result<bool, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_boolean(),
            None => Ok(default),
        }
    }

    /// Get a color property with a default for absent names
    pub fn get_color(&self, name: &str, default: ThemeColor) -> Result<ThemeColor, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_color(),
            None => Ok(default),
        }
    }

    /// Get a distance property with a default for absent names
    pub fn get_distance(&self, name: &str, default: Distance) -> Result<Distance, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_distance().cloned(),
            None => Ok(default),
        }
    }

    /// Get a padding property with a default for absent names
    pub fn get_padding(&self, name: &str, default: Padding) -> Result<Padding, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_padding().cloned(),
            None => Ok(default),
        }
    }

    /// Get a highlight property with a default for absent names
    pub fn get_highlight(
        &self,
        name: &str,
        default: TextHighlight,
    ) -> Result<TextHighlight, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_highlight(),
            None => Ok(default),
        }
    }

    /// Get an orientation property with a default for absent names
    pub fn get_orientation(
        &self,
        name: &str,
        default: Orientation,
    ) -> Result<Orientation, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_orientation(),
            None => Ok(default),
        }
    }

    /// Get a position property with a default for absent names
    pub fn get_position(
        &self,
        name: &str,
        default: WindowLocation,
    ) -> Result<WindowLocation, ThemeError> {
        match self.resolved(name)? {
            Some(prop) => prop.value.as_position(),
            None => Ok(default),
        }
    }
}

impl LinkValue {
    /// Resolve this link to its referent in the cascade.
    ///
    /// Walks most-specific-first. A referent that is itself a link is
    /// followed, with the chain bounded by a visited-name list: revisiting
    /// a name fails with [`ThemeError::CyclicLink`]. A missing referent is
    /// not an error; the link's default property is returned instead.
    /// Successful lookups are cached against the cascade's current
    /// generation; the cache is never consulted across mutations.
    pub fn resolve(&self, cascade: &Cascade) -> Result<Rc<Property>, ThemeError> {
        let mut visited = Vec::new();
        self.resolve_bounded(cascade, &mut visited)
    }

    fn resolve_bounded(
        &self,
        cascade: &Cascade,
        visited: &mut Vec<String>,
    ) -> Result<Rc<Property>, ThemeError> {
        if visited.iter().any(|seen| seen == self.name()) {
            return Err(ThemeError::CyclicLink(self.name().to_owned()));
        }
        visited.push(self.name().to_owned());

        let referent = match self.cached_target(cascade.generation()) {
            Some(cached) => Some(cached),
            None => {
                let found = cascade.find(self.name());
                if let Some(prop) = &found {
                    self.cache_target(cascade.generation(), prop);
                }
                found
            }
        };

        match referent {
            Some(prop) => match &prop.value {
                PropertyValue::Link(inner) => inner.resolve_bounded(cascade, visited),
                _ => Ok(prop),
            },
            None => Ok(self.default_rc()),
        }
    }
}
