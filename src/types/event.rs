use std::collections::HashMap;

use super::error::PropertyError;
use super::value::{Value, ValueKind};

/// Live argument values of one event occurrence, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventArgs {
    data: HashMap<String, Value>,
}

impl EventArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, builder style.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.data.insert(name.to_owned(), value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Numeric read; integers are widened.
    #[must_use]
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_number)
    }

    #[must_use]
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.get(name)? {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A typed property declared on an [`Event`].
///
/// Acts as the accessor pair for the property: [`read`](Self::read) pulls a
/// value of the declared type out of [`EventArgs`], [`write`](Self::write)
/// stores one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Property {
    name: String,
    kind: ValueKind,
}

impl Property {
    #[must_use]
    pub fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_owned(),
            kind,
        }
    }

    #[must_use]
    pub fn string(name: &str) -> Self {
        Self::new(name, ValueKind::String)
    }

    #[must_use]
    pub fn float(name: &str) -> Self {
        Self::new(name, ValueKind::Float)
    }

    #[must_use]
    pub fn int(name: &str) -> Self {
        Self::new(name, ValueKind::Int)
    }

    #[must_use]
    pub fn bool(name: &str) -> Self {
        Self::new(name, ValueKind::Bool)
    }

    #[must_use]
    pub fn string_set(name: &str) -> Self {
        Self::new(name, ValueKind::Set)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Read this property from `args`. Returns `None` when the value is
    /// absent or cannot be viewed as the declared type.
    #[must_use]
    pub fn read(&self, args: &EventArgs) -> Option<Value> {
        let value = args.get(&self.name)?.clone();
        self.kind.coerce(value)
    }

    /// Write `value` into `args` under this property's name.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError`] if the value cannot be stored as the
    /// declared type.
    pub fn write(&self, args: &mut EventArgs, value: impl Into<Value>) -> Result<(), PropertyError> {
        let value = value.into();
        let found = value.kind();
        let coerced = self.kind.coerce(value).ok_or_else(|| PropertyError {
            property: self.name.clone(),
            expected: self.kind,
            found,
        })?;
        args.insert(&self.name, coerced);
        Ok(())
    }
}

/// A named schema of typed properties.
///
/// Registered once on a [`Platform`](super::Platform) and immutable
/// afterwards. Rules bind to events by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
    properties: Vec<Property>,
}

impl Event {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            properties: Vec::new(),
        }
    }

    /// Declare a property. Redeclaring a name replaces the earlier type.
    #[must_use]
    pub fn with_property(mut self, property: Property) -> Self {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Declared properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }
}
