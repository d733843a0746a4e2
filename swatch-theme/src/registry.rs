//! # Property Registry
//!
//! The catalog of everything a stylesheet may say.
//!
//! ## Overview
//!
//! The registry holds two ordered lists:
//!
//! - **[ValueType]**: how to turn a raw document value into a [PropertyValue].
//!   Each value type has a [ValueKind], a set of accepted type names (`"Color"`,
//!   `"UIColor"`, ...) and a parser.
//! - **[PropertyBinding]**: a styleable property (`"backgroundColor"`), the kind of
//!   value it takes and how that value reaches a live [StyleTarget].
//!
//! Registration order is significant for value types: when a document declares a
//! type name that several value types accept, the first registered one whose parser
//! succeeds wins. [PropertyRegistry::with_builtins] registers the built-in value
//! types before anything a caller adds, so custom types extend the precedence list
//! instead of reordering it.
//!
//! ## Usage
//!
//! ```rust
//! use swatch_theme::registry::{PropertyBinding, PropertyRegistry};
//! use swatch_theme::value::ValueKind;
//! use serde_json::json;
//!
//! let mut registry = PropertyRegistry::with_builtins();
//! registry.register(PropertyBinding::new("highlightColor", "view", ValueKind::Color));
//!
//! let assignment = registry
//!     .resolve_property(None, "highlight color", "Color", &json!("#00FF00"))
//!     .unwrap();
//! assert_eq!(assignment.binding().key(), "highlightColor");
//! ```

use std::fmt::{Debug, Display, Formatter};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;
use serde_json::Value;

use crate::builtin;
use crate::name::is_variant;
use crate::style::PropertyAssignment;
use crate::value::{PropertyValue, ValueKind};

/// Anything that can receive property values from a style.
///
/// Implementors map a canonical property key (the key a [PropertyBinding] was
/// registered with) to one of their own fields. Unknown keys are ignored by
/// returning `false`.
pub trait StyleTarget {
    /// Assign `value` to the property named `key`.
    ///
    /// Returns `false` if this target has no such property.
    fn assign(&mut self, key: &str, value: &PropertyValue) -> bool;
}

/// Parses a raw document value into a typed value.
pub type ValueParser = Arc<dyn Fn(&Value) -> Option<PropertyValue> + Send + Sync>;

/// Applies a typed value to a target, replacing the default [StyleTarget::assign] call.
pub type Applier = Arc<dyn Fn(&mut dyn StyleTarget, &PropertyValue) + Send + Sync>;

/// A parser for one [ValueKind], selected by the type name a document declares.
#[derive(Clone)]
pub struct ValueType {
    kind: ValueKind,
    type_names: Vec<String>,
    parser: ValueParser,
}

impl ValueType {
    /// Create a value type accepting the given type names.
    pub fn new<I, S>(
        kind: ValueKind,
        type_names: I,
        parser: impl Fn(&Value) -> Option<PropertyValue> + Send + Sync + 'static,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            type_names: type_names.into_iter().map(Into::into).collect(),
            parser: Arc::new(parser),
        }
    }

    /// The kind of values this type produces.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// The type names this value type accepts.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    /// Whether `type_name` is an accepted spelling of one of this type's names.
    pub fn accepts(&self, type_name: &str) -> bool {
        self.type_names
            .iter()
            .any(|name| is_variant(type_name.trim(), name))
    }

    /// Parse a raw value. A parser must only return values of its own kind.
    pub fn parse(&self, raw: &Value) -> Option<PropertyValue> {
        (self.parser)(raw).filter(|value| value.kind() == self.kind)
    }
}

impl Debug for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueType")
            .field("kind", &self.kind)
            .field("type_names", &self.type_names)
            .finish_non_exhaustive()
    }
}

/// Unique identity of a [PropertyBinding], fixed when the binding is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BindingId(u32);

impl BindingId {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for BindingId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A styleable property: its key, its group, the kind of value it takes and how
/// the value is applied.
///
/// The group names the family of targets the property belongs to (`"view"`,
/// `"layer"`, `"text"`, ...). It keys the per-group bags of a
/// [StylePropertyStore](crate::store::StylePropertyStore) and is what a document's
/// optional `propertySetName` is matched against.
pub struct PropertyBinding {
    id: BindingId,
    key: String,
    group: String,
    kind: ValueKind,
    applier: Option<Applier>,
}

impl PropertyBinding {
    /// Create a binding that applies values through [StyleTarget::assign].
    pub fn new(key: impl Into<String>, group: impl Into<String>, kind: ValueKind) -> Self {
        Self {
            id: BindingId::next(),
            key: key.into(),
            group: group.into(),
            kind,
            applier: None,
        }
    }

    /// Replace the default applier.
    pub fn with_applier(
        mut self,
        applier: impl Fn(&mut dyn StyleTarget, &PropertyValue) + Send + Sync + 'static,
    ) -> Self {
        self.applier = Some(Arc::new(applier));
        self
    }

    /// The identity of this binding.
    pub fn id(&self) -> BindingId {
        self.id
    }

    /// The canonical property key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The property group.
    pub fn group(&self) -> &str {
        &self.group
    }

    /// The kind of value this property takes.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Whether `name` is an accepted spelling of this binding's key.
    pub fn matches(&self, name: &str) -> bool {
        is_variant(name.trim(), &self.key)
    }

    /// Apply `value` to `target`.
    ///
    /// Values of the wrong kind are dropped with a warning; they can only come from
    /// code-defined styles since parsed values are checked at load time.
    pub fn apply(&self, value: &PropertyValue, target: &mut dyn StyleTarget) {
        if value.kind() != self.kind {
            log::warn!(
                "Ignoring {} value for property '{}' which takes a {}",
                value.kind(),
                self.key,
                self.kind
            );
            return;
        }

        match &self.applier {
            Some(applier) => applier(target, value),
            None => {
                if !target.assign(&self.key, value) {
                    log::debug!("Target has no property '{}'", self.key);
                }
            },
        }
    }
}

impl Debug for PropertyBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyBinding")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("group", &self.group)
            .field("kind", &self.kind)
            .field("custom_applier", &self.applier.is_some())
            .finish()
    }
}

/// The catalog of value types and property bindings.
#[derive(Clone, Default, Debug)]
pub struct PropertyRegistry {
    value_types: Vec<ValueType>,
    bindings: Vec<Arc<PropertyBinding>>,
}

static GLOBAL: Lazy<RwLock<Arc<PropertyRegistry>>> =
    Lazy::new(|| RwLock::new(Arc::new(PropertyRegistry::with_builtins())));

impl PropertyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in value types and property bindings.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for value_type in builtin::value_types() {
            registry.register_value_type(value_type);
        }
        for binding in builtin::bindings() {
            registry.register(binding);
        }
        registry
    }

    /// The process-wide registry, initialized with the built-ins.
    pub fn global() -> Arc<PropertyRegistry> {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mutate the process-wide registry.
    ///
    /// Holders of a previously returned [PropertyRegistry::global] keep seeing the
    /// registry as it was.
    pub fn update_global<R>(op: impl FnOnce(&mut PropertyRegistry) -> R) -> R {
        let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        op(Arc::make_mut(&mut global))
    }

    /// Register a property binding.
    ///
    /// Returns [None] and drops the binding if a binding with a matching key is
    /// already registered, whichever of the two spellings came first.
    pub fn register(&mut self, binding: PropertyBinding) -> Option<Arc<PropertyBinding>> {
        let duplicate = self
            .bindings
            .iter()
            .find(|existing| existing.matches(binding.key()) || binding.matches(existing.key()));
        if let Some(existing) = duplicate {
            log::debug!(
                "Dropping duplicate binding '{}', '{}' is already registered",
                binding.key(),
                existing.key()
            );
            return None;
        }
        let binding = Arc::new(binding);
        self.bindings.push(binding.clone());
        Some(binding)
    }

    /// Register a value type after all previously registered ones.
    pub fn register_value_type(&mut self, value_type: ValueType) {
        self.value_types.push(value_type);
    }

    /// Find the binding for a property name.
    pub fn binding(&self, name: &str) -> Option<Arc<PropertyBinding>> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(name))
            .cloned()
    }

    /// All registered bindings, in registration order.
    pub fn bindings(&self) -> impl Iterator<Item = &Arc<PropertyBinding>> {
        self.bindings.iter()
    }

    /// All registered value types, in registration order.
    pub fn value_types(&self) -> impl Iterator<Item = &ValueType> {
        self.value_types.iter()
    }

    /// Resolve a raw value declared with `type_name`.
    ///
    /// Returns the value produced by the first registered value type that accepts
    /// `type_name` and parses `raw`.
    pub fn resolve(&self, type_name: &str, raw: &Value) -> Option<PropertyValue> {
        self.value_types
            .iter()
            .filter(|value_type| value_type.accepts(type_name))
            .find_map(|value_type| value_type.parse(raw))
    }

    /// Resolve a raw value restricted to value types of `kind`.
    pub fn resolve_kind(&self, kind: ValueKind, type_name: &str, raw: &Value) -> Option<PropertyValue> {
        self.value_types
            .iter()
            .filter(|value_type| value_type.kind() == kind && value_type.accepts(type_name))
            .find_map(|value_type| value_type.parse(raw))
    }

    /// Resolve one property record of a stylesheet document into an assignment.
    ///
    /// `property_set` restricts the candidate bindings to one group. A `null` raw
    /// value resolves to an explicit "leave unchanged" assignment as long as the
    /// declared type fits the binding.
    pub fn resolve_property(
        &self,
        property_set: Option<&str>,
        property_name: &str,
        type_name: &str,
        raw: &Value,
    ) -> Option<PropertyAssignment> {
        let binding = self.bindings.iter().find(|binding| {
            binding.matches(property_name)
                && property_set.map_or(true, |set| is_variant(set.trim(), binding.group()))
        })?;

        if raw.is_null() {
            let type_fits = self
                .value_types
                .iter()
                .any(|value_type| value_type.kind() == binding.kind() && value_type.accepts(type_name));
            return type_fits.then(|| PropertyAssignment::unset(binding.clone()));
        }

        let value = self.resolve_kind(binding.kind(), type_name, raw)?;
        Some(PropertyAssignment::new(binding.clone(), value))
    }
}
