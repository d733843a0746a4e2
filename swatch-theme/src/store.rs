//! # Style Property Store
//!
//! Resolved property values of a style, grouped by property group.
//!
//! A [StylePropertyStore] is what a style *means* once its assignments have been
//! folded: for every group, one [PropertyBag] holding the last value assigned to
//! each property. Stores have value semantics. Cloning is cheap because the groups
//! are shared, and the first write to either clone detaches it:
//!
//! ```rust
//! use swatch_theme::registry::PropertyRegistry;
//! use swatch_theme::store::StylePropertyStore;
//! use swatch_theme::value::PropertyValue;
//!
//! let registry = PropertyRegistry::with_builtins();
//! let alpha = registry.binding("alpha").unwrap();
//!
//! let mut original = StylePropertyStore::new();
//! original.insert(alpha.clone(), PropertyValue::Number(1.0));
//!
//! let mut copy = original.clone();
//! copy.insert(alpha, PropertyValue::Number(0.5));
//!
//! assert_eq!(original.value("view", "alpha"), Some(&PropertyValue::Number(1.0)));
//! assert_eq!(copy.value("view", "alpha"), Some(&PropertyValue::Number(0.5)));
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::registry::{PropertyBinding, StyleTarget};
use crate::value::PropertyValue;

/// A property value together with the binding it was resolved for.
#[derive(Debug, Clone)]
pub struct ResolvedProperty {
    /// The binding the value belongs to.
    pub binding: Arc<PropertyBinding>,
    /// The value.
    pub value: PropertyValue,
}

impl PartialEq for ResolvedProperty {
    fn eq(&self, other: &Self) -> bool {
        self.binding.id() == other.binding.id() && self.value == other.value
    }
}

/// The resolved values of one property group, keyed by property key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
    values: IndexMap<String, ResolvedProperty>,
}

impl PropertyBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a property, replacing any previous value.
    pub fn set(&mut self, binding: Arc<PropertyBinding>, value: PropertyValue) {
        self.values
            .insert(binding.key().to_string(), ResolvedProperty { binding, value });
    }

    /// Get the value of a property by its canonical key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.values.get(key).map(|resolved| &resolved.value)
    }

    /// Remove a property.
    pub fn remove(&mut self, key: &str) -> Option<PropertyValue> {
        self.values.shift_remove(key).map(|resolved| resolved.value)
    }

    /// Whether the bag holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of properties held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over the resolved properties in first-assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedProperty> {
        self.values.values()
    }

    /// Merge `other` into this bag. Values from `other` override.
    pub fn merge(&mut self, other: &PropertyBag) {
        for (key, resolved) in &other.values {
            self.values.insert(key.clone(), resolved.clone());
        }
    }
}

/// Per-group storage of resolved property values with copy-on-write semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePropertyStore {
    groups: Arc<IndexMap<String, PropertyBag>>,
}

impl StylePropertyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The bag of a group. Groups never assigned yield an empty bag.
    pub fn get(&self, group: &str) -> Cow<'_, PropertyBag> {
        match self.groups.get(group) {
            Some(bag) => Cow::Borrowed(bag),
            None => Cow::Owned(PropertyBag::default()),
        }
    }

    /// Mutable access to the bag of a group, creating an empty one on first access.
    pub fn get_mut(&mut self, group: &str) -> &mut PropertyBag {
        Arc::make_mut(&mut self.groups)
            .entry(group.to_string())
            .or_default()
    }

    /// Replace the bag of a group.
    pub fn set(&mut self, group: impl Into<String>, bag: PropertyBag) {
        Arc::make_mut(&mut self.groups).insert(group.into(), bag);
    }

    /// Store a value under its binding's group.
    pub fn insert(&mut self, binding: Arc<PropertyBinding>, value: PropertyValue) {
        let group = binding.group().to_string();
        self.get_mut(&group).set(binding, value);
    }

    /// Look a single value up.
    pub fn value(&self, group: &str, key: &str) -> Option<&PropertyValue> {
        self.groups.get(group).and_then(|bag| bag.get(key))
    }

    /// Names of the groups holding a bag, in first-access order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Whether no group holds any value.
    pub fn is_empty(&self) -> bool {
        self.groups.values().all(PropertyBag::is_empty)
    }

    /// Merge `other` into this store, group by group. Values from `other` override.
    pub fn merge(&mut self, other: &StylePropertyStore) {
        if Arc::ptr_eq(&self.groups, &other.groups) {
            return;
        }
        for (group, bag) in other.groups.iter() {
            self.get_mut(group).merge(bag);
        }
    }

    /// Apply every stored value to `target`, group by group.
    pub fn apply_to(&self, target: &mut dyn StyleTarget) {
        for bag in self.groups.values() {
            for resolved in bag.iter() {
                resolved.binding.apply(&resolved.value, target);
            }
        }
    }

    /// Whether this store and `other` still share their storage.
    pub fn shares_storage_with(&self, other: &StylePropertyStore) -> bool {
        Arc::ptr_eq(&self.groups, &other.groups)
    }
}
