//! # Styles
//!
//! A [Style] is an ordered list of property assignments. Applying a style walks
//! the list and hands each value to its binding; an assignment without a value
//! leaves the property alone, so a style is a sparse overlay on whatever the target
//! already shows.
//!
//! ## Combination
//!
//! [Style::combine] concatenates two lists. Applying the result is the same as
//! applying the left style and then the right one: a later assignment to the same
//! property wins, properties only one side touches are kept. Concatenation is
//! associative and the empty style is its identity.
//!
//! ```rust
//! use swatch_theme::registry::PropertyRegistry;
//! use swatch_theme::style::Style;
//! use swatch_theme::value::PropertyValue;
//!
//! let registry = PropertyRegistry::with_builtins();
//! let alpha = registry.binding("alpha").unwrap();
//! let radius = registry.binding("cornerRadius").unwrap();
//!
//! let base = Style::new()
//!     .with(alpha.clone(), PropertyValue::Number(1.0))
//!     .with(radius, PropertyValue::Number(4.0));
//! let faded = Style::new().with(alpha, PropertyValue::Number(0.5));
//!
//! let combined = base.combine(&faded);
//! let resolved = combined.properties();
//! assert_eq!(resolved.value("view", "alpha"), Some(&PropertyValue::Number(0.5)));
//! assert_eq!(resolved.value("layer", "cornerRadius"), Some(&PropertyValue::Number(4.0)));
//! ```

use std::sync::Arc;

use crate::registry::{PropertyBinding, StyleTarget};
use crate::store::StylePropertyStore;
use crate::value::PropertyValue;

/// One entry of a style: a binding and the value to give it.
///
/// A [None] value means "leave this property as it is".
#[derive(Debug, Clone)]
pub struct PropertyAssignment {
    binding: Arc<PropertyBinding>,
    value: Option<PropertyValue>,
}

impl PropertyAssignment {
    /// Assign `value` to the property of `binding`.
    pub fn new(binding: Arc<PropertyBinding>, value: PropertyValue) -> Self {
        Self {
            binding,
            value: Some(value),
        }
    }

    /// An assignment that leaves the property of `binding` untouched.
    pub fn unset(binding: Arc<PropertyBinding>) -> Self {
        Self {
            binding,
            value: None,
        }
    }

    /// The binding being assigned.
    pub fn binding(&self) -> &Arc<PropertyBinding> {
        &self.binding
    }

    /// The assigned value, if any.
    pub fn value(&self) -> Option<&PropertyValue> {
        self.value.as_ref()
    }

    /// Apply this assignment to `target`. Does nothing for unset assignments.
    pub fn apply(&self, target: &mut dyn StyleTarget) {
        if let Some(value) = &self.value {
            self.binding.apply(value, target);
        }
    }
}

impl PartialEq for PropertyAssignment {
    fn eq(&self, other: &Self) -> bool {
        self.binding.id() == other.binding.id() && self.value == other.value
    }
}

/// An ordered collection of property assignments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    assignments: Vec<PropertyAssignment>,
}

impl Style {
    /// Create an empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a style from assignments, kept in the given order.
    pub fn from_assignments(assignments: impl IntoIterator<Item = PropertyAssignment>) -> Self {
        Self {
            assignments: assignments.into_iter().collect(),
        }
    }

    /// Build a style from resolved values, group by group.
    pub fn from_store(store: &StylePropertyStore) -> Self {
        let mut style = Self::new();
        for group in store.groups() {
            for resolved in store.get(group).iter() {
                style.set(resolved.binding.clone(), resolved.value.clone());
            }
        }
        style
    }

    /// Append an assignment of `value`.
    pub fn set(&mut self, binding: Arc<PropertyBinding>, value: PropertyValue) {
        self.assignments.push(PropertyAssignment::new(binding, value));
    }

    /// Append an assignment that leaves the property untouched.
    pub fn unset(&mut self, binding: Arc<PropertyBinding>) {
        self.assignments.push(PropertyAssignment::unset(binding));
    }

    /// Append an assignment.
    pub fn push(&mut self, assignment: PropertyAssignment) {
        self.assignments.push(assignment);
    }

    /// Builder form of [Style::set].
    pub fn with(mut self, binding: Arc<PropertyBinding>, value: PropertyValue) -> Self {
        self.set(binding, value);
        self
    }

    /// Builder form of [Style::unset].
    pub fn without(mut self, binding: Arc<PropertyBinding>) -> Self {
        self.unset(binding);
        self
    }

    /// The assignments in application order.
    pub fn assignments(&self) -> &[PropertyAssignment] {
        &self.assignments
    }

    /// Whether the style has no assignments.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// A style equivalent to applying `self` and then `other`.
    pub fn combine(&self, other: &Style) -> Style {
        let mut assignments = Vec::with_capacity(self.len() + other.len());
        assignments.extend_from_slice(&self.assignments);
        assignments.extend_from_slice(&other.assignments);
        Style { assignments }
    }

    /// Append `other` to this style in place.
    pub fn extend(&mut self, other: &Style) {
        self.assignments.extend_from_slice(&other.assignments);
    }

    /// Fold the assignments into their final values.
    ///
    /// Later values override earlier ones; unset assignments never remove a value.
    pub fn properties(&self) -> StylePropertyStore {
        let mut store = StylePropertyStore::new();
        for assignment in &self.assignments {
            if let Some(value) = assignment.value() {
                store.insert(assignment.binding().clone(), value.clone());
            }
        }
        store
    }

    /// Apply every assignment to `target`, in order.
    pub fn apply(&self, target: &mut dyn StyleTarget) {
        for assignment in &self.assignments {
            assignment.apply(target);
        }
    }
}

impl FromIterator<Style> for Style {
    fn from_iter<I: IntoIterator<Item = Style>>(iter: I) -> Self {
        let mut combined = Style::new();
        for style in iter {
            combined.assignments.extend(style.assignments);
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::PropertyRegistry;
    use std::collections::HashMap;

    #[derive(Default, Debug, PartialEq)]
    struct Recorder {
        values: HashMap<String, PropertyValue>,
        writes: usize,
    }

    impl StyleTarget for Recorder {
        fn assign(&mut self, key: &str, value: &PropertyValue) -> bool {
            self.writes += 1;
            self.values.insert(key.to_string(), value.clone());
            true
        }
    }

    fn number(registry: &PropertyRegistry, key: &str, value: f64) -> Style {
        Style::new().with(registry.binding(key).unwrap(), PropertyValue::Number(value))
    }

    #[test]
    fn empty_style_is_the_identity() {
        let registry = PropertyRegistry::with_builtins();
        let a = number(&registry, "alpha", 0.5);

        assert_eq!(Style::new().combine(&a), a);
        assert_eq!(a.combine(&Style::new()), a);
    }

    #[test]
    fn combination_is_associative() {
        let registry = PropertyRegistry::with_builtins();
        let a = number(&registry, "alpha", 0.5);
        let b = number(&registry, "cornerRadius", 3.0);
        let c = number(&registry, "alpha", 0.75);

        assert_eq!(a.combine(&b).combine(&c), a.combine(&b.combine(&c)));
    }

    #[test]
    fn combined_application_matches_sequential_application() {
        let registry = PropertyRegistry::with_builtins();
        let a = number(&registry, "alpha", 0.5).combine(&number(&registry, "borderWidth", 1.0));
        let b = number(&registry, "alpha", 0.9).combine(&number(&registry, "cornerRadius", 6.0));

        let mut combined = Recorder::default();
        a.combine(&b).apply(&mut combined);

        let mut sequential = Recorder::default();
        a.apply(&mut sequential);
        b.apply(&mut sequential);

        assert_eq!(combined.values, sequential.values);
        assert_eq!(combined.values["alpha"], PropertyValue::Number(0.9));
        assert_eq!(combined.values["borderWidth"], PropertyValue::Number(1.0));
    }

    #[test]
    fn unset_assignments_do_not_overwrite() {
        let registry = PropertyRegistry::with_builtins();
        let alpha = registry.binding("alpha").unwrap();
        let a = Style::new().with(alpha.clone(), PropertyValue::Number(1.0));
        let b = Style::new().without(alpha);

        let mut target = Recorder::default();
        a.combine(&b).apply(&mut target);
        assert_eq!(target.values["alpha"], PropertyValue::Number(1.0));
        assert_eq!(target.writes, 1);

        let store = a.combine(&b).properties();
        assert_eq!(store.value("view", "alpha"), Some(&PropertyValue::Number(1.0)));
    }

    #[test]
    fn applying_twice_is_the_same_as_once() {
        let registry = PropertyRegistry::with_builtins();
        let style = number(&registry, "alpha", 0.5).combine(&number(&registry, "alpha", 0.25));

        let mut once = Recorder::default();
        style.apply(&mut once);
        let mut twice = Recorder::default();
        style.apply(&mut twice);
        style.apply(&mut twice);

        assert_eq!(once.values, twice.values);
    }

    #[test]
    fn round_trips_through_the_store() {
        let registry = PropertyRegistry::with_builtins();
        let style = number(&registry, "alpha", 0.5)
            .combine(&number(&registry, "cornerRadius", 2.0))
            .combine(&number(&registry, "alpha", 0.1));

        let rebuilt = Style::from_store(&style.properties());
        assert_eq!(rebuilt.len(), 2);
        assert_eq!(rebuilt.properties(), style.properties());
    }

    #[test]
    fn collects_styles_in_order() {
        let registry = PropertyRegistry::with_builtins();
        let a = number(&registry, "alpha", 0.5);
        let b = number(&registry, "alpha", 0.6);

        let collected: Style = vec![a.clone(), b.clone()].into_iter().collect();
        assert_eq!(collected, a.combine(&b));
    }
}
