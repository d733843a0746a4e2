//! # Stylesheets
//!
//! A [Stylesheet] maps style names to [Style]s. It is one theme or skin of an
//! application.
//!
//! Lookups use [is_variant](crate::name::is_variant), so `"Primary Background Color"`
//! is found as `"primaryBackgroundColor"`, `"primary-background-color"` or
//! `"primarybackgroundcolor"`. Entries are searched in declaration order and the
//! first accepted one wins.
//!
//! There is no cascade: names are flat, and combining two stylesheets simply lets
//! the right-hand side override colliding names.

use indexmap::IndexMap;

use crate::name::is_variant;
use crate::style::Style;

/// A collection of named styles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stylesheet {
    styles: IndexMap<String, Style>,
}

impl Stylesheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a style. A style already declared under exactly `name` is replaced in place
    /// and returned.
    pub fn insert(&mut self, name: impl Into<String>, style: Style) -> Option<Style> {
        self.styles.insert(name.into(), style)
    }

    /// Builder form of [Stylesheet::insert].
    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.insert(name, style);
        self
    }

    /// Find the first style whose declared name accepts `name`.
    pub fn get(&self, name: &str) -> Option<&Style> {
        let name = name.trim();
        self.styles
            .iter()
            .find(|(declared, _)| is_variant(name, declared))
            .map(|(_, style)| style)
    }

    /// Mutable form of [Stylesheet::get].
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Style> {
        let name = name.trim();
        self.styles
            .iter_mut()
            .find(|(declared, _)| is_variant(name, declared))
            .map(|(_, style)| style)
    }

    /// Whether a style is found for `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The declared names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    /// Iterate over the declared entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Style)> {
        self.styles.iter().map(|(name, style)| (name.as_str(), style))
    }

    /// Number of declared styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether no style is declared.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// A stylesheet holding the entries of both sheets.
    ///
    /// When a name of `other` is an accepted spelling of a name in `self` (or the
    /// other way around) the entry keeps its position and takes `other`'s style.
    /// Names only found in `other` are appended in their declaration order.
    pub fn combine(&self, other: &Stylesheet) -> Stylesheet {
        let mut combined = self.clone();
        for (name, style) in &other.styles {
            let collision = combined
                .styles
                .keys()
                .position(|declared| is_variant(name, declared) || is_variant(declared, name));
            match collision.and_then(|index| combined.styles.get_index_mut(index)) {
                Some((_, existing)) => *existing = style.clone(),
                None => {
                    combined.styles.insert(name.clone(), style.clone());
                },
            }
        }
        combined
    }
}

impl<S: Into<String>> FromIterator<(S, Style)> for Stylesheet {
    fn from_iter<I: IntoIterator<Item = (S, Style)>>(iter: I) -> Self {
        let mut sheet = Stylesheet::new();
        for (name, style) in iter {
            sheet.insert(name, style);
        }
        sheet
    }
}
