//! # Styleable Components
//!
//! The contract between swatch and a widget toolkit.
//!
//! A toolkit component becomes styleable by implementing [Styleable] on top of
//! [StyleTarget]: it exposes its comma-separated style names, optionally a
//! stylesheet of its own or the name of one, and its children. The toolkit keeps
//! ownership of its components; swatch only reads the names and writes property
//! values.
//!
//! ```rust
//! use std::collections::HashMap;
//! use swatch_core::styleable::{ComponentId, Styleable};
//! use swatch_theme::registry::StyleTarget;
//! use swatch_theme::value::PropertyValue;
//!
//! struct Badge {
//!     id: ComponentId,
//!     styles: String,
//!     properties: HashMap<String, PropertyValue>,
//! }
//!
//! impl StyleTarget for Badge {
//!     fn assign(&mut self, key: &str, value: &PropertyValue) -> bool {
//!         self.properties.insert(key.to_string(), value.clone());
//!         true
//!     }
//! }
//!
//! impl Styleable for Badge {
//!     fn component_id(&self) -> ComponentId {
//!         self.id
//!     }
//!
//!     fn style_names(&self) -> &str {
//!         &self.styles
//!     }
//! }
//! ```

use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use swatch_theme::registry::StyleTarget;
use swatch_theme::stylesheet::Stylesheet;

use crate::remote::FetchedImage;

/// Identity of a live component, used to route late results back to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u64);

impl ComponentId {
    /// Allocate a new, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "component#{}", self.0)
    }
}

/// A component styles can be applied to.
pub trait Styleable: StyleTarget {
    /// The identity of this component.
    fn component_id(&self) -> ComponentId;

    /// The style names of this component, comma separated (`"Header Text, Rounded"`).
    fn style_names(&self) -> &str;

    /// A stylesheet bound to this component. Takes precedence over everything else.
    fn stylesheet(&self) -> Option<Arc<Stylesheet>> {
        None
    }

    /// Name of a registered stylesheet source this component resolves against.
    fn stylesheet_name(&self) -> Option<&str> {
        None
    }

    /// Mark this component as referring to style names that do not exist.
    ///
    /// Only called when diagnostics are enabled. An empty slice clears the mark.
    fn flag_invalid_styles(&mut self, _names: &[String]) {}

    /// Receive an image fetched for the property `key`.
    ///
    /// Returns `false` if this component has no such property.
    fn receive_image(&mut self, _key: &str, _image: &FetchedImage) -> bool {
        false
    }

    /// Visit the direct children of this component, in order.
    fn for_each_child(&mut self, _visit: &mut dyn FnMut(&mut dyn Styleable)) {}
}

/// Split a style name list on commas, trimming every name and dropping empty ones.
pub fn split_style_names(names: &str) -> Vec<&str> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Visit `root` and all its descendants, depth first, parents before children.
pub fn walk(root: &mut dyn Styleable, visit: &mut dyn FnMut(&mut dyn Styleable)) {
    visit(root);
    root.for_each_child(&mut |child: &mut dyn Styleable| walk(child, visit));
}

/// Find the component with `id` below `root` and run `op` on it.
///
/// Returns [None] if no such component exists.
pub fn with_component<R>(
    root: &mut dyn Styleable,
    id: ComponentId,
    op: impl FnOnce(&mut dyn Styleable) -> R,
) -> Option<R> {
    let mut op = Some(op);
    let mut result = None;
    walk(root, &mut |node: &mut dyn Styleable| {
        if node.component_id() == id {
            if let Some(op) = op.take() {
                result = Some(op(node));
            }
        }
    });
    result
}
