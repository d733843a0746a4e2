#![warn(missing_docs)]

//! Named, combinable styles and live re-theming for Rust UI toolkits.

pub use vello::peniko as color;

pub use async_trait::async_trait;
pub use swatch_core as core;
pub use swatch_theme as theme;

/// A "prelude" for users of swatch.
///
/// Importing this module brings into scope the types needed to make a
/// component styleable and to switch themes.
///
/// ```rust
/// use swatch::prelude::*;
/// ```
pub mod prelude {
    // Core
    pub use crate::core::controller::ThemeController;
    pub use crate::core::engine::{ApplyReport, StyleContext, StyleDiagnostic};
    pub use crate::core::remote::{FetchedImage, ImageFetcher, RemoteImages};
    pub use crate::core::styleable::{ComponentId, Styleable};
    pub use crate::core::tree::ViewTree;

    // Theme
    pub use crate::theme::config::StyleConfig;
    pub use crate::theme::json::{JsonStyleParser, UnresolvedPolicy};
    pub use crate::theme::registry::{PropertyBinding, PropertyRegistry, StyleTarget};
    pub use crate::theme::source::{JsonStylesheet, StaticStylesheet, StylesheetSource};
    pub use crate::theme::style::Style;
    pub use crate::theme::stylesheet::Stylesheet;
    pub use crate::theme::value::{PropertyValue, ValueKind};
    pub use crate::theme::{StyleError, StyleResult};
}
