#![warn(missing_docs)]

//! Core library for swatch => See `swatch` crate.
//!
//! Applies styles to live components and re-themes them when the active
//! stylesheet changes.

/// Contains the [catalog::StylesheetCatalog] of named stylesheet sources.
pub mod catalog;

/// Contains the [controller::ThemeController] holding the active stylesheet.
pub mod controller;

/// Contains the [engine::StyleContext] applying styles to components.
pub mod engine;

/// Contains remote image fetching.
pub mod remote;

/// Contains the [styleable::Styleable] trait.
pub mod styleable;

/// Contains the [tree::ViewTree].
pub mod tree;
