//! # Style Application
//!
//! [StyleContext] turns a component's style names into property writes.
//!
//! ## Pipeline
//!
//! 1. The style name list is split on commas; names are trimmed and empty ones
//!    dropped, the rest keep their order.
//! 2. The effective stylesheet is the first of:
//!    - the stylesheet bound to the component,
//!    - the catalog source named by the component's stylesheet name,
//!    - the active stylesheet of the [ThemeController],
//!    - the catalog source named as the context's default.
//! 3. Every name is looked up in the effective stylesheet. Names that are not found
//!    are reported and skipped; the others still apply.
//! 4. The found styles are combined in order and the result is applied to the
//!    component, later assignments overriding earlier ones. Assignments without a
//!    value leave the property alone.
//! 5. With diagnostics enabled, the component is told which names were not found.
//!
//! Nothing here fails: problems end up as [StyleDiagnostic]s in the returned
//! [ApplyReport] and in the log.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::rc::Rc;
use std::sync::Arc;

use swatch_theme::config::StyleConfig;
use swatch_theme::registry::{BindingId, StyleTarget};
use swatch_theme::source::StylesheetSource;
use swatch_theme::style::Style;
use swatch_theme::stylesheet::Stylesheet;
use swatch_theme::value::{ImageSource, PropertyValue};

use crate::catalog::StylesheetCatalog;
use crate::controller::ThemeController;
use crate::remote::RemoteImages;
use crate::styleable::{split_style_names, ComponentId, Styleable};

/// Where the effective stylesheet of an application came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StylesheetOrigin {
    /// Bound to the component.
    Explicit,
    /// The catalog source the component named.
    Named(String),
    /// The active theme.
    Theme,
    /// The catalog source configured as default.
    Default(String),
}

/// A soft problem found while applying styles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleDiagnostic {
    /// A style name the effective stylesheet does not contain.
    UnresolvedStyleName {
        /// The name as written.
        name: String,
    },
    /// No stylesheet could be found to resolve names against.
    NoEffectiveStylesheet,
}

impl Display for StyleDiagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StyleDiagnostic::UnresolvedStyleName { name } => write!(f, "unknown style '{name}'"),
            StyleDiagnostic::NoEffectiveStylesheet => write!(f, "no stylesheet to resolve styles against"),
        }
    }
}

/// Outcome of one application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplyReport {
    /// Where the effective stylesheet came from.
    pub origin: Option<StylesheetOrigin>,
    /// The names that were found, in application order.
    pub applied: Vec<String>,
    /// The problems found.
    pub diagnostics: Vec<StyleDiagnostic>,
    /// Number of remote images requested.
    pub image_requests: usize,
}

impl ApplyReport {
    /// Whether nothing went wrong.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// The names that were not found.
    pub fn unresolved_names(&self) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter_map(|diagnostic| match diagnostic {
                StyleDiagnostic::UnresolvedStyleName { name } => Some(name.clone()),
                StyleDiagnostic::NoEffectiveStylesheet => None,
            })
            .collect()
    }
}

/// Everything style application resolves against.
#[derive(Debug, Clone)]
pub struct StyleContext {
    controller: Rc<ThemeController>,
    catalog: Arc<StylesheetCatalog>,
    default_stylesheet: Option<String>,
    diagnostics: bool,
    remote: Option<RemoteImages>,
}

impl StyleContext {
    /// Create a context resolving against the thread's [ThemeController::global].
    pub fn new() -> Self {
        Self::with_controller(ThemeController::global())
    }

    /// Create a context resolving against `controller`.
    pub fn with_controller(controller: Rc<ThemeController>) -> Self {
        Self {
            controller,
            catalog: Arc::new(StylesheetCatalog::new()),
            default_stylesheet: None,
            diagnostics: false,
            remote: None,
        }
    }

    /// Create a context from a configuration, resolving against the global controller.
    pub fn from_config(config: &StyleConfig) -> Self {
        let mut context = Self::new().with_diagnostics(config.diagnostics);
        context.default_stylesheet = config.default_stylesheet.clone();
        context
    }

    /// Set the catalog of named stylesheets.
    pub fn with_catalog(mut self, catalog: impl Into<Arc<StylesheetCatalog>>) -> Self {
        self.catalog = catalog.into();
        self
    }

    /// Set the catalog source used when nothing else resolves.
    pub fn with_default_stylesheet(mut self, name: impl Into<String>) -> Self {
        self.default_stylesheet = Some(name.into());
        self
    }

    /// Enable or disable flagging of components with unknown style names.
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Fetch remote images through `remote` instead of assigning their URLs.
    pub fn with_remote_images(mut self, remote: RemoteImages) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Register a stylesheet source in this context's catalog.
    pub fn register_source(&mut self, source: impl StylesheetSource + 'static) -> bool {
        Arc::make_mut(&mut self.catalog).register(source)
    }

    /// The controller this context resolves the active theme with.
    pub fn controller(&self) -> &Rc<ThemeController> {
        &self.controller
    }

    /// The catalog of named stylesheets.
    pub fn catalog(&self) -> &StylesheetCatalog {
        &self.catalog
    }

    /// The remote image dispatcher, if any.
    pub fn remote_images(&self) -> Option<&RemoteImages> {
        self.remote.as_ref()
    }

    /// Whether diagnostics are enabled.
    pub fn diagnostics_enabled(&self) -> bool {
        self.diagnostics
    }

    /// Find the effective stylesheet.
    pub fn resolve_stylesheet(
        &self,
        explicit: Option<Arc<Stylesheet>>,
        selector: Option<&str>,
    ) -> Option<(Arc<Stylesheet>, StylesheetOrigin)> {
        if let Some(sheet) = explicit {
            return Some((sheet, StylesheetOrigin::Explicit));
        }

        if let Some(selector) = selector.map(str::trim).filter(|name| !name.is_empty()) {
            match self.catalog.get(selector) {
                Some(sheet) => return Some((sheet, StylesheetOrigin::Named(selector.to_string()))),
                None => log::debug!("No stylesheet source named '{}'", selector),
            }
        }

        if let Some(sheet) = self.controller.active() {
            return Some((sheet, StylesheetOrigin::Theme));
        }

        let name = self.default_stylesheet.as_deref()?;
        self.catalog
            .get(name)
            .map(|sheet| (sheet, StylesheetOrigin::Default(name.to_string())))
    }

    /// Look every name up in `sheet` and combine the styles found.
    ///
    /// Returns the combined style, the names found and the names not found.
    pub fn resolve_styles(&self, names: &str, sheet: &Stylesheet) -> (Style, Vec<String>, Vec<String>) {
        let mut combined = Style::new();
        let mut found = Vec::new();
        let mut missing = Vec::new();
        for name in split_style_names(names) {
            match sheet.get(name) {
                Some(style) => {
                    combined.extend(style);
                    found.push(name.to_string());
                },
                None => missing.push(name.to_string()),
            }
        }
        (combined, found, missing)
    }

    /// Apply the styles named by `component` to it.
    pub fn apply(&self, component: &mut dyn Styleable) -> ApplyReport {
        let names = component.style_names().to_string();
        let explicit = component.stylesheet();
        let selector = component.stylesheet_name().map(str::to_string);
        let id = component.component_id();

        let report = self.run(
            &names,
            explicit,
            selector.as_deref(),
            &mut ComponentTarget(component),
            Some(id),
        );

        if self.diagnostics {
            component.flag_invalid_styles(&report.unresolved_names());
        }
        report
    }

    /// Apply `names` to any target, resolving against `explicit` or the context.
    ///
    /// Remote images are assigned as URLs; no component is flagged.
    pub fn apply_names(
        &self,
        names: &str,
        target: &mut dyn StyleTarget,
        explicit: Option<Arc<Stylesheet>>,
    ) -> ApplyReport {
        self.run(names, explicit, None, target, None)
    }

    fn run(
        &self,
        names: &str,
        explicit: Option<Arc<Stylesheet>>,
        selector: Option<&str>,
        target: &mut dyn StyleTarget,
        component: Option<ComponentId>,
    ) -> ApplyReport {
        let mut report = ApplyReport::default();
        if split_style_names(names).is_empty() {
            return report;
        }

        let Some((sheet, origin)) = self.resolve_stylesheet(explicit, selector) else {
            log::warn!("No stylesheet to resolve '{}' against", names);
            report.diagnostics.push(StyleDiagnostic::NoEffectiveStylesheet);
            return report;
        };
        report.origin = Some(origin);

        let (style, found, missing) = self.resolve_styles(names, &sheet);
        for name in missing {
            log::warn!("Unknown style '{}'", name);
            report
                .diagnostics
                .push(StyleDiagnostic::UnresolvedStyleName { name });
        }
        report.applied = found;

        let final_writes: HashMap<BindingId, usize> = style
            .assignments()
            .iter()
            .enumerate()
            .filter(|(_, assignment)| assignment.value().is_some())
            .map(|(index, assignment)| (assignment.binding().id(), index))
            .collect();

        for (index, assignment) in style.assignments().iter().enumerate() {
            let Some(value) = assignment.value() else {
                continue;
            };
            match (value, &self.remote, component) {
                (PropertyValue::Image(ImageSource::Remote(url)), Some(remote), Some(id)) => {
                    // An overridden fetch would land after the value that replaced it.
                    if final_writes.get(&assignment.binding().id()) == Some(&index) {
                        remote.request(id, assignment.binding().key(), url);
                        report.image_requests += 1;
                    }
                },
                _ => assignment.binding().apply(value, target),
            }
        }
        report
    }
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::new()
    }
}

struct ComponentTarget<'a>(&'a mut dyn Styleable);

impl StyleTarget for ComponentTarget<'_> {
    fn assign(&mut self, key: &str, value: &PropertyValue) -> bool {
        self.0.assign(key, value)
    }
}

/// Apply the styles named by `component` using a default [StyleContext].
pub fn apply(component: &mut dyn Styleable) -> ApplyReport {
    StyleContext::new().apply(component)
}
