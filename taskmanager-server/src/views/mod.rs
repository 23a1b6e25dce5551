//! HTML views
//!
//! Templates are compiled into the binary and registered once. Every page
//! wraps its content in the `base` layout partial.

use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

/// Page templates, by name
const TEMPLATES: &[(&str, &str)] = &[
    ("tasks", include_str!("../../templates/tasks.hbs")),
    ("categories", include_str!("../../templates/categories.hbs")),
    ("add_category", include_str!("../../templates/add_category.hbs")),
    ("edit_category", include_str!("../../templates/edit_category.hbs")),
    ("add_task", include_str!("../../templates/add_task.hbs")),
    ("edit_task", include_str!("../../templates/edit_task.hbs")),
    ("error", include_str!("../../templates/error.hbs")),
];

const BASE_LAYOUT: &str = include_str!("../../templates/base.hbs");

/// The templates are constants, so a failure here is a build defect.
static VIEWS: Lazy<Views> = Lazy::new(|| Views::new().expect("invalid built-in template"));

/// View error type
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error("template error: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("render error: {0}")]
    Render(#[from] handlebars::RenderError),
}

/// Registry of the compiled page templates
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Compile the layout and every page template.
    pub fn new() -> Result<Self, ViewError> {
        let mut registry = Handlebars::new();
        registry.register_partial("base", BASE_LAYOUT)?;
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, *source)?;
        }
        Ok(Self { registry })
    }

    /// Process-wide registry, compiled on first use.
    pub fn shared() -> &'static Views {
        &VIEWS
    }

    /// Render the named page.
    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, ViewError> {
        Ok(self.registry.render(name, data)?)
    }
}

/// Render a page with the shared registry.
pub fn render<T: Serialize>(name: &str, data: &T) -> Result<String, ViewError> {
    Views::shared().render(name, data)
}
