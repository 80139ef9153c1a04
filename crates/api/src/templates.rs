//! Background templates for the PDF reports.

use std::path::Path;

use plandoc_core::report::{evaluation_plan, learning_plan, ReportError, ReportLayout, ReportTemplate};
use serde::Serialize;

use crate::config::ServerConfig;

/// Where a report's background page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSource {
    /// Grid drawn in code from the report layout.
    Builtin,
    /// PDF file named by the server configuration.
    File,
}

/// A template together with its origin, reported by `/health`.
#[derive(Debug, Clone)]
pub struct LoadedTemplate {
    pub template: ReportTemplate,
    pub source: TemplateSource,
}

/// One background template per report kind.
#[derive(Debug, Clone)]
pub struct ReportTemplates {
    pub learning_plan: LoadedTemplate,
    pub evaluation_plan: LoadedTemplate,
}

impl ReportTemplates {
    /// Load the configured template files, falling back to the built-in grid
    /// for any kind without a configured path.
    pub fn load(config: &ServerConfig) -> Result<Self, ReportError> {
        Ok(Self {
            learning_plan: load_one(config.learning_plan_template.as_deref(), &learning_plan::LAYOUT)?,
            evaluation_plan: load_one(
                config.evaluation_plan_template.as_deref(),
                &evaluation_plan::LAYOUT,
            )?,
        })
    }

    /// Built-in templates for both kinds.
    pub fn builtin() -> Result<Self, ReportError> {
        Ok(Self {
            learning_plan: load_one(None, &learning_plan::LAYOUT)?,
            evaluation_plan: load_one(None, &evaluation_plan::LAYOUT)?,
        })
    }
}

fn load_one(path: Option<&Path>, layout: &ReportLayout) -> Result<LoadedTemplate, ReportError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), title = layout.title, "Loading report template");
            Ok(LoadedTemplate {
                template: ReportTemplate::from_file(path)?,
                source: TemplateSource::File,
            })
        }
        None => Ok(LoadedTemplate {
            template: ReportTemplate::builtin(layout)?,
            source: TemplateSource::Builtin,
        }),
    }
}
