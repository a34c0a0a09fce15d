//! HTML report of the root directory's statistics.
//!
//! The page is produced by a minijinja template loaded from a directory on
//! disk; the template receives a single `report` value shaped like
//! [`ReportData`].

use crate::error::TreeScanError;
use crate::model::StatsMap;
use anyhow::{Context, Result};
use minijinja::{Environment, context, path_loader};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub template_dir: PathBuf,
    pub template_name: String,
    pub output: PathBuf,
}

/// Template context for the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    pub root: String,
    pub file_count: u64,
    pub total_file_count: u64,
    pub total_size_kb: u64,
    pub subdirs: Vec<SubdirRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubdirRow {
    pub name: String,
    /// Whole percent, truncated.
    pub percentage: String,
    pub size_kb: u64,
}

impl ReportData {
    /// Builds the context from the root's record; each subdirectory's size
    /// is looked up under `root` joined with its name.
    pub fn from_stats(root: &Path, stats: &StatsMap) -> Result<Self, TreeScanError> {
        let lookup = |path: &Path| {
            stats
                .get(path)
                .ok_or_else(|| TreeScanError::MissingStats(path.to_path_buf()))
        };

        let root_stats = lookup(root)?;
        let subdirs = root_stats
            .subdir_shares
            .iter()
            .map(|share| {
                let child = lookup(&root.join(&share.name))?;
                Ok(SubdirRow {
                    name: share.name.clone(),
                    percentage: format!("{}", share.percentage.trunc() as u64),
                    size_kb: child.total_size_kb(),
                })
            })
            .collect::<Result<Vec<_>, TreeScanError>>()?;

        Ok(Self {
            root: root.display().to_string(),
            file_count: root_stats.file_count,
            total_file_count: root_stats.total_file_count,
            total_size_kb: root_stats.total_size_kb(),
            subdirs,
        })
    }
}

/// Renders `data` with the configured template.
pub fn render(data: &ReportData, options: &ReportOptions) -> Result<String, TreeScanError> {
    let template_error = |source: minijinja::Error| TreeScanError::Template {
        name: options.template_name.clone(),
        source,
    };

    let mut env = Environment::new();
    env.set_loader(path_loader(options.template_dir.clone()));
    let template = env
        .get_template(&options.template_name)
        .map_err(template_error)?;
    template
        .render(context! { report => data })
        .map_err(template_error)
}

/// Renders the report and writes it to `options.output`.
pub fn write_report(data: &ReportData, options: &ReportOptions) -> Result<PathBuf> {
    let html = render(data, options)?;
    debug!("rendered report:\n{html}");

    fs::write(&options.output, html)
        .with_context(|| format!("cannot write {}", options.output.display()))?;
    info!("report written to {}", options.output.display());
    Ok(options.output.clone())
}
