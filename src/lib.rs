//! Directory indexing and size statistics.
//!
//! [`App`] ties the two independent walks to the configured outputs: the
//! indexer writes `index.txt` inside the scanned root, the aggregator feeds
//! the HTML report written in the working directory.

use crate::config::Config;
use crate::error::TreeScanError;
use crate::index::IndexOptions;
use crate::model::StatsMap;
use crate::report::{ReportData, ReportOptions};
use crate::scan::ScanOptions;
use anyhow::Result;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub mod config;
pub mod error;
pub mod index;
pub mod model;
pub mod report;
pub mod scan;
pub mod stats;
pub mod summary;

/// Which operations to run; any combination, including none.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tasks {
    pub index: bool,
    pub stats: bool,
    pub summary: bool,
}

/// A scan root together with the configuration applied to it.
pub struct App {
    root: PathBuf,
    config: Config,
}

impl App {
    /// Fails with [`TreeScanError::PathNotFound`] if `root` does not exist.
    pub fn new(root: PathBuf, config: Config) -> Result<Self, TreeScanError> {
        if !root.exists() {
            return Err(TreeScanError::PathNotFound(root));
        }
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            sorted: self.config.sort_entries,
            exclude: self
                .config
                .exclude_index
                .then(|| self.config.index_file.clone()),
        }
    }

    /// Writes the text index inside the root.
    pub fn index(&self) -> Result<PathBuf> {
        let options = IndexOptions {
            file_name: self.config.index_file.clone(),
            marker: self.config.marker.clone(),
            sorted: self.config.sort_entries,
            exclude_self: self.config.exclude_index,
        };
        index::write_index(&self.root, &options)
    }

    /// Computes the statistics of every directory under the root.
    pub fn stats(&self) -> Result<StatsMap> {
        stats::aggregate(&self.root, &self.scan_options())
    }

    /// Renders the root's statistics to the report file.
    pub fn report(&self, stats: &StatsMap) -> Result<PathBuf> {
        let data = ReportData::from_stats(&self.root, stats)?;
        let options = ReportOptions {
            template_dir: self.config.template_dir.clone(),
            template_name: self.config.template_name.clone(),
            output: self.config.report_file.clone(),
        };
        report::write_report(&data, &options)
    }

    /// Runs the selected tasks; indexing goes first so its output survives
    /// a failing report.
    pub fn run(&self, tasks: Tasks) -> Result<()> {
        if tasks.index {
            self.index()?;
        }
        if !(tasks.stats || tasks.summary) {
            return Ok(());
        }

        let stats = self.stats()?;
        if tasks.summary {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            summary::print_summary(&stats, &self.config.theme, summary::use_color(), &mut out)?;
            out.flush()?;
        }
        if tasks.stats {
            self.report(&stats)?;
        }
        Ok(())
    }
}
