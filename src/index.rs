//! Plain-text index of a directory tree.
//!
//! Each directory is written as its base name prefixed by the marker once
//! per level below the root, followed by its files one level deeper:
//! ```text
//! root
//! ---f1
//! ---d1
//! ------f2
//! ```

use crate::scan::{DirListing, ScanOptions};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DEFAULT_INDEX_FILE: &str = "index.txt";
pub const DEFAULT_MARKER: &str = "---";

#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Name of the index written inside the scanned root.
    pub file_name: String,
    pub marker: String,
    pub sorted: bool,
    /// Leave the index file itself out of the listing.
    pub exclude_self: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            file_name: DEFAULT_INDEX_FILE.to_string(),
            marker: DEFAULT_MARKER.to_string(),
            sorted: false,
            exclude_self: false,
        }
    }
}

impl IndexOptions {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            sorted: self.sorted,
            exclude: self.exclude_self.then(|| self.file_name.clone()),
        }
    }
}

/// Writes the index of `root` into `root/<file_name>` and returns its path.
///
/// The file is created before the walk starts, so without `exclude_self`
/// it lists itself.
pub fn write_index(root: &Path, options: &IndexOptions) -> Result<PathBuf> {
    let index_path = root.join(&options.file_name);
    let file = File::create(&index_path)
        .with_context(|| format!("cannot create {}", index_path.display()))?;

    let mut out = BufWriter::new(file);
    render_index(root, options, &mut out)?;
    out.flush()
        .with_context(|| format!("cannot write {}", index_path.display()))?;

    info!("index written to {}", index_path.display());
    Ok(index_path)
}

/// Streams the index of `root` into `out`.
pub fn render_index<W: Write>(root: &Path, options: &IndexOptions, out: &mut W) -> Result<()> {
    let scan = options.scan_options();
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    index_dir(root, &name, 0, options, &scan, out)
}

fn index_dir<W: Write>(
    path: &Path,
    name: &str,
    depth: usize,
    options: &IndexOptions,
    scan: &ScanOptions,
    out: &mut W,
) -> Result<()> {
    let listing = DirListing::read(path, scan)?;
    debug!("indexing {} ({} dirs)", path.display(), listing.dirs.len());

    writeln!(out, "{}{}", options.marker.repeat(depth), name)?;
    let file_prefix = options.marker.repeat(depth + 1);
    for file in &listing.files {
        writeln!(out, "{}{}", file_prefix, file.name)?;
    }

    for dir in &listing.dirs {
        index_dir(&path.join(dir), dir, depth + 1, options, scan, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn render(root: &Path, options: &IndexOptions) -> String {
        let mut buf = Vec::new();
        render_index(root, options, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn files_follow_their_directory() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("root");
        fs::create_dir_all(root.join("d1/d2")).unwrap();
        fs::write(root.join("f1"), "").unwrap();
        fs::write(root.join("d1/f2"), "").unwrap();
        fs::write(root.join("d1/d2/f3"), "").unwrap();

        let options = IndexOptions {
            sorted: true,
            ..Default::default()
        };
        assert_eq!(
            render(&root, &options),
            "root\n---f1\n---d1\n------f2\n------d2\n---------f3\n"
        );
    }

    #[test]
    fn custom_marker() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("top");
        fs::create_dir_all(root.join("a")).unwrap();
        fs::write(root.join("a/x"), "").unwrap();

        let options = IndexOptions {
            marker: "  ".to_string(),
            sorted: true,
            ..Default::default()
        };
        assert_eq!(render(&root, &options), "top\n  a\n    x\n");
    }

    #[test]
    fn empty_root_is_a_single_line() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("empty");
        fs::create_dir(&root).unwrap();
        assert_eq!(render(&root, &IndexOptions::default()), "empty\n");
    }
}
