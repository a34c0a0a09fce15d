//! One-level directory listing shared by the indexer and the aggregator.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Listing behaviour common to both walks.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Sort entries by name instead of keeping the platform order.
    pub sorted: bool,
    /// File name to leave out of the listing.
    pub exclude: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub size: u64,
}

/// Direct contents of one directory, split into subdirectories and files.
#[derive(Debug, Default)]
pub struct DirListing {
    pub dirs: Vec<String>,
    pub files: Vec<FileEntry>,
}

impl DirListing {
    /// Lists `path` without descending.
    ///
    /// Only real directories land in `dirs`; symlinks are never followed
    /// for traversal and count as files. A file's size follows symlinks,
    /// falling back to the link itself when the target is gone.
    ///
    /// # Errors
    /// Returns an error if the directory or one of its entries cannot be read.
    pub fn read(path: &Path, options: &ScanOptions) -> Result<Self> {
        let mut listing = DirListing::default();

        let entries =
            fs::read_dir(path).with_context(|| format!("cannot read {}", path.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("cannot read entry in {}", path.display()))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                listing.dirs.push(name);
                continue;
            }
            if options.exclude.as_deref() == Some(name.as_str()) {
                continue;
            }

            let entry_path = entry.path();
            let meta = match fs::metadata(&entry_path) {
                Ok(meta) => meta,
                Err(_) if file_type.is_symlink() => fs::symlink_metadata(&entry_path)?,
                Err(e) => {
                    return Err(e).with_context(|| format!("cannot stat {}", entry_path.display()));
                }
            };
            listing.files.push(FileEntry {
                name,
                size: meta.len(),
            });
        }

        if options.sorted {
            listing.dirs.sort();
            listing.files.sort_by(|a, b| a.name.cmp(&b.name));
        }
        Ok(listing)
    }

    pub fn own_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sorted() -> ScanOptions {
        ScanOptions {
            sorted: true,
            ..Default::default()
        }
    }

    #[test]
    fn splits_dirs_and_files() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("sub"))?;
        fs::write(tmp.path().join("b.txt"), [0u8; 7])?;
        fs::write(tmp.path().join("a.txt"), [0u8; 3])?;

        let listing = DirListing::read(tmp.path(), &sorted())?;
        assert_eq!(listing.dirs, vec!["sub".to_string()]);
        let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
        assert_eq!(listing.own_size(), 10);
        Ok(())
    }

    #[test]
    fn exclude_drops_matching_file_only() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::write(tmp.path().join("index.txt"), "x")?;
        fs::write(tmp.path().join("keep.txt"), "y")?;
        fs::create_dir(tmp.path().join("index.txt.d"))?;

        let options = ScanOptions {
            sorted: true,
            exclude: Some("index.txt".to_string()),
        };
        let listing = DirListing::read(tmp.path(), &options)?;
        assert_eq!(listing.files.len(), 1);
        assert_eq!(listing.files[0].name, "keep.txt");
        assert_eq!(listing.dirs, vec!["index.txt.d".to_string()]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_dir_is_a_file() -> Result<()> {
        let tmp = TempDir::new()?;
        fs::create_dir(tmp.path().join("real"))?;
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("link"))?;
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("broken"))?;

        let listing = DirListing::read(tmp.path(), &sorted())?;
        assert_eq!(listing.dirs, vec!["real".to_string()]);
        let names: Vec<_> = listing.files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["broken", "link"]);
        Ok(())
    }

    #[test]
    fn missing_directory_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(DirListing::read(&tmp.path().join("nope"), &ScanOptions::default()).is_err());
    }
}
