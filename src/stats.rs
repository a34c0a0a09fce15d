//! Bottom-up aggregation of per-directory statistics.

use crate::model::{DirectoryStats, StatsMap, SubdirShare};
use crate::scan::{DirListing, ScanOptions};
use anyhow::Result;
use std::path::Path;
use tracing::{debug, warn};

/// Walks `root` and returns the statistics of every directory below it.
///
/// Subdirectories are fully resolved before their parent, so each parent
/// only sums the totals already stored for its direct children. The root
/// is always present in the result under the key `root`.
///
/// # Errors
/// Returns an error if any directory in the tree cannot be listed.
pub fn aggregate(root: &Path, options: &ScanOptions) -> Result<StatsMap> {
    let mut stats = StatsMap::new();
    aggregate_dir(root, options, &mut stats)?;
    Ok(stats)
}

fn aggregate_dir(path: &Path, options: &ScanOptions, stats: &mut StatsMap) -> Result<()> {
    let listing = DirListing::read(path, options)?;
    let file_count = listing.files.len() as u64;
    let own_size = listing.own_size();

    if listing.dirs.is_empty() {
        stats.insert(path.to_path_buf(), DirectoryStats::leaf(file_count, own_size));
        return Ok(());
    }

    // (name, total_file_count, total_size) of each child, in listing order
    let mut children = Vec::with_capacity(listing.dirs.len());
    for dir in listing.dirs {
        let child_path = path.join(&dir);
        aggregate_dir(&child_path, options, stats)?;
        let child = &stats[&child_path];
        children.push((dir, child.total_file_count, child.total_size));
    }

    let children_files: u64 = children.iter().map(|(_, files, _)| files).sum();
    let children_size: u64 = children.iter().map(|(_, _, size)| size).sum();
    if children_size == 0 {
        warn!(
            "subdirectories of {} are all empty, their shares are reported as 0%",
            path.display()
        );
    }

    let subdir_shares = children
        .into_iter()
        .map(|(name, _, size)| SubdirShare {
            name,
            percentage: share(size, children_size),
        })
        .collect();

    let dir_stats = DirectoryStats {
        file_count,
        own_size,
        total_file_count: file_count + children_files,
        total_size: own_size + children_size,
        subdir_shares,
    };
    debug!(
        "{}: {} files, {} bytes in total",
        path.display(),
        dir_stats.total_file_count,
        dir_stats.total_size
    );
    stats.insert(path.to_path_buf(), dir_stats);
    Ok(())
}

/// Percentage of `part` in `whole`; zero when `whole` is zero.
fn share(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn sorted() -> ScanOptions {
        ScanOptions {
            sorted: true,
            ..Default::default()
        }
    }

    #[test]
    fn share_of_empty_whole_is_zero() {
        assert_eq!(share(0, 0), 0.0);
        assert_eq!(share(1, 4), 25.0);
    }

    #[test]
    fn parent_sums_children_totals() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir_all(root.join("a/deep"))?;
        fs::write(root.join("top.bin"), [0u8; 5])?;
        fs::write(root.join("a/one.bin"), [0u8; 10])?;
        fs::write(root.join("a/deep/two.bin"), [0u8; 20])?;
        fs::write(root.join("a/deep/three.bin"), [0u8; 1])?;

        let stats = aggregate(root, &sorted())?;
        assert_eq!(stats.len(), 3);

        let deep = &stats[&root.join("a/deep")];
        assert_eq!(*deep, DirectoryStats::leaf(2, 21));

        let a = &stats[&root.join("a")];
        assert_eq!(a.file_count, 1);
        assert_eq!(a.total_file_count, 3);
        assert_eq!(a.total_size, 31);

        let top = &stats[root];
        assert_eq!(top.own_size, 5);
        assert_eq!(top.total_size, 36);
        assert_eq!(top.total_file_count, 4);
        assert_eq!(top.children_size(), 31);
        Ok(())
    }

    #[test]
    fn empty_subdirectories_get_zero_shares() -> Result<()> {
        let tmp = TempDir::new()?;
        let root = tmp.path();
        fs::create_dir(root.join("x"))?;
        fs::create_dir(root.join("y"))?;
        fs::write(root.join("own.bin"), [0u8; 8])?;

        let stats = aggregate(root, &sorted())?;
        let shares = &stats[root].subdir_shares;
        assert_eq!(shares.len(), 2);
        assert!(shares.iter().all(|s| s.percentage == 0.0));
        assert_eq!(stats[root].total_size, 8);
        Ok(())
    }
}
