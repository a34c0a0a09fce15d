//! Statistics records produced by the aggregation pass.
//!
//! Every visited directory gets one [`DirectoryStats`], keyed in a
//! [`StatsMap`] by its path (the scan root joined with the child names on
//! the way down, so the root's key is exactly the path that was scanned).

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Mapping from every visited directory to its statistics.
pub type StatsMap = BTreeMap<PathBuf, DirectoryStats>;

/// A subdirectory's share of the cumulative size of all its siblings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubdirShare {
    pub name: String,
    pub percentage: f64,
}

/// Own and cumulative counters for one directory.
///
/// `file_count` and `own_size` only cover files located directly in the
/// directory; the `total_*` fields add every subdirectory recursively.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DirectoryStats {
    pub file_count: u64,
    pub own_size: u64,
    pub total_file_count: u64,
    pub total_size: u64,
    /// One entry per direct subdirectory, in listing order.
    pub subdir_shares: Vec<SubdirShare>,
}

impl DirectoryStats {
    /// Stats of a directory without subdirectories: totals equal own values.
    pub fn leaf(file_count: u64, own_size: u64) -> Self {
        Self {
            file_count,
            own_size,
            total_file_count: file_count,
            total_size: own_size,
            subdir_shares: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.subdir_shares.is_empty()
    }

    /// Size held by subdirectories only.
    pub fn children_size(&self) -> u64 {
        self.total_size - self.own_size
    }

    pub fn total_size_kb(&self) -> u64 {
        self.total_size / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_totals_equal_own_values() {
        let stats = DirectoryStats::leaf(3, 1500);
        assert_eq!(stats.total_file_count, 3);
        assert_eq!(stats.total_size, 1500);
        assert!(stats.is_leaf());
        assert_eq!(stats.children_size(), 0);
    }

    #[test]
    fn kilobytes_use_integer_division() {
        assert_eq!(DirectoryStats::leaf(1, 2047).total_size_kb(), 1);
        assert_eq!(DirectoryStats::leaf(1, 2048).total_size_kb(), 2);
        assert_eq!(DirectoryStats::leaf(1, 1023).total_size_kb(), 0);
    }
}
