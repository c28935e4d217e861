//! The benchmark identifier space and size-variant discovery.
//!
//! Criterion stores one report directory per benchmark id:
//!
//! ```text
//! <root>/<structure>/<category>/<operation>/<size>/report/index.html
//! ```
//!
//! next to its own housekeeping directories (`report`, `new`, `base`, `change`).

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CollectError;

/// Set implementations under test, outermost loop.
pub const STRUCTURES: [&str; 4] = ["ARTSet", "HashSet", "BTreeSet", "CachingARTSet"];

/// Key distributions, middle loop.
pub const CATEGORIES: [&str; 3] = ["sparse_u64", "dense_u64", "String"];

/// Workloads, innermost loop.
pub const OPERATIONS: [&str; 3] = ["lookup_hit", "lookup_miss", "insert_remove"];

/// Directory names criterion keeps beside the per-size directories.
pub const RESERVED_DIRS: [&str; 4] = ["report", "new", "base", "change"];

/// One (structure, category, operation) cell of the benchmark space.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BenchmarkId {
    pub structure: String,
    pub category: String,
    pub operation: String,
}

impl BenchmarkId {
    pub fn dir(&self, root: &Path) -> PathBuf {
        root.join(&self.structure)
            .join(&self.category)
            .join(&self.operation)
    }
}

#[derive(Clone, Debug)]
pub struct BenchmarkSpace {
    pub root: PathBuf,
    pub structures: Vec<String>,
    pub categories: Vec<String>,
    pub operations: Vec<String>,
}

impl BenchmarkSpace {
    /// The fixed set-benchmark space rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_names(root, &STRUCTURES, &CATEGORIES, &OPERATIONS)
    }

    pub fn with_names(
        root: impl Into<PathBuf>,
        structures: &[&str],
        categories: &[&str],
        operations: &[&str],
    ) -> Self {
        let owned =
            |names: &[&str]| -> Vec<String> { names.iter().map(|s| s.to_string()).collect() };
        Self {
            root: root.into(),
            structures: owned(structures),
            categories: owned(categories),
            operations: owned(operations),
        }
    }

    /// Keep only the structures named in `keep`, preserving the fixed order.
    ///
    /// Names outside the space are ignored.
    pub fn retain_structures(&mut self, keep: &[String]) {
        self.structures.retain(|s| keep.contains(s));
    }

    /// All ids, structures outer, categories middle, operations inner.
    pub fn ids(&self) -> impl Iterator<Item = BenchmarkId> + '_ {
        self.structures.iter().flat_map(move |s| {
            self.categories.iter().flat_map(move |c| {
                self.operations.iter().map(move |o| BenchmarkId {
                    structure: s.clone(),
                    category: c.clone(),
                    operation: o.clone(),
                })
            })
        })
    }

    /// Size variants present on disk for `id`, ascending.
    ///
    /// A missing id directory yields no sizes. Any non-housekeeping directory
    /// whose name is not a non-negative integer aborts with
    /// [`CollectError::MalformedSizeDirectory`].
    pub fn sizes(&self, id: &BenchmarkId) -> Result<Vec<u64>, CollectError> {
        let dir = id.dir(&self.root);
        if !dir.is_dir() {
            debug!(path = %dir.display(), "no reports for benchmark");
            return Ok(Vec::new());
        }

        let mut sizes = Vec::new();
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| CollectError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;
            if !entry.path().is_dir() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if RESERVED_DIRS.contains(&&*name) {
                debug!(path = %entry.path().display(), "skipping criterion housekeeping dir");
                continue;
            }

            let size = Some(&*name)
                .filter(|n| n.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|n| n.parse::<u64>().ok())
                .ok_or_else(|| CollectError::MalformedSizeDirectory {
                    path: dir.clone(),
                    name: name.to_string(),
                })?;
            sizes.push(size);
        }

        sizes.sort_unstable();
        Ok(sizes)
    }

    /// Path of the HTML report for one size variant.
    pub fn report_path(&self, id: &BenchmarkId, size: u64) -> PathBuf {
        id.dir(&self.root)
            .join(size.to_string())
            .join("report")
            .join("index.html")
    }
}
