//! Deployment manifest: which bundled items land under which root.
use std::path::{Path, PathBuf};

use super::paths::PathTable;

/// Items copied from the data bundle into the install root.
const INSTALL_ITEMS: &[&str] = &[
    ".version",
    "settings.ini",
    "install.ini",
    "README.md",
    "config/",
    "templates/",
    "resources/",
];

/// Bundle directory holding the activation script.
pub const MODULE_DIR_ITEM: &str = "modulefiles/benchtool/";

/// Items copied from the data bundle into the build root.
const BUILD_ITEMS: &[&str] = &[MODULE_DIR_ITEM];

/// A destination root and the ordered bundle items copied into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestTarget {
    /// Resolved destination root.
    pub destination: PathBuf,
    /// Item names relative to the data bundle; a trailing `/` marks a tree.
    pub items: Vec<&'static str>,
}

/// Fixed mapping of destination roots to bundle items.
///
/// The manifest is compiled in and not user-configurable; only the
/// destination roots come from the resolved [`PathTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Targets in copy order.
    pub targets: Vec<ManifestTarget>,
}

impl Manifest {
    /// The standard benchtool manifest for the given paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use benchtool_installer::config::manifest::Manifest;
    /// use benchtool_installer::config::paths::{PathEntry, PathTable};
    /// use std::path::PathBuf;
    ///
    /// let table = PathTable::new(vec![
    ///     PathEntry { name: "install_dir".into(), path: PathBuf::from("/opt/app") },
    ///     PathEntry { name: "build_dir".into(), path: PathBuf::from("/opt/build") },
    ///     PathEntry { name: "bench_dir".into(), path: PathBuf::from("/opt/bench") },
    /// ]);
    /// let manifest = Manifest::standard(&table);
    /// assert_eq!(manifest.targets[1].destination, PathBuf::from("/opt/build"));
    /// assert_eq!(manifest.targets[1].items, ["modulefiles/benchtool/"]);
    /// ```
    #[must_use]
    pub fn standard(paths: &PathTable) -> Self {
        Self {
            targets: vec![
                ManifestTarget {
                    destination: paths.install_dir(),
                    items: INSTALL_ITEMS.to_vec(),
                },
                ManifestTarget {
                    destination: paths.build_dir(),
                    items: BUILD_ITEMS.to_vec(),
                },
            ],
        }
    }

    /// Every `(source, destination root, item)` triple in copy order.
    pub fn copies<'a>(
        &'a self,
        data_dir: &'a Path,
    ) -> impl Iterator<Item = (PathBuf, &'a Path, &'static str)> + 'a {
        self.targets.iter().flat_map(move |target| {
            target.items.iter().map(move |item| {
                (
                    data_dir.join(item.trim_end_matches('/')),
                    target.destination.as_path(),
                    *item,
                )
            })
        })
    }

    /// Total number of items in the manifest.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.targets.iter().map(|t| t.items.len()).sum()
    }
}
