//! Diagnostic bundle loading.
//!
//! A bundle is a gzip-compressed tar holding
//! `var/lib/osd/diagfiles/<node>/misc` and `var/lib/osd/diagfiles/<node>/etc/pwx`.
//! Extraction goes to a temporary directory owned by the [`Bundle`]; dropping it
//! removes the tree.

use crate::command::{ArtifactRef, Category};
use crate::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;
use tempfile::TempDir;
use tracing::{debug, info, span, warn, Level};
use walkdir::WalkDir;

/// Node directories live under this path inside the archive
pub const DIAGFILES_ROOT: &str = "var/lib/osd/diagfiles";

const MISC_DIR: &str = "misc";
const CONFIG_DIR: &str = "etc/pwx";

/// An extracted bundle and the node directories found in it
#[derive(Debug)]
pub struct Bundle {
    root: PathBuf,
    misc_root: PathBuf,
    config_root: Option<PathBuf>,
    // Held for its Drop; removes the extracted tree
    _extracted: Option<TempDir>,
}

impl Bundle {
    /// Open `path`: a `.tar.gz` archive, or a directory that is already extracted.
    pub fn open(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::from_root(path.to_path_buf(), None)
        } else {
            Self::extract(path)
        }
    }

    /// Extract a gzip-compressed tar into a fresh temporary directory.
    pub fn extract(archive_path: &Path) -> Result<Self> {
        let span = span!(Level::INFO, "extract", archive = %archive_path.display());
        let _enter = span.enter();

        let temp_dir = tempfile::Builder::new().prefix("px-diag-").tempdir()?;
        info!("Extracting into {}", temp_dir.path().display());

        let file = File::open(archive_path)?;
        let mut archive = Archive::new(GzDecoder::new(file));

        let mut unpacked = 0usize;
        for entry in archive.entries()? {
            let mut entry = entry?;
            // Leading `/` is dropped; entries escaping the root are skipped
            if entry.unpack_in(temp_dir.path())? {
                unpacked += 1;
            } else {
                warn!("Skipping unsafe archive entry {}", entry.path()?.display());
            }
        }
        debug!("Unpacked {} entries", unpacked);

        let root = temp_dir.path().to_path_buf();
        Self::from_root(root, Some(temp_dir))
    }

    /// Locate the node directories below an extracted `root`.
    pub fn from_root(root: PathBuf, extracted: Option<TempDir>) -> Result<Self> {
        let diag_root = root.join(DIAGFILES_ROOT);
        if !diag_root.is_dir() {
            return Err(Error::BundleLayout {
                reason: format!("{} not found in archive", DIAGFILES_ROOT),
            });
        }

        let misc_root = find_node_dir(&diag_root, MISC_DIR).ok_or_else(|| Error::BundleLayout {
            reason: format!("no node directory under {} has a misc folder", DIAGFILES_ROOT),
        })?;
        let config_root = find_node_dir(&diag_root, CONFIG_DIR);
        if config_root.is_none() {
            warn!("Bundle has no {} directory; config commands will fail", CONFIG_DIR);
        }

        info!("Using misc directory {}", misc_root.display());
        Ok(Self {
            root,
            misc_root,
            config_root,
            _extracted: extracted,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn misc_root(&self) -> &Path {
        &self.misc_root
    }

    pub fn config_root(&self) -> Option<&Path> {
        self.config_root.as_deref()
    }

    /// Path of an artifact for the requested output format
    pub fn artifact_path(&self, artifact: &ArtifactRef, json_requested: bool) -> Result<PathBuf> {
        let name = artifact.file_name(json_requested);
        match artifact.category {
            Category::Misc => Ok(self.misc_root.join(name)),
            Category::Config => self
                .config_root
                .as_ref()
                .map(|dir| dir.join(name))
                .ok_or_else(|| Error::ArtifactNotFound {
                    path: format!("{}/{}", CONFIG_DIR, name),
                }),
        }
    }
}

/// First node directory, by name, that contains `sub`
fn find_node_dir(diag_root: &Path, sub: &str) -> Option<PathBuf> {
    WalkDir::new(diag_root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
        .map(|entry| entry.path().join(sub))
        .find(|candidate| candidate.is_dir())
}


#[cfg(test)]
mod tests {
    use super::testing::write_archive;
    use super::*;
    use crate::command::AliasTable;
    use crate::command::Target;
    use std::fs;

    const NODE: &str = "var/lib/osd/diagfiles/node-1";

    #[test]
    fn test_extract_finds_node_dirs() -> Result<()> {
        let work = TempDir::new()?;
        let archive = work.path().join("diags.tar.gz");
        write_archive(
            &archive,
            &[
                (format!("{}/misc/uptime.out", NODE).as_str(), "up 3 days\n"),
                (format!("{}/etc/pwx/cluster_uuid", NODE).as_str(), "c0ffee\n"),
            ],
        )?;

        let bundle = Bundle::open(&archive)?;
        assert!(bundle.misc_root().ends_with("node-1/misc"));
        assert!(bundle.config_root().map_or(false, |p| p.ends_with("node-1/etc/pwx")));
        assert_eq!(
            fs::read_to_string(bundle.misc_root().join("uptime.out"))?,
            "up 3 days\n"
        );
        Ok(())
    }

    #[test]
    fn test_drop_removes_extracted_tree() -> Result<()> {
        let work = TempDir::new()?;
        let archive = work.path().join("diags.tar.gz");
        write_archive(&archive, &[(format!("{}/misc/date.out", NODE).as_str(), "now\n")])?;

        let bundle = Bundle::extract(&archive)?;
        let root = bundle.root().to_path_buf();
        assert!(root.exists());
        drop(bundle);
        assert!(!root.exists());
        Ok(())
    }

    #[test]
    fn test_open_directory_is_not_removed() -> Result<()> {
        let work = TempDir::new()?;
        fs::create_dir_all(work.path().join(NODE).join("misc"))?;

        let bundle = Bundle::open(work.path())?;
        assert!(bundle.config_root().is_none());
        drop(bundle);
        assert!(work.path().join(NODE).exists());
        Ok(())
    }

    #[test]
    fn test_misc_and_config_may_be_on_different_nodes() -> Result<()> {
        let work = TempDir::new()?;
        let diag = work.path().join(DIAGFILES_ROOT);
        fs::create_dir_all(diag.join("a-node/etc/pwx"))?;
        fs::create_dir_all(diag.join("b-node/misc"))?;

        let bundle = Bundle::open(work.path())?;
        assert!(bundle.misc_root().ends_with("b-node/misc"));
        assert!(bundle.config_root().map_or(false, |p| p.ends_with("a-node/etc/pwx")));
        Ok(())
    }

    #[test]
    fn test_missing_layout() -> Result<()> {
        let work = TempDir::new()?;
        assert!(matches!(
            Bundle::open(work.path()),
            Err(Error::BundleLayout { .. })
        ));

        fs::create_dir_all(work.path().join(NODE).join("etc/pwx"))?;
        assert!(matches!(
            Bundle::open(work.path()),
            Err(Error::BundleLayout { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_config_artifact_without_config_dir() -> Result<()> {
        let work = TempDir::new()?;
        fs::create_dir_all(work.path().join(NODE).join("misc"))?;
        let bundle = Bundle::open(work.path())?;

        let table = AliasTable::new();
        let artifact = match table.lookup("pxctl clusteruuid show") {
            Some(Target::Artifact(artifact)) => artifact,
            other => panic!("unexpected target {:?}", other),
        };
        assert!(matches!(
            bundle.artifact_path(&artifact, false),
            Err(Error::ArtifactNotFound { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_not_an_archive() -> Result<()> {
        let work = TempDir::new()?;
        let bogus = work.path().join("diags.tar.gz");
        fs::write(&bogus, "plain text")?;
        assert!(Bundle::open(&bogus).is_err());
        Ok(())
    }
}
