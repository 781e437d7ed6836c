//! Volume dataset captured from `pxctl volume list -j`.
//!
//! Each record is kept twice: as the captured JSON value, which raw output emits
//! untouched, and as a typed [`VolumeRecord`] that the table and inspect views read.

pub mod render;

use crate::command::VOLUMES_ARTIFACT;
use crate::{Error, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Integer fields are captured either as JSON numbers or as decimal strings
fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Locator {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MountOptions {
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeSpec {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub size: u64,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub ha_level: u64,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub sharedv4: bool,
    #[serde(default)]
    pub encrypted: bool,
    #[serde(default)]
    pub proxy_volume: bool,
    /// IO priority class
    #[serde(default)]
    pub cos: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub volume_labels: BTreeMap<String, String>,
    #[serde(default)]
    pub mount_options: Option<MountOptions>,
}

/// Nodes and pools jointly holding one replica, paired by position
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReplicaSet {
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub pool_uuids: Vec<String>,
}

impl ReplicaSet {
    /// `(node, pool)` pairs in placement order
    pub fn placements(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .iter()
            .zip(self.pool_uuids.iter())
            .map(|(node, pool)| (node.as_str(), pool.as_str()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VolumeRecord {
    pub id: String,
    #[serde(default)]
    pub locator: Locator,
    #[serde(default)]
    pub spec: VolumeSpec,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub attached_on: Option<String>,
    #[serde(default)]
    pub ctime: Option<String>,
    #[serde(default)]
    pub detach_time: Option<String>,
    #[serde(default)]
    pub device_path: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub usage: u64,
    #[serde(default)]
    pub replica_sets: Vec<ReplicaSet>,
}

impl VolumeRecord {
    pub fn name(&self) -> &str {
        &self.locator.name
    }

    pub fn size_bytes(&self) -> u64 {
        self.spec.size
    }

    pub fn io_priority(&self) -> &str {
        &self.spec.cos
    }

    /// Node the volume is attached on; an empty capture means detached
    pub fn attached_node(&self) -> Option<&str> {
        self.attached_on.as_deref().filter(|node| !node.is_empty())
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.spec.volume_labels
    }

    /// Mount option keys in sorted order
    pub fn mount_option_keys(&self) -> Vec<&str> {
        self.spec
            .mount_options
            .as_ref()
            .map(|mo| mo.options.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Parsed dataset: typed records and the captured values they came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VolumeDataset {
    records: Vec<VolumeRecord>,
    raw: Vec<Value>,
}

impl VolumeDataset {
    pub fn records(&self) -> &[VolumeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&VolumeRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Captured value of the record with `id`
    pub fn find_raw(&self, id: &str) -> Option<&Value> {
        self.position(id).map(|index| &self.raw[index])
    }

    /// Captured values in dataset order, restricted to `id` when given
    pub fn select_raw(&self, id: Option<&str>) -> Vec<&Value> {
        self.records
            .iter()
            .zip(&self.raw)
            .filter(|(record, _)| id.map_or(true, |id| record.id == id))
            .map(|(_, value)| value)
            .collect()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }
}

/// Loads volume records from a bundle's misc directory
#[derive(Debug, Clone)]
pub struct VolumeRegistry;

impl VolumeRegistry {
    /// Read and parse the dataset. Called fresh for every volume command.
    pub fn load(misc_root: &Path) -> Result<VolumeDataset> {
        let path = misc_root.join(VOLUMES_ARTIFACT);
        let content = fs::read_to_string(&path).map_err(|e| Error::MalformedDataset {
            reason: format!("cannot read {}: {}", path.display(), e),
        })?;
        let dataset = Self::parse(&content)?;
        debug!("Loaded {} volumes from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    pub fn parse(content: &str) -> Result<VolumeDataset> {
        let malformed = |e: serde_json::Error| Error::MalformedDataset {
            reason: e.to_string(),
        };

        let raw: Vec<Value> = serde_json::from_str(content).map_err(malformed)?;
        let records = raw
            .iter()
            .map(VolumeRecord::deserialize)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(malformed)?;

        Ok(VolumeDataset { records, raw })
    }
}
