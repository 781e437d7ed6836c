//! Static alias table mapping literal command strings to what they show.

use std::collections::HashMap;

/// Which node directory an artifact lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `<node>/misc`
    Misc,
    /// `<node>/etc/pwx`
    Config,
}

/// A captured file addressed by category and name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    pub category: Category,
    pub name: &'static str,
    /// Structured variant streamed instead when `-j` is requested
    pub json_name: Option<&'static str>,
}

impl ArtifactRef {
    const fn misc(name: &'static str) -> Self {
        Self {
            category: Category::Misc,
            name,
            json_name: None,
        }
    }

    const fn config(name: &'static str) -> Self {
        Self {
            category: Category::Config,
            name,
            json_name: None,
        }
    }

    const fn with_json(mut self, json_name: &'static str) -> Self {
        self.json_name = Some(json_name);
        self
    }

    /// File name to open for the requested output format
    pub fn file_name(&self, json_requested: bool) -> &'static str {
        match (json_requested, self.json_name) {
            (true, Some(json_name)) => json_name,
            _ => self.name,
        }
    }
}

/// What a resolved command does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    VolumeList,
    VolumeInspect,
    Artifact(ArtifactRef),
}

/// Volume dataset inside the misc directory
pub const VOLUMES_ARTIFACT: &str = "px-volumes.out";

const KVDB: ArtifactRef = ArtifactRef::misc("px-kvdb.out");
const ALERTS: ArtifactRef = ArtifactRef::misc("px-alerts.out").with_json("px-alerts-show.out");
const CLOUDDRIVES: ArtifactRef = ArtifactRef::misc("px-clouddrive-list.out");
const CONFIG_JSON: ArtifactRef = ArtifactRef::config("config.json");
const CLUSTER_UUID: ArtifactRef = ArtifactRef::config("cluster_uuid");

/// Every recognised command string, abbreviations included
const ALIASES: &[(&str, Target)] = &[
    ("pxctl volume list", Target::VolumeList),
    ("pxctl v l", Target::VolumeList),
    ("pxctl volume inspect", Target::VolumeInspect),
    ("pxctl v i", Target::VolumeInspect),
    ("pxctl config show", Target::Artifact(CONFIG_JSON)),
    ("pxctl config s", Target::Artifact(CONFIG_JSON)),
    ("pxctl clusteruuid show", Target::Artifact(CLUSTER_UUID)),
    ("pxctl clusteruuid s", Target::Artifact(CLUSTER_UUID)),
    ("pxctl status", Target::Artifact(ArtifactRef::misc("px-status.out"))),
    ("pxctl version", Target::Artifact(ArtifactRef::misc("px-version.out"))),
    ("pxctl service kvdb members", Target::Artifact(KVDB)),
    ("pxctl sv k m", Target::Artifact(KVDB)),
    ("pxctl alerts show", Target::Artifact(ALERTS)),
    ("pxctl a s", Target::Artifact(ALERTS)),
    ("pxctl clouddrive list", Target::Artifact(CLOUDDRIVES)),
    ("pxctl cd l", Target::Artifact(CLOUDDRIVES)),
    ("journalctl", Target::Artifact(ArtifactRef::misc("all-journalctl.out"))),
    ("lsblk", Target::Artifact(ArtifactRef::misc("lsblk.out"))),
    ("blkid", Target::Artifact(ArtifactRef::misc("blkid.out"))),
    ("ip addr show", Target::Artifact(ArtifactRef::misc("ip.out"))),
    ("mount", Target::Artifact(ArtifactRef::misc("mount.out"))),
    ("uptime", Target::Artifact(ArtifactRef::misc("uptime.out"))),
    ("date", Target::Artifact(ArtifactRef::misc("date.out"))),
];

/// Immutable lookup from exact command string to target, built once per session
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: HashMap<&'static str, Target>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self {
            entries: ALIASES.iter().copied().collect(),
        }
    }

    /// Exact, case-sensitive lookup. No prefix or fuzzy matching.
    pub fn lookup(&self, base: &str) -> Option<Target> {
        self.entries.get(base).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
    }
}
