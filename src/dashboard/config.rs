use crate::dashboard::error::{DashboardError, Result};
use crate::dashboard::layout::WidgetInstance;
use crate::dashboard::planner::{Footprint, GridPos, MAX_EXTENT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const SNAPSHOT_VERSION: u32 = 1;

fn default_version() -> u32 {
    SNAPSHOT_VERSION
}

/// Stored top-left cell. Signed so that corrupt negative values survive
/// parsing and can be reported.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Size {
    pub width: usize,
    pub height: usize,
}

/// Stored form of a placed widget.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceSnapshot {
    pub instance_id: String,
    pub kind_id: String,
    pub position: GridPosition,
    pub footprint: Size,
}

impl InstanceSnapshot {
    pub fn from_instance(inst: &WidgetInstance) -> Self {
        Self {
            instance_id: inst.id.clone(),
            kind_id: inst.kind.clone(),
            // Placed rectangles end at or before MAX_EXTENT, so both fit.
            position: GridPosition {
                x: i64::try_from(inst.position.x).unwrap_or(i64::MAX),
                y: i64::try_from(inst.position.y).unwrap_or(i64::MAX),
            },
            footprint: Size {
                width: inst.footprint.width,
                height: inst.footprint.height,
            },
        }
    }

    /// Convert the stored geometry, failing on values no layout can hold.
    pub fn geometry(&self) -> Result<(GridPos, Footprint)> {
        let (Ok(x), Ok(y)) = (
            usize::try_from(self.position.x),
            usize::try_from(self.position.y),
        ) else {
            return Err(DashboardError::Serialization(format!(
                "widget '{}' has negative coordinates ({}, {})",
                self.instance_id, self.position.x, self.position.y
            )));
        };
        let footprint = Footprint::new(self.footprint.width, self.footprint.height);
        if footprint.is_empty() {
            return Err(DashboardError::Serialization(format!(
                "widget '{}' has an empty footprint {}x{}",
                self.instance_id, self.footprint.width, self.footprint.height
            )));
        }
        let within = |start: usize, len: usize| {
            start
                .checked_add(len)
                .is_some_and(|end| end <= MAX_EXTENT)
        };
        if !within(x, footprint.width) || !within(y, footprint.height) {
            return Err(DashboardError::Serialization(format!(
                "widget '{}' at ({x}, {y}) extends past the addressable grid",
                self.instance_id
            )));
        }
        Ok((GridPos::new(x, y), footprint))
    }
}

/// Serialized dashboard layout; the storage and wire contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LayoutSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    pub columns: usize,
    #[serde(default)]
    pub instances: Vec<InstanceSnapshot>,
}

impl LayoutSnapshot {
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| DashboardError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| DashboardError::Serialization(e.to_string()))
    }
}

/// Where snapshots are kept between sessions.
pub trait LayoutPersistence: Send + Sync {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> anyhow::Result<Option<LayoutSnapshot>>;
    fn save(&self, snapshot: &LayoutSnapshot) -> anyhow::Result<()>;
}

/// Pretty-printed JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A directory resolves to `dashboard.json` inside it.
    pub fn path_for(base: &str) -> PathBuf {
        let base = Path::new(base);
        if base.is_dir() {
            base.join("dashboard.json")
        } else {
            PathBuf::from(base)
        }
    }
}

impl LayoutPersistence for JsonFilePersistence {
    fn load(&self) -> anyhow::Result<Option<LayoutSnapshot>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&self, snapshot: &LayoutSnapshot) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    slot: Arc<Mutex<Option<LayoutSnapshot>>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: LayoutSnapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(snapshot))),
        }
    }

    pub fn stored(&self) -> Option<LayoutSnapshot> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl LayoutPersistence for MemoryPersistence {
    fn load(&self) -> anyhow::Result<Option<LayoutSnapshot>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("layout store lock poisoned"))?;
        Ok(slot.clone())
    }

    fn save(&self, snapshot: &LayoutSnapshot) -> anyhow::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("layout store lock poisoned"))?;
        *slot = Some(snapshot.clone());
        Ok(())
    }
}
