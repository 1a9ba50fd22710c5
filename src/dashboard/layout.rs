use crate::dashboard::config::{InstanceSnapshot, LayoutSnapshot, SNAPSHOT_VERSION};
use crate::dashboard::error::{DashboardError, Result};
use crate::dashboard::mode::Mode;
use crate::dashboard::planner::{plan, Footprint, GridPos, Occupancy, MAX_COLUMNS};
use crate::dashboard::widgets::{WidgetKind, WidgetRegistry};
use std::collections::HashSet;
use std::ops::Range;

/// A widget placed on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetInstance {
    pub id: String,
    pub kind: String,
    pub position: GridPos,
    /// Copied from the kind when placed so the instance stays self-describing.
    pub footprint: Footprint,
}

impl WidgetInstance {
    pub fn right(&self) -> usize {
        self.position.x.saturating_add(self.footprint.width)
    }

    pub fn bottom(&self) -> usize {
        self.position.y.saturating_add(self.footprint.height)
    }

    pub fn overlaps(&self, other: &WidgetInstance) -> bool {
        self.position.x < other.right()
            && other.position.x < self.right()
            && self.position.y < other.bottom()
            && other.position.y < self.bottom()
    }
}

fn new_instance_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Ordered set of placed widgets on a grid with a fixed number of columns.
///
/// After every public operation: one instance per kind, every rectangle
/// inside the columns, no two rectangles overlapping, and distinct ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    columns: usize,
    instances: Vec<WidgetInstance>,
}

impl DashboardLayout {
    /// Column counts outside `1..=MAX_COLUMNS` are clamped with a warning.
    pub fn new(columns: usize) -> Self {
        let clamped = columns.clamp(1, MAX_COLUMNS);
        if clamped != columns {
            tracing::warn!(
                requested = columns,
                columns = clamped,
                "dashboard column count out of range"
            );
        }
        Self {
            columns: clamped,
            instances: Vec::new(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn instances(&self) -> &[WidgetInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn has_kind(&self, kind: &str) -> bool {
        self.instances.iter().any(|i| i.kind == kind)
    }

    pub fn instance(&self, id: &str) -> Option<&WidgetInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn instance_for_kind(&self, kind: &str) -> Option<&WidgetInstance> {
        self.instances.iter().find(|i| i.kind == kind)
    }

    /// Number of rows spanned by the placed widgets.
    pub fn rows(&self) -> usize {
        self.instances.iter().map(|i| i.bottom()).max().unwrap_or(0)
    }

    pub fn occupancy(&self) -> Occupancy {
        let mut occ = Occupancy::new(self.columns);
        for inst in &self.instances {
            occ.claim(inst.position, inst.footprint);
        }
        occ
    }

    pub fn add_widget(
        &mut self,
        registry: &WidgetRegistry,
        mode: Mode,
        kind_id: &str,
    ) -> Result<WidgetInstance> {
        mode.require_customizing()?;
        let kind = registry.get(kind_id)?;
        self.place(kind)
    }

    /// Place `kind` at the first free slot without a mode check. Used for
    /// seeding the default arrangement.
    pub(crate) fn place(&mut self, kind: &WidgetKind) -> Result<WidgetInstance> {
        if self.has_kind(&kind.id) {
            return Err(DashboardError::DuplicateKind(kind.id.clone()));
        }
        let position = plan(&self.occupancy(), kind.footprint)?;
        let mut id = new_instance_id();
        while self.instance(&id).is_some() {
            id = new_instance_id();
        }
        let instance = WidgetInstance {
            id,
            kind: kind.id.clone(),
            position,
            footprint: kind.footprint,
        };
        tracing::debug!(
            kind = %instance.kind,
            id = %instance.id,
            x = position.x,
            y = position.y,
            "widget placed"
        );
        self.instances.push(instance.clone());
        Ok(instance)
    }

    /// Remove an instance. Remaining widgets keep their positions.
    pub fn remove_widget(&mut self, mode: Mode, instance_id: &str) -> Result<WidgetInstance> {
        mode.require_customizing()?;
        let idx = self
            .instances
            .iter()
            .position(|i| i.id == instance_id)
            .ok_or_else(|| DashboardError::instance_not_found(instance_id))?;
        let removed = self.instances.remove(idx);
        tracing::debug!(kind = %removed.kind, id = %removed.id, "widget removed");
        Ok(removed)
    }

    /// Re-check all layout invariants against the live state.
    pub fn validate(&self) -> Result<()> {
        if self.columns == 0 {
            return Err(DashboardError::Invariant("grid has no columns".into()));
        }
        let mut ids = HashSet::new();
        let mut kinds = HashSet::new();
        for (idx, inst) in self.instances.iter().enumerate() {
            if !ids.insert(inst.id.as_str()) {
                return Err(DashboardError::Invariant(format!(
                    "instance id '{}' is used more than once",
                    inst.id
                )));
            }
            if !kinds.insert(inst.kind.as_str()) {
                return Err(DashboardError::Invariant(format!(
                    "widget kind '{}' is placed more than once",
                    inst.kind
                )));
            }
            if inst.footprint.is_empty() || inst.right() > self.columns {
                return Err(DashboardError::Invariant(format!(
                    "widget '{}' does not fit in {} columns",
                    inst.id, self.columns
                )));
            }
            if let Some(other) = self.instances[..idx].iter().find(|o| o.overlaps(inst)) {
                return Err(DashboardError::Invariant(format!(
                    "widgets '{}' and '{}' overlap",
                    other.id, inst.id
                )));
            }
        }
        Ok(())
    }

    pub fn serialize(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            version: SNAPSHOT_VERSION,
            columns: self.columns,
            instances: self
                .instances
                .iter()
                .map(InstanceSnapshot::from_instance)
                .collect(),
        }
    }

    /// Rebuild a layout from a snapshot.
    ///
    /// Instances with an unknown kind, a repeated id or kind, a rectangle
    /// outside the grid, or an overlap with an earlier instance are dropped
    /// and described in the returned warnings. A snapshot that is malformed
    /// as a whole is an error.
    pub fn deserialize(
        snapshot: &LayoutSnapshot,
        registry: &WidgetRegistry,
    ) -> Result<(Self, Vec<String>)> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(DashboardError::Serialization(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        if snapshot.columns == 0 {
            return Err(DashboardError::Serialization(
                "grid must have at least one column".into(),
            ));
        }
        if snapshot.columns > MAX_COLUMNS {
            return Err(DashboardError::Serialization(format!(
                "grid has {} columns, at most {MAX_COLUMNS} are supported",
                snapshot.columns
            )));
        }

        let columns = snapshot.columns;
        let mut layout = Self::new(columns);
        let mut occupied = Occupancy::new(columns);
        let mut warnings = Vec::new();

        for slot in &snapshot.instances {
            let (position, footprint) = slot.geometry()?;
            if slot.instance_id.is_empty() {
                warnings.push(format!(
                    "dropping widget '{}' without an instance id",
                    slot.kind_id
                ));
                continue;
            }
            if layout.instance(&slot.instance_id).is_some() {
                warnings.push(format!(
                    "dropping widget '{}': instance id '{}' already used",
                    slot.kind_id, slot.instance_id
                ));
                continue;
            }
            if !registry.contains(&slot.kind_id) {
                warnings.push(format!("dropping unknown widget '{}'", slot.kind_id));
                continue;
            }
            if layout.has_kind(&slot.kind_id) {
                warnings.push(format!(
                    "dropping duplicate widget '{}' ({})",
                    slot.kind_id, slot.instance_id
                ));
                continue;
            }
            if position.x + footprint.width > columns {
                warnings.push(format!(
                    "widget '{}' is outside the grid and was ignored",
                    slot.kind_id
                ));
                continue;
            }
            if !occupied.fits(position, footprint) {
                warnings.push(format!(
                    "widget '{}' overlaps another widget and was ignored",
                    slot.kind_id
                ));
                continue;
            }
            occupied.claim(position, footprint);
            layout.instances.push(WidgetInstance {
                id: slot.instance_id.clone(),
                kind: slot.kind_id.clone(),
                position,
                footprint,
            });
        }

        for w in &warnings {
            tracing::warn!("{w}");
        }
        Ok((layout, warnings))
    }

    /// Row-major map of which instance covers each cell, for the rows in
    /// `rows` that lie inside the layout. Rows outside the range are never
    /// materialized.
    pub fn grid_rows(&self, rows: Range<usize>) -> Vec<Vec<Option<&WidgetInstance>>> {
        let end = rows.end.min(self.rows());
        let start = rows.start.min(end);
        let mut grid = vec![vec![None; self.columns]; end - start];
        for inst in &self.instances {
            let top = inst.position.y.max(start);
            let bottom = inst.bottom().min(end);
            if top >= bottom {
                continue;
            }
            for row in &mut grid[top - start..bottom - start] {
                for cell in &mut row[inst.position.x..inst.right().min(self.columns)] {
                    *cell = Some(inst);
                }
            }
        }
        grid
    }
}
