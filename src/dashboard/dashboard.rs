use crate::dashboard::config::{LayoutPersistence, LayoutSnapshot};
use crate::dashboard::error::{DashboardError, Result};
use crate::dashboard::layout::{DashboardLayout, WidgetInstance};
use crate::dashboard::mode::{Mode, ModeController};
use crate::dashboard::widgets::{WidgetContext, WidgetKind, WidgetRegistry};

/// One dashboard: the widget catalog, the placed layout and the current
/// interaction mode.
///
/// Every structural edit goes through the same order: mode check, kind or
/// instance lookup, placement, commit. A failed call leaves the session as it
/// was. Callers serialize access; nothing here locks.
pub struct DashboardSession {
    registry: WidgetRegistry,
    layout: DashboardLayout,
    mode: ModeController,
    persistence: Option<Box<dyn LayoutPersistence>>,
    unsaved: bool,
    pub warnings: Vec<String>,
}

impl DashboardSession {
    pub fn new(registry: WidgetRegistry, columns: usize) -> Self {
        Self {
            registry,
            layout: DashboardLayout::new(columns),
            mode: ModeController::new(),
            persistence: None,
            unsaved: false,
            warnings: Vec::new(),
        }
    }

    pub fn with_persistence(mut self, persistence: impl LayoutPersistence + 'static) -> Self {
        self.persistence = Some(Box::new(persistence));
        self
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    pub fn mode(&self) -> Mode {
        self.mode.mode()
    }

    pub fn is_customizing(&self) -> bool {
        self.mode().allows_edits()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn instance(&self, id: &str) -> Option<&WidgetInstance> {
        self.layout.instance(id)
    }

    pub fn instance_for_kind(&self, kind: &str) -> Option<&WidgetInstance> {
        self.layout.instance_for_kind(kind)
    }

    /// Kinds that can still be added, in catalog order.
    pub fn get_addable_kinds(&self) -> Vec<&WidgetKind> {
        self.registry.list_unplaced(&self.layout)
    }

    pub fn toggle_customize(&mut self) -> Mode {
        self.mode.toggle()
    }

    pub fn add_widget(&mut self, kind_id: &str) -> Result<LayoutSnapshot> {
        let mut next = self.layout.clone();
        next.add_widget(&self.registry, self.mode(), kind_id)?;
        self.commit(next)
    }

    pub fn remove_widget(&mut self, instance_id: &str) -> Result<LayoutSnapshot> {
        let mut next = self.layout.clone();
        next.remove_widget(self.mode(), instance_id)?;
        self.commit(next)
    }

    /// Edits are made on a copy; it replaces the live layout only once it
    /// validates.
    fn commit(&mut self, next: DashboardLayout) -> Result<LayoutSnapshot> {
        next.validate()?;
        self.layout = next;
        self.unsaved = true;
        Ok(self.layout.serialize())
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()
    }

    /// Replace the layout with the packed arrangement of every registered
    /// kind. This is setup, not a user edit, so the mode is not consulted.
    pub fn seed_default_layout(&mut self) -> LayoutSnapshot {
        let mut layout = DashboardLayout::new(self.layout.columns());
        let mut warnings = Vec::new();
        for kind in self.registry.list() {
            if let Err(e) = layout.place(kind) {
                tracing::warn!(kind = %kind.id, error = %e, "default widget skipped");
                warnings.push(format!("default widget '{}' skipped: {e}", kind.id));
            }
        }
        self.layout = layout;
        self.warnings = warnings;
        self.unsaved = true;
        tracing::info!(widgets = self.layout.len(), "default dashboard layout seeded");
        self.layout.serialize()
    }

    /// Rebuild the layout from `snapshot`. Dropped instances are reported in
    /// the returned warnings; a malformed snapshot leaves the current layout
    /// in place.
    pub fn load_layout(&mut self, snapshot: &LayoutSnapshot) -> Result<Vec<String>> {
        let (layout, warnings) = DashboardLayout::deserialize(snapshot, &self.registry)?;
        self.layout = layout;
        self.unsaved = !warnings.is_empty();
        self.warnings = warnings.clone();
        tracing::info!(
            widgets = self.layout.len(),
            dropped = warnings.len(),
            "dashboard layout loaded"
        );
        Ok(warnings)
    }

    /// Load from the attached persistence. `Ok(None)` when there is no store
    /// or it holds nothing yet.
    pub fn load_saved(&mut self) -> Result<Option<Vec<String>>> {
        let Some(store) = &self.persistence else {
            return Ok(None);
        };
        let snapshot = store.load().map_err(|e| {
            if e.downcast_ref::<serde_json::Error>().is_some() {
                DashboardError::Serialization(format!("{e:#}"))
            } else {
                DashboardError::Persistence(e)
            }
        })?;
        match snapshot {
            Some(snapshot) => self.load_layout(&snapshot).map(Some),
            None => Ok(None),
        }
    }

    /// Snapshot the layout and hand it to the attached persistence.
    ///
    /// A failed write does not touch the layout; the session stays marked as
    /// unsaved until a later save succeeds.
    pub fn save_layout(&mut self) -> Result<LayoutSnapshot> {
        let snapshot = self.layout.serialize();
        if let Some(store) = &self.persistence {
            if let Err(e) = store.save(&snapshot) {
                tracing::warn!(error = %format!("{e:#}"), "failed to save dashboard layout");
                self.unsaved = true;
                return Err(DashboardError::Persistence(e));
            }
            tracing::info!(widgets = snapshot.instances.len(), "dashboard layout saved");
        }
        self.unsaved = false;
        Ok(snapshot)
    }

    /// Render every placed widget whose kind is still registered, in layout
    /// order.
    pub fn render(&self) -> Vec<(&WidgetInstance, Vec<String>)> {
        self.layout
            .instances()
            .iter()
            .filter_map(|inst| {
                let kind = self.registry.get(&inst.kind).ok()?;
                let ctx = WidgetContext {
                    instance_id: &inst.id,
                    footprint: inst.footprint,
                };
                Some((inst, kind.renderer().render(&ctx)))
            })
            .collect()
    }
}
