use crate::dashboard::error::{DashboardError, Result};
use crate::dashboard::layout::DashboardLayout;
use crate::dashboard::planner::Footprint;
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod performance_overview;
mod quick_actions;
mod recent_activity;
mod system_monitor;
mod weather;

pub use performance_overview::PerformanceOverviewWidget;
pub use quick_actions::QuickActionsWidget;
pub use recent_activity::RecentActivityWidget;
pub use system_monitor::SystemMonitorWidget;
pub use weather::WeatherWidget;

/// Size classes offered by the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    Medium,
    Large,
}

impl WidgetSize {
    pub fn footprint(&self) -> Footprint {
        match self {
            WidgetSize::Small | WidgetSize::Medium => Footprint::new(1, 1),
            WidgetSize::Large => Footprint::new(2, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetSize::Small => "small",
            WidgetSize::Medium => "medium",
            WidgetSize::Large => "large",
        }
    }
}

/// Context handed to a widget when it renders.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    pub instance_id: &'a str,
    pub footprint: Footprint,
}

/// Widget trait implemented by all dashboard widgets.
///
/// The engine only passes the renderer around; it never looks at what
/// `render` produces.
pub trait Widget: Send + Sync {
    fn render(&self, ctx: &WidgetContext<'_>) -> Vec<String>;
}

/// A registered widget type: its id, display name, footprint and renderer.
#[derive(Clone)]
pub struct WidgetKind {
    pub id: String,
    pub name: String,
    pub footprint: Footprint,
    renderer: Arc<dyn Widget>,
}

impl WidgetKind {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        footprint: Footprint,
        renderer: impl Widget + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            footprint,
            renderer: Arc::new(renderer),
        }
    }

    pub fn sized(
        id: impl Into<String>,
        name: impl Into<String>,
        size: WidgetSize,
        renderer: impl Widget + 'static,
    ) -> Self {
        Self::new(id, name, size.footprint(), renderer)
    }

    pub fn renderer(&self) -> &dyn Widget {
        self.renderer.as_ref()
    }
}

impl fmt::Debug for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetKind")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("footprint", &self.footprint)
            .finish_non_exhaustive()
    }
}

/// Catalog of widget kinds, kept in registration order.
#[derive(Clone, Default, Debug)]
pub struct WidgetRegistry {
    map: LinkedHashMap<String, WidgetKind>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        let defaults = [
            WidgetKind::sized(
                "system-monitor",
                "System Monitor",
                WidgetSize::Large,
                SystemMonitorWidget::default(),
            ),
            WidgetKind::sized(
                "weather",
                "Weather",
                WidgetSize::Medium,
                WeatherWidget::default(),
            ),
            WidgetKind::sized(
                "quick-actions",
                "Quick Actions",
                WidgetSize::Medium,
                QuickActionsWidget::default(),
            ),
            WidgetKind::sized(
                "recent-activity",
                "Recent Activity",
                WidgetSize::Large,
                RecentActivityWidget::default(),
            ),
            WidgetKind::sized(
                "performance-overview",
                "Performance Overview",
                WidgetSize::Large,
                PerformanceOverviewWidget::default(),
            ),
        ];
        for kind in defaults {
            let id = kind.id.clone();
            let registered = reg.register(kind);
            debug_assert!(registered.is_ok(), "built-in widget kind '{id}' rejected");
            if let Err(e) = registered {
                tracing::error!(kind = %id, error = %e, "built-in widget kind rejected");
            }
        }
        reg
    }

    pub fn register(&mut self, kind: WidgetKind) -> Result<()> {
        if self.map.contains_key(&kind.id) {
            return Err(DashboardError::DuplicateKind(kind.id));
        }
        if kind.footprint.is_empty() {
            return Err(DashboardError::Placement(format!(
                "widget kind '{}' has an empty footprint",
                kind.id
            )));
        }
        tracing::debug!(kind = %kind.id, "widget kind registered");
        self.map.insert(kind.id.clone(), kind);
        Ok(())
    }

    /// Remove a kind from the catalog. Instances already on a layout keep
    /// their place until the layout is restored from a snapshot.
    pub fn retire(&mut self, id: &str) -> Result<WidgetKind> {
        let kind = self
            .map
            .remove(id)
            .ok_or_else(|| DashboardError::kind_not_found(id))?;
        tracing::debug!(kind = %id, "widget kind retired");
        Ok(kind)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Result<&WidgetKind> {
        self.map
            .get(id)
            .ok_or_else(|| DashboardError::kind_not_found(id))
    }

    pub fn list(&self) -> Vec<&WidgetKind> {
        self.map.values().collect()
    }

    /// Kinds with no instance on `layout`, in registration order.
    pub fn list_unplaced(&self, layout: &DashboardLayout) -> Vec<&WidgetKind> {
        self.map
            .values()
            .filter(|kind| !layout.has_kind(&kind.id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::mode::Mode;

    struct Blank;

    impl Widget for Blank {
        fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
            Vec::new()
        }
    }

    fn ids(kinds: &[&WidgetKind]) -> Vec<String> {
        kinds.iter().map(|k| k.id.clone()).collect()
    }

    #[test]
    fn defaults_keep_registration_order() {
        let reg = WidgetRegistry::with_defaults();
        assert_eq!(
            ids(&reg.list()),
            vec![
                "system-monitor",
                "weather",
                "quick-actions",
                "recent-activity",
                "performance-overview"
            ]
        );
        assert_eq!(reg.get("system-monitor").unwrap().footprint, Footprint::new(2, 2));
        assert_eq!(reg.get("weather").unwrap().footprint, Footprint::new(1, 1));
        assert_eq!(reg.len(), 5);
    }

    #[test]
    fn built_in_kinds_register_cleanly() {
        let mut fresh = WidgetRegistry::default();
        for kind in WidgetRegistry::with_defaults().list() {
            fresh.register(kind.clone()).unwrap();
        }
        assert_eq!(fresh.len(), 5);
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut reg = WidgetRegistry::default();
        reg.register(WidgetKind::new("a", "A", Footprint::new(1, 1), Blank))
            .unwrap();
        let err = reg
            .register(WidgetKind::new("a", "Other", Footprint::new(2, 2), Blank))
            .unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateKind(id) if id == "a"));
        assert_eq!(reg.get("a").unwrap().name, "A");
    }

    #[test]
    fn empty_footprint_is_refused() {
        let mut reg = WidgetRegistry::default();
        assert!(reg
            .register(WidgetKind::new("flat", "Flat", Footprint::new(3, 0), Blank))
            .is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn unknown_kind_is_not_found() {
        let reg = WidgetRegistry::with_defaults();
        assert!(matches!(
            reg.get("clock"),
            Err(DashboardError::NotFound { .. })
        ));
    }

    #[test]
    fn unplaced_excludes_placed_kinds() {
        let reg = WidgetRegistry::with_defaults();
        let mut layout = DashboardLayout::new(3);
        layout
            .add_widget(&reg, Mode::Customizing, "weather")
            .unwrap();
        let unplaced = ids(&reg.list_unplaced(&layout));
        assert!(!unplaced.contains(&"weather".to_string()));
        assert_eq!(unplaced.len(), reg.len() - 1);
        assert_eq!(unplaced[0], "system-monitor");
    }

    #[test]
    fn retire_removes_from_catalog() {
        let mut reg = WidgetRegistry::with_defaults();
        let kind = reg.retire("weather").unwrap();
        assert_eq!(kind.id, "weather");
        assert!(!reg.contains("weather"));
        assert!(reg.retire("weather").is_err());
    }

    #[test]
    fn size_classes_map_to_footprints() {
        assert_eq!(WidgetSize::Small.footprint(), Footprint::new(1, 1));
        assert_eq!(WidgetSize::Medium.footprint(), Footprint::new(1, 1));
        assert_eq!(WidgetSize::Large.footprint(), Footprint::new(2, 2));
        assert_eq!(WidgetSize::Large.as_str(), "large");
    }
}
