use super::{Widget, WidgetContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceOverviewConfig {
    pub metrics: Vec<(String, f32)>,
}

impl Default for PerformanceOverviewConfig {
    fn default() -> Self {
        Self {
            metrics: vec![
                ("Productivity".into(), 87.0),
                ("Study streak (days)".into(), 12.0),
                ("Monthly profit".into(), 2450.0),
                ("Goals completed".into(), 73.0),
            ],
        }
    }
}

#[derive(Default)]
pub struct PerformanceOverviewWidget {
    cfg: PerformanceOverviewConfig,
}

impl PerformanceOverviewWidget {
    pub fn new(cfg: PerformanceOverviewConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for PerformanceOverviewWidget {
    fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
        let label_width = self
            .cfg
            .metrics
            .iter()
            .map(|(label, _)| label.len())
            .max()
            .unwrap_or(0);
        let mut lines = vec!["Performance Overview".to_string()];
        for (label, value) in &self.cfg.metrics {
            lines.push(format!("{label:<label_width$}  {value:>8.1}"));
        }
        lines
    }
}
