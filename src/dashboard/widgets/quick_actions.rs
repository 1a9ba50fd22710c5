use super::{Widget, WidgetContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickActionsConfig {
    pub actions: Vec<String>,
}

impl Default for QuickActionsConfig {
    fn default() -> Self {
        Self {
            actions: vec![
                "Start focus session".into(),
                "Check inventory".into(),
                "Generate report".into(),
                "Ask assistant".into(),
            ],
        }
    }
}

#[derive(Default)]
pub struct QuickActionsWidget {
    cfg: QuickActionsConfig,
}

impl QuickActionsWidget {
    pub fn new(cfg: QuickActionsConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for QuickActionsWidget {
    fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
        let mut lines = vec!["Quick Actions".to_string()];
        lines.extend(self.cfg.actions.iter().map(|a| format!("> {a}")));
        lines
    }
}
