use super::{Widget, WidgetContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub title: String,
    pub when: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentActivityConfig {
    pub entries: Vec<ActivityEntry>,
    pub limit: usize,
}

impl Default for RecentActivityConfig {
    fn default() -> Self {
        let entry = |title: &str, when: &str| ActivityEntry {
            title: title.into(),
            when: when.into(),
        };
        Self {
            entries: vec![
                entry("Completed study session", "5 min ago"),
                entry("Listed 3 new items", "1 hour ago"),
                entry("Weekly report generated", "3 hours ago"),
                entry("Memory bank updated", "yesterday"),
            ],
            limit: 5,
        }
    }
}

#[derive(Default)]
pub struct RecentActivityWidget {
    cfg: RecentActivityConfig,
}

impl RecentActivityWidget {
    pub fn new(cfg: RecentActivityConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for RecentActivityWidget {
    fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
        let mut lines = vec!["Recent Activity".to_string()];
        if self.cfg.entries.is_empty() {
            lines.push("No recent activity".into());
            return lines;
        }
        lines.extend(
            self.cfg
                .entries
                .iter()
                .take(self.cfg.limit)
                .map(|e| format!("- {} ({})", e.title, e.when)),
        );
        lines
    }
}
