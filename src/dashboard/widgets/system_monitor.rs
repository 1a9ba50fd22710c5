use super::{Widget, WidgetContext};
use serde::{Deserialize, Serialize};

/// Latest system readings, supplied by whoever owns the data source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMonitorConfig {
    pub cpu_percent: u8,
    pub memory_percent: u8,
    pub disk_percent: u8,
    pub network_mbps: f32,
}

impl Default for SystemMonitorConfig {
    fn default() -> Self {
        Self {
            cpu_percent: 34,
            memory_percent: 61,
            disk_percent: 47,
            network_mbps: 12.5,
        }
    }
}

#[derive(Default)]
pub struct SystemMonitorWidget {
    cfg: SystemMonitorConfig,
}

impl SystemMonitorWidget {
    pub fn new(cfg: SystemMonitorConfig) -> Self {
        Self { cfg }
    }
}

fn bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

impl Widget for SystemMonitorWidget {
    fn render(&self, ctx: &WidgetContext<'_>) -> Vec<String> {
        // Wider slots get longer bars.
        let width = 10 * ctx.footprint.width;
        vec![
            "System Monitor".to_string(),
            format!("CPU    {} {:>3}%", bar(self.cfg.cpu_percent, width), self.cfg.cpu_percent),
            format!(
                "Memory {} {:>3}%",
                bar(self.cfg.memory_percent, width),
                self.cfg.memory_percent
            ),
            format!("Disk   {} {:>3}%", bar(self.cfg.disk_percent, width), self.cfg.disk_percent),
            format!("Network {:.1} Mbps", self.cfg.network_mbps),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::planner::Footprint;

    #[test]
    fn bars_scale_with_footprint() {
        let widget = SystemMonitorWidget::default();
        let ctx = WidgetContext {
            instance_id: "a",
            footprint: Footprint::new(2, 2),
        };
        let lines = widget.render(&ctx);
        assert!(lines[1].contains(&format!("[{}", "#".repeat(6))));
        assert!(lines[1].ends_with(" 34%"));
    }

    #[test]
    fn bar_clamps_overflow() {
        assert_eq!(bar(150, 4), "[####]");
        assert_eq!(bar(0, 3), "[...]");
    }
}
