use super::{Widget, WidgetContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub location: String,
    pub temperature_c: i32,
    pub condition: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            location: "London".into(),
            temperature_c: 18,
            condition: "Partly cloudy".into(),
        }
    }
}

#[derive(Default)]
pub struct WeatherWidget {
    cfg: WeatherConfig,
}

impl WeatherWidget {
    pub fn new(cfg: WeatherConfig) -> Self {
        Self { cfg }
    }
}

impl Widget for WeatherWidget {
    fn render(&self, _ctx: &WidgetContext<'_>) -> Vec<String> {
        vec![
            format!("Weather: {}", self.cfg.location),
            format!("{}°C, {}", self.cfg.temperature_c, self.cfg.condition),
        ]
    }
}
