pub mod config;
pub mod dashboard;
pub mod error;
pub mod layout;
pub mod mode;
pub mod planner;
pub mod widgets;

pub use config::{JsonFilePersistence, LayoutPersistence, LayoutSnapshot, MemoryPersistence};
pub use dashboard::DashboardSession;
pub use error::DashboardError;
pub use layout::{DashboardLayout, WidgetInstance};
pub use mode::Mode;
pub use planner::{Footprint, GridPos};
pub use widgets::{Widget, WidgetKind, WidgetRegistry, WidgetSize};
