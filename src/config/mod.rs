pub mod emonitor_config;
pub mod panel_config;

pub use emonitor_config::EmonitorConfig;
pub use panel_config::{PanelConfig, PanelEdge, PluginEntry, WidgetPosition};
