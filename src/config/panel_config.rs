use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::EmonitorError;
use crate::plugin::ConfigLine;

/// Переменная окружения с явным путём к конфигурации
pub const CONFIG_ENV: &str = "HYPRLINE_EMONITOR_CONFIG";

/// Позиция виджета на панели
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetPosition {
    Left,
    Center,
    #[default]
    Right,
}

/// Край экрана, к которому прикреплена панель
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelEdge {
    #[default]
    Top,
    Bottom,
}

/// Описание одного плагина в конфигурации панели
#[derive(Debug, Clone, Deserialize)]
pub struct PluginEntry {
    #[serde(rename = "type")]
    pub plugin_type: String,
    #[serde(default)]
    pub position: WidgetPosition,
    #[serde(default)]
    pub config: Map<String, Value>,
}

impl PluginEntry {
    /// Переводит JSON-объект в строки блока конфигурации плагина
    pub fn config_lines(&self) -> Vec<ConfigLine> {
        self.config
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => ConfigLine::var(key, s),
                Value::Number(n) => ConfigLine::var(key, number_to_string(n)),
                Value::Bool(b) => ConfigLine::var(key, b.to_string()),
                Value::Object(_) | Value::Array(_) => ConfigLine::Block(key.clone()),
                Value::Null => ConfigLine::Illegal(key.clone()),
            })
            .collect()
    }
}

/// Целые числа, записанные как `1500.0`, передаются плагину как `1500`
fn number_to_string(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
        _ => n.to_string(),
    }
}

/// Пустое значение переменной окружения считается неустановленным
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Конфигурация панели
#[derive(Debug, Clone, Deserialize)]
pub struct PanelConfig {
    #[serde(default)]
    pub edge: PanelEdge,
    #[serde(default)]
    pub plugins: Vec<PluginEntry>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        let mut config = Map::new();
        config.insert("UpdateInterval".into(), Value::from(1000));
        config.insert("ExternalCommand".into(), Value::from("date +%H:%M"));

        Self {
            edge: PanelEdge::Top,
            plugins: vec![PluginEntry {
                plugin_type: "emonitor".into(),
                position: WidgetPosition::Right,
                config,
            }],
        }
    }
}

impl PanelConfig {
    /// Путь к файлу конфигурации
    pub fn config_path() -> PathBuf {
        Self::resolve_config_path(
            non_empty_var(CONFIG_ENV),
            non_empty_var("XDG_CONFIG_HOME"),
            non_empty_var("HOME"),
        )
    }

    fn resolve_config_path(explicit: Option<String>, xdg_config: Option<String>, home: Option<String>) -> PathBuf {
        if let Some(path) = explicit {
            return PathBuf::from(path);
        }

        let config_dir = xdg_config.map(PathBuf::from).unwrap_or_else(|| {
            PathBuf::from(home.unwrap_or_else(|| ".".to_string())).join(".config")
        });

        config_dir.join("hyprline/emonitor.json")
    }

    /// Загрузить конфигурацию, при любой ошибке используется конфигурация по умолчанию
    pub fn load() -> Self {
        let path = Self::config_path();

        if path.exists() {
            match Self::load_from(&path) {
                Ok(config) => {
                    info!("Loaded panel config from {:?}", path);
                    return config;
                }
                Err(e) => warn!("{}", e),
            }
        }

        info!("Using default panel configuration");
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, EmonitorError> {
        let content = fs::read_to_string(path).map_err(|source| EmonitorError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }

    /// Плагины для указанной позиции в порядке объявления
    pub fn plugins_for_position(&self, position: WidgetPosition) -> impl Iterator<Item = &PluginEntry> {
        self.plugins.iter().filter(move |p| p.position == position)
    }
}
