use std::sync::Arc;

use crate::domain::command_service::CommandService;
use crate::error::EmonitorError;
use crate::ui::emonitor::EMONITOR_PLUGIN_CLASS;

/// Строка блока конфигурации плагина
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// `key = value`
    Var { key: String, value: String },
    /// Вложенный блок
    Block(String),
    /// Нераспознанная строка
    Illegal(String),
}

impl ConfigLine {
    pub fn var(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Var {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// То, что панель передаёт конструктору плагина
#[derive(Clone)]
pub struct PluginContext {
    pub config: Vec<ConfigLine>,
    pub commands: Arc<dyn CommandService + Send + Sync>,
}

/// Экземпляр плагина, встроенный в панель
pub trait PanelPlugin {
    /// Виджет, который панель размещает в своей зоне
    fn widget(&self) -> &gtk4::Widget;

    /// Останавливает таймеры и убирает виджет из панели.
    /// Повторный вызов ничего не делает.
    fn destruct(&mut self);
}

pub type PluginConstructor = fn(&PluginContext) -> Result<Box<dyn PanelPlugin>, EmonitorError>;

/// Описание типа плагина
pub struct PluginClass {
    pub type_name: &'static str,
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub constructor: PluginConstructor,
}

/// Все известные панели типы плагинов
pub static PLUGIN_CLASSES: &[&PluginClass] = &[&EMONITOR_PLUGIN_CLASS];

/// Ищет класс плагина по имени типа (без учёта регистра)
pub fn find_class(type_name: &str) -> Result<&'static PluginClass, EmonitorError> {
    PLUGIN_CLASSES
        .iter()
        .copied()
        .find(|class| class.type_name.eq_ignore_ascii_case(type_name))
        .ok_or_else(|| EmonitorError::UnknownPluginType(type_name.to_string()))
}
