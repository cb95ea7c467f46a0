use std::sync::Arc;

use log::{debug, warn};

use crate::domain::command_service::CommandService;

/// Запускает команду по клику на виджет
pub struct ClickHandler {
    command: Option<String>,
    commands: Arc<dyn CommandService + Send + Sync>,
}

impl ClickHandler {
    pub fn new(command: Option<String>, commands: Arc<dyn CommandService + Send + Sync>) -> Self {
        // Пустая команда эквивалентна отсутствию команды
        let command = command.filter(|c| !c.trim().is_empty());
        Self { command, commands }
    }

    /// Возвращает true, если команда была запущена
    pub fn handle(&self) -> bool {
        let Some(command) = self.command.as_deref() else {
            return false;
        };

        match self.commands.spawn_detached(command) {
            Ok(()) => {
                debug!("emonitor: started {:?}", command);
                true
            }
            Err(e) => {
                warn!("emonitor: {}", e);
                false
            }
        }
    }
}
