use crate::error::EmonitorError;

/// Запуск внешних команд через shell
pub trait CommandService {
    /// Запускает команду и читает первую строку её stdout (не более `max_len` байт).
    /// `None`, если команда ничего не вывела.
    fn read_first_line(&self, command: &str, max_len: usize) -> Result<Option<String>, EmonitorError>;

    /// Запускает команду в фоне, не дожидаясь завершения
    fn spawn_detached(&self, command: &str) -> Result<(), EmonitorError>;
}
