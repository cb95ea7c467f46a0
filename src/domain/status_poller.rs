use std::sync::Arc;

use log::{debug, warn};

use crate::domain::command_service::CommandService;
use crate::domain::status::{rtrim, StatusBuffer, STATUS_MAX_LENGTH};
use crate::error::EmonitorError;

/// Результат одного запуска внешней команды
pub type PollOutcome = Result<Option<String>, EmonitorError>;

/// Опрашивает внешнюю команду и хранит последний статус.
///
/// Запуск команды и применение результата разделены: `fetch_job` можно
/// выполнить в рабочем потоке, а `apply` вызывается в потоке GTK.
pub struct StatusPoller {
    command: String,
    commands: Arc<dyn CommandService + Send + Sync>,
    status: StatusBuffer,
}

impl StatusPoller {
    pub fn new(command: impl Into<String>, commands: Arc<dyn CommandService + Send + Sync>) -> Self {
        Self {
            command: command.into(),
            commands,
            status: StatusBuffer::new(),
        }
    }

    pub fn status(&self) -> &str {
        self.status.as_str()
    }

    /// Задача для рабочего потока: запускает команду и читает первую строку
    pub fn fetch_job(&self) -> impl FnOnce() -> PollOutcome + Send + 'static {
        let command = self.command.clone();
        let commands = Arc::clone(&self.commands);
        move || commands.read_first_line(&command, STATUS_MAX_LENGTH - 1)
    }

    /// Применяет результат опроса. При ошибке статус не меняется.
    /// Возвращает true, если текст статуса изменился.
    pub fn apply(&mut self, outcome: PollOutcome) -> bool {
        match outcome {
            Ok(Some(line)) => self.status.set(rtrim(&line)),
            Ok(None) => {
                debug!("emonitor: {:?} produced no output", self.command);
                false
            }
            Err(e) => {
                warn!("emonitor: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::FakeCommands;

    fn poll(poller: &mut StatusPoller) -> bool {
        let outcome = poller.fetch_job()();
        poller.apply(outcome)
    }

    #[test]
    fn trailing_whitespace_is_stripped() {
        let fake = Arc::new(FakeCommands::with_output("42% \n"));
        let mut poller = StatusPoller::new("battery", fake.clone());

        assert!(poll(&mut poller));
        assert_eq!(poller.status(), "42%");
        assert_eq!(fake.polled(), vec!["battery".to_string()]);
    }

    #[test]
    fn failed_spawn_keeps_previous_status() {
        let fake = Arc::new(FakeCommands::with_output("ok\n"));
        let mut poller = StatusPoller::new("status", fake.clone());
        poll(&mut poller);

        fake.fail_next_poll();
        assert!(!poll(&mut poller));
        assert_eq!(poller.status(), "ok");
    }

    #[test]
    fn empty_output_keeps_previous_status() {
        let fake = Arc::new(FakeCommands::with_output("up\n"));
        let mut poller = StatusPoller::new("status", fake.clone());
        poll(&mut poller);

        fake.set_output(None);
        assert!(!poll(&mut poller));
        assert_eq!(poller.status(), "up");
    }

    #[test]
    fn whitespace_only_line_clears_status() {
        let fake = Arc::new(FakeCommands::with_output("up\n"));
        let mut poller = StatusPoller::new("status", fake.clone());
        poll(&mut poller);

        fake.set_output(Some("   \n"));
        assert!(poll(&mut poller));
        assert_eq!(poller.status(), "");
    }

    #[test]
    fn job_requests_bounded_read() {
        let fake = Arc::new(FakeCommands::with_output("x"));
        let poller = StatusPoller::new("status", fake.clone());
        let _ = poller.fetch_job()();

        assert_eq!(fake.last_max_len(), Some(STATUS_MAX_LENGTH - 1));
    }
}
