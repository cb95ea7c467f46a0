use std::io;
use std::sync::Mutex;

use crate::domain::command_service::CommandService;
use crate::error::EmonitorError;

/// Подменный CommandService для тестов
#[derive(Default)]
pub struct FakeCommands {
    output: Mutex<Option<String>>,
    fail_next_poll: Mutex<bool>,
    fail_spawns: Mutex<bool>,
    polled: Mutex<Vec<String>>,
    last_max_len: Mutex<Option<usize>>,
    spawned: Mutex<Vec<String>>,
}

impl FakeCommands {
    pub fn with_output(output: &str) -> Self {
        let fake = Self::default();
        fake.set_output(Some(output));
        fake
    }

    pub fn set_output(&self, output: Option<&str>) {
        *self.output.lock().unwrap() = output.map(str::to_string);
    }

    pub fn fail_next_poll(&self) {
        *self.fail_next_poll.lock().unwrap() = true;
    }

    pub fn fail_spawns(&self) {
        *self.fail_spawns.lock().unwrap() = true;
    }

    pub fn polled(&self) -> Vec<String> {
        self.polled.lock().unwrap().clone()
    }

    pub fn last_max_len(&self) -> Option<usize> {
        *self.last_max_len.lock().unwrap()
    }

    pub fn spawned(&self) -> Vec<String> {
        self.spawned.lock().unwrap().clone()
    }
}

fn not_found(command: &str) -> EmonitorError {
    EmonitorError::Spawn {
        command: command.to_string(),
        source: io::Error::from(io::ErrorKind::NotFound),
    }
}

impl CommandService for FakeCommands {
    fn read_first_line(&self, command: &str, max_len: usize) -> Result<Option<String>, EmonitorError> {
        self.polled.lock().unwrap().push(command.to_string());
        *self.last_max_len.lock().unwrap() = Some(max_len);

        if std::mem::take(&mut *self.fail_next_poll.lock().unwrap()) {
            return Err(not_found(command));
        }
        Ok(self.output.lock().unwrap().clone())
    }

    fn spawn_detached(&self, command: &str) -> Result<(), EmonitorError> {
        if *self.fail_spawns.lock().unwrap() {
            return Err(not_found(command));
        }
        self.spawned.lock().unwrap().push(command.to_string());
        Ok(())
    }
}
